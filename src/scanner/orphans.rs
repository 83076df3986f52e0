use crate::config::{RootDirectory, ScanConfiguration};
use crate::constants::{MANY_FILES_THRESHOLD, MAX_NESTING_LEVEL};
use crate::matching;
use crate::model::{ConfidenceRecord, JunkCandidate, ScanFailure, SweepOutcome};
use crate::policy::SystemPolicy;
use crate::questionable::QuestionableNames;
use crate::scanner::utils::{list_directory, take_census};
use crate::scanner::{ScanError, SweepScanner};
use rayon::prelude::*;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Scores directories left behind under the configured install roots after
/// their applications are gone.
///
/// A plain value over its inputs: sweeps can be repeated and each one
/// re-reads the filesystem from scratch.
pub struct OrphanScanner<P> {
    pub config: ScanConfiguration,
    pub policy: P,
    pub questionable_names: QuestionableNames,
    /// Propagate the first subtree failure instead of recording it. Meant
    /// for debugging builds; the relaxed default never aborts a sweep.
    pub strict: bool,
}

impl<P: SystemPolicy> OrphanScanner<P> {
    pub fn new(config: ScanConfiguration, policy: P) -> Self {
        Self {
            config,
            policy,
            questionable_names: QuestionableNames::defaults(),
            strict: false,
        }
    }

    /// Sweeps every configured root and returns the scored candidates
    /// together with the subtrees that could not be read. Roots are
    /// independent, so they are swept in parallel and collected in input
    /// order. Only returns `Err` in strict mode.
    pub fn find_all_junk(
        &self,
        progress_cb: Option<&(dyn Fn() + Sync)>,
    ) -> Result<SweepOutcome, ScanError> {
        let per_root: Result<Vec<_>, ScanError> = self
            .config
            .roots()
            .par_iter()
            .map(|root| self.scan_root(root, progress_cb))
            .collect();

        let mut outcome = SweepOutcome::default();
        for (candidates, failures) in per_root? {
            outcome.candidates.extend(candidates);
            outcome.failures.extend(failures);
        }
        Ok(outcome)
    }

    fn scan_root(
        &self,
        root: &RootDirectory,
        progress_cb: Option<&(dyn Fn() + Sync)>,
    ) -> Result<(Vec<JunkCandidate>, Vec<ScanFailure>), ScanError> {
        let mut candidates = Vec::new();
        let mut failures = Vec::new();
        self.scan_directory(
            &root.path,
            0,
            root.recurse,
            &mut candidates,
            &mut failures,
            progress_cb,
        )?;
        Ok((candidates, failures))
    }

    fn scan_directory(
        &self,
        parent: &Path,
        level: i32,
        recurse: bool,
        out: &mut Vec<JunkCandidate>,
        failures: &mut Vec<ScanFailure>,
        progress_cb: Option<&(dyn Fn() + Sync)>,
    ) -> Result<(), ScanError> {
        if self.policy.has_system_attribute(parent) {
            return Ok(());
        }

        let listing = match list_directory(parent) {
            Ok(listing) => listing,
            Err(err) => return self.subtree_failed(parent, err, failures),
        };

        for subdirectory in listing.subdirectories {
            self.classify(&subdirectory, level, recurse, out, failures, progress_cb)?;
        }
        Ok(())
    }

    fn classify(
        &self,
        dir: &Path,
        level: i32,
        recurse: bool,
        out: &mut Vec<JunkCandidate>,
        failures: &mut Vec<ScanFailure>,
        progress_cb: Option<&(dyn Fn() + Sync)>,
    ) -> Result<(), ScanError> {
        if self.policy.is_system_directory(dir) {
            return Ok(());
        }
        let path_text = dir.to_string_lossy();
        if matching::contains_any(&path_text, self.config.install_locations()) {
            debug!(path = %dir.display(), "inside a known install location, skipping");
            return Ok(());
        }

        let name = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let questionable_name = self.questionable_names.matches(&name);
        let name_in_use = matching::contains_any(&name, self.config.application_names());

        let surveyed = list_directory(dir)
            .and_then(|listing| take_census(dir, &self.policy).map(|census| (listing, census)));
        let (listing, census) = match surveyed {
            Ok(pair) => pair,
            Err(err) => return self.subtree_failed(dir, err, failures),
        };

        let base = if listing.files > 0 {
            // Files right here make this the most specific candidate, there
            // is nothing more to gain below it.
            classify_files(census.has_executable)
        } else if census.files == 0 {
            ConfidenceRecord::EMPTY_FOLDER
        } else {
            // Empty at this level but files further down. Descend once to
            // look for a more specific candidate nested inside.
            if level < MAX_NESTING_LEVEL && recurse && !questionable_name && !name_in_use {
                self.scan_directory(dir, level + 1, recurse, out, failures, progress_cb)?;
            }
            classify_files(census.has_executable)
        };

        let mut confidence = vec![base];
        if matching::contains_any(&name, self.config.publisher_names()) {
            confidence.push(ConfidenceRecord::PUBLISHER_IN_USE);
        }
        if name_in_use {
            confidence.push(ConfidenceRecord::NAME_IN_USE);
        }
        if questionable_name {
            confidence.push(ConfidenceRecord::QUESTIONABLE_NAME);
        }
        if census.files > MANY_FILES_THRESHOLD {
            confidence.push(ConfidenceRecord::MANY_FILES_PRESENT);
        }
        confidence.push(ConfidenceRecord::nested_depth(level));
        if listing.subdirectories.is_empty() {
            confidence.push(ConfidenceRecord::NO_SUBDIRECTORIES);
        }

        out.push(JunkCandidate {
            path: dir.to_path_buf(),
            size_bytes: census.bytes,
            confidence,
        });
        if let Some(cb) = progress_cb {
            cb();
        }
        Ok(())
    }

    fn subtree_failed(
        &self,
        path: &Path,
        err: io::Error,
        failures: &mut Vec<ScanFailure>,
    ) -> Result<(), ScanError> {
        if self.strict {
            return Err(ScanError::Subtree {
                path: path.to_path_buf(),
                source: err,
            });
        }
        warn!(path = %path.display(), error = %err, "skipping unreadable subtree");
        failures.push(ScanFailure {
            path: path.to_path_buf(),
            message: err.to_string(),
        });
        Ok(())
    }
}

fn classify_files(has_executable: bool) -> ConfidenceRecord {
    if has_executable {
        ConfidenceRecord::EXECUTABLES_PRESENT
    } else {
        ConfidenceRecord::FILES_PRESENT
    }
}

impl<P: SystemPolicy> SweepScanner for OrphanScanner<P> {
    fn category_label(&self) -> &'static str {
        "Program files orphans"
    }

    fn sweep(&self, progress_cb: Option<&(dyn Fn() + Sync)>) -> Result<SweepOutcome, ScanError> {
        self.find_all_junk(progress_cb)
    }
}
