use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// One installed-application record as reported by the host uninstaller.
#[derive(Debug, Clone, Default)]
pub struct ApplicationEntry {
    pub display_name: Option<String>,
    pub publisher: Option<String>,
    pub install_location: Option<String>,
    pub uninstaller_location: Option<String>,
}

impl ApplicationEntry {
    /// Parses one `|`-separated manifest line,
    /// `display name|publisher|install location|uninstaller location`.
    /// Trailing fields may be omitted.
    pub fn parse_line(line: &str) -> Self {
        let mut fields = line.split('|').map(str::trim);
        let mut field = || fields.next().filter(|f| !f.is_empty()).map(str::to_string);
        Self {
            display_name: field(),
            publisher: field(),
            install_location: field(),
            uninstaller_location: field(),
        }
    }
}

/// Reads an installed-applications manifest, one application per line.
/// Blank lines and `#` comments are skipped.
pub fn load_manifest(path: &Path) -> io::Result<Vec<ApplicationEntry>> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        entries.push(ApplicationEntry::parse_line(trimmed));
    }
    Ok(entries)
}

/// A configured "Program Files"-like tree the sweep starts from.
#[derive(Debug, Clone)]
pub struct RootDirectory {
    pub path: PathBuf,
    /// Whether the sweep may descend one level below this root's
    /// subdirectories.
    pub recurse: bool,
}

/// Snapshot of everything the sweep needs to know about installed software.
/// Built once before scanning, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ScanConfiguration {
    roots: Vec<RootDirectory>,
    install_locations: Vec<String>,
    application_names: Vec<String>,
    publisher_names: Vec<String>,
}

impl ScanConfiguration {
    /// Collects install and uninstaller locations, display names, and
    /// publishers from the application records. Names and publishers of 3
    /// characters or fewer are dropped, they match too much to mean anything.
    /// Performs no filesystem I/O.
    pub fn build(roots: Vec<RootDirectory>, entries: &[ApplicationEntry]) -> Self {
        let install_locations = collect(
            entries.iter().flat_map(|entry| {
                [
                    entry.install_location.as_deref(),
                    entry.uninstaller_location.as_deref(),
                ]
            }),
            0,
        );
        let application_names = collect(entries.iter().map(|e| e.display_name.as_deref()), 3);
        let publisher_names = collect(entries.iter().map(|e| e.publisher.as_deref()), 3);

        Self {
            roots,
            install_locations,
            application_names,
            publisher_names,
        }
    }

    pub fn roots(&self) -> &[RootDirectory] {
        &self.roots
    }

    pub fn install_locations(&self) -> &[String] {
        &self.install_locations
    }

    pub fn application_names(&self) -> &[String] {
        &self.application_names
    }

    pub fn publisher_names(&self) -> &[String] {
        &self.publisher_names
    }
}

/// Trims, drops entries of `min_len` characters or fewer, deduplicates.
fn collect<'a, I>(values: I, min_len: usize) -> Vec<String>
where
    I: Iterator<Item = Option<&'a str>>,
{
    let mut out: Vec<String> = values
        .flatten()
        .map(str::trim)
        .filter(|value| value.chars().count() > min_len)
        .map(str::to_string)
        .collect();
    out.sort_unstable();
    out.dedup();
    out
}
