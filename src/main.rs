use anyhow::{Context, Result};
use clap::Parser;
use humansize::{BINARY, format_size};
use indicatif::{ProgressBar, ProgressStyle};
use leftovers::config::load_manifest;
use leftovers::{
    HostPolicy, OrphanScanner, QuestionableNames, RootDirectory, ScanConfiguration, SweepOutcome,
    SweepScanner,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Finds and scores orphaned directories left behind under
/// program-install roots. Reports only, never removes anything.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Root directories to sweep ("Program Files"-like trees)
    #[arg(required = true)]
    roots: Vec<PathBuf>,

    /// Installed-applications manifest, one per line:
    /// display name|publisher|install location|uninstaller location
    #[arg(short, long, value_name = "FILE")]
    apps: Option<PathBuf>,

    /// Classify only the immediate subdirectories of each root
    #[arg(long)]
    no_recurse: bool,

    /// Abort on the first unreadable subtree instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Only report candidates scoring at least this much
    #[arg(long, value_name = "SCORE", allow_negative_numbers = true)]
    min_score: Option<i32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let entries = match &cli.apps {
        Some(path) => load_manifest(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?,
        None => Vec::new(),
    };

    let roots: Vec<RootDirectory> = cli
        .roots
        .iter()
        .map(|path| RootDirectory {
            path: path.clone(),
            recurse: !cli.no_recurse,
        })
        .collect();

    let scanner = OrphanScanner {
        config: ScanConfiguration::build(roots, &entries),
        policy: HostPolicy,
        questionable_names: QuestionableNames::load(),
        strict: cli.strict,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {pos} candidates found")?);
    let on_progress = || spinner.inc(1);
    let outcome = scanner.sweep(Some(&on_progress))?;
    spinner.finish_and_clear();

    println!("{}:", scanner.category_label());
    print_report(&outcome, cli.min_score);
    Ok(())
}

fn print_report(outcome: &SweepOutcome, min_score: Option<i32>) {
    let mut candidates: Vec<_> = outcome
        .candidates
        .iter()
        .filter(|candidate| min_score.is_none_or(|min| candidate.score() >= min))
        .collect();
    candidates.sort_by(|a, b| {
        b.score()
            .cmp(&a.score())
            .then_with(|| a.path.cmp(&b.path))
    });

    for candidate in &candidates {
        let reasons: Vec<&str> = candidate
            .confidence
            .iter()
            .map(|record| record.reason.label())
            .collect();
        println!(
            "{:>5}  {:>10}  {}",
            candidate.score(),
            format_size(candidate.size_bytes, BINARY),
            candidate.path.display()
        );
        println!("       {}", reasons.join(", "));
    }

    println!();
    println!(
        "{} candidate(s), {} unreadable subtree(s)",
        candidates.len(),
        outcome.failures.len()
    );
    for failure in &outcome.failures {
        println!("  skipped {}: {}", failure.path.display(), failure.message);
    }
}
