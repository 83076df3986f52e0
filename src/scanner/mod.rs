pub mod orphans;
pub mod utils;

pub use orphans::OrphanScanner;

use crate::model::SweepOutcome;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Returned in strict mode when a subtree cannot be enumerated. The relaxed
/// default records the failure in the outcome and keeps sweeping.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to scan {}: {source}", path.display())]
    Subtree {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A junk detector that only works as a whole-tree sweep. Orphaned
/// directories belong to no single installed application, so this capability
/// has no per-target variant.
pub trait SweepScanner: Send + Sync {
    /// Label used to group this detector's results in a UI.
    fn category_label(&self) -> &'static str;

    /// Runs the full sweep. `progress_cb` is invoked once per emitted
    /// candidate.
    fn sweep(&self, progress_cb: Option<&(dyn Fn() + Sync)>) -> Result<SweepOutcome, ScanError>;
}
