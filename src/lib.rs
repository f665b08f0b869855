#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod aggregate;
pub mod batch;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod metrics;
pub mod profile;
pub mod report;
pub mod types;

// Config loading for the CLI; public so external tools can reuse it.
pub mod config;

// --- High-level re-exports -------------------------------------------------

// Main entry points: per-profile detector + whole-store batch.
pub use crate::batch::{run_batch, RunOutput, RunParams};
pub use crate::detector::{DetectorParams, DuneDetector};
pub use crate::types::{Detection, FeatureSet, Landmark, LandmarkKind};

// Derived records and aggregation knobs.
pub use crate::aggregate::FilterParams;
pub use crate::metrics::{compute_metrics, BeachMetrics};
pub use crate::profile::{Profile, ProfileKey, ProfileStore, Sample};

/// Small prelude for quick experiments.
///
/// ```no_run
/// use dune_detector::prelude::*;
///
/// # fn main() {
/// let profile = Profile::new(
///     ProfileKey { region: 29, segment: 1, line: 1 },
///     vec![Sample { x: 0.0, y: -1.0 }, Sample { x: 1.0, y: 0.5 }],
/// );
/// let detector = DuneDetector::new(DetectorParams::default());
/// let outcome = detector.detect(&profile);
/// println!("complete={}", outcome.is_complete());
/// # }
/// ```
pub mod prelude {
    pub use crate::batch::{run_batch, RunParams};
    pub use crate::profile::{Profile, ProfileKey, ProfileStore, Sample};
    pub use crate::{Detection, DetectorParams, DuneDetector, FeatureSet};
}
