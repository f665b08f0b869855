//! Landmark detector: four chained, windowed heuristics over one profile.
//!
//! Overview
//! - **Shore** anchors the chain: the first strictly positive running
//!   maximum whose upcoming slopes stay non-negative.
//! - **Crest** scans beyond the shore for the first running maximum with a
//!   pronounced rise over the next 20 samples that also tops the next 10.
//! - **Toe** fits a least-squares cubic between shore and crest and takes
//!   the deepest negative residual, rejecting range endpoints.
//! - **Heel** scans beyond the crest, masks positions still on a dune
//!   feature, and takes the lowest remaining elevation.
//!
//! Modules
//! - [`params`] – per-stage configuration used by the detector and CLI.
//! - `pipeline` – the [`DuneDetector`] implementation.
//! - `window` – linear-time rolling extrema (monotonic deque).
//! - `polyfit` – the cubic least-squares fit behind the toe stage.
//!
//! Key ideas
//! - Detection is order-sensitive: each stage searches only the region its
//!   predecessor delimits, and the first qualifying position wins.
//! - Any stage failing invalidates the whole profile; there are no partial
//!   feature sets.
//! - Windows that leave the sampled range, or that contain non-finite
//!   values, never qualify and never raise errors.

pub mod params;
mod pipeline;
mod polyfit;
mod window;

pub use params::{CrestParams, DetectorParams, HeelParams, ShoreParams};
pub use pipeline::DuneDetector;
pub use polyfit::{eval_cubic, fit_cubic};
