//! Parameter types configuring the landmark heuristics.
//!
//! One struct per stage, grouped under [`DetectorParams`]. Defaults encode
//! the survey-calibrated windows and thresholds; the windows are sample
//! counts, the thresholds are elevation deltas in the profile's vertical
//! unit.

use serde::{Deserialize, Serialize};

/// Detector-wide parameters for the four chained stages.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    pub shore: ShoreParams,
    pub crest: CrestParams,
    pub heel: HeelParams,
}

/// Shoreline search: first strictly positive running-maximum position
/// whose upcoming slopes stay non-negative.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ShoreParams {
    /// Forward slope window (current slope inclusive) that must be
    /// entirely non-negative.
    pub slope_window: usize,
}

impl Default for ShoreParams {
    fn default() -> Self {
        Self { slope_window: 5 }
    }
}

/// Dune crest search beyond the shoreline.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CrestParams {
    /// Required elevation gain over the minimum of the next `rise_window`
    /// samples.
    pub min_rise: f64,
    pub rise_window: usize,
    /// The candidate must top every sample in this forward window.
    pub lookahead_window: usize,
}

impl Default for CrestParams {
    fn default() -> Self {
        Self {
            min_rise: 0.6,
            rise_window: 20,
            lookahead_window: 10,
        }
    }
}

/// Dune heel search beyond the crest. The three exclusion conditions mark
/// positions still on a dune feature; the heel is the lowest remaining
/// position.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HeelParams {
    /// Elevation drop over the next `drop_window` samples that marks a
    /// dune face.
    pub min_drop: f64,
    pub drop_window: usize,
    /// Trailing window the candidate must top to count as a local summit.
    pub back_window: usize,
    /// Forward window the candidate must top to count as a local summit.
    pub forward_window: usize,
}

impl Default for HeelParams {
    fn default() -> Self {
        Self {
            min_drop: 0.6,
            drop_window: 10,
            back_window: 10,
            forward_window: 20,
        }
    }
}
