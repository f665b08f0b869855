//! Profile store: ordered, grouped (distance, elevation) samples keyed by
//! region / segment / profile line.
//!
//! The store is the only input to the detection pipeline. It guarantees the
//! contract the detector relies on: samples within a profile are sorted by
//! increasing distance with exact-duplicate distances removed. Violations
//! that survive (e.g. equal x with different y in the raw data) are
//! undefined behavior for the detector and are not repaired here.

mod io;

pub use io::read_segment_csvs;

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity triple of one cross-shore transect.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ProfileKey {
    pub region: u16,
    pub segment: u16,
    pub line: u32,
}

impl fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.region, self.segment, self.line)
    }
}

/// One (distance, elevation) sample.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

/// One cross-shore elevation transect: samples ordered by increasing x.
/// Read-only input to the detector.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Profile {
    pub key: ProfileKey,
    samples: Vec<Sample>,
}

impl Profile {
    /// Builds a profile, sorting samples by x and dropping exact-duplicate
    /// x positions (first occurrence wins).
    pub fn new(key: ProfileKey, mut samples: Vec<Sample>) -> Self {
        samples.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
        samples.dedup_by(|a, b| a.x == b.x);
        Self { key, samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Distance and elevation values as parallel columns.
    pub fn columns(&self) -> (Vec<f64>, Vec<f64>) {
        (
            self.samples.iter().map(|s| s.x).collect(),
            self.samples.iter().map(|s| s.y).collect(),
        )
    }

    /// x coordinate of the first (most seaward) sample.
    pub fn origin_x(&self) -> Option<f64> {
        self.samples.first().map(|s| s.x)
    }
}

/// Ordered collection of profiles. Profiles sharing a (region, segment)
/// pair are contiguous, which the block-averaging stage relies on.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProfileStore {
    profiles: Vec<Profile>,
}

impl ProfileStore {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn get(&self, key: ProfileKey) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.key == key)
    }

    /// Lateral spacing between adjacent parallel transects, used to turn
    /// integrated cross-sections into volumes.
    ///
    /// Estimated as the gap between the first two distinct profiles'
    /// x-origins. When every transect starts at the same origin (the usual
    /// survey layout) that gap is zero, and the estimate falls back to the
    /// gap between the first profile's first two samples, which assumes
    /// the transects were taken from a square grid.
    pub fn profile_spacing(&self) -> f64 {
        if self.profiles.len() >= 2 {
            if let (Some(a), Some(b)) = (self.profiles[0].origin_x(), self.profiles[1].origin_x())
            {
                let gap = (b - a).abs();
                if gap.is_finite() && gap > 0.0 {
                    debug!("profile spacing {} from transect origins", gap);
                    return gap;
                }
            }
        }
        let first = match self.profiles.first() {
            Some(p) => p.samples(),
            None => return f64::NAN,
        };
        if first.len() < 2 {
            return f64::NAN;
        }
        let gap = first[1].x - first[0].x;
        debug!("profile spacing {} from sample grid fallback", gap);
        gap
    }
}
