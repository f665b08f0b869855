//! Morphometrics derived from a complete feature set plus the raw profile.

use crate::profile::{Profile, ProfileKey};
use crate::types::FeatureSet;
use serde::{Deserialize, Serialize};

/// One labeled metrics record, as consumed by the aggregation layer and
/// the result tables.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MetricsRow {
    pub key: ProfileKey,
    pub metrics: BeachMetrics,
}

/// Per-profile beach and dune morphometrics.
///
/// Slopes and the volume ratio propagate non-finite values when a
/// denominator is zero; the plausibility filter removes such rows later,
/// the calculator never guards them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeachMetrics {
    pub dune_height: f64,
    pub beach_width: f64,
    pub dune_toe_elev: f64,
    pub dune_crest_elev: f64,
    pub dune_length: f64,
    pub beach_slope: f64,
    pub dune_slope: f64,
    pub beach_volume: f64,
    pub dune_volume: f64,
    pub bd_ratio: f64,
}

impl BeachMetrics {
    /// Stable column order shared by every result table.
    pub const COLUMNS: [&'static str; 10] = [
        "dune_height",
        "beach_width",
        "dune_toe_elev",
        "dune_crest_elev",
        "dune_length",
        "beach_slope",
        "dune_slope",
        "beach_volume",
        "dune_volume",
        "bd_ratio",
    ];

    pub fn values(&self) -> [f64; 10] {
        [
            self.dune_height,
            self.beach_width,
            self.dune_toe_elev,
            self.dune_crest_elev,
            self.dune_length,
            self.beach_slope,
            self.dune_slope,
            self.beach_volume,
            self.dune_volume,
            self.bd_ratio,
        ]
    }

    pub fn from_values(v: [f64; 10]) -> Self {
        Self {
            dune_height: v[0],
            beach_width: v[1],
            dune_toe_elev: v[2],
            dune_crest_elev: v[3],
            dune_length: v[4],
            beach_slope: v[5],
            dune_slope: v[6],
            beach_volume: v[7],
            dune_volume: v[8],
            bd_ratio: v[9],
        }
    }
}

/// Derives the morphometric record for one profile with resolved
/// landmarks. `spacing` is the lateral distance between adjacent parallel
/// transects (see `ProfileStore::profile_spacing`).
pub fn compute_metrics(profile: &Profile, features: &FeatureSet, spacing: f64) -> BeachMetrics {
    let FeatureSet {
        shore,
        toe,
        crest,
        heel: _,
    } = features;

    let dune_height = crest.y - toe.y;
    let beach_width = toe.x - shore.x;
    let dune_length = crest.x - toe.x;
    let beach_volume = volume(profile, shore.x, toe.x, shore.y, spacing);
    let dune_volume = volume(profile, toe.x, crest.x, toe.y, spacing);

    BeachMetrics {
        dune_height,
        beach_width,
        dune_toe_elev: toe.y,
        dune_crest_elev: crest.y,
        dune_length,
        beach_slope: (toe.y - shore.y) / beach_width,
        dune_slope: dune_height / dune_length,
        beach_volume,
        dune_volume,
        bd_ratio: dune_volume / beach_volume,
    }
}

/// Approximate volume of sand between two cross-shore positions, relative
/// to `base` elevation: the trapezoidal integral of (elevation - base)
/// over the closed x-range, times the lateral transect spacing. Reversing
/// the bound order negates the result.
pub fn volume(profile: &Profile, start_x: f64, end_x: f64, base: f64, spacing: f64) -> f64 {
    if start_x > end_x {
        return -volume(profile, end_x, start_x, base, spacing);
    }
    let section: Vec<(f64, f64)> = profile
        .samples()
        .iter()
        .filter(|s| s.x >= start_x && s.x <= end_x)
        .map(|s| (s.x, s.y - base))
        .collect();

    let mut area = 0.0;
    for pair in section.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        area += 0.5 * (y0 + y1) * (x1 - x0);
    }
    area * spacing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Profile, ProfileKey, Sample};
    use crate::types::Landmark;

    fn profile(samples: Vec<(f64, f64)>) -> Profile {
        Profile::new(
            ProfileKey {
                region: 29,
                segment: 1,
                line: 1,
            },
            samples.into_iter().map(|(x, y)| Sample { x, y }).collect(),
        )
    }

    #[test]
    fn flat_profile_volume_against_its_own_base_is_zero() {
        let p = profile(vec![(0.0, 5.0), (10.0, 5.0)]);
        assert_eq!(volume(&p, 0.0, 10.0, 5.0, 1.0), 0.0);
    }

    #[test]
    fn flat_profile_volume_against_datum_is_area_times_spacing() {
        let p = profile(vec![(0.0, 5.0), (10.0, 5.0)]);
        assert_eq!(volume(&p, 0.0, 10.0, 0.0, 1.0), 50.0);
        assert_eq!(volume(&p, 0.0, 10.0, 0.0, 2.5), 125.0);
    }

    #[test]
    fn volume_is_antisymmetric_in_bound_order() {
        let p = profile(vec![(0.0, 1.0), (1.0, 3.0), (2.0, 2.0), (3.0, 4.0)]);
        let forward = volume(&p, 0.0, 3.0, 0.5, 2.0);
        let reverse = volume(&p, 3.0, 0.0, 0.5, 2.0);
        assert_eq!(forward, -reverse);
        assert!(forward > 0.0);
    }

    #[test]
    fn volume_restricts_to_the_closed_subrange() {
        let p = profile(vec![(0.0, 100.0), (1.0, 1.0), (2.0, 1.0), (3.0, 100.0)]);
        assert_eq!(volume(&p, 1.0, 2.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn metrics_follow_landmark_geometry() {
        let p = profile(vec![
            (0.0, 0.2),
            (1.0, 0.4),
            (2.0, 0.6),
            (3.0, 1.8),
            (4.0, 3.0),
        ]);
        let features = FeatureSet {
            shore: Landmark { x: 0.0, y: 0.2 },
            toe: Landmark { x: 2.0, y: 0.6 },
            crest: Landmark { x: 4.0, y: 3.0 },
            heel: Landmark { x: 5.0, y: 1.0 },
        };
        let m = compute_metrics(&p, &features, 1.0);
        assert_eq!(m.dune_height, 2.4);
        assert_eq!(m.beach_width, 2.0);
        assert_eq!(m.dune_length, 2.0);
        assert_eq!(m.dune_toe_elev, 0.6);
        assert_eq!(m.dune_crest_elev, 3.0);
        assert!((m.beach_slope - 0.2).abs() < 1e-12);
        assert!((m.dune_slope - 1.2).abs() < 1e-12);
        // Trapezoids above shore_y over [0, 2]: 0.1 + 0.3.
        assert!((m.beach_volume - 0.4).abs() < 1e-12);
        // Trapezoids above toe_y over [2, 4]: 0.6 + 1.8.
        assert!((m.dune_volume - 2.4).abs() < 1e-12);
        assert!((m.bd_ratio - 6.0).abs() < 1e-12);
    }

    #[test]
    fn zero_width_beach_yields_non_finite_slope() {
        let p = profile(vec![(0.0, 0.5), (1.0, 2.0), (2.0, 3.0)]);
        let features = FeatureSet {
            shore: Landmark { x: 0.0, y: 0.5 },
            toe: Landmark { x: 0.0, y: 0.5 },
            crest: Landmark { x: 2.0, y: 3.0 },
            heel: Landmark { x: 3.0, y: 1.0 },
        };
        let m = compute_metrics(&p, &features, 1.0);
        assert!(!m.beach_slope.is_finite());
    }
}
