//! Chained landmark identification over one profile.
//!
//! Four stages run in sequence — shore, crest, toe, heel — each searching
//! only the region its predecessor delimits. Every stage keeps
//! first-qualifying-position semantics (the scan stops at the first sample
//! satisfying all of its conditions); a stage with no qualifying position
//! aborts the chain, so a profile either yields a complete [`FeatureSet`]
//! or nothing.
//!
//! Typical usage:
//! ```no_run
//! use dune_detector::{DetectorParams, DuneDetector};
//! # fn example(profile: dune_detector::profile::Profile) {
//! let detector = DuneDetector::new(DetectorParams::default());
//! let outcome = detector.detect(&profile);
//! if let Some(features) = outcome.feature_set() {
//!     println!("crest at x={:.1}", features.crest.x);
//! }
//! # }
//! ```

use super::params::{CrestParams, DetectorParams, HeelParams, ShoreParams};
use super::polyfit::{eval_cubic, fit_cubic};
use super::window::{backward_max, forward_max, forward_min};
use crate::profile::Profile;
use crate::types::{Detection, FeatureSet, Landmark, LandmarkKind};
use log::debug;

/// Landmark detector for cross-shore elevation profiles. Stateless across
/// profiles; one instance may serve any number of concurrent detections.
#[derive(Clone, Debug, Default)]
pub struct DuneDetector {
    params: DetectorParams,
}

impl DuneDetector {
    pub fn new(params: DetectorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    /// Runs the four chained heuristics over one profile.
    pub fn detect(&self, profile: &Profile) -> Detection {
        let (xs, ys) = profile.columns();

        let Some(shore) = find_shore(&xs, &ys, &self.params.shore) else {
            return self.fail(profile, LandmarkKind::Shore);
        };
        let Some(crest) = find_crest(&ys, shore, &self.params.crest) else {
            return self.fail(profile, LandmarkKind::Crest);
        };
        let Some(toe) = find_toe(&xs, &ys, shore, crest) else {
            return self.fail(profile, LandmarkKind::Toe);
        };
        let Some(heel) = find_heel(&ys, crest, &self.params.heel) else {
            return self.fail(profile, LandmarkKind::Heel);
        };

        let at = |i: usize| Landmark { x: xs[i], y: ys[i] };
        Detection::Complete(FeatureSet {
            shore: at(shore),
            toe: at(toe),
            crest: at(crest),
            heel: at(heel),
        })
    }

    fn fail(&self, profile: &Profile, kind: LandmarkKind) -> Detection {
        debug!("no {} for profile {}", kind.name(), profile.key);
        Detection::Failed(kind)
    }
}

/// Shoreline: first position whose elevation is strictly positive, tops
/// every earlier elevation, and whose slope window (current slope to the
/// previous sample plus the following slopes) stays non-negative.
fn find_shore(xs: &[f64], ys: &[f64], params: &ShoreParams) -> Option<usize> {
    if ys.is_empty() {
        return None;
    }
    let mut slopes = vec![f64::NAN; ys.len()];
    for i in 1..ys.len() {
        slopes[i] = (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
    }
    let slope_floor = forward_min(&slopes, params.slope_window);

    let mut running_max = ys[0];
    for i in 1..ys.len() {
        let qualifies = ys[i] > 0.0
            && ys[i] > running_max
            && slope_floor[i].is_some_and(|m| m >= 0.0);
        if qualifies {
            return Some(i);
        }
        if ys[i] > running_max {
            running_max = ys[i];
        }
    }
    None
}

/// Dune crest: first position beyond the shore that is a strict running
/// maximum of the sub-sequence, rises more than `min_rise` above the
/// minimum of the next `rise_window` samples, and tops every sample in the
/// next `lookahead_window`.
fn find_crest(ys: &[f64], shore: usize, params: &CrestParams) -> Option<usize> {
    let sub = &ys[shore..];
    if sub.is_empty() {
        return None;
    }
    let rise_floor = forward_min(sub, params.rise_window);
    let lookahead_top = forward_max(sub, params.lookahead_window);

    let mut running_max = sub[0];
    for i in 1..sub.len() {
        let rise = rise_floor.get(i + 1).copied().flatten();
        let ahead = lookahead_top.get(i + 1).copied().flatten();
        let qualifies = sub[i] > running_max
            && rise.is_some_and(|m| sub[i] - m > params.min_rise)
            && ahead.is_some_and(|m| sub[i] > m);
        if qualifies {
            return Some(shore + i);
        }
        if sub[i] > running_max {
            running_max = sub[i];
        }
    }
    None
}

/// Dune toe: deepest concavity between shore and crest, measured as the
/// minimum residual against a least-squares cubic over that closed range.
/// A minimum at either endpoint means no genuine toe separate from the
/// range bounds, and the stage reports absence.
fn find_toe(xs: &[f64], ys: &[f64], shore: usize, crest: usize) -> Option<usize> {
    let range_x = &xs[shore..=crest];
    let range_y = &ys[shore..=crest];
    let coeffs = fit_cubic(range_x, range_y)?;

    let mut best: Option<(usize, f64)> = None;
    for (k, (&x, &y)) in range_x.iter().zip(range_y.iter()).enumerate() {
        let residual = y - eval_cubic(&coeffs, x);
        if !residual.is_finite() {
            continue;
        }
        if best.map_or(true, |(_, r)| residual < r) {
            best = Some((k, residual));
        }
    }
    let (k, _) = best?;
    if k == 0 || k == crest - shore {
        return None;
    }
    Some(shore + k)
}

/// Dune heel: lowest position beyond the crest that is not itself on a
/// dune feature. A position is excluded while all three hold: it drops by
/// more than `min_drop` within the next `drop_window` samples, it tops the
/// previous `back_window` samples, and it tops the next `forward_window`
/// samples. A sub-sequence with no excluded position carries no dune
/// signature at all, and the stage reports absence; so does one with no
/// position left after exclusion.
fn find_heel(ys: &[f64], crest: usize, params: &HeelParams) -> Option<usize> {
    let sub = &ys[crest..];
    let drop_floor = forward_min(sub, params.drop_window);
    let back_top = backward_max(sub, params.back_window);
    let forward_top = forward_max(sub, params.forward_window);

    let mut any_excluded = false;
    let mut best: Option<(usize, f64)> = None;
    for (i, &y) in sub.iter().enumerate() {
        let drop = drop_floor.get(i + 1).copied().flatten();
        let ahead = forward_top.get(i + 1).copied().flatten();
        let excluded = drop.is_some_and(|m| y - m > params.min_drop)
            && back_top[i].is_some_and(|m| y > m)
            && ahead.is_some_and(|m| y > m);
        if excluded {
            any_excluded = true;
            continue;
        }
        if !y.is_finite() {
            continue;
        }
        if best.map_or(true, |(_, b)| y < b) {
            best = Some((i, y));
        }
    }
    if !any_excluded {
        return None;
    }
    best.map(|(i, _)| crest + i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shore_skips_negative_elevations() {
        // First positive, running-max position with a clean slope run is
        // x=2; the earlier submerged points must not qualify.
        let xs: Vec<f64> = (0..8).map(|i| i as f64).collect();
        let ys = [-1.0, -0.5, 0.2, 1.0, 1.1, 3.0, 3.5, 4.0];
        let got = find_shore(&xs, &ys, &ShoreParams::default());
        assert_eq!(got, Some(2));
    }

    #[test]
    fn shore_absent_when_profile_stays_submerged() {
        let xs: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let ys: Vec<f64> = (0..10).map(|i| -2.0 + 0.1 * i as f64).collect();
        assert_eq!(find_shore(&xs, &ys, &ShoreParams::default()), None);
    }

    #[test]
    fn shore_requires_full_slope_window() {
        // The only positive running-max position sits too close to the
        // profile end for its slope window.
        let xs: Vec<f64> = (0..4).map(|i| i as f64).collect();
        let ys = [-1.0, -0.5, 0.2, 0.4];
        assert_eq!(find_shore(&xs, &ys, &ShoreParams::default()), None);
    }

    fn small_crest_params() -> CrestParams {
        CrestParams {
            min_rise: 0.6,
            rise_window: 3,
            lookahead_window: 2,
        }
    }

    #[test]
    fn crest_found_at_local_summit() {
        let ys = [0.0, 1.0, 2.0, 1.2, 1.0, 0.9, 0.8];
        assert_eq!(find_crest(&ys, 0, &small_crest_params()), Some(2));
    }

    #[test]
    fn crest_offsets_by_search_start() {
        let ys = [9.0, 0.0, 1.0, 2.0, 1.2, 1.0, 0.9, 0.8];
        assert_eq!(find_crest(&ys, 1, &small_crest_params()), Some(3));
    }

    #[test]
    fn crest_absent_on_monotonic_rise() {
        let ys = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(find_crest(&ys, 0, &small_crest_params()), None);
    }

    fn cubic_line(n: usize) -> (Vec<f64>, Vec<f64>) {
        let coeffs = [1.0, 0.1, 0.02, 0.001];
        let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|&x| eval_cubic(&coeffs, x)).collect();
        (xs, ys)
    }

    #[test]
    fn toe_sits_at_deepest_residual() {
        let (xs, mut ys) = cubic_line(31);
        ys[12] -= 0.5;
        assert_eq!(find_toe(&xs, &ys, 0, 30), Some(12));
    }

    #[test]
    fn toe_at_range_start_is_degenerate() {
        let (xs, mut ys) = cubic_line(31);
        ys[0] -= 0.5;
        assert_eq!(find_toe(&xs, &ys, 0, 30), None);
    }

    #[test]
    fn toe_at_range_end_is_degenerate() {
        let (xs, mut ys) = cubic_line(31);
        ys[30] -= 0.5;
        assert_eq!(find_toe(&xs, &ys, 0, 30), None);
    }

    #[test]
    fn toe_needs_enough_samples_for_the_fit() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [0.0, 0.5, 1.0];
        assert_eq!(find_toe(&xs, &ys, 0, 2), None);
    }

    fn small_heel_params() -> HeelParams {
        HeelParams {
            min_drop: 0.6,
            drop_window: 2,
            back_window: 2,
            forward_window: 3,
        }
    }

    #[test]
    fn heel_is_lowest_position_off_the_dune() {
        // The bump at index 3 is excluded (local summit with a sharp
        // drop); the heel is the lowest remaining sample.
        let ys = [5.0, 4.0, 3.0, 4.5, 3.0, 2.0, 1.5, 1.8, 2.0];
        assert_eq!(find_heel(&ys, 0, &small_heel_params()), Some(6));
    }

    #[test]
    fn heel_absent_on_monotonic_descent() {
        let ys = [5.0, 4.0, 3.0, 2.5, 2.0, 1.5, 1.0, 0.5];
        assert_eq!(find_heel(&ys, 0, &small_heel_params()), None);
    }
}
