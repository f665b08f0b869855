use dune_detector::profile::{Profile, ProfileKey, Sample};

/// Generates a full synthetic dune transect on a 1 m grid: a submerged
/// approach, a cubic beach-and-dune face with a toe notch at x=17, a crest
/// at x=35, a post-crest terrace with a secondary bump, and a low point at
/// x=60 before a gentle backdune rise.
///
/// Expected landmarks: shore (5.0, 0.1), toe (17.0, 1.4856),
/// crest (35.0, 14.5), heel (60.0, 4.2).
pub fn dune_profile(key: ProfileKey) -> Profile {
    let mut ys = Vec::with_capacity(75);
    for i in 0..5 {
        ys.push(-1.0 + 0.2 * i as f64);
    }
    ys.extend(beach_face());
    ys.extend([12.0, 10.0, 8.0, 6.5, 5.5]);
    ys.extend([5.4, 5.3, 5.2, 5.15, 5.1, 5.05, 5.0, 4.95, 4.9, 4.85]);
    ys.extend([6.0, 6.6, 6.1, 5.4]);
    ys.extend([5.0, 4.8, 4.6, 4.4, 4.3, 4.2]);
    for i in 1..=14 {
        ys.push(4.2 + 0.05 * i as f64);
    }
    on_grid(key, ys)
}

/// Same seaward shape as [`dune_profile`], but the profile beyond the
/// crest descends monotonically: no position past the crest ever shows a
/// dune signature, so the heel stage must report absence.
pub fn heelless_profile(key: ProfileKey) -> Profile {
    let mut ys = Vec::with_capacity(75);
    for i in 0..5 {
        ys.push(-1.0 + 0.2 * i as f64);
    }
    ys.extend(beach_face());
    for i in 1..=39 {
        ys.push(14.5 - 0.26 * i as f64);
    }
    on_grid(key, ys)
}

/// Cubic beach/dune face over x=5..=35 (0.1 at the shore, 14.5 at the
/// crest) with a 0.4 m notch at x=17 marking the toe.
fn beach_face() -> Vec<f64> {
    (0..=30)
        .map(|t| {
            let tf = t as f64;
            let y = 0.1 + 0.01 * tf * tf + 0.0002 * tf * tf * tf;
            if t == 12 {
                y - 0.4
            } else {
                y
            }
        })
        .collect()
}

fn on_grid(key: ProfileKey, ys: Vec<f64>) -> Profile {
    assert_eq!(ys.len(), 75);
    let samples = ys
        .into_iter()
        .enumerate()
        .map(|(i, y)| Sample { x: i as f64, y })
        .collect();
    Profile::new(key, samples)
}
