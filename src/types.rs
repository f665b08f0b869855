use serde::{Deserialize, Serialize};

/// One of the four sequential landmarks located along a profile, in
/// cross-shore order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LandmarkKind {
    Shore,
    Toe,
    Crest,
    Heel,
}

impl LandmarkKind {
    pub fn name(&self) -> &'static str {
        match self {
            LandmarkKind::Shore => "shore",
            LandmarkKind::Toe => "toe",
            LandmarkKind::Crest => "crest",
            LandmarkKind::Heel => "heel",
        }
    }
}

/// A landmark resolved to one sampled position on its parent profile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
}

/// The complete set of landmarks for one profile.
///
/// Only ever constructed when all four stages resolved; when complete the
/// positions satisfy `shore.x < toe.x < crest.x < heel.x`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub shore: Landmark,
    pub toe: Landmark,
    pub crest: Landmark,
    pub heel: Landmark,
}

/// Outcome of the chained landmark pipeline for one profile.
///
/// Detection is strictly sequential: the first stage that finds no
/// qualifying position aborts the chain, and no partial feature sets are
/// produced. `Failed` names that stage.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum Detection {
    Complete(FeatureSet),
    Failed(LandmarkKind),
}

impl Detection {
    pub fn feature_set(&self) -> Option<&FeatureSet> {
        match self {
            Detection::Complete(fs) => Some(fs),
            Detection::Failed(_) => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Detection::Complete(_))
    }
}
