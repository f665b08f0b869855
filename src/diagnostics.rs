//! Run-level diagnostics collected by the batch pipeline.

use crate::types::LandmarkKind;
use serde::Serialize;

/// How many profiles each landmark stage rejected. A profile counts once,
/// against the first stage that found no qualifying position.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct StageFailures {
    pub shore: usize,
    pub crest: usize,
    pub toe: usize,
    pub heel: usize,
}

impl StageFailures {
    pub fn record(&mut self, kind: LandmarkKind) {
        match kind {
            LandmarkKind::Shore => self.shore += 1,
            LandmarkKind::Crest => self.crest += 1,
            LandmarkKind::Toe => self.toe += 1,
            LandmarkKind::Heel => self.heel += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.shore + self.crest + self.toe + self.heel
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct StageTiming {
    pub label: &'static str,
    pub elapsed_ms: f64,
}

/// Wall-clock breakdown of one batch run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: &'static str, elapsed_ms: f64) {
        self.stages.push(StageTiming { label, elapsed_ms });
    }
}

/// Serializable summary of one batch run over a profile store.
#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub profiles_total: usize,
    pub features_complete: usize,
    pub failures: StageFailures,
    pub rows_retained: usize,
    pub profile_spacing: f64,
    pub timings: TimingBreakdown,
}
