//! Batch pipeline over a whole profile store.
//!
//! Control flow follows the data: detect landmarks per profile, derive
//! metrics per complete feature set (both in one data-parallel map), then
//! run the cross-profile aggregation once every per-profile computation
//! has finished. Collecting the parallel map is the only synchronization
//! barrier; nothing inside the core blocks on I/O.

use crate::aggregate::{
    block_averages, pearson_matrix, plausibility_filter, BlockRow, CorrMatrix, FilterParams,
};
use crate::detector::{DetectorParams, DuneDetector};
use crate::diagnostics::{RunSummary, StageFailures, TimingBreakdown};
use crate::metrics::{compute_metrics, BeachMetrics, MetricsRow};
use crate::profile::{ProfileKey, ProfileStore};
use crate::report::{Cell, Table};
use crate::types::{Detection, FeatureSet};
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Parameters for one batch run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RunParams {
    pub detector: DetectorParams,
    pub filter: FilterParams,
    /// Profiles per block in the block-averaging stage.
    pub block_size: usize,
    /// Overrides the store's lateral spacing estimate when set.
    pub spacing: Option<f64>,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            detector: DetectorParams::default(),
            filter: FilterParams::default(),
            block_size: 10,
            spacing: None,
        }
    }
}

/// One profile's landmark coordinates, labeled by identity.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct FeatureRow {
    pub key: ProfileKey,
    pub features: FeatureSet,
}

/// Everything a batch run produces.
#[derive(Clone, Debug, Serialize)]
pub struct RunOutput {
    pub features: Vec<FeatureRow>,
    pub metrics: Vec<MetricsRow>,
    pub filtered: Vec<MetricsRow>,
    pub averages: Vec<BlockRow>,
    pub corr_unfiltered: CorrMatrix,
    pub corr_filtered: CorrMatrix,
    pub summary: RunSummary,
}

/// Runs detection, metrics and aggregation over the whole store.
pub fn run_batch(store: &ProfileStore, params: &RunParams) -> RunOutput {
    let total_start = Instant::now();
    let spacing = params.spacing.unwrap_or_else(|| store.profile_spacing());
    debug!(
        "run_batch start profiles={} spacing={}",
        store.len(),
        spacing
    );

    let detector = DuneDetector::new(params.detector.clone());
    let detect_start = Instant::now();
    let per_profile: Vec<(ProfileKey, Detection, Option<BeachMetrics>)> = store
        .profiles()
        .par_iter()
        .map(|profile| {
            let detection = detector.detect(profile);
            let metrics = detection
                .feature_set()
                .map(|fs| compute_metrics(profile, fs, spacing));
            (profile.key, detection, metrics)
        })
        .collect();
    let detect_ms = detect_start.elapsed().as_secs_f64() * 1000.0;

    let mut failures = StageFailures::default();
    let mut features = Vec::new();
    let mut metrics = Vec::new();
    for (key, detection, row) in per_profile {
        match detection {
            Detection::Complete(fs) => {
                features.push(FeatureRow { key, features: fs });
                if let Some(m) = row {
                    metrics.push(MetricsRow { key, metrics: m });
                }
            }
            Detection::Failed(kind) => failures.record(kind),
        }
    }

    let aggregate_start = Instant::now();
    let filtered = plausibility_filter(&metrics, &params.filter);
    let averages = block_averages(&metrics, params.block_size);
    let corr_unfiltered = pearson_matrix(&metrics);
    let corr_filtered = pearson_matrix(&filtered);
    let aggregate_ms = aggregate_start.elapsed().as_secs_f64() * 1000.0;

    let mut timings = TimingBreakdown {
        total_ms: total_start.elapsed().as_secs_f64() * 1000.0,
        stages: Vec::new(),
    };
    timings.push("detect", detect_ms);
    timings.push("aggregate", aggregate_ms);

    info!(
        "run_batch done profiles={} complete={} failed={} retained={}",
        store.len(),
        features.len(),
        failures.total(),
        filtered.len()
    );

    RunOutput {
        summary: RunSummary {
            profiles_total: store.len(),
            features_complete: features.len(),
            failures,
            rows_retained: filtered.len(),
            profile_spacing: spacing,
            timings,
        },
        features,
        metrics,
        filtered,
        averages,
        corr_unfiltered,
        corr_filtered,
    }
}

impl RunOutput {
    /// The six named result tables, in their output order.
    pub fn tables(&self) -> Vec<Table> {
        vec![
            features_table(&self.features),
            metrics_table("unfiltered", &self.metrics),
            corr_table("corr_1", &self.corr_unfiltered),
            metrics_table("filtered", &self.filtered),
            corr_table("corr_2", &self.corr_filtered),
            averages_table(&self.averages),
        ]
    }
}

fn identity_columns() -> Vec<String> {
    vec!["region".into(), "segment".into(), "line".into()]
}

fn key_cells(key: ProfileKey) -> Vec<Cell> {
    vec![
        Cell::Int(key.region as i64),
        Cell::Int(key.segment as i64),
        Cell::Int(key.line as i64),
    ]
}

fn features_table(rows: &[FeatureRow]) -> Table {
    let mut columns = identity_columns();
    for landmark in ["shore", "toe", "crest", "heel"] {
        columns.push(format!("{}_x", landmark));
        columns.push(format!("{}_y", landmark));
    }
    let mut table = Table::new("profiles", columns);
    for row in rows {
        let fs = &row.features;
        let mut cells = key_cells(row.key);
        for lm in [fs.shore, fs.toe, fs.crest, fs.heel] {
            cells.push(Cell::Num(lm.x));
            cells.push(Cell::Num(lm.y));
        }
        table.push_row(cells);
    }
    table
}

fn metrics_table(name: &str, rows: &[MetricsRow]) -> Table {
    let mut columns = identity_columns();
    columns.extend(BeachMetrics::COLUMNS.iter().map(|c| c.to_string()));
    let mut table = Table::new(name, columns);
    for row in rows {
        let mut cells = key_cells(row.key);
        cells.extend(row.metrics.values().into_iter().map(Cell::Num));
        table.push_row(cells);
    }
    table
}

fn averages_table(rows: &[BlockRow]) -> Table {
    let mut columns = vec!["region".into(), "segment".into(), "block".into()];
    columns.extend(BeachMetrics::COLUMNS.iter().map(|c| c.to_string()));
    let mut table = Table::new("averages", columns);
    for row in rows {
        let mut cells = vec![
            Cell::Int(row.region as i64),
            Cell::Int(row.segment as i64),
            Cell::Int(row.block as i64),
        ];
        cells.extend(row.mean.values().into_iter().map(Cell::Num));
        table.push_row(cells);
    }
    table
}

fn corr_table(name: &str, matrix: &CorrMatrix) -> Table {
    let mut columns = vec!["metric".into()];
    columns.extend(matrix.columns.iter().cloned());
    let mut table = Table::new(name, columns);
    for (label, row) in matrix.columns.iter().zip(matrix.values.iter()) {
        let mut cells = vec![Cell::Text(label.clone())];
        cells.extend(row.iter().copied().map(Cell::Num));
        table.push_row(cells);
    }
    table
}
