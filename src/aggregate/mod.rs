//! Cross-profile statistical roll-up: plausibility filtering, block
//! averaging and correlation matrices. All three transforms are read-only
//! over the per-profile metrics and independent of each other.

mod corr;

pub use corr::{pearson_matrix, CorrMatrix};

use crate::metrics::{BeachMetrics, MetricsRow};
use serde::{Deserialize, Serialize};

/// Numeric-range thresholds for the plausibility filter. A row survives
/// only when every field is finite and every thresholded field lies in
/// range; a single failing field drops the whole row.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    pub dune_height_range: (f64, f64),
    pub dune_length_range: (f64, f64),
    pub beach_width_range: (f64, f64),
    pub max_crest_elev: f64,
    pub max_dune_volume: f64,
    pub max_beach_volume: f64,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            dune_height_range: (1.0, 10.0),
            dune_length_range: (5.0, 25.0),
            beach_width_range: (10.0, 60.0),
            max_crest_elev: 20.0,
            max_dune_volume: 300.0,
            max_beach_volume: 500.0,
        }
    }
}

impl FilterParams {
    pub fn retains(&self, m: &BeachMetrics) -> bool {
        let within = |v: f64, (lo, hi): (f64, f64)| v > lo && v < hi;
        m.values().iter().all(|v| v.is_finite())
            && within(m.dune_height, self.dune_height_range)
            && within(m.dune_length, self.dune_length_range)
            && within(m.beach_width, self.beach_width_range)
            && m.dune_crest_elev < self.max_crest_elev
            && m.dune_volume < self.max_dune_volume
            && m.beach_volume < self.max_beach_volume
    }
}

/// Retains the rows whose every field passes the plausibility thresholds.
pub fn plausibility_filter(rows: &[MetricsRow], params: &FilterParams) -> Vec<MetricsRow> {
    rows.iter()
        .filter(|row| params.retains(&row.metrics))
        .copied()
        .collect()
}

/// Column-wise mean of one block of consecutive profiles within a
/// (region, segment) group.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BlockRow {
    pub region: u16,
    pub segment: u16,
    pub block: usize,
    pub mean: BeachMetrics,
}

/// Partitions each (region, segment) group of consecutive rows into blocks
/// of `block_size` (the trailing partial block is averaged over however
/// many rows it holds) and takes the column-wise mean. Non-finite entries
/// are left out of their column's mean, matching the unfiltered input that
/// may still carry undefined slopes or ratios.
pub fn block_averages(rows: &[MetricsRow], block_size: usize) -> Vec<BlockRow> {
    assert!(block_size > 0, "block size must be positive");
    let mut out = Vec::new();
    for group in chunk_by_group(rows) {
        for (block, chunk) in group.chunks(block_size).enumerate() {
            out.push(BlockRow {
                region: chunk[0].key.region,
                segment: chunk[0].key.segment,
                block,
                mean: column_means(chunk),
            });
        }
    }
    out
}

/// Splits the row slice into runs sharing a (region, segment) pair. The
/// store keeps those runs contiguous.
fn chunk_by_group(rows: &[MetricsRow]) -> Vec<&[MetricsRow]> {
    let mut groups = Vec::new();
    let mut start = 0;
    for i in 1..=rows.len() {
        let boundary = i == rows.len()
            || (rows[i].key.region, rows[i].key.segment)
                != (rows[start].key.region, rows[start].key.segment);
        if boundary {
            groups.push(&rows[start..i]);
            start = i;
        }
    }
    groups
}

fn column_means(rows: &[MetricsRow]) -> BeachMetrics {
    let mut sums = [0.0f64; 10];
    let mut counts = [0usize; 10];
    for row in rows {
        for (c, v) in row.metrics.values().into_iter().enumerate() {
            if v.is_finite() {
                sums[c] += v;
                counts[c] += 1;
            }
        }
    }
    let mut means = [f64::NAN; 10];
    for c in 0..10 {
        if counts[c] > 0 {
            means[c] = sums[c] / counts[c] as f64;
        }
    }
    BeachMetrics::from_values(means)
}
