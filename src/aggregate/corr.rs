//! Pairwise Pearson correlation across the metric columns.

use crate::metrics::{BeachMetrics, MetricsRow};
use serde::Serialize;

/// Symmetric correlation matrix over the ten metric columns, in the
/// stable column order of [`BeachMetrics::COLUMNS`]. Entries with fewer
/// than two complete observation pairs, or with a zero-variance column,
/// are NaN.
#[derive(Clone, Debug, Serialize)]
pub struct CorrMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

/// Computes the Pearson correlation for every column pair, using the rows
/// where both entries are finite (pairwise-complete observations).
pub fn pearson_matrix(rows: &[MetricsRow]) -> CorrMatrix {
    let columns: Vec<String> = BeachMetrics::COLUMNS.iter().map(|c| c.to_string()).collect();
    let data: Vec<[f64; 10]> = rows.iter().map(|r| r.metrics.values()).collect();

    let mut values = vec![vec![f64::NAN; 10]; 10];
    for a in 0..10 {
        for b in a..10 {
            let mut xs = Vec::with_capacity(data.len());
            let mut ys = Vec::with_capacity(data.len());
            for row in &data {
                if row[a].is_finite() && row[b].is_finite() {
                    xs.push(row[a]);
                    ys.push(row[b]);
                }
            }
            let r = pearson(&xs, &ys);
            values[a][b] = r;
            values[b][a] = r;
        }
    }
    CorrMatrix { columns, values }
}

fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len();
    if n < 2 {
        return f64::NAN;
    }
    let nf = n as f64;
    let mean_x = xs.iter().sum::<f64>() / nf;
    let mean_y = ys.iter().sum::<f64>() / nf;
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileKey;

    fn rows_from(values: &[[f64; 10]]) -> Vec<MetricsRow> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| MetricsRow {
                key: ProfileKey {
                    region: 29,
                    segment: 1,
                    line: i as u32,
                },
                metrics: BeachMetrics::from_values(*v),
            })
            .collect()
    }

    #[test]
    fn perfectly_linear_columns_correlate_to_one() {
        let mut records = Vec::new();
        for i in 0..5 {
            let t = i as f64;
            let mut v = [0.0; 10];
            v[0] = t;
            v[1] = 2.0 * t + 1.0;
            v[2] = -3.0 * t;
            records.push(v);
        }
        let m = pearson_matrix(&rows_from(&records));
        assert!((m.values[0][1] - 1.0).abs() < 1e-12);
        assert!((m.values[0][2] + 1.0).abs() < 1e-12);
        assert_eq!(m.values[0][1], m.values[1][0]);
        assert!((m.values[0][0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_variance_column_yields_nan() {
        let records = vec![[1.0; 10], [1.0; 10], [1.0; 10]];
        let m = pearson_matrix(&rows_from(&records));
        assert!(m.values[0][1].is_nan());
    }

    #[test]
    fn non_finite_entries_are_dropped_pairwise() {
        let mut records = Vec::new();
        for i in 0..6 {
            let t = i as f64;
            let mut v = [0.0; 10];
            v[0] = t;
            v[1] = 5.0 * t;
            records.push(v);
        }
        // Poison one row's second column only; the pair (0,1) still
        // correlates perfectly over the remaining rows.
        records[3][1] = f64::NAN;
        let m = pearson_matrix(&rows_from(&records));
        assert!((m.values[0][1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn too_few_rows_yield_nan() {
        let records = vec![[1.0; 10]];
        let m = pearson_matrix(&rows_from(&records));
        assert!(m.values[0][1].is_nan());
    }
}
