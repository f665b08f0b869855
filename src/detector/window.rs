//! Fixed-width rolling extrema over sample columns.
//!
//! All landmark heuristics compare a position against the min or max of a
//! nearby span of fixed width (5, 10 or 20 samples). The scans below use a
//! monotonic deque so each column is evaluated in linear time while keeping
//! first-qualifying-position semantics at the call sites.
//!
//! A window that extends past either end of the slice, or that contains a
//! non-finite value, yields `None`; callers treat that as a non-qualifying
//! comparison rather than an error.

use std::collections::VecDeque;

/// `out[i]` = minimum of `values[i..i + len]`, when that full window exists.
pub fn forward_min(values: &[f64], len: usize) -> Vec<Option<f64>> {
    sliding(values, len, |a, b| a <= b)
}

/// `out[i]` = maximum of `values[i..i + len]`, when that full window exists.
pub fn forward_max(values: &[f64], len: usize) -> Vec<Option<f64>> {
    sliding(values, len, |a, b| a >= b)
}

/// `out[i]` = maximum of `values[i - len..i]` (the `len` positions strictly
/// before `i`), when that full window exists.
pub fn backward_max(values: &[f64], len: usize) -> Vec<Option<f64>> {
    let fwd = forward_max(values, len);
    let mut out = vec![None; values.len()];
    for i in len..values.len() {
        out[i] = fwd[i - len];
    }
    out
}

/// Monotonic-deque sliding extremum aligned to the window start. `keeps`
/// decides whether a newly pushed value evicts an older one (`<=` for min,
/// `>=` for max); non-finite values poison their windows.
fn sliding<F: Fn(f64, f64) -> bool>(values: &[f64], len: usize, keeps: F) -> Vec<Option<f64>> {
    let n = values.len();
    let mut out = vec![None; n];
    if len == 0 || len > n {
        return out;
    }
    let mut deque: VecDeque<usize> = VecDeque::new();
    let mut poisoned = 0usize;
    for j in 0..n {
        if !values[j].is_finite() {
            poisoned += 1;
        }
        while let Some(&back) = deque.back() {
            if keeps(values[j], values[back]) {
                deque.pop_back();
            } else {
                break;
            }
        }
        deque.push_back(j);
        if j + 1 >= len {
            let start = j + 1 - len;
            while let Some(&front) = deque.front() {
                if front < start {
                    deque.pop_front();
                } else {
                    break;
                }
            }
            if poisoned == 0 {
                out[start] = deque.front().map(|&idx| values[idx]);
            }
            if !values[start].is_finite() {
                poisoned -= 1;
            }
        }
    }
    out
}
