//! Binned monotone (isotonic) probability map.
//!
//! `[0, 1]` is partitioned into equal-width buckets; each bucket's value is
//! the empirical positive rate of the training pairs that landed in it.
//! Empty buckets inherit the nearest preceding non-empty value (left to
//! right, first bucket defaults to 0.0), then a forward pass clamps each
//! value up to its predecessor so the fitted map is non-decreasing.

use recal_core::types::IsotonicMap;

use super::clamp01;

/// Default bucket count.
pub const DEFAULT_BINS: usize = 10;

/// Fit with the default bucket count.
pub fn fit(ps: &[f64], ys: &[u8]) -> IsotonicMap {
    fit_with_bins(ps, ys, DEFAULT_BINS)
}

/// Fit a binned monotone map from training pairs.
pub fn fit_with_bins(ps: &[f64], ys: &[u8], bins: usize) -> IsotonicMap {
    if ps.is_empty() || bins == 0 {
        return IsotonicMap {
            edges: vec![0.0, 1.0],
            values: vec![0.0],
        };
    }

    let edges: Vec<f64> = (0..=bins).map(|i| i as f64 / bins as f64).collect();
    let mut counts = vec![0usize; bins];
    let mut sums = vec![0.0f64; bins];
    for (&p, &y) in ps.iter().zip(ys.iter()) {
        let x = clamp01(p);
        let idx = ((x * bins as f64) as usize).min(bins - 1);
        counts[idx] += 1;
        sums[idx] += f64::from(y);
    }

    // Forward fill from the preceding non-empty bucket.
    let mut values = vec![0.0f64; bins];
    let mut last = 0.0;
    for i in 0..bins {
        values[i] = if counts[i] > 0 { sums[i] / counts[i] as f64 } else { last };
        last = values[i];
    }

    // Monotonicity pass: never let a bucket fall below its predecessor.
    for i in 1..bins {
        if values[i] < values[i - 1] {
            values[i] = values[i - 1];
        }
    }

    IsotonicMap { edges, values }
}

/// Remap a probability through a fitted map.
///
/// Locates the bracketing bucket by binary search over `edges`; inputs
/// outside every edge fall back to the clamped raw probability.
pub fn apply(p: f64, map: &IsotonicMap) -> f64 {
    let x = clamp01(p);
    if map.edges.is_empty() {
        return x;
    }
    let mut lo = 0;
    let mut hi = map.edges.len() - 1;
    while lo + 1 < hi {
        let mid = (lo + hi) >> 1;
        if x < map.edges[mid] {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    map.values.get(lo).copied().unwrap_or(x)
}
