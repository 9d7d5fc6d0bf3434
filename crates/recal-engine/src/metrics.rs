//! Calibration-quality and discrimination metrics.

use statrs::statistics::Statistics;

use recal_core::types::CalibrationMetrics;

/// Default confidence bucket count for ECE.
pub const DEFAULT_BINS: usize = 10;

/// Classification threshold for the EM/F1/ECE accuracy term.
const THRESHOLD: f64 = 0.5;

/// Compute metrics with the default ECE bucket count.
pub fn compute(ps: &[f64], ys: &[u8]) -> CalibrationMetrics {
    compute_with_bins(ps, ys, DEFAULT_BINS)
}

/// Compute ECE, Brier, EM (accuracy), F1, and point-biserial correlation.
///
/// Empty input never raises: denominators floor at 1 and every metric
/// defaults to a finite zero.
pub fn compute_with_bins(ps: &[f64], ys: &[u8], bins: usize) -> CalibrationMetrics {
    let n = ps.len().max(1) as f64;

    // ECE over equal-width confidence buckets. The final bucket is closed on
    // both ends; the others are half-open [lo, hi). Empty buckets contribute
    // nothing.
    let mut ece = 0.0;
    for i in 0..bins {
        let lo = i as f64 / bins as f64;
        let hi = (i + 1) as f64 / bins as f64;
        let last = i == bins - 1;
        let bucket: Vec<(f64, u8)> = ps
            .iter()
            .zip(ys.iter())
            .filter(|(&p, _)| p >= lo && (p < hi || (last && p <= hi)))
            .map(|(&p, &y)| (p, y))
            .collect();
        if bucket.is_empty() {
            continue;
        }
        let size = bucket.len() as f64;
        let confidence = bucket.iter().map(|(p, _)| p).sum::<f64>() / size;
        let accuracy = bucket
            .iter()
            .filter(|(p, y)| (*p >= THRESHOLD) == (*y == 1))
            .count() as f64
            / size;
        ece += (size / n) * (accuracy - confidence).abs();
    }

    let brier = ps
        .iter()
        .zip(ys.iter())
        .map(|(&p, &y)| (p - f64::from(y)).powi(2))
        .sum::<f64>()
        / n;

    let mut tp = 0u64;
    let mut fp = 0u64;
    let mut fn_ = 0u64;
    let mut tn = 0u64;
    for (&p, &y) in ps.iter().zip(ys.iter()) {
        match (p >= THRESHOLD, y == 1) {
            (true, true) => tp += 1,
            (true, false) => fp += 1,
            (false, true) => fn_ += 1,
            (false, false) => tn += 1,
        }
    }
    let em = (tp + tn) as f64 / n;
    let f1_denom = 2 * tp + fp + fn_;
    let f1 = if f1_denom > 0 {
        (2 * tp) as f64 / f1_denom as f64
    } else {
        0.0
    };

    CalibrationMetrics {
        ece,
        brier,
        em,
        f1,
        user_corr: point_biserial(ps, ys),
    }
}

/// Point-biserial (Pearson) correlation between probabilities and outcomes.
///
/// Returns 0.0 when the outcomes are single-class or either variance is
/// degenerate — a documented fallback, never an error.
fn point_biserial(ps: &[f64], ys: &[u8]) -> f64 {
    if ps.len() < 2 {
        return 0.0;
    }
    let has_pos = ys.iter().any(|&y| y == 1);
    let has_neg = ys.iter().any(|&y| y == 0);
    if !has_pos || !has_neg {
        return 0.0;
    }

    let yf: Vec<f64> = ys.iter().map(|&y| f64::from(y)).collect();
    let mean_p = ps.iter().mean();
    let mean_y = yf.iter().mean();
    let sd_p = ps.iter().std_dev();
    let sd_y = yf.iter().std_dev();
    if !sd_p.is_finite() || !sd_y.is_finite() || sd_p <= 0.0 || sd_y <= 0.0 {
        return 0.0;
    }

    let cov = ps
        .iter()
        .zip(yf.iter())
        .map(|(&p, &y)| (p - mean_p) * (y - mean_y))
        .sum::<f64>()
        / (ps.len() - 1) as f64;

    let corr = cov / (sd_p * sd_y);
    if corr.is_finite() {
        corr
    } else {
        0.0
    }
}
