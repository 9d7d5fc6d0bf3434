//! Probability remapping strategies over `[0, 1] -> [0, 1]`.
//!
//! Two independent, swappable calibrators: parametric Platt scaling and a
//! binned monotone (isotonic) map. Both are fit from the same training pairs
//! and applied separately; a profile may carry either or both.

pub mod isotonic;
pub mod platt;

/// Clamp into the unit interval.
pub(crate) fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}
