//! Platt scaling: two-parameter logistic remapping `sigma(a*p + b)`.
//!
//! Fit minimizes logistic negative log-likelihood with a diagonal Newton
//! step per parameter — `a` and `b` are updated independently from their own
//! first and second derivatives, with an L2 damping term seeding each
//! Hessian accumulator. The iteration budget is fixed and there is no early
//! stopping, so the fit is deterministic for identical inputs.

use recal_core::types::PlattParams;

use super::clamp01;

/// Fixed iteration budget.
pub const DEFAULT_ITERS: usize = 200;

const LEARNING_RATE: f64 = 1.0;
const L2_DAMPING: f64 = 1e-4;

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Fit with the default iteration budget.
pub fn fit(ps: &[f64], ys: &[u8]) -> PlattParams {
    fit_with_iters(ps, ys, DEFAULT_ITERS)
}

/// Fit `a`, `b` over a fixed number of diagonal Newton iterations.
pub fn fit_with_iters(ps: &[f64], ys: &[u8], iters: usize) -> PlattParams {
    let mut a = 1.0;
    let mut b = 0.0;

    for _ in 0..iters {
        let mut grad_a = 0.0;
        let mut grad_b = 0.0;
        let mut hess_a = L2_DAMPING;
        let mut hess_b = L2_DAMPING;

        for (&p, &y) in ps.iter().zip(ys.iter()) {
            let x = clamp01(p);
            let s = sigmoid(a * x + b);
            let g = s - f64::from(y);
            grad_a += g * x;
            grad_b += g;
            let h = s * (1.0 - s);
            hess_a += h * x * x;
            hess_b += h;
        }

        if hess_a > 0.0 {
            a -= LEARNING_RATE * grad_a / hess_a;
        }
        if hess_b > 0.0 {
            b -= LEARNING_RATE * grad_b / hess_b;
        }
    }

    PlattParams { a, b }
}

/// Remap a raw probability through fitted parameters.
pub fn apply(p: f64, params: &PlattParams) -> f64 {
    sigmoid(params.a * clamp01(p) + params.b)
}
