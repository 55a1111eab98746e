//! Loss functions.
//!
//! The network has a single scalar output, so losses here are scalar helpers:
//!
//! - run `network.forward(...)`
//! - compute `d_pred` via `mse_backward`
//! - derive parameter gradients from `d_pred`

/// Half squared error.
///
/// Returns `(target - predicted)^2 / 2`.
#[inline]
pub fn mse(target: f64, predicted: f64) -> f64 {
    let diff = target - predicted;
    diff * diff / 2.0
}

/// Half squared error + gradient w.r.t. `predicted`.
///
/// Returns `(loss, d_pred)` where `d_pred = predicted - target`.
#[inline]
pub fn mse_backward(target: f64, predicted: f64) -> (f64, f64) {
    (mse(target, predicted), predicted - target)
}
