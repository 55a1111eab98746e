//! Gaussian parameter initialization.
//!
//! Weights are drawn from a standard normal distribution using the Box-Muller
//! transform over two uniform draws. The RNG is always passed in by the caller so
//! that runs can be made reproducible with a seeded `StdRng`.

use std::f64::consts::PI;

use rand::Rng;

/// Draw a single standard-normal sample (mean 0, variance 1).
///
/// Both uniform draws are taken from `[0, 1)` and re-drawn while they are exactly
/// zero, so `ln(u)` is always finite.
#[inline]
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u = nonzero_uniform(rng);
    let v = nonzero_uniform(rng);
    (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos()
}

/// Draw exactly `count` independent standard-normal samples.
pub fn gaussian_vec<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<f64> {
    (0..count).map(|_| gaussian(rng)).collect()
}

#[inline]
fn nonzero_uniform<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let x: f64 = rng.gen_range(0.0..1.0);
        if x != 0.0 {
            return x;
        }
    }
}
