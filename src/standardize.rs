//! Feature standardization.
//!
//! `Standardizer::fit` computes the population mean and standard deviation of a
//! sequence and returns both the fitted transform and the transformed values. The
//! transform is a small `Copy` value, so it can be kept around and applied later to
//! out-of-sample inputs using the *training* statistics.

use crate::{Error, Result};

/// A fitted `(x - mean) / stddev` transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Standardizer {
    mean: f64,
    stddev: f64,
}

/// Output of [`Standardizer::fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct Standardized {
    pub standardizer: Standardizer,
    pub transformed: Vec<f64>,
}

impl Standardizer {
    /// Fit a standardizer on `values` and transform them.
    ///
    /// Uses the population standard deviation (divides by `n`).
    ///
    /// Errors:
    /// - `InvalidData` if `values` is empty
    /// - `DegenerateInput` if any value is non-finite or the standard deviation is 0
    pub fn fit(values: &[f64]) -> Result<Standardized> {
        if values.is_empty() {
            return Err(Error::InvalidData(
                "cannot standardize an empty sequence".to_owned(),
            ));
        }
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(Error::DegenerateInput(format!(
                "value {i} is not finite: {}",
                values[i]
            )));
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values
            .iter()
            .map(|v| {
                let d = v - mean;
                d * d
            })
            .sum::<f64>()
            / n;
        let stddev = variance.sqrt();

        if stddev == 0.0 {
            return Err(Error::DegenerateInput(format!(
                "standard deviation is zero (all {} values equal {mean})",
                values.len()
            )));
        }

        let standardizer = Self { mean, stddev };
        let transformed = values.iter().map(|&v| standardizer.apply(v)).collect();

        Ok(Standardized {
            standardizer,
            transformed,
        })
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    #[inline]
    pub fn stddev(&self) -> f64 {
        self.stddev
    }

    /// Standardize a single value with the fitted statistics.
    #[inline]
    pub fn apply(&self, x: f64) -> f64 {
        (x - self.mean) / self.stddev
    }
}
