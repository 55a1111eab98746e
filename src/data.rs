//! Training samples, dataset helpers and shuffling.
//!
//! A `Dataset` is a non-empty ordered list of scalar `(input, target)` pairs.
//! Inputs are usually standardized in place once, before training, with
//! [`Dataset::standardize_inputs`]; the returned [`Standardizer`] is what you keep
//! for inference on new inputs.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::{Error, Result, Standardizer};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub input: f64,
    pub target: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    /// Build a dataset from samples. Returns `InvalidData` if `samples` is empty.
    pub fn new(samples: Vec<Sample>) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::InvalidData("dataset must not be empty".to_owned()));
        }
        Ok(Self { samples })
    }

    /// Build a dataset from parallel input/target slices.
    pub fn from_pairs(inputs: &[f64], targets: &[f64]) -> Result<Self> {
        if inputs.len() != targets.len() {
            return Err(Error::InvalidData(format!(
                "inputs/targets length mismatch: {} vs {}",
                inputs.len(),
                targets.len()
            )));
        }
        let samples = inputs
            .iter()
            .zip(targets)
            .map(|(&input, &target)| Sample { input, target })
            .collect();
        Self::new(samples)
    }

    /// Synthesize `len` samples of `target = (input * 2 + 3.5) / 1000`, where the
    /// `i`-th input is `uniform(0, 1) * i`.
    pub fn affine<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Result<Self> {
        let samples = (0..len)
            .map(|i| {
                let input = rng.gen_range(0.0..1.0_f64) * i as f64;
                Sample {
                    input,
                    target: (input * 2.0 + 3.5) / 1000.0,
                }
            })
            .collect();
        Self::new(samples)
    }

    #[inline]
    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    /// Returns true if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn inputs(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.input).collect()
    }

    /// Replace every input by its standardized value.
    ///
    /// The original scale is not kept; only the returned transform survives.
    pub fn standardize_inputs(&mut self) -> Result<Standardizer> {
        let fitted = Standardizer::fit(&self.inputs())?;
        for (sample, x) in self.samples.iter_mut().zip(fitted.transformed) {
            sample.input = x;
        }
        Ok(fitted.standardizer)
    }
}

/// Return a uniformly shuffled copy of `items` (Fisher-Yates). `items` is not modified.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}
