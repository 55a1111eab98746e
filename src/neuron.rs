//! A single linear neuron.
//!
//! `feedforward` does not cache anything on the neuron. It returns a
//! [`ForwardTrace`] holding the inputs it saw and the value it produced, and the
//! gradient step consumes that trace explicitly.

use crate::{Error, Result};

pub const DEFAULT_BIAS: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct Neuron {
    weights: Vec<f64>,
    bias: f64,
    learning_rate: f64,
}

/// Inputs and output of one `Neuron::feedforward` call.
///
/// The activation is the identity, so `output` is also the pre-activation sum.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardTrace {
    pub inputs: Vec<f64>,
    pub output: f64,
}

/// Gradient of the loss w.r.t. one neuron's parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct NeuronGradient {
    pub bias: f64,
    pub weights: Vec<f64>,
}

/// Read-only view of a neuron's parameters, for reporting.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NeuronSnapshot {
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl Neuron {
    /// Build a neuron with the default bias (`0.01`).
    #[inline]
    pub fn new(weights: Vec<f64>, learning_rate: f64) -> Self {
        Self::with_bias(weights, DEFAULT_BIAS, learning_rate)
    }

    #[inline]
    pub fn with_bias(weights: Vec<f64>, bias: f64, learning_rate: f64) -> Self {
        Self {
            weights,
            bias,
            learning_rate,
        }
    }

    #[inline]
    pub fn fan_in(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[inline]
    pub fn bias(&self) -> f64 {
        self.bias
    }

    #[inline]
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Computes `bias + sum(weights[i] * inputs[i])`.
    ///
    /// Returns `ShapeMismatch` if `inputs.len() != self.fan_in()`.
    pub fn feedforward(&self, inputs: &[f64]) -> Result<ForwardTrace> {
        check_len(self.weights.len(), inputs.len())?;

        let mut sum = self.bias;
        for (&w, &x) in self.weights.iter().zip(inputs) {
            sum = w.mul_add(x, sum);
        }

        Ok(ForwardTrace {
            inputs: inputs.to_vec(),
            output: sum,
        })
    }

    /// Gradient-descent step: `param -= learning_rate * d_param`.
    ///
    /// Returns `ShapeMismatch` if `grad.weights.len() != self.fan_in()`; the neuron
    /// is left untouched in that case.
    pub fn update_weights(&mut self, grad: &NeuronGradient) -> Result<()> {
        check_len(self.weights.len(), grad.weights.len())?;

        let lr = self.learning_rate;
        for (w, &g) in self.weights.iter_mut().zip(&grad.weights) {
            *w -= lr * g;
        }
        self.bias -= lr * grad.bias;
        Ok(())
    }

    pub fn inspect(&self) -> NeuronSnapshot {
        NeuronSnapshot {
            weights: self.weights.clone(),
            bias: self.bias,
        }
    }
}

#[inline]
fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::ShapeMismatch { expected, actual });
    }
    Ok(())
}
