use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::init::gaussian_vec;
use crate::neuron::{ForwardTrace, Neuron, NeuronGradient, NeuronSnapshot};
use crate::{Error, Result, loss};

/// One hidden layer of fan-in-1 linear neurons feeding a single linear output neuron.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    hidden: Vec<Neuron>,
    output: Neuron,
}

/// Everything a forward pass produced, needed to derive gradients.
///
/// `output.inputs` are the hidden-layer outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkTrace {
    pub hidden: Vec<ForwardTrace>,
    pub output: ForwardTrace,
}

/// Parameter gradients for a `Network` for a single sample.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkGradient {
    pub output: NeuronGradient,
    pub hidden: Vec<NeuronGradient>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NetworkSnapshot {
    pub hidden: Vec<NeuronSnapshot>,
    pub output: NeuronSnapshot,
}

impl NetworkTrace {
    /// The network's scalar prediction.
    #[inline]
    pub fn prediction(&self) -> f64 {
        self.output.output
    }
}

impl Network {
    pub fn new_with_seed(hidden_size: usize, learning_rate: f64, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new_with_rng(hidden_size, learning_rate, &mut rng)
    }

    /// Initialize all weights from one Gaussian vector of length `2 * hidden_size`.
    ///
    /// The first `hidden_size` draws become the hidden neurons' single weights, the
    /// remaining `hidden_size` draws become the output neuron's weight vector.
    /// Biases start at the neuron default.
    pub fn new_with_rng<R: Rng + ?Sized>(
        hidden_size: usize,
        learning_rate: f64,
        rng: &mut R,
    ) -> Result<Self> {
        validate_config(hidden_size, learning_rate)?;

        let weights = gaussian_vec(2 * hidden_size, rng);
        let (hidden_w, output_w) = weights.split_at(hidden_size);

        let hidden = hidden_w
            .iter()
            .map(|&w| Neuron::new(vec![w], learning_rate))
            .collect();
        let output = Neuron::new(output_w.to_vec(), learning_rate);

        trace!("initialized network: hidden={hidden_w:?} output={output_w:?}");

        Ok(Self { hidden, output })
    }

    /// Assemble a network from explicit neurons.
    ///
    /// Every hidden neuron must have fan-in 1 and the output neuron must have
    /// fan-in `hidden.len()`.
    pub fn from_parts(hidden: Vec<Neuron>, output: Neuron) -> Result<Self> {
        if hidden.is_empty() {
            return Err(Error::InvalidConfig(
                "network must have at least one hidden neuron".to_owned(),
            ));
        }
        for (i, neuron) in hidden.iter().enumerate() {
            if neuron.fan_in() != 1 {
                return Err(Error::InvalidConfig(format!(
                    "hidden neuron {i} has fan-in {}, expected 1",
                    neuron.fan_in()
                )));
            }
        }
        if output.fan_in() != hidden.len() {
            return Err(Error::InvalidConfig(format!(
                "output neuron fan-in {} does not match hidden size {}",
                output.fan_in(),
                hidden.len()
            )));
        }
        Ok(Self { hidden, output })
    }

    #[inline]
    pub fn hidden_size(&self) -> usize {
        self.hidden.len()
    }

    #[inline]
    pub fn hidden(&self) -> &[Neuron] {
        &self.hidden
    }

    #[inline]
    pub fn output(&self) -> &Neuron {
        &self.output
    }

    /// Forward pass for a single sample.
    ///
    /// Feeds the scalar in `inputs` to every hidden neuron and the vector of hidden
    /// outputs to the output neuron. Returns `ShapeMismatch` unless
    /// `inputs.len() == 1`.
    pub fn forward(&self, inputs: &[f64]) -> Result<NetworkTrace> {
        if inputs.len() != 1 {
            return Err(Error::ShapeMismatch {
                expected: 1,
                actual: inputs.len(),
            });
        }

        let hidden = self
            .hidden
            .iter()
            .map(|neuron| neuron.feedforward(inputs))
            .collect::<Result<Vec<_>>>()?;
        let hidden_outputs: Vec<f64> = hidden.iter().map(|t| t.output).collect();
        let output = self.output.feedforward(&hidden_outputs)?;

        Ok(NetworkTrace { hidden, output })
    }

    pub fn predict(&self, inputs: &[f64]) -> Result<f64> {
        Ok(self.forward(inputs)?.prediction())
    }

    /// Analytic gradient of the half squared error for one sample.
    ///
    /// With `d = prediction - target`:
    /// - output: `d_bias = d`, `d_w[j] = d * hidden_out[j]`
    /// - hidden j: `d_bias = d * w_out[j]`, `d_w = d_bias * x`
    ///
    /// Uses the current (pre-update) output weights.
    pub fn gradients(&self, trace: &NetworkTrace, target: f64) -> Result<NetworkGradient> {
        if trace.hidden.len() != self.hidden.len() {
            return Err(Error::ShapeMismatch {
                expected: self.hidden.len(),
                actual: trace.hidden.len(),
            });
        }
        if trace.output.inputs.len() != self.output.fan_in() {
            return Err(Error::ShapeMismatch {
                expected: self.output.fan_in(),
                actual: trace.output.inputs.len(),
            });
        }

        let (_loss, d_out) = loss::mse_backward(target, trace.prediction());

        let output = NeuronGradient {
            bias: d_out,
            weights: trace.output.inputs.iter().map(|h| d_out * h).collect(),
        };

        let hidden = trace
            .hidden
            .iter()
            .zip(self.output.weights())
            .map(|(t, &w_out)| {
                let d_bias = d_out * w_out;
                NeuronGradient {
                    bias: d_bias,
                    weights: t.inputs.iter().map(|x| d_bias * x).collect(),
                }
            })
            .collect();

        Ok(NetworkGradient { output, hidden })
    }

    /// Apply a full set of gradients: output neuron first, then the hidden layer.
    ///
    /// All shapes are checked before any parameter changes, so on error the
    /// network is left untouched.
    pub fn apply_gradients(&mut self, grads: &NetworkGradient) -> Result<()> {
        if grads.hidden.len() != self.hidden.len() {
            return Err(Error::ShapeMismatch {
                expected: self.hidden.len(),
                actual: grads.hidden.len(),
            });
        }
        if grads.output.weights.len() != self.output.fan_in() {
            return Err(Error::ShapeMismatch {
                expected: self.output.fan_in(),
                actual: grads.output.weights.len(),
            });
        }
        for (neuron, g) in self.hidden.iter().zip(&grads.hidden) {
            if g.weights.len() != neuron.fan_in() {
                return Err(Error::ShapeMismatch {
                    expected: neuron.fan_in(),
                    actual: g.weights.len(),
                });
            }
        }

        self.output.update_weights(&grads.output)?;
        for (neuron, g) in self.hidden.iter_mut().zip(&grads.hidden) {
            neuron.update_weights(g)?;
        }
        Ok(())
    }

    /// One online SGD step on `(input, target)`.
    ///
    /// Forward pass, gradient derivation for every layer, then the update.
    /// Returns the prediction observed *before* the update.
    pub fn train(&mut self, input: f64, target: f64) -> Result<f64> {
        let trace = self.forward(&[input])?;
        let grads = self.gradients(&trace, target)?;
        self.apply_gradients(&grads)?;
        Ok(trace.prediction())
    }

    pub fn inspect(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            hidden: self.hidden.iter().map(Neuron::inspect).collect(),
            output: self.output.inspect(),
        }
    }
}

fn validate_config(hidden_size: usize, learning_rate: f64) -> Result<()> {
    if hidden_size == 0 {
        return Err(Error::InvalidConfig("hidden_size must be > 0".to_owned()));
    }
    if !(learning_rate.is_finite() && learning_rate > 0.0) {
        return Err(Error::InvalidConfig(format!(
            "learning rate must be finite and > 0, got {learning_rate}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;

    fn single_unit(w_h: f64, b_h: f64, w_o: f64, b_o: f64, lr: f64) -> Network {
        Network::from_parts(
            vec![Neuron::with_bias(vec![w_h], b_h, lr)],
            Neuron::with_bias(vec![w_o], b_o, lr),
        )
        .unwrap()
    }

    fn loss_for(net: &Network, input: f64, target: f64) -> f64 {
        loss::mse(target, net.predict(&[input]).unwrap())
    }

    #[test]
    fn seeded_init_is_deterministic() {
        let a = Network::new_with_seed(3, 0.01, 123).unwrap();
        let b = Network::new_with_seed(3, 0.01, 123).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.predict(&[0.3]).unwrap(), b.predict(&[0.3]).unwrap());
    }

    #[test]
    fn weights_are_carved_from_one_gaussian_vector() {
        let net = Network::new_with_seed(3, 0.01, 9).unwrap();
        let expected = gaussian_vec(6, &mut StdRng::seed_from_u64(9));

        let snap = net.inspect();
        assert_eq!(snap.hidden.len(), 3);
        for (j, h) in snap.hidden.iter().enumerate() {
            assert_eq!(h.weights, vec![expected[j]]);
            assert_eq!(h.bias, crate::neuron::DEFAULT_BIAS);
        }
        assert_eq!(snap.output.weights, expected[3..].to_vec());
    }

    #[test]
    fn rejects_bad_config() {
        assert!(Network::new_with_seed(0, 0.01, 0).is_err());
        assert!(Network::new_with_seed(3, 0.0, 0).is_err());
        assert!(Network::new_with_seed(3, f64::NAN, 0).is_err());
    }

    #[test]
    fn from_parts_validates_fan_in() {
        let lr = 0.01;
        let bad_hidden = Network::from_parts(
            vec![Neuron::new(vec![1.0, 2.0], lr)],
            Neuron::new(vec![1.0], lr),
        );
        assert!(bad_hidden.is_err());

        let bad_output = Network::from_parts(
            vec![Neuron::new(vec![1.0], lr), Neuron::new(vec![1.0], lr)],
            Neuron::new(vec![1.0], lr),
        );
        assert!(bad_output.is_err());
    }

    #[test]
    fn predict_requires_exactly_one_input() {
        let net = Network::new_with_seed(3, 0.01, 0).unwrap();
        assert_eq!(
            net.predict(&[]),
            Err(Error::ShapeMismatch {
                expected: 1,
                actual: 0
            })
        );
        assert_eq!(
            net.predict(&[1.0, 2.0]),
            Err(Error::ShapeMismatch {
                expected: 1,
                actual: 2
            })
        );
        assert!(net.predict(&[1.0]).is_ok());
    }

    #[test]
    fn gradients_match_closed_form_for_single_hidden_unit() {
        let (w_h, b_h, w_o, b_o) = (0.7, -0.2, 1.3, 0.4);
        let (x, t) = (2.0, 1.0);
        let net = single_unit(w_h, b_h, w_o, b_o, 0.01);

        let trace = net.forward(&[x]).unwrap();
        let hidden_out = w_h * x + b_h;
        let out = w_o * hidden_out + b_o;
        assert_abs_diff_eq!(trace.hidden[0].output, hidden_out, epsilon = 1e-9);
        assert_abs_diff_eq!(trace.prediction(), out, epsilon = 1e-9);

        let g = net.gradients(&trace, t).unwrap();
        assert_abs_diff_eq!(g.output.bias, out - t, epsilon = 1e-9);
        assert_abs_diff_eq!(g.output.weights[0], (out - t) * hidden_out, epsilon = 1e-9);
        assert_abs_diff_eq!(g.hidden[0].bias, (out - t) * w_o, epsilon = 1e-9);
        assert_abs_diff_eq!(g.hidden[0].weights[0], (out - t) * w_o * x, epsilon = 1e-9);
    }

    #[test]
    fn gradients_match_numeric_gradients() {
        let net = Network::new_with_seed(3, 0.01, 0).unwrap();
        let (x, t) = (0.8, -0.3);

        let trace = net.forward(&[x]).unwrap();
        let g = net.gradients(&trace, t).unwrap();

        let eps = 1e-6;
        let tol = 1e-6;

        // Rebuilds the network with one parameter nudged by `delta`.
        let perturbed = |unit: Option<usize>, param: Option<usize>, delta: f64| -> Network {
            let snap = net.inspect();
            let mut hidden: Vec<Neuron> = snap
                .hidden
                .iter()
                .map(|s| Neuron::with_bias(s.weights.clone(), s.bias, 0.01))
                .collect();
            let mut output = Neuron::with_bias(snap.output.weights.clone(), snap.output.bias, 0.01);
            let target = match unit {
                Some(j) => &mut hidden[j],
                None => &mut output,
            };
            let mut weights = target.weights().to_vec();
            let mut bias = target.bias();
            match param {
                Some(i) => weights[i] += delta,
                None => bias += delta,
            }
            *target = Neuron::with_bias(weights, bias, 0.01);
            Network::from_parts(hidden, output).unwrap()
        };

        let numeric = |unit: Option<usize>, param: Option<usize>| -> f64 {
            let plus = loss_for(&perturbed(unit, param, eps), x, t);
            let minus = loss_for(&perturbed(unit, param, -eps), x, t);
            (plus - minus) / (2.0 * eps)
        };

        assert_abs_diff_eq!(g.output.bias, numeric(None, None), epsilon = tol);
        for i in 0..3 {
            assert_abs_diff_eq!(g.output.weights[i], numeric(None, Some(i)), epsilon = tol);
        }
        for j in 0..3 {
            assert_abs_diff_eq!(g.hidden[j].bias, numeric(Some(j), None), epsilon = tol);
            assert_abs_diff_eq!(g.hidden[j].weights[0], numeric(Some(j), Some(0)), epsilon = tol);
        }
    }

    #[test]
    fn hidden_gradients_use_pre_update_output_weights() {
        let (w_o, x, t) = (1.3, 2.0, 1.0);
        let mut net = single_unit(0.7, -0.2, w_o, 0.4, 0.1);

        let trace = net.forward(&[x]).unwrap();
        let d_out = trace.prediction() - t;
        let h_out = trace.hidden[0].output;

        net.train(x, t).unwrap();

        let lr = 0.1;
        let snap = net.inspect();
        assert_abs_diff_eq!(snap.output.weights[0], w_o - lr * d_out * h_out, epsilon = 1e-12);
        assert_abs_diff_eq!(snap.hidden[0].bias, -0.2 - lr * d_out * w_o, epsilon = 1e-12);
        assert_abs_diff_eq!(snap.hidden[0].weights[0], 0.7 - lr * d_out * w_o * x, epsilon = 1e-12);
    }

    #[test]
    fn train_returns_pre_update_prediction() {
        let mut net = Network::new_with_seed(3, 0.01, 5).unwrap();
        let before = net.predict(&[0.5]).unwrap();
        let observed = net.train(0.5, 2.0).unwrap();
        assert_eq!(before, observed);
        assert_ne!(net.predict(&[0.5]).unwrap(), before);
    }

    #[test]
    fn one_step_reduces_loss_on_the_same_sample() {
        let mut net = single_unit(0.7, -0.2, 1.3, 0.4, 0.01);
        let (x, t) = (2.0, 1.0);

        let before = loss_for(&net, x, t);
        assert!(before > 0.0);
        net.train(x, t).unwrap();
        let after = loss_for(&net, x, t);
        assert!(after < before, "before={before} after={after}");
    }

    #[test]
    fn zero_error_leaves_parameters_unchanged() {
        // hidden_out = 1*2 + 0 = 2; out = 0.5*2 + 0 = 1 == target
        let mut net = single_unit(1.0, 0.0, 0.5, 0.0, 0.01);
        let before = net.clone();
        net.train(2.0, 1.0).unwrap();
        assert_eq!(net, before);
    }

    #[test]
    fn apply_gradients_rejects_mismatched_shapes_without_mutating() {
        let mut net = Network::new_with_seed(3, 0.01, 0).unwrap();
        let before = net.clone();
        let grads = NetworkGradient {
            output: NeuronGradient {
                bias: 1.0,
                weights: vec![1.0; 3],
            },
            hidden: vec![
                NeuronGradient {
                    bias: 1.0,
                    weights: vec![1.0],
                };
                2
            ],
        };
        assert!(net.apply_gradients(&grads).is_err());
        assert_eq!(net, before);
    }
}
