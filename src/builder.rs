//! Network builder.
//!
//! `NetworkBuilder` is the recommended way to define a network. It starts from the
//! defaults used by the demo (3 hidden units, learning rate `0.01`) and validates
//! every setting as it is applied.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Error, Network, Result};

pub const DEFAULT_HIDDEN_SIZE: usize = 3;
pub const DEFAULT_LEARNING_RATE: f64 = 0.01;

#[derive(Debug, Clone, Copy)]
/// Builder for a `Network`.
///
/// Example:
///
/// ```rust
/// use shallow_net::NetworkBuilder;
///
/// # fn main() -> shallow_net::Result<()> {
/// let net = NetworkBuilder::new()
///     .hidden_size(4)?
///     .learning_rate(0.05)?
///     .build_with_seed(0)?;
/// assert_eq!(net.hidden_size(), 4);
/// # Ok(())
/// # }
/// ```
pub struct NetworkBuilder {
    hidden_size: usize,
    learning_rate: f64,
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self {
            hidden_size: DEFAULT_HIDDEN_SIZE,
            learning_rate: DEFAULT_LEARNING_RATE,
        }
    }
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of hidden neurons.
    pub fn hidden_size(mut self, hidden_size: usize) -> Result<Self> {
        if hidden_size == 0 {
            return Err(Error::InvalidConfig("hidden_size must be > 0".to_owned()));
        }
        self.hidden_size = hidden_size;
        Ok(self)
    }

    /// Set the learning rate shared by every neuron.
    pub fn learning_rate(mut self, learning_rate: f64) -> Result<Self> {
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "learning rate must be finite and > 0, got {learning_rate}"
            )));
        }
        self.learning_rate = learning_rate;
        Ok(self)
    }

    /// Build using a deterministic seed.
    pub fn build_with_seed(self, seed: u64) -> Result<Network> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.build_with_rng(&mut rng)
    }

    /// Build using the provided RNG.
    pub fn build_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Network> {
        Network::new_with_rng(self.hidden_size, self.learning_rate, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_network() {
        let net = NetworkBuilder::new().build_with_seed(0).unwrap();
        assert_eq!(net.hidden_size(), DEFAULT_HIDDEN_SIZE);
        assert_eq!(net.output().learning_rate(), DEFAULT_LEARNING_RATE);
        assert_eq!(net, Network::new_with_seed(3, 0.01, 0).unwrap());
    }

    #[test]
    fn rejects_invalid_settings() {
        assert!(NetworkBuilder::new().hidden_size(0).is_err());
        assert!(NetworkBuilder::new().learning_rate(-1.0).is_err());
        assert!(NetworkBuilder::new().learning_rate(f64::INFINITY).is_err());
    }
}
