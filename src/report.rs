//! Human-readable and (feature: `serde`) JSON views of training results.
//!
//! Nothing here is read back: these are outputs for a console or a plotting sink.

use std::fmt;

use crate::neuron::NeuronSnapshot;
use crate::{LossSeries, NetworkSnapshot};

impl fmt::Display for NeuronSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let weights: Vec<String> = self.weights.iter().map(|w| w.to_string()).collect();
        writeln!(f, "-- weights: {}", weights.join(", "))?;
        write!(f, "-- bias: {}", self.bias)
    }
}

impl fmt::Display for NetworkSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "-- output layer:")?;
        writeln!(f, "{}", self.output)?;
        write!(f, "\n-- hidden layer: size = {}", self.hidden.len())?;
        for (i, neuron) in self.hidden.iter().enumerate() {
            write!(f, "\n\n-- hidden neuron {i}:\n{neuron}")?;
        }
        Ok(())
    }
}

impl fmt::Display for LossSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>6} | {:>14}", "epoch", "mean loss")?;
        write!(f, "{:-<7}+{:-<15}", "", "")?;
        for p in self.points() {
            write!(f, "\n{:>6} | {:>14.6e}", p.epoch, p.mean_loss)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod json {
    use crate::{Error, LossSeries, NetworkSnapshot, Result};

    impl LossSeries {
        /// Serialize the series to pretty-printed JSON (`{"points":[{"epoch":..,"mean_loss":..}]}`).
        pub fn to_json_string_pretty(&self) -> Result<String> {
            serde_json::to_string_pretty(self)
                .map_err(|e| Error::InvalidData(format!("failed to serialize loss series: {e}")))
        }
    }

    impl NetworkSnapshot {
        /// Serialize the snapshot to pretty-printed JSON.
        pub fn to_json_string_pretty(&self) -> Result<String> {
            serde_json::to_string_pretty(self)
                .map_err(|e| Error::InvalidData(format!("failed to serialize snapshot: {e}")))
        }
    }
}
