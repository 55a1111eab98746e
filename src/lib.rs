//! A one-hidden-layer network fitted by online SGD.
//!
//! `shallow-net` fits a tiny feed-forward network (a hidden layer of fan-in-1
//! linear neurons feeding one linear output neuron) to a one-dimensional affine
//! function, one sample at a time, with hand-derived gradients.
//!
//! # Design
//!
//! - Forward passes return explicit traces ([`ForwardTrace`], [`NetworkTrace`])
//!   instead of caching the last inputs on each neuron. Gradients are derived from
//!   a trace through `&self`, and only then applied through `&mut self`, so every
//!   layer's gradient is computed from pre-update weights.
//! - All randomness (initialization, per-epoch shuffles) comes from an RNG passed
//!   in by the caller. Seed a `StdRng` to make a run reproducible.
//! - Shape errors are returned as [`Error::ShapeMismatch`], never coerced.
//!
//! # Quick start
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use shallow_net::{Dataset, NetworkBuilder, TrainConfig};
//!
//! # fn main() -> shallow_net::Result<()> {
//! let mut rng = StdRng::seed_from_u64(0);
//! let mut data = Dataset::affine(200, &mut rng)?;
//! let standardizer = data.standardize_inputs()?;
//!
//! let mut net = NetworkBuilder::new().build_with_seed(0)?;
//! let series = net.fit(&data, TrainConfig::default(), &mut rng)?;
//! assert_eq!(series.len(), 10);
//!
//! let y = net.predict(&[standardizer.apply(4096.0)])?;
//! assert!(y.is_finite());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod data;
pub mod error;
pub mod init;
pub mod loss;
pub mod network;
pub mod neuron;
pub mod report;
pub mod standardize;
pub mod train;

pub use builder::NetworkBuilder;
pub use data::{Dataset, Sample, shuffled};
pub use error::{Error, Result};
pub use network::{Network, NetworkGradient, NetworkSnapshot, NetworkTrace};
pub use neuron::{ForwardTrace, Neuron, NeuronGradient, NeuronSnapshot};
pub use standardize::{Standardized, Standardizer};
pub use train::{LossPoint, LossSeries, TrainConfig};
