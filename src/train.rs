use log::{debug, info};
use rand::Rng;

use crate::data::shuffled;
use crate::{Dataset, Error, Network, Result, loss};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainConfig {
    pub epochs: usize,
    /// Record the mean loss every `report_every` epochs (starting at epoch 0).
    pub report_every: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 20,
            report_every: 2,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(Error::InvalidConfig("epochs must be > 0".to_owned()));
        }
        if self.report_every == 0 {
            return Err(Error::InvalidConfig("report_every must be > 0".to_owned()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LossPoint {
    pub epoch: usize,
    pub mean_loss: f64,
}

/// Mean training loss sampled at a fixed epoch cadence.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LossSeries {
    points: Vec<LossPoint>,
}

impl LossSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, epoch: usize, mean_loss: f64) {
        self.points.push(LossPoint { epoch, mean_loss });
    }

    #[inline]
    pub fn points(&self) -> &[LossPoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&LossPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&LossPoint> {
        self.points.last()
    }

    /// Mean loss recorded for `epoch`, if that epoch was sampled.
    pub fn at_epoch(&self, epoch: usize) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.epoch == epoch)
            .map(|p| p.mean_loss)
    }

    /// Split into plot-ready `(epochs, losses)` columns.
    pub fn columns(&self) -> (Vec<usize>, Vec<f64>) {
        self.points.iter().map(|p| (p.epoch, p.mean_loss)).unzip()
    }
}

/// Run the online SGD epoch loop.
///
/// Every epoch visits a fresh shuffle of `samples` and calls `Network::train` once
/// per sample. After epoch `e`, if `e % report_every == 0`, the epoch's mean loss
/// is appended to the returned series. Any training error aborts the run.
pub fn run<R: Rng + ?Sized>(
    network: &mut Network,
    samples: &Dataset,
    cfg: TrainConfig,
    rng: &mut R,
) -> Result<LossSeries> {
    cfg.validate()?;
    if samples.is_empty() {
        return Err(Error::InvalidData(
            "train dataset must not be empty".to_owned(),
        ));
    }

    let n = samples.len() as f64;
    let mut series = LossSeries::new();

    for epoch in 0..cfg.epochs {
        debug!("epoch {epoch}");

        let order = shuffled(samples.samples(), rng);
        let mut sum_loss = 0.0_f64;
        for sample in &order {
            let predicted = network.train(sample.input, sample.target)?;
            sum_loss += loss::mse(sample.target, predicted);
        }

        if epoch % cfg.report_every == 0 {
            let mean_loss = sum_loss / n;
            info!("epoch {epoch}: mean_loss={mean_loss:.6e}");
            series.push(epoch, mean_loss);
        }
    }

    Ok(series)
}

impl Network {
    /// Train on `samples` with online SGD. See [`run`].
    pub fn fit<R: Rng + ?Sized>(
        &mut self,
        samples: &Dataset,
        cfg: TrainConfig,
        rng: &mut R,
    ) -> Result<LossSeries> {
        run(self, samples, cfg, rng)
    }

    /// Mean half squared error over a dataset, without updating anything.
    pub fn evaluate_mse(&self, data: &Dataset) -> Result<f64> {
        if data.is_empty() {
            return Err(Error::InvalidData("dataset must not be empty".to_owned()));
        }

        let mut total = 0.0_f64;
        for sample in data.samples() {
            total += loss::mse(sample.target, self.predict(&[sample.input])?);
        }
        Ok(total / data.len() as f64)
    }
}
