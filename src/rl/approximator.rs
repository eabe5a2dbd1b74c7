//! Action-value function approximator
//!
//! The agent only sees the narrow contract below: batched prediction, a fit
//! toward supplied targets reporting a scalar loss, and a parameter copy for
//! the target-network sync. Any numerical backend satisfying it can be
//! substituted without touching the agent or the trainer.

use super::network::{QNetwork, QNetworkConfig};
use anyhow::{bail, Result};
use burn::{
    module::{AutodiffModule, Module},
    optim::{adaptor::OptimizerAdaptor, Adam, AdamConfig, GradientsParams, Optimizer},
    tensor::{backend::AutodiffBackend, ElementConversion, Tensor, TensorData},
};

/// Contract between the agent and its function approximator
pub trait Approximator {
    /// Number of actions, the width of every predicted Q-row
    fn num_actions(&self) -> usize;

    /// Predicted Q-vectors for a batch of states, one row per state
    fn predict(&self, states: &[Vec<f32>]) -> Vec<Vec<f32>>;

    /// Adjust parameters toward the targets; returns the scalar loss
    ///
    /// Fails on a non-finite loss. The failure is fatal to the training
    /// run; callers must not retry or mask it.
    fn fit(&mut self, states: &[Vec<f32>], targets: &[Vec<f32>]) -> Result<f32>;

    /// Overwrite this approximator's parameters with the source's
    ///
    /// After the copy both produce identical predictions until the source
    /// is updated again.
    fn sync_from(&mut self, source: &Self);
}

/// Q-function backed by a burn MLP and an Adam optimizer
pub struct QFunction<B: AutodiffBackend> {
    network: QNetwork<B>,
    optim: OptimizerAdaptor<Adam, QNetwork<B>, B>,
    input_dim: usize,
    num_actions: usize,
    learning_rate: f64,
    device: B::Device,
}

impl<B: AutodiffBackend> QFunction<B> {
    pub fn new(config: &QNetworkConfig, learning_rate: f64, device: B::Device) -> Self {
        Self {
            network: config.init::<B>(&device),
            optim: AdamConfig::new().init(),
            input_dim: config.input_dim,
            num_actions: config.num_actions,
            learning_rate,
            device,
        }
    }

    fn batch_tensor<Back: burn::tensor::backend::Backend>(
        rows: &[Vec<f32>],
        width: usize,
        device: &Back::Device,
    ) -> Tensor<Back, 2> {
        let data = TensorData::new(rows.concat(), [rows.len(), width]);
        Tensor::from_data(data, device)
    }
}

impl<B: AutodiffBackend> Approximator for QFunction<B> {
    fn num_actions(&self) -> usize {
        self.num_actions
    }

    fn predict(&self, states: &[Vec<f32>]) -> Vec<Vec<f32>> {
        if states.is_empty() {
            return Vec::new();
        }

        let input =
            Self::batch_tensor::<B::InnerBackend>(states, self.input_dim, &self.device);
        let q = self.network.valid().forward(input);

        let values: Vec<f32> = q
            .into_data()
            .to_vec::<f32>()
            .expect("Q-values convert to a flat vec");
        values
            .chunks(self.num_actions)
            .map(|row| row.to_vec())
            .collect()
    }

    fn fit(&mut self, states: &[Vec<f32>], targets: &[Vec<f32>]) -> Result<f32> {
        let input = Self::batch_tensor::<B>(states, self.input_dim, &self.device);
        let target = Self::batch_tensor::<B>(targets, self.num_actions, &self.device);

        let prediction = self.network.forward(input);
        let diff = prediction - target;
        let loss = (diff.clone() * diff).mean();

        let loss_value = loss.clone().into_scalar().elem::<f32>();
        if !loss_value.is_finite() {
            bail!("approximator returned a non-finite loss: {loss_value}");
        }

        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &self.network);
        self.network = self
            .optim
            .step(self.learning_rate, self.network.clone(), grads);

        Ok(loss_value)
    }

    fn sync_from(&mut self, source: &Self) {
        let record = source.network.clone().into_record();
        self.network = self.network.clone().load_record(record);
    }
}
