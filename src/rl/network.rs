//! Q-value network
//!
//! A small fully connected network mapping an observation vector to one
//! Q-value per action. ReLU between the hidden layers, linear output head
//! (Q-values are unbounded).

use burn::{
    module::Module,
    nn::{Linear, LinearConfig},
    tensor::{activation::relu, backend::Backend, Tensor},
};

/// Configuration for the Q-network
#[derive(Debug, Clone)]
pub struct QNetworkConfig {
    /// Length of the observation vector
    pub input_dim: usize,

    /// Number of actions (width of the output layer)
    pub num_actions: usize,

    /// Hidden layer widths
    pub hidden_dims: [usize; 3],
}

impl QNetworkConfig {
    /// Create a configuration with default hidden widths
    pub fn new(input_dim: usize, num_actions: usize) -> Self {
        Self {
            input_dim,
            num_actions,
            hidden_dims: [128, 92, 24],
        }
    }

    /// Initialize the network from this configuration
    pub fn init<B: Backend>(&self, device: &B::Device) -> QNetwork<B> {
        QNetwork {
            fc1: LinearConfig::new(self.input_dim, self.hidden_dims[0]).init(device),
            fc2: LinearConfig::new(self.hidden_dims[0], self.hidden_dims[1]).init(device),
            fc3: LinearConfig::new(self.hidden_dims[1], self.hidden_dims[2]).init(device),
            output: LinearConfig::new(self.hidden_dims[2], self.num_actions).init(device),
        }
    }
}

/// Fully connected Q-network
#[derive(Module, Debug)]
pub struct QNetwork<B: Backend> {
    fc1: Linear<B>,
    fc2: Linear<B>,
    fc3: Linear<B>,
    output: Linear<B>,
}

impl<B: Backend> QNetwork<B> {
    /// Forward pass: `[batch, input_dim]` → `[batch, num_actions]`
    pub fn forward(&self, states: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = relu(self.fc1.forward(states));
        let x = relu(self.fc2.forward(x));
        let x = relu(self.fc3.forward(x));
        self.output.forward(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::ndarray::{NdArray, NdArrayDevice};
    use burn::tensor::TensorData;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_forward_pass_shape() {
        let device = NdArrayDevice::default();
        let network = QNetworkConfig::new(11, 3).init::<TestBackend>(&device);

        let states = Tensor::zeros([2, 11], &device);
        let q = network.forward(states);

        assert_eq!(q.dims(), [2, 3]);
    }

    #[test]
    fn test_different_batch_sizes() {
        let device = NdArrayDevice::default();
        let network = QNetworkConfig::new(11, 3).init::<TestBackend>(&device);

        for batch in [1, 4, 32, 64] {
            let states = Tensor::zeros([batch, 11], &device);
            assert_eq!(network.forward(states).dims(), [batch, 3]);
        }
    }

    #[test]
    fn test_grid_sized_input() {
        let device = NdArrayDevice::default();
        let network = QNetworkConfig::new(50 * 20, 4).init::<TestBackend>(&device);

        let states = Tensor::zeros([1, 1000], &device);
        assert_eq!(network.forward(states).dims(), [1, 4]);
    }

    #[test]
    fn test_output_finite() {
        let device = NdArrayDevice::default();
        let network = QNetworkConfig::new(11, 3).init::<TestBackend>(&device);

        let states = Tensor::ones([4, 11], &device);
        let q = network.forward(states);

        let data: TensorData = q.into_data();
        for &value in data.as_slice::<f32>().unwrap() {
            assert!(value.is_finite());
        }
    }
}
