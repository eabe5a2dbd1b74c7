//! DQN algorithm hyperparameter configuration

use serde::{Deserialize, Serialize};

/// When the agent fits its network during training
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// One fit per environment step, bootstrapped from the fresh transition
    Step,
    /// One minibatch fit per step, sampled from replay memory (default)
    Batch,
    /// Both the per-step fit and the minibatch fit
    Both,
}

/// Configuration for the DQN training algorithm
///
/// Default values are tuned for the compact snake encoding; they also work
/// for the full-grid variant, just slower.
///
/// # Example
///
/// ```rust
/// use snake_dqn::rl::AgentConfig;
///
/// let config = AgentConfig {
///     learning_rate: 5e-4,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Replay memory capacity in transitions
    ///
    /// Default: 10000
    pub memory_capacity: usize,

    /// Minibatch size drawn from replay memory per update
    ///
    /// Default: 64
    pub batch_size: usize,

    /// Discount factor for future rewards (gamma)
    ///
    /// Default: 0.95
    pub gamma: f32,

    /// Learning rate for the Adam optimizer
    ///
    /// Default: 1e-3
    pub learning_rate: f64,

    /// Initial exploration rate (epsilon)
    ///
    /// Probability of taking a uniformly random action instead of the
    /// greedy one.
    ///
    /// Default: 1.0
    pub epsilon: f32,

    /// Multiplicative epsilon decay applied at the end of each episode
    ///
    /// Default: 0.995
    pub epsilon_decay: f32,

    /// Exploration floor epsilon never decays below
    ///
    /// Default: 0.001
    pub epsilon_min: f32,

    /// Episodes between target-network syncs
    ///
    /// Default: 10
    pub sync_interval: u32,

    /// Which fits to run each step
    ///
    /// Default: `UpdateMode::Batch`
    pub update_mode: UpdateMode,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            memory_capacity: 10_000,
            batch_size: 64,
            gamma: 0.95,
            learning_rate: 1e-3,
            epsilon: 1.0,
            epsilon_decay: 0.995,
            epsilon_min: 0.001,
            sync_interval: 10,
            update_mode: UpdateMode::Batch,
        }
    }
}

impl AgentConfig {
    /// Create a new configuration with default hyperparameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration parameters
    ///
    /// Returns `Ok(())` if all parameters are in range, `Err(String)` with
    /// a message otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if self.memory_capacity == 0 {
            return Err("memory_capacity must be positive".to_string());
        }

        if self.batch_size == 0 {
            return Err("batch_size must be positive".to_string());
        }

        if self.batch_size > self.memory_capacity {
            return Err(format!(
                "batch_size ({}) must not exceed memory_capacity ({})",
                self.batch_size, self.memory_capacity
            ));
        }

        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(format!("gamma must be in [0, 1], got {}", self.gamma));
        }

        if self.learning_rate <= 0.0 {
            return Err(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            ));
        }

        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(format!("epsilon must be in [0, 1], got {}", self.epsilon));
        }

        if self.epsilon_decay <= 0.0 || self.epsilon_decay > 1.0 {
            return Err(format!(
                "epsilon_decay must be in (0, 1], got {}",
                self.epsilon_decay
            ));
        }

        if !(0.0..=1.0).contains(&self.epsilon_min) {
            return Err(format!(
                "epsilon_min must be in [0, 1], got {}",
                self.epsilon_min
            ));
        }

        if self.epsilon_min > self.epsilon {
            return Err(format!(
                "epsilon_min ({}) must not exceed epsilon ({})",
                self.epsilon_min, self.epsilon
            ));
        }

        if self.sync_interval == 0 {
            return Err("sync_interval must be positive".to_string());
        }

        Ok(())
    }
}
