//! Reinforcement learning infrastructure for the Snake game
//!
//! Provides:
//! - Compact 11-feature and full-grid observation encodings
//! - Environment trait tying the game engine to the agent
//! - Bounded FIFO replay memory with uniform sampling
//! - Burn-backed Q-network and Adam-fitted approximator
//! - DQN agent with epsilon-greedy exploration and a target network

pub mod agent;
pub mod approximator;
pub mod config;
pub mod environment;
pub mod memory;
pub mod network;
pub mod observation;

pub use agent::DqnAgent;
pub use approximator::{Approximator, QFunction};
pub use config::{AgentConfig, UpdateMode};
pub use environment::{Environment, GridEnvironment, SnakeEnvironment};
pub use memory::{ReplayMemory, Transition};
pub use network::{QNetwork, QNetworkConfig};
pub use observation::{compact_observation, grid_observation, COMPACT_FEATURES};
