//! Snake trained with deep Q-learning, rendered live in the terminal
//!
//! This library provides:
//! - Core game logic (game module)
//! - DQN training infrastructure (rl module)
//! - TUI rendering (render module)
//! - Keyboard input handling (input module)
//! - Game and training metrics (metrics module)
//! - Execution modes: train and human play (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod rl;
