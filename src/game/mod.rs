//! Core game logic for Snake
//!
//! Everything in this module is pure simulation: no I/O, no rendering, no
//! learning. The engine implements the classic movement rule where the tail
//! is vacated before the collision check, so chasing your own tail is legal.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Turn};
pub use config::GameConfig;
pub use engine::{CollisionType, GameEngine, StepInfo, StepResult};
pub use state::{GameState, Position, Snake};
