use serde::{Deserialize, Serialize};

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    // Rewards (for RL)
    /// Reward for eating the apple
    pub apple_reward: f32,
    /// Reward for a step that strictly shortens the distance to the apple
    pub closer_reward: f32,
    /// Reward for dying (wall or self-collision)
    pub death_penalty: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 50,
            grid_height: 20,
            initial_snake_length: 3,
            apple_reward: 10.0,
            closer_reward: 1.0,
            death_penalty: -20.0,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_width < self.initial_snake_length + 1 {
            return Err(format!(
                "grid_width ({}) must exceed the initial snake length ({})",
                self.grid_width, self.initial_snake_length
            ));
        }

        if self.grid_height < 2 {
            return Err(format!("grid_height must be at least 2, got {}", self.grid_height));
        }

        if self.initial_snake_length < 3 {
            return Err(format!(
                "initial_snake_length must be at least 3, got {}",
                self.initial_snake_length
            ));
        }

        Ok(())
    }
}
