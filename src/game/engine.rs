use super::{
    action::{Direction, Turn},
    config::GameConfig,
    state::{GameState, Position, Snake},
};
use rand::Rng;

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate the apple this step
    pub ate_apple: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Reward for this step (for RL training)
    pub reward: f32,
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
///
/// The engine is stateless apart from its RNG; the mutable `GameState` is
/// threaded through `step`, so several episodes (or several environments)
/// can share one engine.
pub struct GameEngine {
    config: GameConfig,
    rng: rand::rngs::ThreadRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to its initial state
    ///
    /// The snake starts as a fixed horizontal segment in the middle of the
    /// grid, heading Right; the apple is rejection-sampled off the snake.
    pub fn reset(&mut self) -> GameState {
        let center_x = (self.config.grid_width / 2) as i32;
        let center_y = (self.config.grid_height / 2) as i32;

        let snake = Snake::new(
            Position::new(center_x, center_y),
            Direction::Right,
            self.config.initial_snake_length,
        );

        let apple = self.spawn_apple_avoid_snake(&snake);

        GameState::new(snake, apple, self.config.grid_width, self.config.grid_height)
    }

    /// Execute one step of the game
    ///
    /// The heading is rotated per `turn`, then the prospective head cell is
    /// evaluated. Eating the apple grows the snake and respawns the apple.
    /// Otherwise the tail is vacated *before* the collision check, so a
    /// move into the cell the tail leaves this same step is legal.
    pub fn step(&mut self, state: &mut GameState, turn: Turn) -> StepResult {
        if !state.is_alive {
            return StepResult {
                reward: 0.0,
                terminated: true,
                info: StepInfo {
                    ate_apple: false,
                    collision_type: None,
                },
            };
        }

        state.snake.direction = state.snake.direction.turned(turn);
        let old_head = state.snake.head();
        let new_head = old_head.moved_in_direction(state.snake.direction);

        if new_head == state.apple {
            // The apple is respawned against the pre-growth snake; the new
            // head is appended afterwards without vacating the tail.
            state.apple = self.spawn_apple_avoid_snake(&state.snake);
            state.snake.advance(new_head);
            state.apples_eaten += 1;
            state.steps += 1;

            return StepResult {
                reward: self.config.apple_reward,
                terminated: false,
                info: StepInfo {
                    ate_apple: true,
                    collision_type: None,
                },
            };
        }

        state.snake.vacate_tail();

        if let Some(collision_type) = self.check_collision(state, new_head) {
            state.snake.advance(new_head);
            state.is_alive = false;
            state.steps += 1;

            return StepResult {
                reward: self.config.death_penalty,
                terminated: true,
                info: StepInfo {
                    ate_apple: false,
                    collision_type: Some(collision_type),
                },
            };
        }

        let reward = if new_head.manhattan_distance(state.apple)
            < old_head.manhattan_distance(state.apple)
        {
            self.config.closer_reward
        } else {
            0.0
        };

        state.snake.advance(new_head);
        state.steps += 1;

        StepResult {
            reward,
            terminated: false,
            info: StepInfo {
                ate_apple: false,
                collision_type: None,
            },
        }
    }

    /// Check the prospective head against the walls and the post-vacate body
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.snake.contains(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Spawn the apple at a random cell not occupied by the snake
    fn spawn_apple_avoid_snake(&mut self, snake: &Snake) -> Position {
        loop {
            let x = self.rng.gen_range(0..self.config.grid_width) as i32;
            let y = self.rng.gen_range(0..self.config.grid_height) as i32;
            let pos = Position::new(x, y);

            if !snake.contains(pos) {
                return pos;
            }
        }
    }
}
