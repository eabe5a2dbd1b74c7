use super::observation::{compact_observation, grid_observation, COMPACT_FEATURES};
use crate::game::{Direction, GameConfig, GameEngine, GameState, Turn};

/// A grid-world environment the agent can train against
///
/// Several encodings of the same game exist; they all share the engine's
/// transition and reward semantics and differ only in observation layout
/// and action space. `state` exposes the underlying game for rendering and
/// diagnostics.
pub trait Environment {
    /// Start a new game and return the initial observation
    fn reset(&mut self) -> Vec<f32>;

    /// Advance one step; returns (observation, reward, done)
    fn step(&mut self, action: usize) -> (Vec<f32>, f32, bool);

    /// Observation of the current state, without advancing
    fn observe(&self) -> Vec<f32>;

    /// Length of the observation vector
    fn observation_len(&self) -> usize;

    /// Number of discrete actions
    fn action_count(&self) -> usize;

    /// Current game state
    fn state(&self) -> &GameState;

    /// How many games have been started (incremented by `reset`)
    fn game_number(&self) -> u32;

    /// Score, defined as the current snake length
    fn score(&self) -> usize {
        self.state().score()
    }
}

/// Canonical environment: relative-turn control, compact 11-feature encoding
pub struct SnakeEnvironment {
    engine: GameEngine,
    state: GameState,
    game_number: u32,
}

impl SnakeEnvironment {
    pub fn new(config: GameConfig) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();
        Self {
            engine,
            state,
            game_number: 1,
        }
    }
}

impl Environment for SnakeEnvironment {
    fn reset(&mut self) -> Vec<f32> {
        self.state = self.engine.reset();
        self.game_number += 1;
        compact_observation(&self.state)
    }

    fn step(&mut self, action: usize) -> (Vec<f32>, f32, bool) {
        let turn = Turn::from_index(action);
        let result = self.engine.step(&mut self.state, turn);
        (
            compact_observation(&self.state),
            result.reward,
            result.terminated,
        )
    }

    fn observe(&self) -> Vec<f32> {
        compact_observation(&self.state)
    }

    fn observation_len(&self) -> usize {
        COMPACT_FEATURES
    }

    fn action_count(&self) -> usize {
        Turn::COUNT
    }

    fn state(&self) -> &GameState {
        &self.state
    }

    fn game_number(&self) -> u32 {
        self.game_number
    }
}

/// Legacy variant: absolute-direction control, full-grid cell-code encoding
///
/// Shares the canonical engine, so the collision and reward semantics are
/// identical; an absolute action is translated into a relative turn against
/// the current heading, and a requested reversal keeps the snake straight.
pub struct GridEnvironment {
    engine: GameEngine,
    state: GameState,
    game_number: u32,
}

impl GridEnvironment {
    pub fn new(config: GameConfig) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();
        Self {
            engine,
            state,
            game_number: 1,
        }
    }
}

impl Environment for GridEnvironment {
    fn reset(&mut self) -> Vec<f32> {
        self.state = self.engine.reset();
        self.game_number += 1;
        grid_observation(&self.state)
    }

    fn step(&mut self, action: usize) -> (Vec<f32>, f32, bool) {
        let desired = Direction::from_index(action);
        let turn =
            Turn::between(self.state.snake.direction, desired).unwrap_or(Turn::Straight);
        let result = self.engine.step(&mut self.state, turn);
        (
            grid_observation(&self.state),
            result.reward,
            result.terminated,
        )
    }

    fn observe(&self) -> Vec<f32> {
        grid_observation(&self.state)
    }

    fn observation_len(&self) -> usize {
        self.state.grid_width * self.state.grid_height
    }

    fn action_count(&self) -> usize {
        4
    }

    fn state(&self) -> &GameState {
        &self.state
    }

    fn game_number(&self) -> u32 {
        self.game_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;

    #[test]
    fn test_snake_environment_reset() {
        let mut env = SnakeEnvironment::new(GameConfig::default());
        let first_game = env.game_number();

        let obs = env.reset();

        assert_eq!(obs.len(), 11);
        assert_eq!(env.game_number(), first_game + 1);
        assert_eq!(env.state().snake.len(), 3);
        assert!(env.state().is_alive);
        assert!(!env.state().snake.contains(env.state().apple));
    }

    #[test]
    fn test_snake_environment_step_shapes() {
        let mut env = SnakeEnvironment::new(GameConfig::default());

        let (obs, reward, done) = env.step(0);

        assert_eq!(obs.len(), env.observation_len());
        assert!(reward.is_finite());
        assert!(!done);
        assert_eq!(env.state().steps, 1);
    }

    #[test]
    fn test_snake_environment_action_space() {
        let env = SnakeEnvironment::new(GameConfig::default());
        assert_eq!(env.action_count(), 3);
        assert_eq!(env.observation_len(), 11);
    }

    #[test]
    fn test_score_is_snake_length() {
        let env = SnakeEnvironment::new(GameConfig::default());
        assert_eq!(env.score(), 3);
    }

    #[test]
    fn test_grid_environment_shapes() {
        let config = GameConfig::small();
        let mut env = GridEnvironment::new(config);

        assert_eq!(env.action_count(), 4);
        assert_eq!(env.observation_len(), 100);

        let (obs, _reward, _done) = env.step(3); // Right
        assert_eq!(obs.len(), 100);
    }

    #[test]
    fn test_grid_environment_ignores_reversal() {
        let mut env = GridEnvironment::new(GameConfig::default());
        assert_eq!(env.state().snake.direction, Direction::Right);
        let head = env.state().snake.head();

        // Requesting Left while heading Right keeps the snake straight
        env.step(2);

        assert_eq!(env.state().snake.direction, Direction::Right);
        assert_eq!(env.state().snake.head(), Position::new(head.x + 1, head.y));
    }

    #[test]
    fn test_terminated_environment_step_is_noop() {
        let mut env = SnakeEnvironment::new(GameConfig::default());

        // Run into the right wall
        let mut done = false;
        let mut guard = 0;
        while !done && guard < 100 {
            let (_obs, _reward, terminated) = env.step(0);
            done = terminated;
            guard += 1;
        }
        assert!(done);

        let steps_before = env.state().steps;
        let (_obs, reward, terminated) = env.step(0);
        assert!(terminated);
        assert_eq!(reward, 0.0);
        assert_eq!(env.state().steps, steps_before);
    }

    #[test]
    fn test_multiple_episodes() {
        let mut env = SnakeEnvironment::new(GameConfig::small());

        for _ in 0..2 {
            env.reset();
            let mut steps = 0;
            let mut done = false;
            while !done && steps < 200 {
                let (_obs, _reward, terminated) = env.step(0);
                done = terminated;
                steps += 1;
            }
            assert!(done || steps == 200);
        }
    }
}
