use std::time::{Duration, Instant};

use crate::game::GameState;

/// Session counters for interactive play
///
/// Keeps a clock for the game in progress and folds every finished game
/// into session-wide totals: games played, apples eaten, best snake length.
pub struct GameMetrics {
    game_started: Instant,
    session_started: Instant,
    pub games_played: u32,
    pub best_length: usize,
    pub total_apples: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            game_started: now,
            session_started: now,
            games_played: 0,
            best_length: 0,
            total_apples: 0,
        }
    }

    /// Restart the per-game clock
    pub fn on_game_start(&mut self) {
        self.game_started = Instant::now();
    }

    /// Fold a finished game into the session counters
    pub fn on_game_over(&mut self, state: &GameState) {
        self.games_played += 1;
        self.total_apples += state.apples_eaten;
        if state.score() > self.best_length {
            self.best_length = state.score();
        }
    }

    pub fn game_time(&self) -> Duration {
        self.game_started.elapsed()
    }

    pub fn session_time(&self) -> Duration {
        self.session_started.elapsed()
    }

    pub fn format_game_time(&self) -> String {
        format_mm_ss(self.game_time())
    }

    pub fn format_session_time(&self) -> String {
        format_mm_ss(self.session_time())
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn format_mm_ss(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
