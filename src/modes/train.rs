//! Training mode for the DQN agent
//!
//! Runs the agent against the environment inside the TUI event loop. The
//! loop stays cooperative: a burst of training iterations runs per timer
//! tick, so key handling and rendering interleave with learning. Space
//! starts and stops training; the grid always shows the live game.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::input::{InputHandler, KeyAction};
use crate::metrics::TrainingStats;
use crate::render::{Renderer, TrainingHud};
use crate::rl::{Approximator, DqnAgent, Environment, Transition};

/// Training iterations run per timer tick while training is on
const STEPS_PER_TICK: usize = 16;

/// Training mode: DQN agent learning live in the terminal
pub struct TrainMode<E: Environment, A: Approximator> {
    env: E,
    agent: DqnAgent<A>,
    stats: TrainingStats,
    renderer: Renderer,
    input_handler: InputHandler,

    /// Observation of the environment's current state
    observation: Vec<f32>,

    /// Reward accumulated in the episode in progress
    episode_reward: f32,

    /// Steps taken in the episode in progress
    episode_steps: usize,

    /// Whether training iterations run on timer ticks
    running: bool,

    should_quit: bool,
}

impl<E: Environment, A: Approximator> TrainMode<E, A> {
    pub fn new(env: E, agent: DqnAgent<A>) -> Self {
        let observation = env.observe();
        Self {
            env,
            agent,
            stats: TrainingStats::new(100),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            observation,
            episode_reward: 0.0,
            episode_steps: 0,
            running: false,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_training_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_training_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Training ticks as fast as the runtime allows
        let mut step_timer = interval(Duration::from_millis(1));

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Training burst
                _ = step_timer.tick() => {
                    if self.running {
                        for _ in 0..STEPS_PER_TICK {
                            self.train_iteration()?;
                        }
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    let hud = self.hud();
                    terminal.draw(|frame| {
                        self.renderer.render_training(frame, self.env.state(), &hud);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// One agent-environment step plus the learning it triggers
    ///
    /// On episode end the agent decays epsilon, the stats record the
    /// episode, and the environment resets for the next game.
    pub fn train_iteration(&mut self) -> Result<()> {
        let action = self.agent.select_action(&self.observation);
        let (next_observation, reward, done) = self.env.step(action);

        let state = std::mem::replace(&mut self.observation, next_observation.clone());
        self.agent.update(Transition {
            state,
            action,
            reward,
            next_state: next_observation,
            done,
        })?;

        self.episode_reward += reward;
        self.episode_steps += 1;

        if done {
            self.stats
                .record_episode(self.episode_reward, self.episode_steps, self.env.score());
            if let Some(loss) = self.agent.last_loss() {
                self.stats.record_loss(loss);
            }
            self.agent.end_episode();

            self.observation = self.env.reset();
            self.episode_reward = 0.0;
            self.episode_steps = 0;
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::TogglePause => {
                    self.running = !self.running;
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::Move(_) | KeyAction::Restart | KeyAction::None => {}
            }
        }
    }

    fn hud(&self) -> TrainingHud {
        TrainingHud {
            episode: self.agent.episodes(),
            game_number: self.env.game_number(),
            epsilon: self.agent.epsilon(),
            memories: self.agent.memory_len(),
            max_score: self.stats.max_score(),
            mean_score: self.stats.mean_episode_score(),
            last_loss: self.agent.last_loss(),
            running: self.running,
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
