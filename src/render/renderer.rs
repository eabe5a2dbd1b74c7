use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{GameState, Position};
use crate::metrics::GameMetrics;

/// Training diagnostics shown above the grid
#[derive(Debug, Clone, Default)]
pub struct TrainingHud {
    pub episode: u32,
    pub game_number: u32,
    pub epsilon: f32,
    pub memories: usize,
    pub max_score: usize,
    pub mean_score: f32,
    pub last_loss: Option<f32>,
    pub running: bool,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw a human-play frame: stats header, grid, controls footer
    pub fn render_human(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(chunks[0], state, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = self.centered_game_area(chunks[1]);
        if state.is_alive {
            let grid = self.render_grid(game_area, state);
            frame.render_widget(grid, game_area);
        } else {
            let game_over = self.render_game_over(game_area, state);
            frame.render_widget(game_over, game_area);
        }

        let controls = self.render_human_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    /// Draw a training frame: diagnostics header, live grid, controls footer
    pub fn render_training(&self, frame: &mut Frame, state: &GameState, hud: &TrainingHud) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Diagnostics
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let diagnostics = self.render_diagnostics(chunks[0], hud);
        frame.render_widget(diagnostics, chunks[0]);

        let game_area = self.centered_game_area(chunks[1]);
        let grid = self.render_grid(game_area, state);
        frame.render_widget(grid, game_area);

        let controls = self.render_training_controls(chunks[2], hud.running);
        frame.render_widget(controls, chunks[2]);
    }

    fn centered_game_area(&self, area: Rect) -> Rect {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(area)[1]
    }

    fn render_grid(&self, _area: Rect, state: &GameState) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for y in 0..state.grid_height {
            let mut spans = Vec::new();

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == state.snake.head() {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.contains(pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == state.apple {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, _area: Rect, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Apples: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.apples_eaten.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.best_length.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.format_game_time(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Session: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.format_session_time(),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_diagnostics(&self, _area: Rect, hud: &TrainingHud) -> Paragraph<'_> {
        let status = if hud.running {
            Span::styled(
                "TRAINING",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        };

        let loss = match hud.last_loss {
            Some(loss) => format!("{:.4}", loss),
            None => "-".to_string(),
        };

        let text = vec![Line::from(vec![
            status,
            Span::raw("    "),
            Span::styled("Game: ", Style::default().fg(Color::Yellow)),
            Span::styled(hud.game_number.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Episode: ", Style::default().fg(Color::Yellow)),
            Span::styled(hud.episode.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("ε: ", Style::default().fg(Color::Yellow)),
            Span::styled(format!("{:.3}", hud.epsilon), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Memories: ", Style::default().fg(Color::Yellow)),
            Span::styled(hud.memories.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Max: ", Style::default().fg(Color::Yellow)),
            Span::styled(hud.max_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Mean: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{:.2}", hud.mean_score),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Loss: ", Style::default().fg(Color::Yellow)),
            Span::styled(loss, Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, _area: Rect, state: &GameState) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_human_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" to pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_training_controls(&self, _area: Rect, running: bool) -> Paragraph<'_> {
        let toggle = if running { " to pause | " } else { " to start | " };
        let text = vec![Line::from(vec![
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(toggle),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
