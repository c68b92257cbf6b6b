use std::collections::HashSet;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{CollisionType, GameState, Phase, Position};
use crate::metrics::GameMetrics;

/// What a single grid cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Head,
    Body,
    Food,
    Empty,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        if state.is_over() {
            let game_over = self.render_game_over(state, metrics);
            frame.render_widget(game_over, chunks[1]);
        } else {
            let grid = self.render_grid(state);
            frame.render_widget(grid, chunks[1]);
        }

        let controls = self.render_controls(state);
        frame.render_widget(controls, chunks[2]);
    }

    /// Classify a cell; the head wins over food and body
    pub fn tile_at(state: &GameState, body: &HashSet<Position>, pos: Position) -> Tile {
        if state.snake.head().position == pos {
            Tile::Head
        } else if body.contains(&pos) {
            Tile::Body
        } else if state.food == Some(pos) {
            Tile::Food
        } else {
            Tile::Empty
        }
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let body = state.snake.occupied_cells();
        let mut lines = Vec::with_capacity(state.grid.height());

        for row in 0..state.grid.height() {
            let spans: Vec<Span> = (0..state.grid.width())
                .map(|col| {
                    let pos = Position::new(row as i32, col as i32);
                    match Self::tile_at(state, &body, pos) {
                        Tile::Head => Span::styled(
                            "■ ",
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Tile::Body => Span::styled("□ ", Style::default().fg(Color::Green)),
                        Tile::Food => Span::styled(
                            "● ",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        ),
                        Tile::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                    }
                })
                .collect();

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

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.best_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.snake.len().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let headline = match state.collision {
            Some(CollisionType::Wall) => "GAME OVER - hit the wall",
            Some(CollisionType::SelfCollision) => "GAME OVER - bit yourself",
            None => "BOARD FULL",
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                headline,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Games played: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.games_played.to_string(),
                    Style::default().fg(Color::White),
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
                Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
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

    fn render_controls(&self, state: &GameState) -> Paragraph<'_> {
        let hint = if state.phase == Phase::NotStarted {
            " to start | "
        } else {
            " to move | "
        };

        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(hint),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine};
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_tile_classification() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 5).unwrap();
        engine.place_food(Position::new(5, 5)).unwrap();
        let state = engine.state();
        let body = state.snake.occupied_cells();

        assert_eq!(Renderer::tile_at(state, &body, Position::new(1, 4)), Tile::Head);
        assert_eq!(Renderer::tile_at(state, &body, Position::new(1, 1)), Tile::Body);
        assert_eq!(Renderer::tile_at(state, &body, Position::new(5, 5)), Tile::Food);
        assert_eq!(Renderer::tile_at(state, &body, Position::new(9, 9)), Tile::Empty);
    }

    #[test]
    fn test_board_shows_snake_and_food() {
        let mut engine = GameEngine::with_seed(GameConfig::new(8, 3), 5).unwrap();
        engine.place_food(Position::new(2, 7)).unwrap();
        let metrics = GameMetrics::new();
        let renderer = Renderer::new();
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();

        terminal
            .draw(|frame| renderer.render(frame, engine.state(), &metrics))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert_eq!(screen.matches('■').count(), 1);
        assert_eq!(screen.matches('□').count(), 3);
        assert_eq!(screen.matches('●').count(), 1);
    }

    #[test]
    fn test_draws_without_panicking() {
        let engine = GameEngine::with_seed(GameConfig::small(), 5).unwrap();
        let metrics = GameMetrics::new();
        let renderer = Renderer::new();
        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();

        terminal
            .draw(|frame| renderer.render(frame, engine.state(), &metrics))
            .unwrap();
    }
}
