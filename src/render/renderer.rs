use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::Palette;
use crate::game::{Cell, CellKind, GameState, RenderView};
use crate::metrics::GameMetrics;

pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        status: Option<&str>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(1), // Status line
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        let status = self.render_status(status);
        frame.render_widget(status, chunks[1]);

        let game_area = self.center_board(chunks[2], state);
        let grid = self.render_grid(state.view());
        frame.render_widget(grid, game_area);

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[3]);
    }

    /// Board rectangle: two terminal columns per cell plus the border,
    /// clipped to the available area
    fn center_board(&self, area: Rect, state: &GameState) -> Rect {
        let width = u16::try_from(state.grid.width())
            .unwrap_or(u16::MAX)
            .saturating_mul(2)
            .saturating_add(2);
        let height = u16::try_from(state.grid.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(width)])
            .flex(Flex::Center)
            .split(area)[0];

        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(height)])
            .flex(Flex::Center)
            .split(horizontal)[0]
    }

    fn cell_span(&self, kind: CellKind) -> Span<'static> {
        let base = Style::default().bg(self.palette.background);

        match kind {
            CellKind::Head => Span::styled(
                "██",
                base.fg(self.palette.head).add_modifier(Modifier::BOLD),
            ),
            CellKind::Body => Span::styled("▓▓", base.fg(self.palette.snake)),
            CellKind::Food => Span::styled("▓▓", base.fg(self.palette.food)),
            // The vacated tail cell is cleared to background like any empty cell
            CellKind::Vacated | CellKind::Empty => Span::styled("  ", base),
        }
    }

    fn render_grid(&self, view: RenderView<'_>) -> Paragraph<'static> {
        let lines: Vec<Line> = (0..view.grid.height())
            .map(|y| {
                let spans: Vec<Span> = (0..view.grid.width())
                    .map(|x| self.cell_span(view.classify(Cell::new(x, y))))
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(self.palette.border))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Length: ", label),
            Span::styled(
                state.snake.length().to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_length.to_string(), value),
            Span::raw("    "),
            Span::styled("Eaten: ", label),
            Span::styled(state.food_eaten.to_string(), value),
            Span::raw("    "),
            Span::styled("Resets: ", label),
            Span::styled(state.resets.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_status(&self, status: Option<&str>) -> Paragraph<'static> {
        let text = status.unwrap_or_default().to_string();
        Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(Color::Gray),
        )))
        .alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
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
        Self::new(Palette::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Food, Grid, Snake};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_draws_board_and_stats() {
        let grid = Grid::new(10, 6, 20);
        let state = GameState::new(grid, Snake::new(grid), Food::new(Cell::new(1, 1)));
        let metrics = GameMetrics::new();
        let renderer = Renderer::default();

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| renderer.render(frame, &state, &metrics, Some("Ouch! Starting over.")))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Length"));
        assert!(text.contains("Snake"));
        assert!(text.contains("Ouch! Starting over."));
        assert!(text.contains("█"));
        assert!(text.contains("▓"));
    }

    #[test]
    fn test_board_size_saturates_on_wide_grids() {
        let renderer = Renderer::default();
        let area = Rect::new(0, 0, 80, 20);

        // Wider than u16 must not wrap into a tiny board
        let grid = Grid::new(65_541, 5, 1);
        let state = GameState::new(grid, Snake::new(grid), Food::new(Cell::new(0, 0)));
        let board = renderer.center_board(area, &state);
        assert_eq!(board.width, area.width);
        assert_eq!(board.height, 7);

        let grid = Grid::new(10, 6, 20);
        let state = GameState::new(grid, Snake::new(grid), Food::new(Cell::new(0, 0)));
        let board = renderer.center_board(area, &state);
        assert_eq!((board.width, board.height), (22, 8));
    }

    #[test]
    fn test_vacated_cell_is_cleared() {
        let renderer = Renderer::default();
        assert_eq!(
            renderer.cell_span(CellKind::Vacated),
            renderer.cell_span(CellKind::Empty)
        );
        assert_ne!(
            renderer.cell_span(CellKind::Body),
            renderer.cell_span(CellKind::Empty)
        );
    }
}
