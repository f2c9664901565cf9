//! Terminal UI rendering with ratatui

use crate::board::{BOARD_WIDTH, Coord, HIDDEN_ROWS, VISIBLE_ROWS};
use crate::render::{RenderSink, Scene, Tiles, TitleSink};
use crate::settings::VisualSettings;
use crossterm::{execute, terminal::SetTitle};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io;

const EMPTY: &str = "  ";

/// Total width needed: hold(12) + board(22) + next(16) = 50
const GAME_WIDTH: u16 = 50;
/// Total height needed: board(20) + 2 for borders + status line = 23
const GAME_HEIGHT: u16 = 23;

/// Terminal frontend: draws scenes and shows titles
pub struct TerminalUi<B: Backend> {
    terminal: Terminal<B>,
    visual: VisualSettings,
    status: String,
}

impl<B: Backend> TerminalUi<B> {
    pub fn new(terminal: Terminal<B>, visual: VisualSettings) -> Self {
        Self {
            terminal,
            visual,
            status: String::new(),
        }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Text for the status line under the board
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

impl<B: Backend> RenderSink for TerminalUi<B> {
    fn render(&mut self, scene: &Scene) -> io::Result<()> {
        let visual = &self.visual;
        let status = &self.status;
        self.terminal.draw(|frame| render_scene(frame, scene, status, visual))?;
        Ok(())
    }
}

impl<B: Backend + io::Write> TitleSink for TerminalUi<B> {
    fn set_title(&mut self, title: &str) -> io::Result<()> {
        self.set_status(title);
        execute!(self.terminal.backend_mut(), SetTitle(title))
    }
}

/// Render a full frame
pub fn render_scene(frame: &mut Frame, scene: &Scene, status: &str, visual: &VisualSettings) {
    let area = frame.area();
    let (block_char, _) = visual.block_chars();

    // Center the game area
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(VISIBLE_ROWS as u16 + 2), // Board (with borders)
            Constraint::Length(1),                       // Status line
        ])
        .split(game_area);

    // Create main layout: hold | board | next
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),                         // Hold box
            Constraint::Length(BOARD_WIDTH as u16 * 2 + 2), // Board
            Constraint::Length(16),                         // Next queue
        ])
        .split(rows[0]);

    render_hold(frame, main_layout[0], scene.held.as_ref(), block_char);
    render_board(frame, main_layout[1], scene, visual);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(0)])
        .split(main_layout[2]);
    render_next_queue(frame, right_layout[0], &scene.next, block_char);

    let status_style = Style::default().fg(Color::Yellow).bold();
    let status = Paragraph::new(Line::styled(status, status_style)).alignment(Alignment::Center);
    frame.render_widget(status, rows[1]);
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the hold piece box
fn render_hold(frame: &mut Frame, area: Rect, held: Option<&Tiles>, block_char: &str) {
    let block = Block::default()
        .title(" HOLD ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(tiles) = held {
        render_mini_piece(frame, inner, tiles, block_char);
    }
}

/// Render the next piece queue
fn render_next_queue(frame: &mut Frame, area: Rect, next: &[Tiles], block_char: &str) {
    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if next.is_empty() {
        return;
    }

    let piece_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3); next.len()])
        .split(inner);

    for (tiles, &piece_area) in next.iter().zip(piece_areas.iter()) {
        render_mini_piece(frame, piece_area, tiles, block_char);
    }
}

/// Render a small piece preview (for hold and next queue)
fn render_mini_piece(frame: &mut Frame, area: Rect, tiles: &Tiles, block_char: &str) {
    if area.height < 1 || area.width < 4 {
        return;
    }

    // Previews are at most 2 rows tall in spawn orientation
    let mut lines: Vec<Line> = Vec::new();
    for row in 0..2 {
        let spans: Vec<Span> = (0..4)
            .map(|col| match tiles.iter().find(|(coord, _)| *coord == Coord::new(col, row)) {
                Some(&(_, color)) => Span::styled(block_char, Style::default().fg(color)),
                None => Span::raw(EMPTY),
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Render the visible part of the board
fn render_board(frame: &mut Frame, area: Rect, scene: &Scene, visual: &VisualSettings) {
    let (block_char, ghost_char) = visual.block_chars();

    let block = Block::default()
        .title(" TETRS ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut grid: Vec<Vec<Span>> = vec![vec![Span::raw(EMPTY); BOARD_WIDTH]; VISIBLE_ROWS];
    let mut paint = |tiles: &Tiles, text: &'static str, dim: bool| {
        for &(coord, color) in tiles {
            let row = coord.row - HIDDEN_ROWS as i32;
            let column = coord.column;
            let on_board = (0..BOARD_WIDTH as i32).contains(&column);
            if !on_board || !(0..VISIBLE_ROWS as i32).contains(&row) {
                continue;
            }
            let style = if dim {
                Style::default().fg(color).dim()
            } else {
                Style::default().fg(color)
            };
            grid[row as usize][column as usize] = Span::styled(text, style);
        }
    };

    // Later layers draw over earlier ones
    paint(&scene.board, block_char, false);
    if visual.show_ghost {
        paint(&scene.ghost, ghost_char, true);
    }
    paint(&scene.active, block_char, false);

    let lines: Vec<Line> = grid.into_iter().map(Line::from).collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::preview;
    use crate::tetromino::TetrominoKind;
    use ratatui::backend::TestBackend;

    fn ui() -> TerminalUi<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(60, 26)).unwrap();
        TerminalUi::new(terminal, VisualSettings::default())
    }

    fn screen(ui: &TerminalUi<TestBackend>) -> String {
        let buffer = ui.terminal().backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_empty_scene_draws_frame() {
        let mut ui = ui();
        ui.render(&Scene::default()).unwrap();
        let screen = screen(&ui);
        assert!(screen.contains("HOLD"));
        assert!(screen.contains("NEXT"));
        assert!(!screen.contains('█'));
    }

    #[test]
    fn test_hidden_rows_are_not_drawn() {
        let mut ui = ui();
        let scene = Scene {
            active: vec![(Coord::new(0, 0), Color::Red), (Coord::new(0, 1), Color::Red)],
            ..Scene::default()
        };
        ui.render(&scene).unwrap();
        assert!(!screen(&ui).contains('█'));
    }

    #[test]
    fn test_board_and_previews_are_drawn() {
        let mut ui = ui();
        let scene = Scene {
            board: vec![(Coord::new(0, 21), Color::Red)],
            held: Some(preview(TetrominoKind::O)),
            next: vec![preview(TetrominoKind::I)],
            ..Scene::default()
        };
        ui.render(&scene).unwrap();
        // One board cell, four O cells and four I cells, two columns each
        let blocks = screen(&ui).chars().filter(|&c| c == '█').count();
        assert_eq!(blocks, 18);
    }

    #[test]
    fn test_status_line() {
        let mut ui = ui();
        ui.set_status("Level: 2 Lines: 7 Scores: 900");
        ui.render(&Scene::default()).unwrap();
        assert!(screen(&ui).contains("Level: 2 Lines: 7 Scores: 900"));
    }

    #[test]
    fn test_ghost_respects_setting() {
        let terminal = Terminal::new(TestBackend::new(60, 26)).unwrap();
        let visual = VisualSettings {
            show_ghost: false,
            ..VisualSettings::default()
        };
        let mut ui = TerminalUi::new(terminal, visual);
        let scene = Scene {
            ghost: vec![(Coord::new(4, 21), Color::Red)],
            ..Scene::default()
        };
        ui.render(&scene).unwrap();
        assert!(!screen(&ui).contains('░'));
    }
}
