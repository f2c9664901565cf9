//! Presentation boundary
//!
//! The core only says what goes where. Sinks decide how it looks.

use crate::board::Coord;
use crate::tetromino::{Orientation, TetrominoKind};
use ratatui::style::Color;
use std::io;

/// Color of a piece that is waiting out its lock delay
pub const LOCKING_COLOR: Color = Color::Rgb(0x55, 0x55, 0x55);

/// Colored cells to draw
pub type Tiles = Vec<(Coord, Color)>;

/// Everything to draw for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    /// Settled board cells, in board coordinates
    pub board: Tiles,
    /// The falling piece, in board coordinates
    pub active: Tiles,
    /// Landing preview of the falling piece, in board coordinates
    pub ghost: Tiles,
    /// Held piece, relative to its own bounding box
    pub held: Option<Tiles>,
    /// Upcoming pieces in order, each relative to its own bounding box
    pub next: Vec<Tiles>,
}

/// Tiles of a piece in spawn orientation, top-left of its box at (0, 0)
pub fn preview(kind: TetrominoKind) -> Tiles {
    let orientation = Orientation::Up;
    let top = 4 - kind.height(orientation);
    kind.offsets(orientation)
        .iter()
        .map(|&(col, row)| (Coord::new(col, row - top), kind.color()))
        .collect()
}

/// Draws scenes
pub trait RenderSink {
    fn render(&mut self, scene: &Scene) -> io::Result<()>;
}

/// Shows the status/title text
pub trait TitleSink {
    fn set_title(&mut self, title: &str) -> io::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_starts_at_origin() {
        for kind in TetrominoKind::all() {
            let tiles = preview(kind);
            assert_eq!(tiles.len(), 4);
            assert_eq!(tiles.iter().map(|(c, _)| c.row).min(), Some(0));
            assert_eq!(tiles.iter().map(|(c, _)| c.column).min(), Some(0));
        }
    }

    #[test]
    fn test_i_preview_is_one_row() {
        let tiles = preview(TetrominoKind::I);
        assert!(tiles.iter().all(|(c, _)| c.row == 0));
    }
}
