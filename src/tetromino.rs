//! Tetromino definitions and shapes
//!
//! All 7 tetrominoes with their four orientations. Each orientation is a
//! 4x4 bitmask read most-significant bit first: bit `0x8000 >> i` marks the
//! cell at column `i % 4`, row `i / 4` of the piece's bounding box.

use ratatui::style::Color;

/// A 4x4 occupancy mask for one orientation
pub type Shape = u16;

/// The 7 tetromino kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoKind {
    I, // Cyan - long bar
    O, // Yellow - square
    T, // Purple - T-shape
    J, // Blue - J-shape
    L, // Orange - L-shape
    S, // Green - S-shape
    Z, // Red - Z-shape
}

/// Rotation table family a kind belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindCategory {
    /// Uses the wide I offsets and kicks
    I,
    /// Never rotates
    O,
    /// J, L, S, T and Z share one table
    Other,
}

impl TetrominoKind {
    /// Get all tetromino kinds for bag randomization
    pub fn all() -> [TetrominoKind; 7] {
        [
            TetrominoKind::I,
            TetrominoKind::O,
            TetrominoKind::T,
            TetrominoKind::J,
            TetrominoKind::L,
            TetrominoKind::S,
            TetrominoKind::Z,
        ]
    }

    pub fn category(&self) -> KindCategory {
        match self {
            TetrominoKind::I => KindCategory::I,
            TetrominoKind::O => KindCategory::O,
            _ => KindCategory::Other,
        }
    }

    /// Get the color for this tetromino
    pub fn color(&self) -> Color {
        match self {
            TetrominoKind::I => Color::Rgb(0x00, 0xE6, 0xE6),
            TetrominoKind::O => Color::Rgb(0xE6, 0xE6, 0x00),
            TetrominoKind::T => Color::Rgb(0xE6, 0x00, 0xE6),
            TetrominoKind::J => Color::Rgb(0x00, 0x72, 0xFB),
            TetrominoKind::L => Color::Rgb(0xE6, 0x95, 0x00),
            TetrominoKind::S => Color::Rgb(0x00, 0xE6, 0x00),
            TetrominoKind::Z => Color::Rgb(0xE6, 0x00, 0x00),
        }
    }

    /// Get the occupancy mask for this tetromino at a given orientation
    pub fn shape(&self, orientation: Orientation) -> Shape {
        let masks: [Shape; 4] = match self {
            TetrominoKind::I => [0x000F, 0x8888, 0x000F, 0x8888],
            TetrominoKind::O => [0x00CC; 4],
            TetrominoKind::T => [0x004E, 0x08C8, 0x00E4, 0x04C4],
            TetrominoKind::J => [0x008E, 0x0C88, 0x00E2, 0x044C],
            TetrominoKind::L => [0x002E, 0x088C, 0x00E8, 0x0C44],
            TetrominoKind::S => [0x006C, 0x08C4, 0x006C, 0x08C4],
            TetrominoKind::Z => [0x00C6, 0x04C8, 0x00C6, 0x04C8],
        };
        masks[orientation.index()]
    }

    /// Bounding-box width in cells
    pub fn width(&self, orientation: Orientation) -> i32 {
        let horizontal = orientation.is_horizontal();
        match self {
            TetrominoKind::I => {
                if horizontal {
                    4
                } else {
                    1
                }
            }
            TetrominoKind::O => 2,
            _ => {
                if horizontal {
                    3
                } else {
                    2
                }
            }
        }
    }

    /// Bounding-box height in cells
    pub fn height(&self, orientation: Orientation) -> i32 {
        let horizontal = orientation.is_horizontal();
        match self {
            TetrominoKind::I => {
                if horizontal {
                    1
                } else {
                    4
                }
            }
            TetrominoKind::O => 2,
            _ => {
                if horizontal {
                    2
                } else {
                    3
                }
            }
        }
    }

    /// Cell offsets `(column, row)` inside the 4x4 box, rows counted from the top.
    pub fn offsets(&self, orientation: Orientation) -> [(i32, i32); 4] {
        let shape = self.shape(orientation);
        let mut offsets = [(0, 0); 4];
        let mut filled = 0;
        for i in 0..16 {
            if shape & (0x8000 >> i) != 0 {
                offsets[filled] = (i % 4, i / 4);
                filled += 1;
            }
        }
        assert_eq!(filled, 4, "{self:?} {orientation:?} mask must have 4 cells");
        offsets
    }
}

/// Orientation states, clockwise from spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Up, // Spawn state
    Right,
    Down,
    Left,
}

impl Orientation {
    /// Rotate clockwise: Up → Right → Down → Left → Up
    pub fn cw(&self) -> Orientation {
        match self {
            Orientation::Up => Orientation::Right,
            Orientation::Right => Orientation::Down,
            Orientation::Down => Orientation::Left,
            Orientation::Left => Orientation::Up,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Orientation::Up => 0,
            Orientation::Right => 1,
            Orientation::Down => 2,
            Orientation::Left => 3,
        }
    }

    fn is_horizontal(&self) -> bool {
        matches!(self, Orientation::Up | Orientation::Down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIENTATIONS: [Orientation; 4] = [
        Orientation::Up,
        Orientation::Right,
        Orientation::Down,
        Orientation::Left,
    ];

    #[test]
    fn test_every_mask_has_four_cells() {
        for kind in TetrominoKind::all() {
            for orientation in ORIENTATIONS {
                assert_eq!(kind.shape(orientation).count_ones(), 4, "{kind:?} {orientation:?}");
            }
        }
    }

    #[test]
    fn test_masks_fit_their_bounding_box() {
        // Shapes sit in the bottom-left corner of the 4x4 box
        for kind in TetrominoKind::all() {
            for orientation in ORIENTATIONS {
                let width = kind.width(orientation);
                let height = kind.height(orientation);
                for (col, row) in kind.offsets(orientation) {
                    assert!(col < width, "{kind:?} {orientation:?} col {col}");
                    assert!(row >= 4 - height, "{kind:?} {orientation:?} row {row}");
                }
            }
        }
    }

    #[test]
    fn test_t_points_up_at_spawn() {
        let offsets = TetrominoKind::T.offsets(Orientation::Up);
        assert_eq!(offsets, [(1, 2), (0, 3), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_cw_cycles_back() {
        let mut orientation = Orientation::Up;
        for _ in 0..4 {
            orientation = orientation.cw();
        }
        assert_eq!(orientation, Orientation::Up);
    }

    #[test]
    fn test_categories() {
        assert_eq!(TetrominoKind::I.category(), KindCategory::I);
        assert_eq!(TetrominoKind::O.category(), KindCategory::O);
        let others = [
            TetrominoKind::T,
            TetrominoKind::J,
            TetrominoKind::L,
            TetrominoKind::S,
            TetrominoKind::Z,
        ];
        for kind in others {
            assert_eq!(kind.category(), KindCategory::Other);
        }
    }
}
