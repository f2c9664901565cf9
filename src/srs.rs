//! Rotation offsets and wall kick data
//!
//! Rotating clockwise first shifts the bounding box by a fixed per-target
//! offset, then tries each kick in order until one is not blocked.
//! All deltas are `(column, row)` with rows growing downward.

use crate::tetromino::{KindCategory, Orientation, TetrominoKind};

/// Number of kick attempts per rotation
pub const KICK_COUNT: usize = 5;

/// Offsets and kicks for one kind category, indexed by target orientation
#[derive(Debug)]
pub struct RotationTable {
    pub offsets: [(i32, i32); 4],
    pub kicks: [[(i32, i32); KICK_COUNT]; 4],
}

impl RotationTable {
    /// Base shift applied when rotating into `to`
    pub fn offset(&self, to: Orientation) -> (i32, i32) {
        self.offsets[to.index()]
    }

    /// Ordered kick attempts tried when rotating into `to`
    pub fn kicks(&self, to: Orientation) -> &[(i32, i32); KICK_COUNT] {
        &self.kicks[to.index()]
    }
}

/// J, L, S, T and Z
static OTHER_TABLE: RotationTable = RotationTable {
    offsets: [(0, -1), (1, 1), (-1, 0), (0, 0)],
    kicks: [
        [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
        [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
        [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
        [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    ],
};

static I_TABLE: RotationTable = RotationTable {
    offsets: [(-1, -2), (2, 2), (-2, -1), (1, 1)],
    kicks: [
        [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
        [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
        [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
        [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    ],
};

/// Get the rotation table for a piece kind, `None` for the O piece
pub fn rotation_table(kind: TetrominoKind) -> Option<&'static RotationTable> {
    match kind.category() {
        KindCategory::O => None,
        KindCategory::I => Some(&I_TABLE),
        KindCategory::Other => Some(&OTHER_TABLE),
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
    fn test_first_kick_is_identity() {
        for kind in TetrominoKind::all() {
            let Some(table) = rotation_table(kind) else {
                continue;
            };
            for to in ORIENTATIONS {
                assert_eq!(table.kicks(to)[0], (0, 0));
            }
        }
    }

    #[test]
    fn test_offsets_cancel_over_full_turn() {
        // Four rotations without kicks must return the box to where it started
        for table in [&OTHER_TABLE, &I_TABLE] {
            let (cols, rows) = table
                .offsets
                .iter()
                .fold((0, 0), |(c, r), (dc, dr)| (c + dc, r + dr));
            assert_eq!((cols, rows), (0, 0));
        }
    }

    #[test]
    fn test_o_piece_has_no_table() {
        assert!(rotation_table(TetrominoKind::O).is_none());
    }

    #[test]
    fn test_i_uses_its_own_table() {
        let i = rotation_table(TetrominoKind::I).unwrap();
        let t = rotation_table(TetrominoKind::T).unwrap();
        assert!(!std::ptr::eq(i, t));
        for kind in [TetrominoKind::J, TetrominoKind::L, TetrominoKind::S, TetrominoKind::Z] {
            assert!(std::ptr::eq(rotation_table(kind).unwrap(), t));
        }
    }
}
