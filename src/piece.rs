//! Active falling piece logic

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH, Board, Cells, Coord, HIDDEN_ROWS};
use crate::srs::rotation_table;
use crate::tetromino::{Orientation, TetrominoKind};
use std::time::Duration;

/// How long a grounded piece may sit before it is forced to land
pub const LOCK_DELAY: Duration = Duration::from_millis(500);

/// Whether the piece is resting on something
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockState {
    #[default]
    Free,
    /// Grounded since the given logical time
    Locking { since: Duration },
}

/// Outcome of a hard drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardDrop {
    pub dropped: i32,
    pub cleared: usize,
}

/// A tetromino with a position on the board
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    kind: TetrominoKind,
    orientation: Orientation,
    /// Leftmost column of the bounding box
    left: i32,
    /// One past the lowest row of the bounding box
    bottom: i32,
    lock: LockState,
}

impl Piece {
    /// Create a piece in its default, unspawned state
    pub fn new(kind: TetrominoKind) -> Self {
        let mut piece = Self {
            kind,
            orientation: Orientation::Up,
            left: 0,
            bottom: 0,
            lock: LockState::Free,
        };
        piece.reset();
        piece
    }

    /// Back to spawn orientation, centered, with the box on top of the board
    pub fn reset(&mut self) {
        self.orientation = Orientation::Up;
        self.lock = LockState::Free;
        self.left = (BOARD_WIDTH as i32 - self.width()) / 2;
        self.bottom = self.height();
    }

    /// Place the piece as low in the spawn buffer as it fits.
    ///
    /// Starts locking right away if it spawns resting on the stack.
    pub fn spawn(&mut self, board: &Board, now: Duration) {
        self.reset();

        let lowest = HIDDEN_ROWS as i32 + self.bottom;
        if let Some(bottom) = (self.bottom..=lowest)
            .rev()
            .find(|&bottom| !board.is_blocked(&self.cells_at(self.left, bottom, self.orientation)))
        {
            self.bottom = bottom;
        }

        if self.is_resting(board) {
            self.lock = LockState::Locking { since: now };
        }
    }

    pub fn kind(&self) -> TetrominoKind {
        self.kind
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    pub fn lock_state(&self) -> LockState {
        self.lock
    }

    pub fn is_locking(&self) -> bool {
        matches!(self.lock, LockState::Locking { .. })
    }

    pub fn width(&self) -> i32 {
        self.kind.width(self.orientation)
    }

    pub fn height(&self) -> i32 {
        self.kind.height(self.orientation)
    }

    /// At least the lowest row of the piece is on the visible board
    pub fn is_visible(&self) -> bool {
        self.bottom > HIDDEN_ROWS as i32
    }

    /// The cells this piece would occupy with the given box position
    pub fn cells_at(&self, left: i32, bottom: i32, orientation: Orientation) -> Cells {
        self.kind
            .offsets(orientation)
            .map(|(col, row)| Coord::new(left + col, bottom - 4 + row))
    }

    /// The cells this piece occupies
    pub fn cells(&self) -> Cells {
        self.cells_at(self.left, self.bottom, self.orientation)
    }

    /// Where the piece would land if dropped now
    pub fn ghost(&self, board: &Board) -> Cells {
        board.landing_spot(self.cells())
    }

    /// Whether the locking piece has waited out the lock delay
    pub fn lock_expired(&self, now: Duration) -> bool {
        match self.lock {
            LockState::Locking { since } => now.saturating_sub(since) >= LOCK_DELAY,
            LockState::Free => false,
        }
    }

    /// Try to shift one column, returns true if successful
    pub fn move_horizontal(&mut self, delta: i32, board: &Board, now: Duration) -> bool {
        debug_assert!(delta == -1 || delta == 1);
        let left = self.left + delta;
        if board.is_blocked(&self.cells_at(left, self.bottom, self.orientation)) {
            return false;
        }
        self.left = left;
        self.relock(board, now);
        true
    }

    pub fn move_left(&mut self, board: &Board, now: Duration) -> bool {
        self.move_horizontal(-1, board, now)
    }

    pub fn move_right(&mut self, board: &Board, now: Duration) -> bool {
        self.move_horizontal(1, board, now)
    }

    /// Move down by up to `max_rows`, returning the rows actually dropped.
    ///
    /// Reaching the landing spot starts locking. A piece that is already
    /// locking does not move.
    pub fn soft_drop(&mut self, board: &Board, max_rows: i32, now: Duration) -> i32 {
        if self.is_locking() {
            return 0;
        }

        let cells = self.cells();
        let distance = board.landing_spot(cells)[0].row - cells[0].row;

        if distance <= max_rows {
            self.bottom += distance;
            self.lock = LockState::Locking { since: now };
            return distance;
        }

        self.bottom += max_rows;
        max_rows
    }

    /// Drop to the landing spot and settle into the board.
    ///
    /// The piece is finished afterwards and must be replaced.
    pub fn hard_drop(&mut self, board: &mut Board, now: Duration) -> HardDrop {
        let dropped = self.soft_drop(board, BOARD_HEIGHT as i32, now);
        let cleared = board.settle(&self.cells(), self.kind.color());
        HardDrop { dropped, cleared }
    }

    /// Rotate clockwise using the kick table, returns true if successful
    pub fn try_rotate(&mut self, board: &Board, now: Duration) -> bool {
        let Some(table) = rotation_table(self.kind) else {
            // O looks the same in every orientation
            return true;
        };

        let next = self.orientation.cw();
        let (offset_col, offset_row) = table.offset(next);
        let left_base = self.left + offset_col;
        let bottom_base = self.bottom + offset_row;

        for (index, &(kick_col, kick_row)) in table.kicks(next).iter().enumerate() {
            let left = left_base + kick_col;
            let bottom = bottom_base + kick_row;
            if !board.is_blocked(&self.cells_at(left, bottom, next)) {
                tracing::trace!(kind = ?self.kind, to = ?next, kick = index, "rotated");
                self.left = left;
                self.bottom = bottom;
                self.orientation = next;
                self.relock(board, now);
                return true;
            }
        }

        false
    }

    /// Blocked one row below
    fn is_resting(&self, board: &Board) -> bool {
        board.is_blocked(&self.cells_at(self.left, self.bottom + 1, self.orientation))
    }

    /// Re-evaluate grounding after a successful move or rotation
    fn relock(&mut self, board: &Board, now: Duration) {
        self.lock = if self.is_resting(board) {
            LockState::Locking { since: now }
        } else {
            LockState::Free
        };
    }
}
