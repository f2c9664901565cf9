//! Core game session and the playing logic
//!
//! [`Session`] owns everything one game needs: board, score, clock, piece
//! queue and the active piece. The state machine drives it; only the
//! Playing state mutates it per tick.

use crate::bag::Bag;
use crate::board::Board;
use crate::clock::Clock;
use crate::input::Key;
use crate::piece::Piece;
use crate::queue::PieceQueue;
use crate::render::{LOCKING_COLOR, Scene, preview};
use crate::score::Score;
use std::time::Duration;

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    GameOver,
}

/// The whole simulation for one game
#[derive(Debug)]
pub struct Session {
    board: Board,
    score: Score,
    clock: Clock,
    queue: PieceQueue,
    active: Piece,
    /// Logical time accumulated towards the next gravity step
    gravity: Duration,
    /// Seed for the bag, `None` draws a fresh one per game
    seed: Option<u64>,
    /// Title waiting to be shown
    pending_title: Option<String>,
}

impl Session {
    /// Create a new game with a random bag
    pub fn new(clock: Clock) -> Self {
        Self::build(clock, None)
    }

    /// Create a new game whose piece order is fixed by `seed`
    pub fn with_seed(clock: Clock, seed: u64) -> Self {
        Self::build(clock, Some(seed))
    }

    fn build(clock: Clock, seed: Option<u64>) -> Self {
        let board = Board::new();
        let mut queue = PieceQueue::new(Self::bag(seed));
        let active = queue.advance(&board, clock.now());
        Self {
            board,
            score: Score::new(),
            clock,
            queue,
            active,
            gravity: Duration::ZERO,
            seed,
            pending_title: None,
        }
    }

    fn bag(seed: Option<u64>) -> Bag {
        match seed {
            Some(seed) => Bag::with_seed(seed),
            None => Bag::new(),
        }
    }

    /// Start over with an empty board, fresh score and a new queue
    pub fn reset(&mut self) {
        tracing::info!(score = self.score.points, lines = self.score.lines, "new game");
        self.board = Board::new();
        self.score = Score::new();
        self.queue = PieceQueue::new(Self::bag(self.seed));
        self.active = self.queue.advance(&self.board, self.clock.now());
        self.gravity = Duration::ZERO;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    pub fn queue(&self) -> &PieceQueue {
        &self.queue
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    /// Queue a title for the title sink
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.pending_title = Some(title.into());
    }

    /// Take the title queued since the last call
    pub fn take_title(&mut self) -> Option<String> {
        self.pending_title.take()
    }

    fn publish_score(&mut self) {
        let title = self.score.title();
        self.set_title(title);
    }

    /// Apply a gameplay key
    pub fn handle_key(&mut self, key: Key, repeat: bool) -> Outcome {
        let now = self.clock.now();
        match key {
            Key::Rotate if !repeat => {
                self.active.try_rotate(&self.board, now);
            }
            Key::Hold if !repeat => return self.hold(),
            Key::SoftDrop => {
                let rows = self.active.soft_drop(&self.board, 1, now);
                if rows > 0 {
                    self.score.on_soft_drop(rows);
                    self.publish_score();
                }
            }
            Key::MoveLeft => {
                self.active.move_left(&self.board, now);
            }
            Key::MoveRight => {
                self.active.move_right(&self.board, now);
            }
            Key::HardDrop => return self.land(),
            _ => {}
        }
        Outcome::Continue
    }

    /// Advance one frame: lock delay first, then gravity
    pub fn update(&mut self) -> Outcome {
        let now = self.clock.now();
        if self.active.lock_expired(now) {
            self.gravity = Duration::ZERO;
            return self.land();
        }

        self.gravity += self.clock.frame_delta();
        let interval = self.score.fall_interval().as_millis();
        let elapsed = self.gravity.as_millis();
        let rows = elapsed / interval;
        if rows > 0 {
            self.gravity = Duration::from_millis((elapsed % interval) as u64);
            self.active.soft_drop(&self.board, rows as i32, now);
        }
        Outcome::Continue
    }

    /// Drop and settle the active piece, then bring in the next one
    pub fn land(&mut self) -> Outcome {
        let now = self.clock.now();
        let result = self.active.hard_drop(&mut self.board, now);
        tracing::debug!(
            kind = ?self.active.kind(),
            dropped = result.dropped,
            cleared = result.cleared,
            "piece landed"
        );

        if !self.active.is_visible() {
            tracing::info!(score = self.score.points, "landed above the visible board");
            return Outcome::GameOver;
        }

        self.score.on_lines_cleared(result.cleared);
        self.score.on_hard_drop(result.dropped);
        if result.cleared > 0 || result.dropped > 0 {
            self.publish_score();
        }

        self.active = self.queue.advance(&self.board, now);
        self.check_spawn()
    }

    /// Swap the active piece with the held one
    pub fn hold(&mut self) -> Outcome {
        let now = self.clock.now();
        if self.queue.hold(&mut self.active, &self.board, now) {
            return self.check_spawn();
        }
        Outcome::Continue
    }

    fn check_spawn(&self) -> Outcome {
        if self.board.is_blocked(&self.active.cells()) {
            tracing::info!(kind = ?self.active.kind(), score = self.score.points, "spawn blocked");
            return Outcome::GameOver;
        }
        Outcome::Continue
    }

    /// Semantic draw list for the current position
    pub fn scene(&self) -> Scene {
        let kind = self.active.kind();
        let color = if self.active.is_locking() {
            LOCKING_COLOR
        } else {
            kind.color()
        };

        let ghost = if self.active.is_visible() {
            self.active
                .ghost(&self.board)
                .iter()
                .map(|&coord| (coord, kind.color()))
                .collect()
        } else {
            Vec::new()
        };

        Scene {
            board: self.board.filled_cells().collect(),
            active: self.active.cells().iter().map(|&coord| (coord, color)).collect(),
            ghost,
            held: self.queue.held().map(|piece| preview(piece.kind())),
            next: self.queue.lookahead().map(|piece| preview(piece.kind())).collect(),
        }
    }
}
