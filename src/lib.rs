//! TETRS core - falling-block puzzle simulation
//!
//! Board, pieces with kick-table rotation, the piece queue, scoring, a
//! pausable clock and the game state machine. The terminal frontend in
//! [`ui`] is one implementation of the [`render`] sinks.

pub mod bag;
pub mod board;
pub mod clock;
pub mod game;
pub mod input;
pub mod piece;
pub mod queue;
pub mod render;
pub mod score;
pub mod settings;
pub mod srs;
pub mod state;
pub mod tetromino;
pub mod ui;

pub use clock::{Clock, ManualTime, TimeSource, WallTime};
pub use game::{Outcome, Session};
pub use state::{Control, StateId, StateManager};
