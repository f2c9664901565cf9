//! Upcoming pieces and the hold slot

use crate::bag::Bag;
use crate::board::Board;
use crate::piece::Piece;
use std::collections::VecDeque;
use std::time::Duration;

/// Number of upcoming pieces kept in view
pub const LOOKAHEAD: usize = 3;

/// Lookahead queue fed by the bag, plus the held piece.
///
/// Every piece lives in exactly one place: the caller's active slot, the
/// held slot or the lookahead.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    bag: Bag,
    lookahead: VecDeque<Piece>,
    held: Option<Piece>,
    /// Hold may be used once per active piece
    used_hold: bool,
}

impl PieceQueue {
    pub fn new(bag: Bag) -> Self {
        let mut queue = Self {
            bag,
            lookahead: VecDeque::with_capacity(LOOKAHEAD + 1),
            held: None,
            used_hold: false,
        };
        for _ in 0..LOOKAHEAD {
            let piece = queue.draw();
            queue.lookahead.push_back(piece);
        }
        queue
    }

    /// A fresh, unspawned piece from the bag
    pub fn draw(&mut self) -> Piece {
        Piece::new(self.bag.draw())
    }

    /// Pop the next piece, spawn it and top the lookahead back up
    pub fn advance(&mut self, board: &Board, now: Duration) -> Piece {
        let mut next = self
            .lookahead
            .pop_front()
            .expect("lookahead always holds LOOKAHEAD pieces");
        next.spawn(board, now);
        let refill = self.draw();
        self.lookahead.push_back(refill);
        self.used_hold = false;
        next
    }

    /// Swap the active piece into the hold slot.
    ///
    /// With nothing held yet, the next lookahead piece becomes active.
    /// Returns false when hold was already used for this piece.
    pub fn hold(&mut self, active: &mut Piece, board: &Board, now: Duration) -> bool {
        if self.used_hold {
            return false;
        }

        let replacement = match self.held.take() {
            Some(held) => held,
            None => self.advance(board, now),
        };
        let mut previous = std::mem::replace(active, replacement);
        active.spawn(board, now);
        previous.reset();
        self.held = Some(previous);
        self.used_hold = true;
        true
    }

    pub fn held(&self) -> Option<&Piece> {
        self.held.as_ref()
    }

    pub fn lookahead(&self) -> impl Iterator<Item = &Piece> {
        self.lookahead.iter()
    }

    pub fn used_hold(&self) -> bool {
        self.used_hold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetromino::TetrominoKind;

    fn queue() -> PieceQueue {
        PieceQueue::new(Bag::with_seed(3))
    }

    fn kinds(queue: &PieceQueue) -> Vec<TetrominoKind> {
        queue.lookahead().map(Piece::kind).collect()
    }

    #[test]
    fn test_lookahead_stays_full() {
        let board = Board::new();
        let mut queue = queue();
        for _ in 0..10 {
            assert_eq!(queue.lookahead().count(), LOOKAHEAD);
            queue.advance(&board, Duration::ZERO);
        }
    }

    #[test]
    fn test_advance_pops_front_and_spawns() {
        let board = Board::new();
        let mut queue = queue();
        let upcoming = kinds(&queue);
        let piece = queue.advance(&board, Duration::ZERO);
        assert_eq!(piece.kind(), upcoming[0]);
        assert_eq!(kinds(&queue)[..2], upcoming[1..]);
        assert!(piece.is_visible());
    }

    #[test]
    fn test_bag_order_survives_lookahead() {
        let board = Board::new();
        let mut reference = Bag::with_seed(3);
        let mut queue = queue();
        for _ in 0..21 {
            assert_eq!(queue.advance(&board, Duration::ZERO).kind(), reference.draw());
        }
    }

    #[test]
    fn test_first_hold_takes_from_lookahead() {
        let board = Board::new();
        let mut queue = queue();
        let mut active = queue.advance(&board, Duration::ZERO);
        let first = active.kind();
        let next = kinds(&queue)[0];

        assert!(queue.hold(&mut active, &board, Duration::ZERO));
        assert_eq!(active.kind(), next);
        assert_eq!(queue.held().map(Piece::kind), Some(first));
        assert!(queue.used_hold());
    }

    #[test]
    fn test_second_hold_is_a_no_op() {
        let board = Board::new();
        let mut queue = queue();
        let mut active = queue.advance(&board, Duration::ZERO);
        queue.hold(&mut active, &board, Duration::ZERO);
        let active_before = active.clone();
        let held_before = queue.held().cloned();

        assert!(!queue.hold(&mut active, &board, Duration::ZERO));
        assert_eq!(active, active_before);
        assert_eq!(queue.held().cloned(), held_before);
    }

    #[test]
    fn test_hold_swaps_after_advance() {
        let board = Board::new();
        let mut queue = queue();
        let mut active = queue.advance(&board, Duration::ZERO);
        queue.hold(&mut active, &board, Duration::ZERO);
        let held = queue.held().map(Piece::kind);

        active = queue.advance(&board, Duration::ZERO);
        let was_active = active.kind();
        assert!(queue.hold(&mut active, &board, Duration::ZERO));
        assert_eq!(Some(active.kind()), held);
        assert_eq!(queue.held().map(Piece::kind), Some(was_active));
    }

    #[test]
    fn test_held_piece_is_reset() {
        let board = Board::new();
        let mut queue = queue();
        let mut active = queue.advance(&board, Duration::ZERO);
        active.soft_drop(&board, 5, Duration::ZERO);
        active.try_rotate(&board, Duration::ZERO);
        let kind = active.kind();

        queue.hold(&mut active, &board, Duration::ZERO);
        assert_eq!(queue.held(), Some(&Piece::new(kind)));
    }
}
