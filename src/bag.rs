//! 7-bag randomizer for piece generation
//!
//! All 7 kinds are shuffled, then dealt out before reshuffling.
//! This bounds how long any kind can go missing.

use crate::tetromino::TetrominoKind;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// The 7-bag piece randomizer
#[derive(Debug, Clone)]
pub struct Bag {
    /// Current shuffled permutation
    kinds: [TetrominoKind; 7],
    /// Next index to deal from `kinds`
    index: usize,
    rng: ChaCha8Rng,
}

impl Default for Bag {
    fn default() -> Self {
        Self::new()
    }
}

impl Bag {
    /// Create a bag seeded from the thread RNG
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a bag with a fixed seed for reproducible sequences
    pub fn with_seed(seed: u64) -> Self {
        Self {
            kinds: TetrominoKind::all(),
            // Exhausted, so the first draw shuffles
            index: 7,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Deal the next kind, reshuffling when the permutation runs out
    pub fn draw(&mut self) -> TetrominoKind {
        if self.index >= self.kinds.len() {
            self.kinds.shuffle(&mut self.rng);
            self.index = 0;
        }
        let kind = self.kinds[self.index];
        self.index += 1;
        kind
    }
}
