//! Score, level and fall speed

use std::time::Duration;

/// Highest reachable level
pub const MAX_LEVEL: u32 = 15;

/// Milliseconds per row of gravity, indexed by level - 1
const SPEEDS_MS: [u64; MAX_LEVEL as usize] = [
    1000, 793, 618, 473, 355, //
    262, 190, 135, 94, 64, //
    43, 28, 18, 11, 7,
];

/// Base points for clearing 1, 2, 3 or 4 rows
const CLEAR_POINTS: [u64; 4] = [100, 300, 500, 800];

/// Scoring calculation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Current level
    pub level: u32,
    /// Rows cleared towards the next level
    pub lines_this_level: u32,
    /// Total lines cleared
    pub lines: u32,
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    pub fn new() -> Self {
        Self {
            points: 0,
            level: 1,
            lines_this_level: 0,
            lines: 0,
        }
    }

    /// Award a line clear of `rows` rows and level up as needed
    pub fn on_lines_cleared(&mut self, rows: usize) {
        if rows == 0 {
            return;
        }
        // A single piece spans at most 4 rows
        self.points += CLEAR_POINTS[rows - 1] * self.level as u64;
        self.lines += rows as u32;
        self.lines_this_level += rows as u32;
        self.try_level_up();
    }

    /// Add score for soft drop (1 point per row, at most 20)
    pub fn on_soft_drop(&mut self, rows: i32) {
        if rows > 0 {
            self.points += rows.min(20) as u64;
        }
    }

    /// Add score for hard drop (2 points per row, at most 40)
    pub fn on_hard_drop(&mut self, rows: i32) {
        if rows > 0 {
            self.points += (rows * 2).min(40) as u64;
        }
    }

    fn try_level_up(&mut self) {
        while self.level < MAX_LEVEL {
            let required = self.level * 5;
            if self.lines_this_level < required {
                break;
            }
            self.lines_this_level -= required;
            self.level += 1;
            tracing::debug!(level = self.level, "level up");
        }
    }

    /// Gravity interval for the current level
    pub fn fall_interval(&self) -> Duration {
        Duration::from_millis(SPEEDS_MS[self.level as usize - 1])
    }

    /// Status line shown in the title
    pub fn title(&self) -> String {
        format!("Level: {} Lines: {} Scores: {}", self.level, self.lines, self.points)
    }
}
