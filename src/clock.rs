//! Pausable game clock and frame limiter
//!
//! Game logic reads logical time from [`Clock::now`], which freezes while
//! paused. Resuming folds the paused span into an offset, so lock-delay and
//! gravity never see how long a pause lasted.

use std::cell::Cell;
use std::fmt::Debug;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of wall time for a [`Clock`]
pub trait TimeSource: Debug {
    /// Wall time elapsed since the source started
    fn elapsed(&self) -> Duration;

    /// Block for `duration` of wall time
    fn sleep(&self, duration: Duration);
}

/// Real monotonic time
#[derive(Debug)]
pub struct WallTime {
    start: Instant,
}

impl WallTime {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for WallTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for WallTime {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Hand-driven time for tests and headless runs.
///
/// Clones share the same instant, so a test can keep a handle while the
/// clock owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    now: Rc<Cell<Duration>>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }
}

impl TimeSource for ManualTime {
    fn elapsed(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

/// Logical game time with pause support
#[derive(Debug)]
pub struct Clock {
    source: Box<dyn TimeSource>,
    /// Wall time at the end of the last tick, for frame capping
    mark: Duration,
    /// Logical time at the last tick
    last: Duration,
    /// Logical time that passed during the last frame
    frame: Duration,
    /// Wall time when the current pause began
    paused_at: Option<Duration>,
    /// Total wall time spent paused before the current pause
    paused_total: Duration,
}

impl Clock {
    pub fn new(source: impl TimeSource + 'static) -> Self {
        let mark = source.elapsed();
        Self {
            source: Box::new(source),
            mark,
            last: mark,
            frame: Duration::ZERO,
            paused_at: None,
            paused_total: Duration::ZERO,
        }
    }

    /// A clock on real time
    pub fn wall() -> Self {
        Self::new(WallTime::new())
    }

    /// Current logical time, frozen while paused
    pub fn now(&self) -> Duration {
        let wall = self.paused_at.unwrap_or_else(|| self.source.elapsed());
        wall.saturating_sub(self.paused_total)
    }

    /// Logical time covered by the last completed frame
    pub fn frame_delta(&self) -> Duration {
        self.frame
    }

    /// End a frame: sleep out the rest of `cap`, then measure the frame.
    pub fn tick(&mut self, cap: Duration) {
        let interval = self.source.elapsed().saturating_sub(self.mark);
        if interval < cap {
            self.source.sleep(cap - interval);
        }

        let now = self.now();
        self.frame = now.saturating_sub(self.last);
        self.last = now;
        self.mark = self.source.elapsed();
    }

    pub fn pause(&mut self) {
        if self.paused_at.is_none() {
            self.paused_at = Some(self.source.elapsed());
        }
    }

    pub fn resume(&mut self) {
        if let Some(start) = self.paused_at.take() {
            self.paused_total += self.source.elapsed().saturating_sub(start);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_now_follows_source() {
        let time = ManualTime::new();
        let clock = Clock::new(time.clone());
        time.advance(ms(250));
        assert_eq!(clock.now(), ms(250));
    }

    #[test]
    fn test_pause_freezes_and_resume_excludes_pause() {
        let time = ManualTime::new();
        let mut clock = Clock::new(time.clone());
        time.advance(ms(100));
        clock.pause();
        time.advance(ms(5_000));
        assert_eq!(clock.now(), ms(100));

        clock.resume();
        assert_eq!(clock.now(), ms(100));
        time.advance(ms(20));
        assert_eq!(clock.now(), ms(120));
    }

    #[test]
    fn test_pause_and_resume_are_idempotent() {
        let time = ManualTime::new();
        let mut clock = Clock::new(time.clone());
        clock.pause();
        time.advance(ms(10));
        clock.pause();
        time.advance(ms(10));
        clock.resume();
        clock.resume();
        assert_eq!(clock.now(), Duration::ZERO);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_tick_caps_frame() {
        let time = ManualTime::new();
        let mut clock = Clock::new(time.clone());
        time.advance(ms(4));
        clock.tick(ms(16));
        // Slept the remaining 12ms
        assert_eq!(time.elapsed(), ms(16));
        assert_eq!(clock.frame_delta(), ms(16));
    }

    #[test]
    fn test_tick_does_not_sleep_on_slow_frame() {
        let time = ManualTime::new();
        let mut clock = Clock::new(time.clone());
        time.advance(ms(40));
        clock.tick(ms(16));
        assert_eq!(time.elapsed(), ms(40));
        assert_eq!(clock.frame_delta(), ms(40));
    }

    #[test]
    fn test_paused_frames_are_empty() {
        let time = ManualTime::new();
        let mut clock = Clock::new(time.clone());
        clock.pause();
        time.advance(ms(30));
        clock.tick(Duration::ZERO);
        assert_eq!(clock.frame_delta(), Duration::ZERO);

        clock.resume();
        time.advance(ms(7));
        clock.tick(Duration::ZERO);
        assert_eq!(clock.frame_delta(), ms(7));
    }
}
