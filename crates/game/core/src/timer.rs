//! Cyclic loop clock.
//!
//! The timer never reads a clock itself: every query takes the caller's
//! monotonic `now`. Loop-relative time is derived from total elapsed time and
//! the loop counter, never from a restarted sub-clock, so it cannot drift.
use std::time::Duration;

use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimerState {
    Running,
    /// Frozen at `since`.
    Paused { since: Duration },
}

/// Timer values sampled at one instant, for HUDs and snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerView {
    pub elapsed: Duration,
    pub loop_time: Duration,
    pub remaining: Duration,
    pub current_loop: u32,
    pub max_loops: u32,
    pub paused: bool,
}

/// # Invariants
///
/// - `current_loop` starts at 1 and only grows, one step per [`reset_loop`](Self::reset_loop)
/// - `loop_time` stays below `loop_duration` except between crossing a
///   boundary and the matching `reset_loop`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoopTimer {
    start: Duration,
    loop_duration: Duration,
    total_paused: Duration,
    current_loop: u32,
    max_loops: u32,
    state: TimerState,
}

impl LoopTimer {
    pub fn new(
        loop_duration: Duration,
        max_loops: u32,
        now: Duration,
    ) -> Result<Self, ConfigError> {
        if loop_duration.is_zero() {
            return Err(ConfigError::NonPositiveLoopDuration);
        }
        if max_loops == 0 {
            return Err(ConfigError::ZeroMaxLoops { level: 0 });
        }

        Ok(Self {
            start: now,
            loop_duration,
            total_paused: Duration::ZERO,
            current_loop: 1,
            max_loops,
            state: TimerState::Running,
        })
    }

    pub fn loop_duration(&self) -> Duration {
        self.loop_duration
    }

    pub fn current_loop(&self) -> u32 {
        self.current_loop
    }

    pub fn max_loops(&self) -> u32 {
        self.max_loops
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.state, TimerState::Paused { .. })
    }

    /// Session time excluding paused intervals. Frozen while paused.
    pub fn elapsed(&self, now: Duration) -> Duration {
        let reference = match self.state {
            TimerState::Running => now,
            TimerState::Paused { since } => since,
        };
        reference
            .saturating_sub(self.start)
            .saturating_sub(self.total_paused)
    }

    /// Elapsed time at which the current loop began.
    fn loop_start(&self) -> Duration {
        self.loop_duration
            .saturating_mul(self.current_loop.saturating_sub(1))
    }

    /// Time since the start of the current loop.
    ///
    /// Equals `elapsed % loop_duration` whenever every crossed boundary has
    /// been acknowledged with [`reset_loop`](Self::reset_loop).
    pub fn loop_time(&self, now: Duration) -> Duration {
        self.elapsed(now).saturating_sub(self.loop_start())
    }

    pub fn remaining(&self, now: Duration) -> Duration {
        self.loop_duration.saturating_sub(self.loop_time(now))
    }

    pub fn should_reset_loop(&self, now: Duration) -> bool {
        self.loop_time(now) >= self.loop_duration
    }

    /// Acknowledges a boundary: advances the loop counter by one.
    pub fn reset_loop(&mut self) {
        self.current_loop = self.current_loop.saturating_add(1);
    }

    pub fn is_game_over(&self) -> bool {
        self.current_loop > self.max_loops
    }

    /// Running → Paused. No-op when already paused.
    pub fn pause(&mut self, now: Duration) {
        if let TimerState::Running = self.state {
            self.state = TimerState::Paused { since: now };
        }
    }

    /// Paused → Running, folding the paused interval into `total_paused`.
    pub fn unpause(&mut self, now: Duration) {
        if let TimerState::Paused { since } = self.state {
            self.total_paused += now.saturating_sub(since);
            self.state = TimerState::Running;
        }
    }

    pub fn snapshot(&self, now: Duration) -> TimerView {
        TimerView {
            elapsed: self.elapsed(now),
            loop_time: self.loop_time(now),
            remaining: self.remaining(now),
            current_loop: self.current_loop,
            max_loops: self.max_loops,
            paused: self.is_paused(),
        }
    }
}
