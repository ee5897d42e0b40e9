//! Stopwatch driven by KEY1.

use crate::display::TimerState;
use crate::ticks::elapsed;

/// Start/pause/reset stopwatch on the millisecond clock.
///
/// Elapsed time is banked on every pause, so the running segment is the only
/// part measured against the wrapping clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stopwatch {
    state: TimerState,
    /// Time from completed running segments.
    banked_ms: u64,
    /// Start of the current running segment.
    started_at: u32,
}

impl Stopwatch {
    pub const fn new() -> Self {
        Self {
            state: TimerState::Idle,
            banked_ms: 0,
            started_at: 0,
        }
    }

    /// Idle/Paused → Running, Running → Paused.
    pub fn toggle(
        &mut self,
        now_ms: u32,
    ) {
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                self.started_at = now_ms;
                self.state = TimerState::Running;
            }
            TimerState::Running => {
                self.banked_ms += u64::from(elapsed(now_ms, self.started_at));
                self.state = TimerState::Paused;
            }
        }
    }

    /// Back to Idle with zero elapsed.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[inline]
    pub const fn state(&self) -> TimerState { self.state }

    pub fn elapsed_ms(
        &self,
        now_ms: u32,
    ) -> u64 {
        match self.state {
            TimerState::Running => self.banked_ms + u64::from(elapsed(now_ms, self.started_at)),
            TimerState::Idle | TimerState::Paused => self.banked_ms,
        }
    }

    #[inline]
    pub fn elapsed_secs(
        &self,
        now_ms: u32,
    ) -> f32 {
        self.elapsed_ms(now_ms) as f32 / 1000.0
    }
}

// =============================================================================
// Unit Tests (run on host with: cargo test --lib --target <host-triple>)
// =============================================================================
