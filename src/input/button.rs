//! Button debounce handling.
//!
//! Provides time-based edge detection with debouncing to prevent multiple
//! triggers from contact bounce on physical buttons.
//!
//! A falling edge (press) is accepted only when the debounce window has
//! passed since the last accepted transition. Presses inside the window are
//! swallowed for good: the channel never catches up on a level it skipped.
//! A rising edge ends an accepted press whenever it arrives. The press
//! itself opens a new window; [`ButtonChannel::finish_press`] restarts it
//! from the release for keys whose gestures complete on release.

use crate::ticks::elapsed;

/// Accepted (debounced) level change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Released to pressed (falling edge on an active-low pin).
    Pressed,
    /// Pressed to released.
    Released,
}

/// Debounce state of one active-low button.
pub struct ButtonChannel {
    debounce_ms: u32,
    /// Level seen on the previous poll, `true` while low.
    raw: bool,
    /// An accepted press has not been released yet.
    pressed: bool,
    last_accepted: Option<u32>,
    press_start: Option<u32>,
    long_press_fired: bool,
}

impl ButtonChannel {
    /// Create a channel in the released state.
    pub const fn new(debounce_ms: u32) -> Self {
        Self {
            debounce_ms,
            raw: false,
            pressed: false,
            last_accepted: None,
            press_start: None,
            long_press_fired: false,
        }
    }

    /// Sample the pin and return the accepted transition, if any.
    ///
    /// `is_low` is the raw pin level; low means pressed. The level is
    /// remembered on every call, accepted or not.
    pub fn poll(
        &mut self,
        now_ms: u32,
        is_low: bool,
    ) -> Option<Transition> {
        let was_low = core::mem::replace(&mut self.raw, is_low);

        match (was_low, is_low) {
            (false, true) if self.window_elapsed(now_ms) => {
                self.pressed = true;
                self.last_accepted = Some(now_ms);
                Some(Transition::Pressed)
            }
            (true, false) if self.pressed => {
                self.pressed = false;
                Some(Transition::Released)
            }
            _ => None,
        }
    }

    /// An accepted press is still held.
    #[inline]
    pub const fn is_pressed(&self) -> bool { self.pressed }

    /// Start of the current press, if one was recorded.
    #[inline]
    pub const fn press_start(&self) -> Option<u32> { self.press_start }

    /// Record a press starting at `now_ms` and re-arm the long-press flag.
    pub fn start_press(
        &mut self,
        now_ms: u32,
    ) {
        self.press_start = Some(now_ms);
        self.long_press_fired = false;
    }

    /// End the current press at `now_ms`, returning its start and whether it
    /// went long. The next press is debounced from `now_ms`.
    pub fn finish_press(
        &mut self,
        now_ms: u32,
    ) -> Option<(u32, bool)> {
        self.last_accepted = Some(now_ms);
        let start = self.press_start.take()?;
        let fired = core::mem::replace(&mut self.long_press_fired, false);
        Some((start, fired))
    }

    #[inline]
    pub const fn long_press_fired(&self) -> bool { self.long_press_fired }

    #[inline]
    pub fn mark_long_press_fired(&mut self) { self.long_press_fired = true; }

    fn window_elapsed(
        &self,
        now_ms: u32,
    ) -> bool {
        self.last_accepted
            .is_none_or(|t| elapsed(now_ms, t) > self.debounce_ms)
    }
}

// =============================================================================
// Unit Tests (run on host with: cargo test --lib --target <host-triple>)
// =============================================================================
