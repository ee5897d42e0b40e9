//! Gesture recognition for the two dashboard keys.
//!
//! - KEY0: short press advances the screen.
//! - KEY1: short press toggles the stopwatch, holding past the long-press
//!   threshold resets it, and releasing after a long press clears the alert.
//!
//! KEY0 presses are debounced from the previous accepted press. KEY1 acts on
//! release, so its next press is debounced from that release.

use heapless::Vec;

use super::button::{ButtonChannel, Transition};
use crate::config::{DEBOUNCE_MS, LONG_PRESS_MS};
use crate::ticks::elapsed;

/// Discrete, consumed-once event produced by [`GestureRecognizer::poll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum GestureEvent {
    /// KEY0 pressed.
    ScreenAdvance,
    /// KEY1 pressed and released before the long-press threshold.
    TimerToggle,
    /// KEY1 held until the long-press threshold.
    TimerReset,
    /// KEY1 released after a long press.
    ClearAlert,
}

impl GestureEvent {
    pub const fn name(self) -> &'static str {
        match self {
            Self::ScreenAdvance => "ScreenAdvance",
            Self::TimerToggle => "TimerToggle",
            Self::TimerReset => "TimerReset",
            Self::ClearAlert => "ClearAlert",
        }
    }
}

/// At most one event per key per poll.
pub type GestureEvents = Vec<GestureEvent, 2>;

/// Timing tunables for the recognizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestureConfig {
    /// Minimum time from the last accepted transition to a new press.
    pub debounce_ms: u32,
    /// Hold time that turns a KEY1 press into a long press.
    pub long_press_ms: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            long_press_ms: LONG_PRESS_MS,
        }
    }
}

/// Owns both key channels and turns raw levels into [`GestureEvent`]s.
pub struct GestureRecognizer {
    config: GestureConfig,
    key0: ButtonChannel,
    key1: ButtonChannel,
}

impl GestureRecognizer {
    /// Both keys start released.
    pub const fn new(config: GestureConfig) -> Self {
        Self {
            config,
            key0: ButtonChannel::new(config.debounce_ms),
            key1: ButtonChannel::new(config.debounce_ms),
        }
    }

    /// Sample both keys once.
    ///
    /// Levels are raw active-low pin reads (`true` = pin low = pressed).
    /// Returns KEY0's event (if any) before KEY1's.
    pub fn poll(
        &mut self,
        now_ms: u32,
        key0_low: bool,
        key1_low: bool,
    ) -> GestureEvents {
        let mut events = GestureEvents::new();

        if self.key0.poll(now_ms, key0_low) == Some(Transition::Pressed) {
            push(&mut events, GestureEvent::ScreenAdvance);
        }

        if let Some(event) = self.poll_key1(now_ms, key1_low) {
            push(&mut events, event);
        }

        events
    }

    #[inline]
    pub const fn config(&self) -> &GestureConfig { &self.config }

    fn poll_key1(
        &mut self,
        now_ms: u32,
        is_low: bool,
    ) -> Option<GestureEvent> {
        match self.key1.poll(now_ms, is_low) {
            Some(Transition::Pressed) => {
                self.key1.start_press(now_ms);
                // A zero threshold fires on the press itself
                self.check_long_press(now_ms)
            }
            Some(Transition::Released) => {
                let (start, fired) = self.key1.finish_press(now_ms)?;
                let held = elapsed(now_ms, start);
                if fired {
                    Some(GestureEvent::ClearAlert)
                } else if held < self.config.long_press_ms {
                    Some(GestureEvent::TimerToggle)
                } else {
                    // Crossed the threshold between two polls and released
                    // on the same poll: neither short nor reported long.
                    None
                }
            }
            None => self.check_long_press(now_ms),
        }
    }

    fn check_long_press(
        &mut self,
        now_ms: u32,
    ) -> Option<GestureEvent> {
        if !self.key1.is_pressed() || self.key1.long_press_fired() {
            return None;
        }
        let start = self.key1.press_start()?;
        if elapsed(now_ms, start) >= self.config.long_press_ms {
            self.key1.mark_long_press_fired();
            return Some(GestureEvent::TimerReset);
        }
        None
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

fn push(
    events: &mut GestureEvents,
    event: GestureEvent,
) {
    log_info!("Gesture: {}", event.name());
    // Capacity matches the number of keys
    let _ = events.push(event);
}

// =============================================================================
// Unit Tests (run on host with: cargo test --lib --target <host-triple>)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::vec::Vec as StdVec;

    const TICK: u32 = 20;

    /// Poll KEY1 at the tick rate over `[from, to)` with a fixed level.
    fn run_key1(
        rec: &mut GestureRecognizer,
        from: u32,
        to: u32,
        low: bool,
    ) -> StdVec<GestureEvent> {
        let mut out = StdVec::new();
        let mut t = from;
        while t < to {
            out.extend(rec.poll(t, false, low));
            t += TICK;
        }
        out
    }

    #[test]
    fn test_idle_produces_nothing() {
        let mut rec = GestureRecognizer::default();
        assert!(rec.poll(0, false, false).is_empty());
        assert!(rec.poll(10_000, false, false).is_empty());
    }

    #[test]
    fn test_key0_press_advances_screen() {
        let mut rec = GestureRecognizer::default();
        rec.poll(0, false, false);
        assert_eq!(rec.poll(500, true, false).as_slice(), &[GestureEvent::ScreenAdvance]);
        // Holding does not repeat
        assert!(rec.poll(520, true, false).is_empty());
        assert!(rec.poll(4000, true, false).is_empty());
        // Release emits nothing for KEY0
        assert!(rec.poll(4100, false, false).is_empty());
    }

    #[test]
    fn test_key0_chatter_single_advance() {
        let mut rec = GestureRecognizer::default();
        let mut count = 0;
        let mut level = false;
        // 30 ms gaps, all inside the 150 ms window of the first edge
        for t in (1000..1150).step_by(30) {
            level = !level;
            count += rec
                .poll(t, level, false)
                .iter()
                .filter(|e| **e == GestureEvent::ScreenAdvance)
                .count();
        }
        for t in (1150..2500).step_by(20) {
            count += rec.poll(t, false, false).len();
        }
        assert_eq!(count, 1);
    }

    #[test]
    fn test_key0_presses_spaced_beyond_window() {
        let mut rec = GestureRecognizer::default();
        let mut count = 0;
        for press in 0..3u32 {
            let t0 = 1000 + press * 400;
            count += rec.poll(t0, true, false).len();
            count += rec.poll(t0 + 200, false, false).len();
        }
        assert_eq!(count, 3);
    }

    #[test]
    fn test_key0_double_tap_beyond_window() {
        let mut rec = GestureRecognizer::default();
        let mut events = StdVec::new();
        // Held over 1000..1100 and 1200..1300: presses 200 ms apart
        for t in (1000..1600).step_by(TICK as usize) {
            let low = (1000..1100).contains(&t) || (1200..1300).contains(&t);
            events.extend(rec.poll(t, low, false));
        }
        assert_eq!(events, [GestureEvent::ScreenAdvance, GestureEvent::ScreenAdvance]);
    }

    #[test]
    fn test_key1_short_press_toggles() {
        let mut rec = GestureRecognizer::default();
        let mut events = run_key1(&mut rec, 1000, 1400, true);
        events.extend(run_key1(&mut rec, 1400, 1800, false));
        assert_eq!(events, [GestureEvent::TimerToggle]);
    }

    #[test]
    fn test_key1_hold_exactly_threshold_resets_once() {
        let mut rec = GestureRecognizer::default();
        assert!(rec.poll(1000, false, true).is_empty());
        assert!(rec.poll(3999, false, true).is_empty());
        assert_eq!(rec.poll(4000, false, true).as_slice(), &[GestureEvent::TimerReset]);
        // Still held: no repeat
        let events = run_key1(&mut rec, 4020, 10_000, true);
        assert!(events.is_empty());
    }

    #[test]
    fn test_key1_long_press_then_release_clears_alert() {
        let mut rec = GestureRecognizer::default();
        let mut events = run_key1(&mut rec, 1000, 5000, true);
        events.extend(run_key1(&mut rec, 5000, 5400, false));
        assert_eq!(events, [GestureEvent::TimerReset, GestureEvent::ClearAlert]);
    }

    #[test]
    fn test_key1_release_on_threshold_poll_emits_nothing() {
        let mut rec = GestureRecognizer::default();
        assert!(rec.poll(1000, false, true).is_empty());
        assert!(rec.poll(3990, false, true).is_empty());
        // Threshold crossed between polls, key already up
        assert!(rec.poll(4010, false, false).is_empty());
        assert!(run_key1(&mut rec, 4030, 5000, false).is_empty());
    }

    #[test]
    fn test_both_keys_same_poll() {
        let mut rec = GestureRecognizer::default();
        rec.poll(0, false, false);
        rec.poll(1000, false, true);
        let events = rec.poll(1300, true, false);
        assert_eq!(
            events.as_slice(),
            &[GestureEvent::ScreenAdvance, GestureEvent::TimerToggle]
        );
    }

    #[test]
    fn test_key1_bounce_on_release_single_toggle() {
        let mut rec = GestureRecognizer::default();
        let mut events = run_key1(&mut rec, 1000, 1500, true);
        // Contact chatter on release
        for (i, t) in (1500..1700).step_by(40).enumerate() {
            events.extend(rec.poll(t, false, i % 2 == 1));
        }
        events.extend(run_key1(&mut rec, 1700, 2200, false));
        assert_eq!(events, [GestureEvent::TimerToggle]);
    }

    #[test]
    fn test_key1_double_tap_toggles_twice() {
        let mut rec = GestureRecognizer::default();
        let mut events = run_key1(&mut rec, 1000, 1100, true);
        events.extend(run_key1(&mut rec, 1100, 1300, false));
        events.extend(run_key1(&mut rec, 1300, 1400, true));
        events.extend(run_key1(&mut rec, 1400, 1800, false));
        assert_eq!(events, [GestureEvent::TimerToggle, GestureEvent::TimerToggle]);
    }

    #[test]
    fn test_key1_press_soon_after_release_swallowed() {
        let mut rec = GestureRecognizer::default();
        // Second press 200 ms after the first but 100 ms after its release
        let mut events = run_key1(&mut rec, 1000, 1100, true);
        events.extend(run_key1(&mut rec, 1100, 1200, false));
        events.extend(run_key1(&mut rec, 1200, 1300, true));
        events.extend(run_key1(&mut rec, 1300, 1800, false));
        assert_eq!(events, [GestureEvent::TimerToggle]);
    }

    #[test]
    fn test_custom_config() {
        let mut rec = GestureRecognizer::new(GestureConfig {
            debounce_ms: 10,
            long_press_ms: 500,
        });
        assert!(rec.poll(0, false, true).is_empty());
        assert_eq!(rec.poll(500, false, true).as_slice(), &[GestureEvent::TimerReset]);
        assert_eq!(rec.poll(520, false, false).as_slice(), &[GestureEvent::ClearAlert]);
    }
}
