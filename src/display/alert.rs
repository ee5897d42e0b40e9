//! Alert scheduling state.
//!
//! Similar to a popup with an expiry timestamp, but the text is owned and the
//! expiry is checked by polling rather than by the renderer.

use heapless::String;

use crate::ticks::{deadline_after, deadline_passed};

/// Longest alert line stored. Lines are also cut to what fits on screen.
pub const ALERT_LINE_CAPACITY: usize = 16;

pub type AlertLine = String<ALERT_LINE_CAPACITY>;

/// Farthest deadline the wrapping comparison can still place in the future.
const MAX_DURATION_MS: u32 = i32::MAX as u32;

/// One pending alert. Inactive when `expires_at` is `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlertState {
    pub top: Option<AlertLine>,
    pub bottom: Option<AlertLine>,
    pub expires_at: Option<u32>,
}

impl AlertState {
    pub const fn new() -> Self {
        Self {
            top: None,
            bottom: None,
            expires_at: None,
        }
    }

    /// Replace whatever is pending.
    ///
    /// Both lines are upper-cased and cut to `max_chars`. A non-positive or
    /// NaN duration schedules an alert that is already due. Durations past
    /// about 24.8 days are capped there.
    pub fn schedule(
        &mut self,
        top: Option<&str>,
        bottom: Option<&str>,
        duration_secs: f32,
        now_ms: u32,
        max_chars: usize,
    ) {
        self.top = top.map(|s| to_alert_line(s, max_chars));
        self.bottom = bottom.map(|s| to_alert_line(s, max_chars));

        let duration_ms = if duration_secs > 0.0 {
            // Saturating float-to-int cast
            ((duration_secs * 1000.0) as u32).min(MAX_DURATION_MS)
        } else {
            0
        };
        self.expires_at = Some(deadline_after(now_ms, duration_ms));
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    #[inline]
    pub const fn is_pending(&self) -> bool { self.expires_at.is_some() }

    /// Whether a pending alert has reached its expiry at `now_ms`.
    pub fn is_expired(
        &self,
        now_ms: u32,
    ) -> bool {
        self.expires_at.is_some_and(|t| deadline_passed(now_ms, t))
    }
}

fn to_alert_line(
    text: &str,
    max_chars: usize,
) -> AlertLine {
    let mut line = AlertLine::new();
    for c in text.chars().take(max_chars) {
        if line.push(c.to_ascii_uppercase()).is_err() {
            break;
        }
    }
    line
}

// =============================================================================
// Unit Tests (run on host with: cargo test --lib --target <host-triple>)
// =============================================================================
