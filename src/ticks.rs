//! Wrapping millisecond/microsecond timestamps.
//!
//! All timestamps in the control loop are `u32` values from a free-running
//! monotonic counter that wraps. Comparisons therefore never use `<`/`>` on the
//! raw values; they go through [`elapsed`] and [`deadline_passed`], which stay
//! correct across a wrap as long as the two instants are less than 2^31 ticks
//! apart (about 24 days in milliseconds, 35 minutes in microseconds).

/// Source of the current time for one control-loop tick.
///
/// The firmware implements this on top of `embassy_time::Instant`; tests use a
/// manually advanced clock.
pub trait MonotonicClock {
    /// Milliseconds since boot, wrapping.
    fn now_ms(&self) -> u32;

    /// Microseconds since boot, wrapping.
    fn now_us(&self) -> u32;
}

/// Ticks elapsed from `since` to `now`, with wrap handling.
#[inline]
pub const fn elapsed(
    now: u32,
    since: u32,
) -> u32 {
    now.wrapping_sub(since)
}

/// Whether `deadline` has been reached at `now`.
///
/// Uses the signed wrapping difference, so a deadline scheduled shortly
/// before the counter wraps still expires shortly after it.
#[inline]
pub const fn deadline_passed(
    now: u32,
    deadline: u32,
) -> bool {
    (now.wrapping_sub(deadline) as i32) >= 0
}

/// Deadline `duration` ticks after `now`.
#[inline]
pub const fn deadline_after(
    now: u32,
    duration: u32,
) -> u32 {
    now.wrapping_add(duration)
}

// =============================================================================
// Unit Tests (run on host with: cargo test --lib --target <host-triple>)
// =============================================================================
