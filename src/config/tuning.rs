//! Timing tunables and vehicle constants.
//!
//! Runtime-adjustable values are only defaults here: they reach the code
//! through [`GestureConfig`](crate::input::GestureConfig) and
//! [`AppConfig`](crate::app::AppConfig). Buffer sizes and the tick period are
//! fixed at build time.

// =============================================================================
// Buttons
// =============================================================================

/// Minimum time between accepted edges on one button, in milliseconds.
pub const DEBOUNCE_MS: u32 = 150;

/// Hold time before a KEY1 press counts as a long press, in milliseconds.
pub const LONG_PRESS_MS: u32 = 3000;

// =============================================================================
// Alerts
// =============================================================================

/// How long the "TIMER RESET" alert stays on screen.
pub const RESET_ALERT_SECS: f32 = 3.0;

/// How long the "LOW BATTERY" alert stays on screen.
pub const LOW_VOLTAGE_ALERT_SECS: f32 = 2.0;

/// Pack voltage (in tenths of a volt) below which the battery counts as low.
pub const LOW_VOLTAGE_DV: u16 = 420;

// =============================================================================
// Telemetry
// =============================================================================

/// Longest telemetry line kept in the receive buffer (bytes, excluding `\n`).
/// A well-formed line is 20 bytes; anything past this is line noise.
pub const LINE_CAPACITY: usize = 64;

/// Rolling wheel circumference used to turn motor rpm into road speed.
pub const WHEEL_CIRCUMFERENCE_MM: u32 = 2070;

// =============================================================================
// Control Loop
// =============================================================================

/// Sleep between control loop iterations.
pub const TICK_PERIOD_MS: u64 = 20;

/// Interval between draw-time summaries from the performance monitor.
pub const PERF_REPORT_INTERVAL_MS: u32 = 5000;
