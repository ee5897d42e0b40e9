//! Application configuration.
//!
//! - `layout`: Display dimensions and fixed band positions
//! - `tuning`: Timing tunables (debounce, long press, alerts, reporting) and vehicle constants

pub mod layout;
pub mod tuning;

// Re-export layout constants at config level for convenience
pub use layout::{
    ALERT_BOTTOM_Y,
    ALERT_TOP_Y,
    ECO_LINE_OFFSET,
    SCREEN_HEIGHT,
    SCREEN_WIDTH,
    STATUS_BAND_WIDTH,
    STATUS_REC_X,
    TIME_DIGITS_Y,
};
// Re-export tunables at config level for convenience
pub use tuning::{
    DEBOUNCE_MS,
    LINE_CAPACITY,
    LONG_PRESS_MS,
    LOW_VOLTAGE_ALERT_SECS,
    LOW_VOLTAGE_DV,
    PERF_REPORT_INTERVAL_MS,
    RESET_ALERT_SECS,
    TICK_PERIOD_MS,
    WHEEL_CIRCUMFERENCE_MM,
};
