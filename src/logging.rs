//! Leveled logging macros shared by the library and the firmware binary.
//!
//! On the device every macro forwards to the matching `defmt` macro (RTT
//! transport, filtered at build time by `DEFMT_LOG`). On the host the macros
//! only type-check their arguments, so library code can log freely and still
//! build and test without a defmt logger linked in.
//!
//! Format strings must stay valid for both `defmt` and `core::fmt`: use plain
//! `{}` placeholders with integers, floats, `bool`, `&str` and types that
//! implement both `defmt::Format` and `Display`.
//!
//! # Usage
//!
//! ```ignore
//! log_info!("Screen: {}", screen.label());
//! log_warn!("Telemetry line discarded: {}", reason);
//! log_error!("Flush failed: {}", err);
//! ```

/// Log a message at Debug level.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "arm")]
        defmt::debug!($($arg)*);
        #[cfg(not(target_arch = "arm"))]
        let _ = core::format_args!($($arg)*);
    }};
}

/// Log a message at Info level.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "arm")]
        defmt::info!($($arg)*);
        #[cfg(not(target_arch = "arm"))]
        let _ = core::format_args!($($arg)*);
    }};
}

/// Log a message at Warn level.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "arm")]
        defmt::warn!($($arg)*);
        #[cfg(not(target_arch = "arm"))]
        let _ = core::format_args!($($arg)*);
    }};
}

/// Log a message at Error level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "arm")]
        defmt::error!($($arg)*);
        #[cfg(not(target_arch = "arm"))]
        let _ = core::format_args!($($arg)*);
    }};
}
