//! Dashboard library - testable modules for the DIS telemetry dashboard.
//!
//! This library contains the control-loop logic that can be tested on the host
//! machine. The binary (`main.rs`) uses this library and adds the RP2040-specific
//! code: the SH1107 transport, the UART receive task and the button pins.
//!
//! # Control loop
//!
//! Each tick runs, in order:
//! 1. [`input::GestureRecognizer`] turns the two button levels into gesture events
//! 2. [`telemetry::TelemetryLink`] parses whatever serial bytes arrived
//! 3. [`display::DisplayManager`] renders exactly one screen (or the active alert) and flushes it
//! 4. [`profiling::PerfMonitor`] brackets the render and reports averages periodically
//!
//! [`app::Dashboard`] wires the four together.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib --target x86_64-unknown-linux-gnu  # Linux
//! cargo test --lib --target aarch64-apple-darwin      # macOS
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the actual firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// Logging macros must come first so every module below can use them
#[macro_use]
pub mod logging;

// Configuration
pub mod config;
pub mod ticks;

// Control loop components
pub mod app;
pub mod display;
pub mod input;
pub mod profiling;
pub mod telemetry;

// Re-export the types the firmware binary touches directly
pub use app::{AppConfig, Dashboard};
pub use display::{FrameBuffer, PixelSurface, SurfaceError};
pub use ticks::MonotonicClock;
