//! Async tasks for the dashboard firmware.
//!
//! - `uart_rx`: forwards telemetry bytes from UART1 to the control loop

pub mod uart_rx;

pub use uart_rx::{PIPE_CAPACITY, TELEMETRY_PIPE, uart_rx_task};
