//! Telemetry link: serial bytes in, validated samples out.

mod link;
mod sample;

pub use link::TelemetryLink;
pub use sample::{DiscardReason, Field, MIN_LINE_LEN, SENTINEL, TelemetrySample};
