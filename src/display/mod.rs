//! Display: frame buffer, pixel surface contract and the screen manager.
//!
//! - [`FrameBuffer`] - 1 bpp in-memory copy of the panel
//! - [`PixelSurface`] - what a panel driver must provide
//! - [`DisplayManager`] - screen composition, partial redraw, alerts, inversion

mod alert;
pub mod canvas;
mod fonts;
mod framebuffer;
mod layout;
mod manager;
mod surface;

#[cfg(test)]
pub mod mock;

pub use alert::{ALERT_LINE_CAPACITY, AlertLine, AlertState};
pub use fonts::{FontSet, LABEL_FONT};
pub use framebuffer::{BUFFER_SIZE, FrameBuffer, HEIGHT, ROW_BYTES, WIDTH};
pub use layout::{LayoutGeometry, metric_slot, time_slot};
pub use manager::{DisplayManager, MetricDigits, TimeDigits, TimerState};
pub use surface::{PixelSurface, SurfaceError};
