//! Application state: screens, stopwatch, trip meter and the control loop.

mod controller;
mod screen;
mod timer;
mod trip;

pub use controller::{AppConfig, Dashboard};
pub use screen::Screen;
pub use timer::Stopwatch;
pub use trip::{MAX_INTEGRATION_GAP_MS, TripMeter, mph_from_rpm};
