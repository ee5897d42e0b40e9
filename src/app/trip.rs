//! Road speed and trip distance from motor rpm.

use crate::ticks::elapsed;

const MM_PER_MILE: f32 = 1_609_344.0;
const MS_PER_HOUR: f32 = 3_600_000.0;

/// Samples further apart than this mean the link dropped; the gap is not
/// integrated.
pub const MAX_INTEGRATION_GAP_MS: u32 = 2000;

/// Road speed for a direct-drive wheel turning at `rpm`.
#[inline]
pub fn mph_from_rpm(
    rpm: u16,
    wheel_circumference_mm: u32,
) -> f32 {
    f32::from(rpm) * wheel_circumference_mm as f32 * 60.0 / MM_PER_MILE
}

/// Distance integrated from successive speed samples.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TripMeter {
    miles: f32,
    last_sample_ms: Option<u32>,
}

impl TripMeter {
    pub const fn new() -> Self {
        Self {
            miles: 0.0,
            last_sample_ms: None,
        }
    }

    /// Add the distance covered at `mph` since the previous sample.
    pub fn record(
        &mut self,
        mph: f32,
        now_ms: u32,
    ) {
        if let Some(last) = self.last_sample_ms {
            let dt = elapsed(now_ms, last);
            if dt <= MAX_INTEGRATION_GAP_MS && mph > 0.0 {
                self.miles += mph * dt as f32 / MS_PER_HOUR;
            }
        }
        self.last_sample_ms = Some(now_ms);
    }

    #[inline]
    pub const fn miles(&self) -> f32 { self.miles }

    pub fn reset(&mut self) {
        self.miles = 0.0;
    }
}

// =============================================================================
// Unit Tests (run on host with: cargo test --lib --target <host-triple>)
// =============================================================================
