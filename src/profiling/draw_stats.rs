//! Draw-time sampling with a periodic summary.
//!
//! Each render is bracketed by [`PerfMonitor::begin_measurement`] and
//! [`PerfMonitor::end_measurement`] using the free-running microsecond
//! counter. The counter wraps every ~71.6 minutes; `wrapping_sub` keeps single
//! measurements correct across the wrap.

use crate::ticks::elapsed;

/// Longest plausible single render. Anything above is treated as a bad sample
/// (for example a begin/end pair straddling a debugger halt) and dropped.
const MAX_SANE_DRAW_US: u32 = 1_000_000;

/// Summary of one reporting interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct DrawStats {
    /// Mean render time in microseconds (0 when there were no samples).
    pub average_us: u32,
    /// Renders measured during the interval.
    pub samples: u32,
}

/// Rolling average of render duration, reported at a fixed interval.
pub struct PerfMonitor {
    interval_ms: u32,
    last_report_ms: u32,
    draw_start_us: Option<u32>,
    total_us: u64,
    count: u32,
}

impl PerfMonitor {
    /// `now_ms` starts the first reporting interval.
    pub const fn new(
        interval_ms: u32,
        now_ms: u32,
    ) -> Self {
        Self {
            interval_ms,
            last_report_ms: now_ms,
            draw_start_us: None,
            total_us: 0,
            count: 0,
        }
    }

    pub fn begin_measurement(
        &mut self,
        now_us: u32,
    ) {
        self.draw_start_us = Some(now_us);
    }

    /// Close the open measurement. Without a matching begin this does nothing.
    pub fn end_measurement(
        &mut self,
        now_us: u32,
    ) {
        let Some(start) = self.draw_start_us.take() else {
            return;
        };
        let duration = elapsed(now_us, start);
        if duration > MAX_SANE_DRAW_US {
            return;
        }
        self.total_us += u64::from(duration);
        self.count = self.count.saturating_add(1);
    }

    /// Emit a summary once more than `interval_ms` has passed since the last
    /// one, then start a new interval.
    pub fn maybe_report(
        &mut self,
        now_ms: u32,
    ) -> Option<DrawStats> {
        if elapsed(now_ms, self.last_report_ms) <= self.interval_ms {
            return None;
        }
        self.last_report_ms = now_ms;

        let stats = DrawStats {
            average_us: self.total_us.checked_div(u64::from(self.count)).unwrap_or(0) as u32,
            samples: self.count,
        };
        log_info!("Draw: {}us (n={})", stats.average_us, stats.samples);

        self.total_us = 0;
        self.count = 0;
        Some(stats)
    }

    /// Measurements collected in the current interval.
    #[inline]
    pub const fn pending_samples(&self) -> u32 { self.count }
}

// =============================================================================
// Unit Tests (run on host with: cargo test --lib --target <host-triple>)
// =============================================================================
