//! The dashboard control loop.

use super::screen::Screen;
use super::timer::Stopwatch;
use super::trip::{TripMeter, mph_from_rpm};
use crate::config::{
    LOW_VOLTAGE_ALERT_SECS, LOW_VOLTAGE_DV, PERF_REPORT_INTERVAL_MS, RESET_ALERT_SECS, WHEEL_CIRCUMFERENCE_MM,
};
use crate::display::{DisplayManager, PixelSurface, SurfaceError};
use crate::input::{GestureConfig, GestureEvent, GestureRecognizer};
use crate::profiling::PerfMonitor;
use crate::telemetry::TelemetryLink;
use crate::ticks::MonotonicClock;

/// Runtime configuration for [`Dashboard`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AppConfig {
    pub gesture: GestureConfig,
    /// How long "TIMER RESET" stays up after a long press.
    pub reset_alert_secs: f32,
    /// How long "LOW BATTERY" stays up when the pack crosses the threshold.
    pub low_voltage_alert_secs: f32,
    pub perf_interval_ms: u32,
    /// Pack voltage threshold in tenths of a volt.
    pub low_voltage_dv: u16,
    pub wheel_circumference_mm: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gesture: GestureConfig::default(),
            reset_alert_secs: RESET_ALERT_SECS,
            low_voltage_alert_secs: LOW_VOLTAGE_ALERT_SECS,
            perf_interval_ms: PERF_REPORT_INTERVAL_MS,
            low_voltage_dv: LOW_VOLTAGE_DV,
            wheel_circumference_mm: WHEEL_CIRCUMFERENCE_MM,
        }
    }
}

/// Application context: owns every component and borrows the panel.
pub struct Dashboard<'s, S: PixelSurface> {
    config: AppConfig,
    gestures: GestureRecognizer,
    telemetry: TelemetryLink,
    display: DisplayManager<'s, S>,
    perf: PerfMonitor,
    screen: Screen,
    stopwatch: Stopwatch,
    trip: TripMeter,
    /// Latched on a low-voltage crossing, released when voltage recovers.
    low_voltage: bool,
}

impl<'s, S: PixelSurface> Dashboard<'s, S> {
    pub fn new(
        surface: &'s mut S,
        config: AppConfig,
        now_ms: u32,
    ) -> Self {
        Self {
            gestures: GestureRecognizer::new(config.gesture),
            telemetry: TelemetryLink::new(),
            display: DisplayManager::new(surface),
            perf: PerfMonitor::new(config.perf_interval_ms, now_ms),
            screen: Screen::default(),
            stopwatch: Stopwatch::new(),
            trip: TripMeter::new(),
            low_voltage: false,
            config,
        }
    }

    /// Run one loop iteration: gestures, telemetry, then exactly one render.
    ///
    /// A surface failure is returned after the performance bookkeeping for
    /// this tick has run; all other state has already been updated.
    pub fn tick<C: MonotonicClock>(
        &mut self,
        clock: &C,
        key0_low: bool,
        key1_low: bool,
        serial: &[u8],
    ) -> Result<(), SurfaceError> {
        let now_ms = clock.now_ms();

        for event in self.gestures.poll(now_ms, key0_low, key1_low) {
            self.handle_gesture(event, now_ms);
        }

        self.telemetry.ingest(serial);
        if self.telemetry.has_new_data() {
            self.on_new_sample(now_ms);
        }

        self.perf.begin_measurement(clock.now_us());
        let result = self.render(now_ms);
        self.perf.end_measurement(clock.now_us());
        self.perf.maybe_report(now_ms);

        result
    }

    fn handle_gesture(
        &mut self,
        event: GestureEvent,
        now_ms: u32,
    ) {
        match event {
            GestureEvent::ScreenAdvance => {
                self.screen = self.screen.next();
                self.display.mark_screen_changed();
                log_info!("Screen: {}", self.screen.label());
            }
            GestureEvent::TimerToggle => self.stopwatch.toggle(now_ms),
            GestureEvent::TimerReset => {
                self.stopwatch.reset();
                self.trip.reset();
                self.display
                    .show_alert(Some("Timer"), Some("Reset"), self.config.reset_alert_secs, now_ms);
            }
            GestureEvent::ClearAlert => self.display.clear_alert(),
        }
    }

    fn on_new_sample(
        &mut self,
        now_ms: u32,
    ) {
        let sample = *self.telemetry.sample();
        self.trip.record(self.speed_mph(), now_ms);

        let low = sample.deci_volts < self.config.low_voltage_dv;
        if low && !self.low_voltage {
            log_warn!("Low voltage: {}V", sample.volts());
            self.display
                .show_alert(Some("Low"), Some("Battery"), self.config.low_voltage_alert_secs, now_ms);
        }
        self.low_voltage = low;
    }

    fn render(
        &mut self,
        now_ms: u32,
    ) -> Result<(), SurfaceError> {
        if self.display.update_alert(now_ms)? {
            return Ok(());
        }

        let sample = *self.telemetry.sample();
        let blink = self.telemetry.link_blink();
        let timer = self.stopwatch.state();
        let label = self.screen.label();

        match self.screen {
            Screen::Speed => {
                let mph = self.speed_mph();
                self.display
                    .render_primary_metric(mph, label, blink, timer, self.low_voltage, sample.eco)
            }
            Screen::Voltage => {
                self.display
                    .render_primary_metric(sample.volts(), label, blink, timer, false, sample.eco)
            }
            Screen::Current => {
                self.display
                    .render_primary_metric(sample.amps(), label, blink, timer, false, sample.eco)
            }
            Screen::Time => {
                let secs = self.stopwatch.elapsed_secs(now_ms);
                self.display.render_elapsed_time(secs, label, blink, timer)
            }
            Screen::Distance => self.display.render_distance(self.trip.miles()),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Road speed from the live sample.
    pub fn speed_mph(&self) -> f32 {
        mph_from_rpm(self.telemetry.sample().rpm, self.config.wheel_circumference_mm)
    }

    #[inline]
    pub const fn screen(&self) -> Screen { self.screen }

    #[inline]
    pub const fn stopwatch(&self) -> &Stopwatch { &self.stopwatch }

    #[inline]
    pub const fn telemetry(&self) -> &TelemetryLink { &self.telemetry }

    #[inline]
    pub const fn display(&self) -> &DisplayManager<'s, S> { &self.display }

    #[inline]
    pub const fn trip_miles(&self) -> f32 { self.trip.miles() }

    #[inline]
    pub const fn is_low_voltage(&self) -> bool { self.low_voltage }

    #[cfg(test)]
    fn display_mut(&mut self) -> &mut DisplayManager<'s, S> { &mut self.display }
}

// =============================================================================
// Unit Tests (run on host with: cargo test --lib --target <host-triple>)
// =============================================================================
