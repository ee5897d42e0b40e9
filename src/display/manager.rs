//! Display state manager.
//!
//! Composes one screen per tick on a borrowed [`PixelSurface`] and flushes it
//! once. The manager owns the alert schedule, the "full redraw needed" flag and
//! the mirror of the panel's hardware inversion.
//!
//! # Update Strategy
//!
//! | Element | Update Frequency | Strategy |
//! |---------|-----------------|----------|
//! | Label | On screen change / after an alert | Full clear + redraw |
//! | Digits | Every tick | Clear numeric band, redraw |
//! | Status row | Every tick | Clear status band, redraw |
//! | Eco line | Every tick | Clear row, redraw if set |
//! | Alert | Every tick while pending | Full clear |
//! | Distance | Every tick | Full clear |

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use super::alert::AlertState;
use super::canvas;
use super::fonts::FontSet;
use super::layout::{LayoutGeometry, metric_slot, time_slot};
use super::surface::{PixelSurface, SurfaceError};
use crate::config::{SCREEN_WIDTH, STATUS_REC_X};

/// Largest DD.D value, in tenths.
const MAX_METRIC_TENTHS: u32 = 999;
/// Lifts values like 2.3, whose tenths land just below a whole number.
const TENTHS_EPSILON: f32 = 1e-3;
/// 99:59.
const MAX_TIME_SECS: u32 = 99 * 60 + 59;
/// Largest `.DDD` distance, in thousandths.
const MAX_DISTANCE_THOUSANDTHS: u32 = 999;

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// Stopwatch state shown by the REC badge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum TimerState {
    /// Nothing drawn.
    #[default]
    Idle,
    /// Filled badge, inverted text.
    Running,
    /// Plain text.
    Paused,
}

/// Digits of a reading shown as DD.D.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MetricDigits {
    pub tens: u8,
    pub ones: u8,
    pub tenths: u8,
}

impl MetricDigits {
    /// Clamp to `0.0..=99.9`, then truncate to tenths. NaN reads as 0.
    pub fn from_value(value: f32) -> Self {
        let clamped = if value.is_nan() { 0.0 } else { value.clamp(0.0, 99.9) };
        let scaled = micromath::F32Ext::floor(clamped * 10.0 + TENTHS_EPSILON);
        let tenths = (scaled as u32).min(MAX_METRIC_TENTHS);
        Self {
            tens: (tenths / 100) as u8,
            ones: (tenths / 10 % 10) as u8,
            tenths: (tenths % 10) as u8,
        }
    }
}

/// Digits of an elapsed time shown as MM:SS.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeDigits {
    pub minutes: u8,
    pub seconds: u8,
}

impl TimeDigits {
    /// Whole seconds, clamped to `00:00..=99:59`.
    pub fn from_seconds(seconds: f32) -> Self {
        let total = if seconds > 0.0 {
            (seconds as u32).min(MAX_TIME_SECS)
        } else {
            0
        };
        Self {
            minutes: (total / 60) as u8,
            seconds: (total % 60) as u8,
        }
    }
}

/// Renders the dashboard screens onto a borrowed surface.
pub struct DisplayManager<'s, S: PixelSurface> {
    surface: &'s mut S,
    fonts: FontSet,
    layout: LayoutGeometry,
    alert: AlertState,
    /// Next metric render must redraw the static label.
    screen_changed: bool,
    /// Last inversion state sent to the panel.
    inverted: bool,
}

impl<'s, S: PixelSurface> DisplayManager<'s, S> {
    /// The panel is assumed freshly initialised: not inverted, contents unknown.
    pub fn new(surface: &'s mut S) -> Self {
        Self::with_fonts(surface, FontSet::default())
    }

    pub fn with_fonts(
        surface: &'s mut S,
        fonts: FontSet,
    ) -> Self {
        Self {
            surface,
            layout: LayoutGeometry::from_fonts(&fonts),
            fonts,
            alert: AlertState::new(),
            screen_changed: true,
            inverted: false,
        }
    }

    // =========================================================================
    // Screens
    // =========================================================================

    /// Large DD.D reading with label, status row and eco line.
    pub fn render_primary_metric(
        &mut self,
        value: f32,
        label: &str,
        link_blink: bool,
        timer: TimerState,
        invert: bool,
        eco: bool,
    ) -> Result<(), SurfaceError> {
        self.apply_inversion(invert)?;
        if self.screen_changed {
            self.redraw_static(label);
        }

        let digits = MetricDigits::from_value(value);
        let font = self.fonts.metric;
        let layout = self.layout;
        let surface = &mut *self.surface;
        let slots = layout.metric_slots;

        canvas::fill_area(surface, &layout.metric_band, BinaryColor::Off);
        if digits.tens > 0 {
            draw_digit(surface, font, digits.tens, slots[metric_slot::TENS]);
        }
        draw_digit(surface, font, digits.ones, slots[metric_slot::ONES]);
        draw_glyph(surface, font, ".", slots[metric_slot::DOT]);
        draw_digit(surface, font, digits.tenths, slots[metric_slot::TENTHS]);

        draw_status(surface, &layout, link_blink, timer);

        canvas::hline(surface, 0, layout.eco_y, SCREEN_WIDTH, BinaryColor::Off);
        if eco {
            canvas::line(surface, 0, layout.eco_y, SCREEN_WIDTH as i32 - 1, layout.eco_y, BinaryColor::On);
        }

        self.present()
    }

    /// Elapsed stopwatch time as MM:SS. Never inverted.
    pub fn render_elapsed_time(
        &mut self,
        seconds: f32,
        label: &str,
        link_blink: bool,
        timer: TimerState,
    ) -> Result<(), SurfaceError> {
        self.apply_inversion(false)?;
        if self.screen_changed {
            self.redraw_static(label);
        }

        let time = TimeDigits::from_seconds(seconds);
        let font = self.fonts.time;
        let layout = self.layout;
        let surface = &mut *self.surface;
        let slots = layout.time_slots;

        canvas::fill_area(surface, &layout.time_band, BinaryColor::Off);
        draw_digit(surface, font, time.minutes / 10, slots[time_slot::MIN_TENS]);
        draw_digit(surface, font, time.minutes % 10, slots[time_slot::MIN_ONES]);
        draw_glyph(surface, font, ":", slots[time_slot::COLON]);
        draw_digit(surface, font, time.seconds / 10, slots[time_slot::SEC_TENS]);
        draw_digit(surface, font, time.seconds % 10, slots[time_slot::SEC_ONES]);

        draw_status(surface, &layout, link_blink, timer);

        self.present()
    }

    /// Trip distance as `.DDD` miles. Nothing else changes on this screen, so
    /// it is redrawn in full.
    pub fn render_distance(
        &mut self,
        miles: f32,
    ) -> Result<(), SurfaceError> {
        self.apply_inversion(false)?;

        let thousandths = if miles > 0.0 {
            ((miles * 1000.0) as u32).min(MAX_DISTANCE_THOUSANDTHS)
        } else {
            0
        };
        let font = self.fonts.metric;
        let layout = self.layout;
        let surface = &mut *self.surface;
        let slots = layout.metric_slots;

        canvas::fill(surface, BinaryColor::Off);
        draw_glyph(surface, font, ".", slots[0]);
        draw_digit(surface, font, (thousandths / 100) as u8, slots[1]);
        draw_digit(surface, font, (thousandths / 10 % 10) as u8, slots[2]);
        draw_digit(surface, font, (thousandths % 10) as u8, slots[3]);
        canvas::draw_text(surface, "MILES", layout.label_x("MILES"), layout.status_y, BinaryColor::On);

        self.present()
    }

    /// Redraw the link indicator and REC badge. Does not flush.
    pub fn render_status_row(
        &mut self,
        link_blink: bool,
        timer: TimerState,
    ) {
        draw_status(&mut *self.surface, &self.layout, link_blink, timer);
    }

    /// Force the next metric render to redraw its static label.
    #[inline]
    pub fn mark_screen_changed(&mut self) { self.screen_changed = true; }

    // =========================================================================
    // Alerts
    // =========================================================================

    /// Schedule a full-screen alert for `duration_secs`, replacing any pending one.
    pub fn show_alert(
        &mut self,
        top: Option<&str>,
        bottom: Option<&str>,
        duration_secs: f32,
        now_ms: u32,
    ) {
        self.alert
            .schedule(top, bottom, duration_secs, now_ms, self.layout.alert_max_chars);
        log_info!(
            "Alert: {} {}",
            self.alert.top.as_deref().unwrap_or(""),
            self.alert.bottom.as_deref().unwrap_or("")
        );
    }

    /// Drop the pending alert immediately.
    pub fn clear_alert(&mut self) {
        if self.alert.is_pending() {
            self.alert.clear();
            self.screen_changed = true;
        }
    }

    /// Draw the pending alert, if any.
    ///
    /// Returns `Ok(true)` while an alert is on screen; the caller then skips
    /// its normal render. An expired alert is dropped here and reports
    /// `Ok(false)` without drawing.
    pub fn update_alert(
        &mut self,
        now_ms: u32,
    ) -> Result<bool, SurfaceError> {
        if !self.alert.is_pending() {
            return Ok(false);
        }
        if self.alert.is_expired(now_ms) {
            self.alert.clear();
            self.screen_changed = true;
            return Ok(false);
        }

        self.draw_alert()?;
        Ok(true)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub const fn is_screen_changed(&self) -> bool { self.screen_changed }

    #[inline]
    pub const fn is_inverted(&self) -> bool { self.inverted }

    #[inline]
    pub const fn alert(&self) -> &AlertState { &self.alert }

    #[inline]
    pub const fn layout(&self) -> &LayoutGeometry { &self.layout }

    #[inline]
    pub fn surface(&self) -> &S { &*self.surface }

    #[cfg(test)]
    pub(crate) fn surface_mut(&mut self) -> &mut S { &mut *self.surface }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Send an invert command only when the requested state differs.
    fn apply_inversion(
        &mut self,
        invert: bool,
    ) -> Result<(), SurfaceError> {
        if invert != self.inverted {
            self.surface.set_invert(invert)?;
            self.inverted = invert;
        }
        Ok(())
    }

    fn redraw_static(
        &mut self,
        label: &str,
    ) {
        canvas::fill(&mut *self.surface, BinaryColor::Off);
        canvas::draw_text(
            &mut *self.surface,
            label,
            self.layout.label_x(label),
            self.layout.status_y,
            BinaryColor::On,
        );
    }

    fn draw_alert(&mut self) -> Result<(), SurfaceError> {
        self.apply_inversion(false)?;
        // The alert covers the whole screen
        self.screen_changed = true;

        let font = self.fonts.alert;
        let layout = self.layout;
        let surface = &mut *self.surface;

        canvas::fill(surface, BinaryColor::Off);
        for (line, y) in [(&self.alert.top, layout.alert_top_y), (&self.alert.bottom, layout.alert_bottom_y)] {
            if let Some(text) = line.as_deref().filter(|t| !t.is_empty()) {
                canvas::draw_glyph_string(surface, font, text, layout.centered_x(font, text), y, BinaryColor::On);
            }
        }

        self.surface.flush()
    }

    /// Flush the finished frame; the label is only considered drawn once the
    /// panel has it.
    fn present(&mut self) -> Result<(), SurfaceError> {
        self.surface.flush()?;
        self.screen_changed = false;
        Ok(())
    }
}

fn draw_digit<D>(
    surface: &mut D,
    font: &MonoFont<'_>,
    digit: u8,
    at: Point,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    draw_glyph(surface, font, DIGITS[usize::from(digit % 10)], at);
}

#[inline]
fn draw_glyph<D>(
    surface: &mut D,
    font: &MonoFont<'_>,
    glyph: &str,
    at: Point,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    canvas::draw_glyph_string(surface, font, glyph, at.x, at.y, BinaryColor::On);
}

/// Link indicator and REC badge on the bottom-left band.
fn draw_status<D>(
    surface: &mut D,
    layout: &LayoutGeometry,
    link_blink: bool,
    timer: TimerState,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let y = layout.status_y;
    canvas::fill_area(surface, &layout.status_band, BinaryColor::Off);

    if link_blink {
        canvas::draw_text(surface, "U", 0, y, BinaryColor::On);
    }

    match timer {
        TimerState::Idle => {}
        TimerState::Running => {
            canvas::fill_area(surface, &layout.rec_highlight, BinaryColor::On);
            canvas::draw_text(surface, "REC", STATUS_REC_X, y, BinaryColor::Off);
        }
        TimerState::Paused => canvas::draw_text(surface, "REC", STATUS_REC_X, y, BinaryColor::On),
    }
}

// =============================================================================
// Unit Tests (run on host with: cargo test --lib --target <host-triple>)
// =============================================================================
