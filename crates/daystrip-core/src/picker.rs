//! Date picker facade
//!
//! Owns the single clock and animator pair and exposes the two hooks the
//! frame loop needs: `update()` once per frame and `render()` into whatever
//! surface draws the strip.

use serde::Serialize;
use tracing::info;

use crate::calendar::{CalendarClock, Direction};
use crate::config::{AppConfig, StripConfig};
use crate::strip::{
    DayCell, DayStripLayout, LayoutSettings, MonthLabelPosition, Phase, ScrollAnimator,
};
use crate::Result;

/// Drawing side of the strip
///
/// Implementors only read the frame; they never touch the clock or the
/// animation state.
pub trait StripSurface {
    /// Drawable width in layout units
    fn width(&self) -> f64;

    /// Resting row of the month label in layout units
    fn month_row(&self) -> f64;

    /// Draw one frame
    fn draw(&mut self, frame: &StripFrame);
}

/// The logical date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedDate {
    pub month_index: usize,
    pub month_name: String,
    pub day: u32,
}

/// Everything a surface needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StripFrame {
    pub phase: Phase,
    pub offset: f64,
    pub cell_width: f64,
    /// Left edge of the fixed selection frame
    pub selection_x: f64,
    pub cells: Vec<DayCell>,
    pub month_label: MonthLabelPosition,
    pub month_name: String,
    pub date: SelectedDate,
    /// Steps left including the one on screen
    pub queued_steps: u32,
}

#[derive(Debug, Clone)]
pub struct DatePicker {
    clock: CalendarClock,
    animator: ScrollAnimator,
    settings: LayoutSettings,
    fling_steps: u32,
}

impl DatePicker {
    /// Build from configuration; a bad month table or start date refuses to start
    pub fn new(config: &AppConfig) -> Result<Self> {
        config.strip.validate()?;
        let clock = config.calendar.clock()?;
        info!(
            month = clock.month_name(),
            day = clock.day_of_month(),
            "Date picker ready"
        );
        Ok(Self::with_clock(clock, &config.strip))
    }

    /// Build around an existing clock
    pub fn with_clock(clock: CalendarClock, strip: &StripConfig) -> Self {
        let animator = ScrollAnimator::new(strip, &clock);
        Self {
            clock,
            animator,
            settings: LayoutSettings::from(strip),
            fling_steps: strip.fling_steps,
        }
    }

    pub fn clock(&self) -> &CalendarClock {
        &self.clock
    }

    pub fn animator(&self) -> &ScrollAnimator {
        &self.animator
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn selected_date(&self) -> SelectedDate {
        SelectedDate {
            month_index: self.clock.month_index(),
            month_name: self.clock.month_name().to_string(),
            day: self.clock.day_of_month(),
        }
    }

    pub fn request_move(&mut self, direction: Direction) {
        self.animator.request_move(&mut self.clock, direction);
    }

    pub fn move_right(&mut self) {
        self.request_move(Direction::Forward);
    }

    pub fn move_left(&mut self) {
        self.request_move(Direction::Backward);
    }

    /// Queue the configured number of steps in one go
    pub fn fling(&mut self, direction: Direction) {
        self.animator
            .fling(&mut self.clock, direction, self.fling_steps);
    }

    pub fn fling_right(&mut self) {
        self.fling(Direction::Forward);
    }

    pub fn fling_left(&mut self) {
        self.fling(Direction::Backward);
    }

    /// Advance one frame
    ///
    /// A step that finished on the previous frame has had its final frame
    /// drawn, so it is retired here before the next tick. Returns whether
    /// the strip is still moving.
    pub fn update(&mut self) -> bool {
        if self.animator.is_step_finished() {
            self.animator.complete_step(&mut self.clock);
        }
        self.animator.tick();
        self.animator.is_animating()
    }

    /// Lay out the frame for a surface of `width` with the month label resting at `month_row`
    pub fn frame(&self, width: f64, month_row: f64) -> StripFrame {
        let layout = DayStripLayout::new(&self.clock, &self.animator, self.settings);
        let cell_width = self.animator.step_width();
        let base_x = self.settings.base_x_for(width, cell_width);
        let month_label = layout.compute_month_label_position(month_row);

        StripFrame {
            phase: self.animator.phase(),
            offset: self.animator.offset(),
            cell_width,
            selection_x: base_x + self.settings.selected_slot() as f64 * cell_width,
            cells: layout.compute_visible_cells(base_x, cell_width, self.animator.offset()),
            month_name: self.clock.table().name(month_label.month_index).to_string(),
            month_label,
            date: self.selected_date(),
            queued_steps: self.animator.remaining_steps(),
        }
    }

    /// Lay out the current frame and hand it to `surface`
    pub fn render<S: StripSurface + ?Sized>(&self, surface: &mut S) {
        let frame = self.frame(surface.width(), surface.month_row());
        surface.draw(&frame);
    }
}
