//! Frame layout for the day strip
//!
//! Pure queries over the clock and the animator: where each tile sits, what
//! it reads, and where the month label is drawn.

use std::ops::RangeInclusive;

use serde::Serialize;

use super::animation::ScrollAnimator;
use super::easing::{lerp, EasingType, EasingTypeExt};
use crate::calendar::{CalendarClock, Direction, LabelAnchor};
use crate::config::StripConfig;

/// One drawable tile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    /// Left edge in layout units
    pub x: f64,
    /// Position relative to the anchor tile
    pub relative: i32,
    /// Day of month shown on the tile
    pub day: u32,
    pub label: String,
}

/// Month label placement for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthLabelPosition {
    pub month_index: usize,
    /// Vertical position in layout units
    pub y: f64,
    /// 1.0 fully visible, 0.0 faded out
    pub opacity: f64,
}

/// Static layout settings taken from the strip config
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    pub tiles_before: u32,
    pub tiles_after: u32,
    pub label_rise: f64,
    pub easing: EasingType,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self::from(&StripConfig::default())
    }
}

impl From<&StripConfig> for LayoutSettings {
    fn from(config: &StripConfig) -> Self {
        Self {
            tiles_before: config.tiles_before,
            tiles_after: config.tiles_after,
            label_rise: config.label_rise,
            easing: config.easing,
        }
    }
}

impl LayoutSettings {
    /// Relative positions of the drawn tiles, left to right
    pub fn relative_positions(&self) -> RangeInclusive<i32> {
        -(self.tiles_before as i32)..=self.tiles_after as i32
    }

    pub fn tile_count(&self) -> usize {
        (self.tiles_before + self.tiles_after + 1) as usize
    }

    /// Slot of the tile showing the current day at rest (relative +1)
    pub fn selected_slot(&self) -> usize {
        self.tiles_before as usize + 1
    }

    /// Left edge of slot 0 that centres the selected slot in `width`
    pub fn base_x_for(&self, width: f64, cell_width: f64) -> f64 {
        width / 2.0 - (self.selected_slot() as f64 + 0.5) * cell_width
    }
}

/// Layout view over the clock and animator for a single frame
#[derive(Debug, Clone, Copy)]
pub struct DayStripLayout<'a> {
    clock: &'a CalendarClock,
    animator: &'a ScrollAnimator,
    settings: LayoutSettings,
}

impl<'a> DayStripLayout<'a> {
    pub fn new(
        clock: &'a CalendarClock,
        animator: &'a ScrollAnimator,
        settings: LayoutSettings,
    ) -> Self {
        Self {
            clock,
            animator,
            settings,
        }
    }

    /// Tiles of the window, left to right
    ///
    /// Slot `k` sits at `base_x + k * cell_width - offset_px`.
    pub fn compute_visible_cells(
        &self,
        base_x: f64,
        cell_width: f64,
        offset_px: f64,
    ) -> Vec<DayCell> {
        let anchor = self.animator.label_anchor();

        self.settings
            .relative_positions()
            .enumerate()
            .map(|(slot, relative)| DayCell {
                x: base_x + slot as f64 * cell_width - offset_px,
                relative,
                day: self.clock.relative_day(relative, anchor),
                label: self.clock.relative_day_label(relative, anchor),
            })
            .collect()
    }

    /// Month label for this frame, `month_pos` being its resting row
    ///
    /// The old month slides out and fades during the first half of the step
    /// that changed month; the new one slides in from the opposite side
    /// during the second half.
    pub fn compute_month_label_position(&self, month_pos: f64) -> MonthLabelPosition {
        let month_index = if self.animator.half_transition() {
            self.clock.month_index()
        } else {
            self.animator.displayed_month_index()
        };

        if !self.animator.pending_month_transition() {
            return MonthLabelPosition {
                month_index,
                y: month_pos,
                opacity: 1.0,
            };
        }

        // Forward moves push the label up, backward moves push it down
        let sign = match self.animator.label_anchor() {
            LabelAnchor::Scrolling(Direction::Backward) => 1.0,
            _ => -1.0,
        };
        let rise = self.settings.label_rise;
        let progress = self.animator.step_progress();

        if self.animator.half_transition() {
            let t = self.settings.easing.apply((progress - 0.5) * 2.0);
            MonthLabelPosition {
                month_index,
                y: lerp(month_pos - sign * rise, month_pos, t),
                opacity: t,
            }
        } else {
            let t = self.settings.easing.apply(progress * 2.0);
            MonthLabelPosition {
                month_index,
                y: lerp(month_pos, month_pos + sign * rise, t),
                opacity: 1.0 - t,
            }
        }
    }
}
