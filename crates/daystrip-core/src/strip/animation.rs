//! Step animation controller
//!
//! Turns discrete move requests into a per-frame scroll offset. The date is
//! moved when a step starts, so the clock always shows the day the strip is
//! scrolling towards; the month label is held back until the step that
//! crossed the month boundary completes.

use serde::Serialize;
use tracing::debug;

use crate::calendar::{CalendarClock, Direction, LabelAnchor};
use crate::config::StripConfig;

/// Slack for float accumulation when comparing against the step width
const FINISH_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Scrolling,
}

/// The step currently on screen plus whatever is queued behind it
#[derive(Debug, Clone)]
struct ActiveStep {
    /// Direction of the step on screen; its date move already happened
    direction: Direction,
    /// Direction the queued steps will take
    queued_direction: Direction,
    /// Steps left including this one, never zero
    remaining: u32,
    /// Scroll distance travelled by this step
    offset: f64,
    /// Offset reached the step width; waiting for `complete_step`
    finished: bool,
}

/// Scroll state machine for the day strip
///
/// Call `request_move()` from input handlers, `tick()` once per frame, and
/// `complete_step()` after the frame showing a finished step was drawn.
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    /// Step in flight (if any)
    animation: Option<ActiveStep>,
    /// Distance of one step, equal to one tile's width
    step_width: f64,
    /// Offset added per tick
    speed: f64,
    /// Scale speed by the remaining step count
    momentum: bool,
    /// The step in flight crossed a month boundary
    pending_month_transition: bool,
    /// Month shown by the label until the transition commits
    displayed_month_index: usize,
    /// The step carrying the transition has passed its midpoint
    half_transition: bool,
}

impl ScrollAnimator {
    /// Create an idle animator showing the clock's month
    pub fn new(config: &StripConfig, clock: &CalendarClock) -> Self {
        Self {
            animation: None,
            step_width: config.cell_width,
            speed: config.speed(),
            momentum: config.momentum,
            pending_month_transition: false,
            displayed_month_index: clock.month_index(),
            half_transition: false,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        if self.animation.is_some() {
            Phase::Scrolling
        } else {
            Phase::Idle
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Signed queue: sign is the queued direction, magnitude the steps left
    /// including the one in flight. Zero when idle.
    pub fn direction(&self) -> i32 {
        self.animation
            .as_ref()
            .map(|a| a.queued_direction.sign() * i32::try_from(a.remaining).unwrap_or(i32::MAX))
            .unwrap_or(0)
    }

    /// Direction of the step currently on screen
    pub fn step_direction(&self) -> Option<Direction> {
        self.animation.as_ref().map(|a| a.direction)
    }

    /// Steps left including the one in flight
    pub fn remaining_steps(&self) -> u32 {
        self.animation.as_ref().map(|a| a.remaining).unwrap_or(0)
    }

    /// Current scroll offset; zero at rest
    #[inline]
    pub fn offset(&self) -> f64 {
        self.animation.as_ref().map(|a| a.offset).unwrap_or(0.0)
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[inline]
    pub fn step_width(&self) -> f64 {
        self.step_width
    }

    /// Fraction of the current step covered, in [0, 1]
    pub fn step_progress(&self) -> f64 {
        (self.offset().abs() / self.step_width).clamp(0.0, 1.0)
    }

    /// The step reached the step width and awaits `complete_step`
    pub fn is_step_finished(&self) -> bool {
        self.animation.as_ref().is_some_and(|a| a.finished)
    }

    pub fn pending_month_transition(&self) -> bool {
        self.pending_month_transition
    }

    pub fn half_transition(&self) -> bool {
        self.half_transition
    }

    pub fn displayed_month_index(&self) -> usize {
        self.displayed_month_index
    }

    /// Anchor the layout should use for relative labels
    pub fn label_anchor(&self) -> LabelAnchor {
        match &self.animation {
            Some(step) => LabelAnchor::Scrolling(step.direction),
            None => LabelAnchor::Resting,
        }
    }

    /// Request a one-day move
    ///
    /// At rest this starts a step and moves the clock immediately. While
    /// scrolling the request is queued: the same direction adds a step, the
    /// opposite direction turns the queued steps around without changing
    /// their count. The step on screen always finishes in its own direction.
    pub fn request_move(&mut self, clock: &mut CalendarClock, direction: Direction) {
        match self.animation.as_mut() {
            None => self.start_step(clock, direction, 1),
            Some(step) if step.queued_direction == direction => {
                step.remaining = step.remaining.saturating_add(1);
                debug!(remaining = step.remaining, ?direction, "Queued step");
            }
            Some(step) if step.remaining > 1 => {
                step.queued_direction = direction;
                debug!(remaining = step.remaining, ?direction, "Reversed queued steps");
            }
            // Nothing queued behind the step on screen
            Some(_) => {}
        }
    }

    /// Request `steps` moves in one gesture
    pub fn fling(&mut self, clock: &mut CalendarClock, direction: Direction, steps: u32) {
        for _ in 0..steps {
            self.request_move(clock, direction);
        }
    }

    /// Advance the animation by one frame
    ///
    /// Returns true once the step on screen has reached the step width. The
    /// offset is left at the step width so the final frame can be drawn.
    pub fn tick(&mut self) -> bool {
        let Some(step) = self.animation.as_mut() else {
            return false;
        };
        if step.finished {
            return true;
        }

        let speed = if self.momentum {
            self.speed * f64::from(step.remaining)
        } else {
            self.speed
        };
        let sign = f64::from(step.direction.sign());
        step.offset += speed * sign;

        if step.offset.abs() + FINISH_EPSILON >= self.step_width {
            step.offset = self.step_width * sign;
            step.finished = true;
        }

        if self.pending_month_transition && step.offset.abs() >= self.step_width / 2.0 {
            self.half_transition = true;
        }

        step.finished
    }

    /// Retire the finished step and start the next queued one
    ///
    /// Does nothing unless the step on screen has finished. Returns whether
    /// a step was retired.
    pub fn complete_step(&mut self, clock: &mut CalendarClock) -> bool {
        let Some(step) = self.animation.take() else {
            return false;
        };
        if !step.finished {
            self.animation = Some(step);
            return false;
        }

        if self.pending_month_transition {
            self.half_transition = false;
            self.pending_month_transition = false;
            self.displayed_month_index = clock.month_index();
            debug!(month = clock.month_name(), "Committed month label");
        }

        let remaining = step.remaining - 1;
        if remaining > 0 {
            self.start_step(clock, step.queued_direction, remaining);
        } else {
            debug!(
                month = clock.month_name(),
                day = clock.day_of_month(),
                "Strip at rest"
            );
        }

        true
    }

    /// Move the clock and put a fresh step on screen
    fn start_step(&mut self, clock: &mut CalendarClock, direction: Direction, remaining: u32) {
        let month_before = clock.month_index();
        let change = clock.step(direction);

        if change.month_changed {
            self.pending_month_transition = true;
            self.displayed_month_index = month_before;
        }

        debug!(
            ?direction,
            remaining,
            day = clock.day_of_month(),
            month_changed = change.month_changed,
            "Started step"
        );

        self.animation = Some(ActiveStep {
            direction,
            queued_direction: direction,
            remaining,
            offset: 0.0,
            finished: false,
        });
    }
}
