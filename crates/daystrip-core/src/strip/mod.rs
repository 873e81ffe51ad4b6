//! Day strip animation and layout
//!
//! # Layers
//!
//! - `easing` - Pure easing curves for the month label slide
//! - `animation` - Step state machine driving the scroll offset
//! - `layout` - Per-frame tile and month label placement
//!
//! # Usage
//!
//! ```ignore
//! use daystrip_core::strip::{DayStripLayout, LayoutSettings, ScrollAnimator};
//!
//! let mut animator = ScrollAnimator::new(&config.strip, &clock);
//! animator.request_move(&mut clock, Direction::Forward);
//!
//! // Once per frame
//! animator.tick();
//! let layout = DayStripLayout::new(&clock, &animator, LayoutSettings::from(&config.strip));
//! let cells = layout.compute_visible_cells(base_x, animator.step_width(), animator.offset());
//! // ...draw...
//! if animator.is_step_finished() {
//!     animator.complete_step(&mut clock);
//! }
//! ```

pub mod animation;
pub mod easing;
pub mod layout;

pub use animation::{Phase, ScrollAnimator};
pub use easing::{EasingType, EasingTypeExt};
pub use layout::{DayCell, DayStripLayout, LayoutSettings, MonthLabelPosition};
