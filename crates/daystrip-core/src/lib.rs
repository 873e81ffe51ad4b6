pub mod calendar;
pub mod config;
pub mod error;
pub mod month_table;
pub mod picker;
pub mod strip;

pub use calendar::{CalendarClock, DayChange, Direction, LabelAnchor};
pub use config::{AppConfig, EasingType, StripConfig};
pub use error::{Error, Result};
pub use month_table::{MonthEntry, MonthTable};
pub use picker::{DatePicker, SelectedDate, StripFrame, StripSurface};
