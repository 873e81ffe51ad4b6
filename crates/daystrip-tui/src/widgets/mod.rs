mod day_strip;
mod popup;
mod status_bar;

pub use day_strip::{DayStripWidget, TerminalSurface};
pub use popup::HelpPopupWidget;
pub use status_bar::StatusBarWidget;
