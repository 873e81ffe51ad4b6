use std::sync::Arc;

use daystrip_core::{AppConfig, DatePicker};
use tracing::debug;

use crate::input::Action;
use crate::theme::Theme;

/// Overlay mode of the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Help,
}

/// Application state
pub struct App {
    /// The strip being driven
    pub picker: DatePicker,
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(picker: DatePicker, config: Arc<AppConfig>, theme: Theme) -> Self {
        Self {
            picker,
            config,
            theme,
            mode: Mode::Normal,
            should_quit: false,
            status_message: None,
        }
    }

    /// Apply an input action
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::MoveLeft => self.picker.move_left(),
            Action::MoveRight => self.picker.move_right(),
            Action::FlingLeft => self.picker.fling_left(),
            Action::FlingRight => self.picker.fling_right(),
            Action::ToggleHelp => {
                self.mode = match self.mode {
                    Mode::Help => Mode::Normal,
                    Mode::Normal => Mode::Help,
                };
            }
            Action::ExitMode => self.mode = Mode::Normal,
            Action::None => {}
        }

        if action != Action::None {
            debug!(?action, queued = self.picker.animator().remaining_steps(), "Handled action");
            self.clear_status();
        }
    }

    /// Advance one frame; returns whether the strip is still moving
    pub fn tick(&mut self) -> bool {
        let moving = self.picker.update();
        if !moving && self.status_message.is_none() {
            let date = self.picker.selected_date();
            self.set_status(format!("{} {}", date.month_name, date.day));
        }
        moving
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daystrip_core::config::StartDate;

    fn app_at(month: u32, day: u32) -> App {
        let mut config = AppConfig::default();
        config.calendar.start = StartDate::Fixed { month, day };
        let picker = DatePicker::new(&config).unwrap();
        App::new(picker, Arc::new(config), Theme::default())
    }

    #[test]
    fn test_move_actions_drive_picker() {
        let mut app = app_at(6, 30);
        app.handle_action(Action::MoveRight);
        assert_eq!(app.picker.selected_date().month_name, "July");
        assert!(app.picker.is_animating());

        while app.tick() {}
        assert_eq!(app.status_message.as_deref(), Some("July 1"));
    }

    #[test]
    fn test_help_toggle() {
        let mut app = app_at(6, 30);
        app.handle_action(Action::ToggleHelp);
        assert_eq!(app.mode, Mode::Help);
        app.handle_action(Action::ToggleHelp);
        assert_eq!(app.mode, Mode::Normal);
        app.handle_action(Action::ToggleHelp);
        app.handle_action(Action::ExitMode);
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn test_quit() {
        let mut app = app_at(1, 1);
        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }
}
