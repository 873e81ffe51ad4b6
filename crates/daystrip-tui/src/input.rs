use crossterm::event::KeyEvent;

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveLeft,
    MoveRight,
    FlingLeft,
    FlingRight,
    ToggleHelp,
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    let binding = KeyBinding::new(key.code, key.modifiers);

    if app.mode == Mode::Help {
        // Quit still works, any other key closes help
        return match keymap.get(&binding) {
            Some(Action::Quit) => Action::Quit,
            _ => Action::ExitMode,
        };
    }

    keymap.get(&binding).copied().unwrap_or(Action::None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use daystrip_core::{AppConfig, DatePicker};

    use crate::theme::Theme;

    fn app() -> App {
        let config = AppConfig::default();
        let picker = DatePicker::new(&config).unwrap();
        App::new(picker, config.into(), Theme::default())
    }

    #[test]
    fn test_normal_mode_bindings() {
        let app = app();
        let keymap = Keymap::default();
        let press =
            |code, modifiers| handle_key_event(KeyEvent::new(code, modifiers), &app, &keymap);

        assert_eq!(press(KeyCode::Char('l'), KeyModifiers::NONE), Action::MoveRight);
        assert_eq!(press(KeyCode::Char('h'), KeyModifiers::NONE), Action::MoveLeft);
        assert_eq!(press(KeyCode::Right, KeyModifiers::NONE), Action::MoveRight);
        assert_eq!(press(KeyCode::Char('L'), KeyModifiers::SHIFT), Action::FlingRight);
        assert_eq!(press(KeyCode::Left, KeyModifiers::SHIFT), Action::FlingLeft);
        assert_eq!(press(KeyCode::Char('?'), KeyModifiers::SHIFT), Action::ToggleHelp);
        assert_eq!(press(KeyCode::Char('c'), KeyModifiers::CONTROL), Action::Quit);
        assert_eq!(press(KeyCode::Char('x'), KeyModifiers::NONE), Action::None);
    }

    #[test]
    fn test_help_mode_closes_on_any_key() {
        let mut app = app();
        app.mode = Mode::Help;
        let keymap = Keymap::default();

        let key = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &app, &keymap), Action::ExitMode);

        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &app, &keymap), Action::Quit);
    }
}
