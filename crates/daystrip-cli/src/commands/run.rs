use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use tracing::info;

use daystrip_core::{AppConfig, DatePicker};
use daystrip_tui::{
    app::{App, Mode},
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    keymap::Keymap,
    load_theme,
    widgets::{DayStripWidget, HelpPopupWidget, StatusBarWidget},
};

pub fn run(config: Arc<AppConfig>) -> Result<()> {
    // Refuse to start on a bad calendar before touching the terminal
    let picker = DatePicker::new(&config)?;
    let keymap = Keymap::from_config(&config.keymap);
    let theme = load_theme(&config.ui.theme);
    let mut app = App::new(picker, config.clone(), theme);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("Daystrip"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, &keymap, config.ui.frame_interval());

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let date = app.picker.selected_date();
    info!(month = %date.month_name, day = date.day, "Exited");
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    keymap: &Keymap,
    frame_interval: Duration,
) -> Result<()> {
    let mut events = EventHandler::new(frame_interval);
    // Draw only while something changed; the frame after motion stops is
    // still drawn so the resting position reaches the screen
    let mut dirty = true;

    while !app.should_quit {
        match events.next()? {
            Some(AppEvent::Key(key)) => {
                let action = handle_key_event(key, app, keymap);
                app.handle_action(action);
                dirty = true;
            }
            Some(AppEvent::Resize(_, _)) => dirty = true,
            Some(AppEvent::Tick) => {
                let moving = app.tick();
                if moving || dirty {
                    terminal.draw(|frame| draw(frame, app))?;
                }
                dirty = moving;
            }
            None => {}
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    DayStripWidget::render(frame, chunks[0], app);
    StatusBarWidget::render(frame, chunks[1], app);

    if app.mode == Mode::Help {
        HelpPopupWidget::render(frame, app);
    }
}
