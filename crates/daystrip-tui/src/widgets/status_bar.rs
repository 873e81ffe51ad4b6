use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let mode_str = match app.mode {
            Mode::Normal if app.picker.is_animating() => "SCROLL",
            Mode::Normal => "NORMAL",
            Mode::Help => "HELP",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {} | {}", mode_str, msg)
        } else {
            let date = app.picker.selected_date();
            let queued = app.picker.animator().remaining_steps();
            if queued > 1 {
                format!(" {} | {} {} | queued: {}", mode_str, date.month_name, date.day, queued)
            } else {
                format!(" {} | {} {}", mode_str, date.month_name, date.day)
            }
        };

        let keymap = &app.config.keymap;
        let help_hint = format!(
            " {}:quit {}/{}:day {}/{}:fling {}:help ",
            keymap.quit,
            keymap.move_left,
            keymap.move_right,
            keymap.fling_left,
            keymap.fling_right,
            keymap.help
        );
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let bar_style = Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg);
        let line = Line::from(vec![
            Span::styled(status_text, bar_style),
            Span::styled(" ".repeat(padding_len), bar_style),
            Span::styled(help_hint, bar_style.fg(app.theme.accent)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
