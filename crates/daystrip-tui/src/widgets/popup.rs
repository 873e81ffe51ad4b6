use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

pub struct HelpPopupWidget;

impl HelpPopupWidget {
    /// Render the key help over the strip
    pub fn render(frame: &mut Frame, app: &App) {
        let keymap = &app.config.keymap;
        let entries = [
            (keymap.move_left.as_str(), "previous day"),
            (keymap.move_right.as_str(), "next day"),
            (keymap.fling_left.as_str(), "fling backward"),
            (keymap.fling_right.as_str(), "fling forward"),
            (keymap.help.as_str(), "toggle help"),
            (keymap.quit.as_str(), "quit"),
        ];

        let area = frame.area();
        let popup_width = 36u16.min(area.width.saturating_sub(4));
        let popup_height = (entries.len() as u16 + 4).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.accent))
            .style(Style::default().bg(app.theme.status_bg));
        let inner_area = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let key_style = Style::default()
            .fg(app.theme.selection)
            .add_modifier(Modifier::BOLD);
        let text_style = Style::default().fg(app.theme.status_fg);

        let mut lines: Vec<Line> = entries
            .iter()
            .map(|(key, what)| {
                Line::from(vec![
                    Span::styled(format!("{:>8}  ", key), key_style),
                    Span::styled(*what, text_style),
                ])
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "arrows also move, Esc closes",
            text_style.add_modifier(Modifier::DIM),
        )));

        frame.render_widget(Paragraph::new(lines), inner_area);
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(36, 10, area), Rect::new(22, 7, 36, 10));
        assert_eq!(centered_rect(100, 30, area), Rect::new(0, 0, 100, 30));
    }
}
