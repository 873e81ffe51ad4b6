use daystrip_core::{StripFrame, StripSurface};
use daystrip_core::strip::DayCell;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::theme::Theme;

/// Rows taken by a tile: top border, day number, bottom border
const TILE_HEIGHT: u16 = 3;

pub struct DayStripWidget;

impl DayStripWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let rise = app.config.strip.label_rise.ceil() as u16;
        // Label slides within [1, 2 * rise + 1]; tiles start below that with
        // one row for the selection frame
        let tile_row = rise.saturating_mul(2).saturating_add(4);
        let content_height = tile_row.saturating_add(TILE_HEIGHT + 1);
        let top = area.y.saturating_add(area.height.saturating_sub(content_height) / 2);

        let mut surface = TerminalSurface {
            frame,
            area,
            theme: &app.theme,
            top,
            month_row: f64::from(rise) + 1.0,
            tile_row,
        };
        app.picker.render(&mut surface);
    }
}

/// Draws strip frames into a ratatui buffer, one layout unit per column
pub struct TerminalSurface<'a, 'f> {
    frame: &'a mut Frame<'f>,
    area: Rect,
    theme: &'a Theme,
    /// First row of the strip block
    top: u16,
    month_row: f64,
    /// Tile row relative to `top`
    tile_row: u16,
}

impl StripSurface for TerminalSurface<'_, '_> {
    fn width(&self) -> f64 {
        f64::from(self.area.width)
    }

    fn month_row(&self) -> f64 {
        self.month_row
    }

    fn draw(&mut self, strip: &StripFrame) {
        self.frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.background)),
            self.area,
        );

        self.draw_month_label(strip);
        let tile_width = tile_width(strip.cell_width);
        for cell in &strip.cells {
            let selected = (cell.x - strip.selection_x).abs() < strip.cell_width / 2.0;
            self.draw_tile(cell, tile_width, selected);
        }
        self.draw_selection(strip.selection_x, tile_width);
    }
}

impl TerminalSurface<'_, '_> {
    fn column(&self, x: f64) -> i32 {
        i32::from(self.area.x) + x.round() as i32
    }

    /// Clip a horizontal span to the area
    fn clip(&self, start: i32, width: i32, y: u16, height: u16) -> Option<Rect> {
        let left = start.max(i32::from(self.area.x));
        let right = (start + width).min(i32::from(self.area.right()));
        if right <= left || y >= self.area.bottom() {
            return None;
        }
        let rect = Rect::new(left as u16, y, (right - left) as u16, height);
        Some(rect.intersection(self.area))
    }

    fn draw_month_label(&mut self, strip: &StripFrame) {
        let label = &strip.month_label;
        if label.opacity < 0.2 {
            return;
        }

        let row = i32::from(self.top) + label.y.round() as i32;
        if row < i32::from(self.area.y) || row >= i32::from(self.area.bottom()) {
            return;
        }

        let modifier = if label.opacity < 0.6 {
            Modifier::DIM
        } else {
            Modifier::BOLD
        };
        let paragraph = Paragraph::new(strip.month_name.as_str())
            .style(Style::default().fg(self.theme.month).add_modifier(modifier))
            .alignment(Alignment::Center);
        let rect = Rect::new(self.area.x, row as u16, self.area.width, 1);
        self.frame.render_widget(paragraph, rect);
    }

    /// Absolute row of the tiles
    fn tile_y(&self) -> u16 {
        self.top.saturating_add(self.tile_row)
    }

    fn draw_tile(&mut self, cell: &DayCell, tile_width: i32, selected: bool) {
        let start = self.column(cell.x);
        let y = self.tile_y();
        let Some(rect) = self.clip(start, tile_width, y, TILE_HEIGHT) else {
            return;
        };

        // Only draw the side borders that are actually on screen
        let mut borders = Borders::TOP | Borders::BOTTOM;
        if start >= i32::from(self.area.x) {
            borders |= Borders::LEFT;
        }
        if start + tile_width <= i32::from(self.area.right()) {
            borders |= Borders::RIGHT;
        }

        let block = Block::default()
            .borders(borders)
            .border_style(Style::default().fg(self.theme.tile_dim))
            .style(Style::default().bg(self.theme.tile));
        self.frame.render_widget(block, rect);

        let text_style = if selected {
            Style::default()
                .fg(self.theme.tile_text)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.tile_dim)
        };

        let label_width = cell.label.width() as i32;
        let label_start = start + (tile_width - label_width) / 2;
        if let Some(label_rect) = self.clip(label_start, label_width, y.saturating_add(1), 1) {
            // Skip labels that would be cut in half
            if label_rect.width as i32 == label_width {
                self.frame.render_widget(
                    Paragraph::new(cell.label.as_str()).style(text_style),
                    label_rect,
                );
            }
        }
    }

    fn draw_selection(&mut self, selection_x: f64, tile_width: i32) {
        let start = self.column(selection_x) - 1;
        let y = self.tile_y().saturating_sub(1);
        if let Some(rect) = self.clip(start, tile_width + 2, y, TILE_HEIGHT + 2) {
            let frame_block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(self.theme.selection));
            self.frame.render_widget(frame_block, rect);
        }
    }
}

/// Tile box width, leaving one column of gap between neighbours
fn tile_width(cell_width: f64) -> i32 {
    (cell_width.round() as i32 - 1).max(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use daystrip_core::config::StartDate;
    use daystrip_core::{AppConfig, DatePicker};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn app_at(month: u32, day: u32) -> App {
        let mut config = AppConfig::default();
        config.calendar.start = StartDate::Fixed { month, day };
        let picker = DatePicker::new(&config).unwrap();
        App::new(picker, Arc::new(config), Theme::default())
    }

    fn render_to_string(app: &App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                DayStripWidget::render(frame, area, app);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_renders_month_and_days() {
        let app = app_at(6, 29);
        let screen = render_to_string(&app, 90, 16);
        assert!(screen.contains("June"));
        for day in ["26", "27", "28", "29", "30", " 1 ", " 2 "] {
            assert!(screen.contains(day), "missing {:?} in\n{}", day, screen);
        }
    }

    #[test]
    fn test_renders_mid_step_without_panicking() {
        let mut app = app_at(1, 31);
        app.picker.move_right();
        for _ in 0..7 {
            app.picker.update();
            render_to_string(&app, 40, 12);
        }
    }

    #[test]
    fn test_large_label_rise_pushes_tiles_off_screen() {
        let mut config = AppConfig::default();
        config.calendar.start = StartDate::Fixed { month: 6, day: 29 };
        let picker = DatePicker::new(&config).unwrap();
        // Past the config bound; the widget still has to cope
        config.strip.label_rise = 40000.0;
        let app = App::new(picker, Arc::new(config), Theme::default());

        let screen = render_to_string(&app, 80, 20);
        assert!(!screen.contains("29"));
    }

    #[test]
    fn test_tiny_area() {
        let app = app_at(3, 1);
        render_to_string(&app, 5, 2);
    }

    #[test]
    fn test_tile_width() {
        assert_eq!(tile_width(9.0), 8);
        assert_eq!(tile_width(2.0), 3);
    }
}
