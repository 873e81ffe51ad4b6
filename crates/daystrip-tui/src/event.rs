use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Event source for the frame loop
///
/// Key presses are delivered as they arrive; a `Tick` is delivered at a
/// fixed cadence regardless of how many keys came in between.
pub struct EventHandler {
    frame_interval: Duration,
    next_frame: Instant,
}

impl EventHandler {
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            frame_interval,
            next_frame: Instant::now() + frame_interval,
        }
    }

    /// Poll for the next event, waiting at most until the next frame is due
    pub fn next(&mut self) -> Result<Option<AppEvent>> {
        let timeout = self.next_frame.saturating_duration_since(Instant::now());

        if event::poll(timeout)? {
            return match event::read()? {
                // Only handle key press events, ignore release events
                // (crossterm 0.27+ sends release events on some systems)
                Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(AppEvent::Key(key))),
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            };
        }

        self.schedule_next_frame(Instant::now());
        Ok(Some(AppEvent::Tick))
    }

    /// Move the deadline one interval on; after a stall, restart from `now`
    fn schedule_next_frame(&mut self, now: Instant) {
        self.next_frame += self.frame_interval;
        if self.next_frame < now {
            self.next_frame = now + self.frame_interval;
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// A frame is due
    Tick,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_advances_by_interval() {
        let interval = Duration::from_millis(16);
        let mut handler = EventHandler::new(interval);
        let first = handler.next_frame;
        handler.schedule_next_frame(first);
        assert_eq!(handler.next_frame, first + interval);
    }

    #[test]
    fn test_deadline_resets_after_stall() {
        let interval = Duration::from_millis(16);
        let mut handler = EventHandler::new(interval);
        let late = handler.next_frame + Duration::from_secs(1);
        handler.schedule_next_frame(late);
        assert_eq!(handler.next_frame, late + interval);
    }
}
