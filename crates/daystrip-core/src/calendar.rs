use chrono::{Datelike, Local};
use serde::Serialize;
use tracing::warn;

use crate::month_table::MonthTable;
use crate::{Error, Result};

/// Direction of travel through the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards later days, the strip slides left
    Forward,
    /// Towards earlier days, the strip slides right
    Backward,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    /// Map a signed request onto a direction; zero has none
    pub fn from_sign(sign: i32) -> Option<Self> {
        match sign.signum() {
            1 => Some(Direction::Forward),
            -1 => Some(Direction::Backward),
            _ => None,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Reference tile for relative labels
///
/// While a step is in flight the logical date has already moved, so the
/// anchor shifts to keep the drawn labels where they were before the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAnchor {
    /// Strip at rest: anchor is the day before the current day
    Resting,
    /// Step in flight: two days back going forward, the current day going backward
    Scrolling(Direction),
}

impl LabelAnchor {
    fn day_shift(self) -> i64 {
        match self {
            LabelAnchor::Resting => -1,
            LabelAnchor::Scrolling(Direction::Forward) => -2,
            LabelAnchor::Scrolling(Direction::Backward) => 0,
        }
    }
}

/// Outcome of a single day move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayChange {
    pub month_changed: bool,
}

/// Owner of the logical date
#[derive(Debug, Clone)]
pub struct CalendarClock {
    table: MonthTable,
    month_index: usize,
    day_of_month: u32,
}

impl CalendarClock {
    /// Start at an explicit date (zero-based month, one-based day)
    pub fn new(table: MonthTable, month_index: usize, day_of_month: u32) -> Result<Self> {
        if month_index >= table.len()
            || day_of_month == 0
            || day_of_month > table.day_count(month_index)
        {
            return Err(Error::InvalidDate {
                month_index,
                day: day_of_month,
            });
        }

        Ok(Self {
            table,
            month_index,
            day_of_month,
        })
    }

    /// Start at the local date, pulled back to the month's last day if the
    /// table's month is shorter (Feb 29 against a 28-day February)
    pub fn today(table: MonthTable) -> Self {
        let now = Local::now().date_naive();
        let month_index = now.month0() as usize;
        let last_day = table.day_count(month_index);
        let day_of_month = if now.day() > last_day {
            warn!(
                "Today ({} {}) does not exist in the month table, using day {}",
                table.name(month_index),
                now.day(),
                last_day
            );
            last_day
        } else {
            now.day()
        };

        Self {
            table,
            month_index,
            day_of_month,
        }
    }

    #[inline]
    pub fn month_index(&self) -> usize {
        self.month_index
    }

    #[inline]
    pub fn day_of_month(&self) -> u32 {
        self.day_of_month
    }

    pub fn month_name(&self) -> &str {
        self.table.name(self.month_index)
    }

    pub fn table(&self) -> &MonthTable {
        &self.table
    }

    /// Move one day later, rolling into the next month after its last day
    pub fn advance_day(&mut self) -> DayChange {
        let change = if self.day_of_month < self.table.day_count(self.month_index) {
            self.day_of_month += 1;
            DayChange::default()
        } else {
            self.day_of_month = 1;
            self.month_index = self.table.next_index(self.month_index);
            DayChange { month_changed: true }
        };

        self.assert_valid();
        change
    }

    /// Move one day earlier, rolling back to the previous month's last day
    pub fn retreat_day(&mut self) -> DayChange {
        let change = if self.day_of_month > 1 {
            self.day_of_month -= 1;
            DayChange::default()
        } else {
            self.month_index = self.table.prev_index(self.month_index);
            self.day_of_month = self.table.day_count(self.month_index);
            DayChange { month_changed: true }
        };

        self.assert_valid();
        change
    }

    /// Move one day in `direction`
    pub fn step(&mut self, direction: Direction) -> DayChange {
        match direction {
            Direction::Forward => self.advance_day(),
            Direction::Backward => self.retreat_day(),
        }
    }

    /// Day number of the tile `offset` positions from the anchor tile
    ///
    /// Days before the first of the month come from the previous month's
    /// length, days after the last come from the following months.
    pub fn relative_day(&self, offset: i32, anchor: LabelAnchor) -> u32 {
        let mut day = i64::from(self.day_of_month) + anchor.day_shift() + i64::from(offset);
        let mut month = self.month_index;

        while day < 1 {
            month = self.table.prev_index(month);
            day += i64::from(self.table.day_count(month));
        }
        while day > i64::from(self.table.day_count(month)) {
            day -= i64::from(self.table.day_count(month));
            month = self.table.next_index(month);
        }

        day as u32
    }

    pub fn relative_day_label(&self, offset: i32, anchor: LabelAnchor) -> String {
        self.relative_day(offset, anchor).to_string()
    }

    fn assert_valid(&self) {
        let day_count = self.table.day_count(self.month_index);
        assert!(
            (1..=day_count).contains(&self.day_of_month),
            "calendar invariant broken: day {} outside 1..={} for {}",
            self.day_of_month,
            day_count,
            self.table.name(self.month_index)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(month_index: usize, day: u32) -> CalendarClock {
        CalendarClock::new(MonthTable::gregorian(), month_index, day).unwrap()
    }

    #[test]
    fn test_rejects_invalid_start() {
        let table = MonthTable::gregorian();
        assert!(CalendarClock::new(table.clone(), 1, 29).is_err());
        assert!(CalendarClock::new(table.clone(), 0, 0).is_err());
        assert!(CalendarClock::new(table, 12, 1).is_err());
    }

    #[test]
    fn test_today_is_valid() {
        let clock = CalendarClock::today(MonthTable::gregorian());
        assert!(clock.day_of_month() >= 1);
        assert!(clock.day_of_month() <= clock.table().day_count(clock.month_index()));
    }

    #[test]
    fn test_advance_through_every_month() {
        let table = MonthTable::gregorian();
        for month in 0..12 {
            let mut clock = clock(month, 1);
            let mut changes = 0;
            for _ in 0..table.day_count(month) {
                if clock.advance_day().month_changed {
                    changes += 1;
                }
            }
            assert_eq!(changes, 1, "month {}", month);
            assert_eq!(clock.day_of_month(), 1);
            assert_eq!(clock.month_index(), (month + 1) % 12);
        }
    }

    #[test]
    fn test_retreat_inverts_advance() {
        let table = MonthTable::gregorian();
        for month in 0..12 {
            for day in 1..=table.day_count(month) {
                let mut c = clock(month, day);
                c.advance_day();
                c.retreat_day();
                assert_eq!((c.month_index(), c.day_of_month()), (month, day));

                let mut c = clock(month, day);
                c.retreat_day();
                c.advance_day();
                assert_eq!((c.month_index(), c.day_of_month()), (month, day));
            }
        }
    }

    #[test]
    fn test_year_wraps() {
        let mut c = clock(11, 31);
        assert!(c.advance_day().month_changed);
        assert_eq!((c.month_index(), c.day_of_month()), (0, 1));

        assert!(c.retreat_day().month_changed);
        assert_eq!((c.month_index(), c.day_of_month()), (11, 31));
    }

    #[test]
    fn test_retreat_into_february() {
        let mut c = clock(2, 1);
        assert!(c.retreat_day().month_changed);
        assert_eq!((c.month_index(), c.day_of_month()), (1, 28));
    }

    #[test]
    fn test_resting_anchor_is_previous_day() {
        let table = MonthTable::gregorian();
        for month in 0..12 {
            for day in 1..=table.day_count(month) {
                let c = clock(month, day);
                let expected = if day == 1 {
                    table.day_count(table.prev_index(month))
                } else {
                    day - 1
                };
                assert_eq!(c.relative_day(0, LabelAnchor::Resting), expected);
                assert_eq!(
                    c.relative_day_label(0, LabelAnchor::Resting),
                    expected.to_string()
                );
            }
        }
    }

    #[test]
    fn test_scrolling_anchors() {
        let c = clock(5, 15);
        assert_eq!(c.relative_day(0, LabelAnchor::Scrolling(Direction::Forward)), 13);
        assert_eq!(c.relative_day(0, LabelAnchor::Scrolling(Direction::Backward)), 15);
    }

    #[test]
    fn test_labels_wrap_to_next_month() {
        // June has 30 days
        let c = clock(5, 29);
        let days: Vec<u32> = (-3..=6)
            .map(|i| c.relative_day(i, LabelAnchor::Resting))
            .collect();
        assert_eq!(days, vec![25, 26, 27, 28, 29, 30, 1, 2, 3, 4]);
    }

    #[test]
    fn test_labels_wrap_to_previous_month() {
        // March 2 during a forward step: February contributes 28 days
        let c = clock(2, 2);
        let anchor = LabelAnchor::Scrolling(Direction::Forward);
        let days: Vec<u32> = (-3..=1).map(|i| c.relative_day(i, anchor)).collect();
        assert_eq!(days, vec![25, 26, 27, 28, 1]);
    }

    #[test]
    fn test_direction_sign() {
        assert_eq!(Direction::Forward.sign(), 1);
        assert_eq!(Direction::Backward.sign(), -1);
        assert_eq!(Direction::from_sign(5), Some(Direction::Forward));
        assert_eq!(Direction::from_sign(-2), Some(Direction::Backward));
        assert_eq!(Direction::from_sign(0), None);
        assert_eq!(Direction::Forward.reversed(), Direction::Backward);
    }
}
