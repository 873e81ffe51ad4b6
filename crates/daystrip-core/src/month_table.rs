use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Number of months every table must hold
pub const MONTHS_PER_YEAR: usize = 12;

/// One month of the calendar: display name and length in days
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthEntry {
    pub name: String,
    #[serde(rename = "days")]
    pub day_count: u32,
}

impl MonthEntry {
    pub fn new(name: impl Into<String>, day_count: u32) -> Self {
        Self {
            name: name.into(),
            day_count,
        }
    }
}

/// Immutable month lookup, index 0 = January
///
/// February has no leap-year variant. A caller that needs 29 days supplies
/// its own table through [`MonthTable::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTable {
    entries: Vec<MonthEntry>,
}

impl Default for MonthTable {
    fn default() -> Self {
        Self::gregorian()
    }
}

impl MonthTable {
    /// The conventional calendar with February fixed at 28 days
    pub fn gregorian() -> Self {
        let entries = [
            ("January", 31),
            ("February", 28),
            ("March", 31),
            ("April", 30),
            ("May", 31),
            ("June", 30),
            ("July", 31),
            ("August", 31),
            ("September", 30),
            ("October", 31),
            ("November", 30),
            ("December", 31),
        ]
        .into_iter()
        .map(|(name, days)| MonthEntry::new(name, days))
        .collect();

        Self { entries }
    }

    /// Build a custom table, rejecting anything but twelve months of positive length
    pub fn new(entries: Vec<MonthEntry>) -> Result<Self> {
        if entries.len() != MONTHS_PER_YEAR {
            return Err(Error::MonthTable(format!(
                "expected {} months, got {}",
                MONTHS_PER_YEAR,
                entries.len()
            )));
        }

        if let Some(bad) = entries.iter().find(|e| e.day_count == 0) {
            return Err(Error::MonthTable(format!(
                "month '{}' must have at least one day",
                bad.name
            )));
        }

        Ok(Self { entries })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MonthEntry] {
        &self.entries
    }

    pub fn name(&self, month_index: usize) -> &str {
        &self.entries[month_index].name
    }

    pub fn day_count(&self, month_index: usize) -> u32 {
        self.entries[month_index].day_count
    }

    /// Index of the following month, December wraps to January
    #[inline]
    pub fn next_index(&self, month_index: usize) -> usize {
        (month_index + 1) % self.entries.len()
    }

    /// Index of the preceding month, January wraps to December
    #[inline]
    pub fn prev_index(&self, month_index: usize) -> usize {
        (month_index + self.entries.len() - 1) % self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gregorian_day_counts() {
        let table = MonthTable::gregorian();
        let days: Vec<u32> = table.entries().iter().map(|e| e.day_count).collect();
        assert_eq!(days, vec![31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]);
        assert_eq!(table.name(0), "January");
        assert_eq!(table.name(11), "December");
    }

    #[test]
    fn test_february_has_no_leap_day() {
        // Known limitation: there is no leap-year rule
        assert_eq!(MonthTable::default().day_count(1), 28);
    }

    #[test]
    fn test_index_wrapping() {
        let table = MonthTable::gregorian();
        assert_eq!(table.next_index(11), 0);
        assert_eq!(table.prev_index(0), 11);
        assert_eq!(table.next_index(4), 5);
        assert_eq!(table.prev_index(4), 3);
    }

    #[test]
    fn test_rejects_wrong_length() {
        let entries = MonthTable::gregorian().entries()[..11].to_vec();
        assert!(matches!(MonthTable::new(entries), Err(Error::MonthTable(_))));
    }

    #[test]
    fn test_rejects_empty_month() {
        let mut entries = MonthTable::gregorian().entries().to_vec();
        entries[3].day_count = 0;
        let err = MonthTable::new(entries).unwrap_err();
        assert!(err.to_string().contains("April"));
    }

    #[test]
    fn test_custom_leap_table() {
        let mut entries = MonthTable::gregorian().entries().to_vec();
        entries[1].day_count = 29;
        let table = MonthTable::new(entries).unwrap();
        assert_eq!(table.day_count(1), 29);
    }
}
