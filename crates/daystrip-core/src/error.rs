use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid month table: {0}")]
    MonthTable(String),

    #[error("Invalid date: day {day} of month index {month_index}")]
    InvalidDate { month_index: usize, day: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
