use chrono::NaiveDate;
use thiserror::Error;

/// Rejected input to the birthday calculator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BirthdayError {
    #[error("month {0} is outside 1..=12")]
    InvalidMonth(u32),

    #[error("day {day} does not exist in {year}-{month:02}")]
    InvalidDay { year: i32, month: u32, day: u32 },

    #[error("cannot parse birth date {input:?}, expected YYYY-MM-DD")]
    Unparseable { input: String },

    #[error("reference date {now} is before birth date {birth}")]
    BeforeBirth { birth: NaiveDate, now: NaiveDate },
}
