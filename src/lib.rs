//! Birthday tracking for kids: age and countdown arithmetic, profile cards,
//! and a small client for the kids backend.

pub mod api;
pub mod birthday;
pub mod card;
pub mod clock;
pub mod config;
pub mod delete;
pub mod error;
pub mod kid;
pub mod svg;

pub use birthday::{
    BirthDate, BirthdayCalculator, LeapDayPolicy, Moment, compute_age, days_until_birthday,
    format_short_date,
};
pub use error::BirthdayError;
