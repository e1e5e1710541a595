//! birthday.rs
//!
//! Age and next-birthday arithmetic for a stored birth date.
//!
//! Every calculation takes the reference [`Moment`] as an argument; nothing
//! in this module reads the system clock. Only the calendar date of the
//! moment matters, so a birthday later "today" is still 0 days away.
//!
//! The anniversary of a 29 February birth date in a non-leap year is chosen
//! by [`LeapDayPolicy`]. Age and days-until agree on that choice, so the age
//! steps up on exactly the day the countdown reaches 0.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::BirthdayError;

/// A validated calendar date of birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    /// Builds a birth date, rejecting months outside 1..=12 and days the
    /// month does not have in that year.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, BirthdayError> {
        if !(1..=12).contains(&month) {
            return Err(BirthdayError::InvalidMonth(month));
        }

        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(BirthdayError::InvalidDay { year, month, day })
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn is_leap_day(self) -> bool {
        self.month() == 2 && self.day() == 29
    }
}

impl From<NaiveDate> for BirthDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Parses `YYYY-MM-DD`. A trailing time part (`2015-06-15T00:00:00Z`) is
/// dropped; the date is taken as written, never shifted across time zones.
impl FromStr for BirthDate {
    type Err = BirthdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unparseable = || BirthdayError::Unparseable {
            input: s.to_string(),
        };

        let trimmed = s.trim();
        let date_part = trimmed.split(['T', ' ']).next().unwrap_or(trimmed);

        let mut parts = date_part.splitn(3, '-');
        let (Some(y), Some(m), Some(d)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(unparseable());
        };

        let year = y.parse::<i32>().map_err(|_| unparseable())?;
        let month = m.parse::<u32>().map_err(|_| unparseable())?;
        let day = d.parse::<u32>().map_err(|_| unparseable())?;

        Self::from_ymd(year, month, day)
    }
}

impl TryFrom<String> for BirthDate {
    type Error = BirthdayError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BirthDate> for String {
    fn from(value: BirthDate) -> Self {
        value.to_string()
    }
}

/// The reference "now" for a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Moment(NaiveDateTime);

impl Moment {
    /// Calendar date of this moment, time of day discarded.
    pub fn date(self) -> NaiveDate {
        self.0.date()
    }
}

impl From<NaiveDate> for Moment {
    fn from(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN))
    }
}

impl From<NaiveDateTime> for Moment {
    fn from(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }
}

/// Uses the wall-clock time in the value's own time zone.
impl<Tz: TimeZone> From<DateTime<Tz>> for Moment {
    fn from(datetime: DateTime<Tz>) -> Self {
        Self(datetime.naive_local())
    }
}

/// Where a 29 February birthday lands in a non-leap year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LeapDayPolicy {
    #[default]
    February28,
    March1,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BirthdayCalculator {
    leap_day: LeapDayPolicy,
}

impl BirthdayCalculator {
    pub fn new(leap_day: LeapDayPolicy) -> Self {
        Self { leap_day }
    }

    pub fn leap_day(&self) -> LeapDayPolicy {
        self.leap_day
    }

    /// The date the birthday is celebrated in `year`.
    ///
    /// Returns `None` only when `year` is outside chrono's supported range.
    pub fn anniversary_in(&self, birth: &BirthDate, year: i32) -> Option<NaiveDate> {
        let (month, day) = if birth.is_leap_day() && !is_leap_year(year) {
            match self.leap_day {
                LeapDayPolicy::February28 => (2, 28),
                LeapDayPolicy::March1 => (3, 1),
            }
        } else {
            (birth.month(), birth.day())
        };

        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// Whole years completed at `now`.
    ///
    /// Fails with [`BirthdayError::BeforeBirth`] when `now` falls before the
    /// birth date.
    pub fn age(&self, birth: &BirthDate, now: impl Into<Moment>) -> Result<u32, BirthdayError> {
        let today = now.into().date();
        if today < birth.date() {
            return Err(BirthdayError::BeforeBirth {
                birth: birth.date(),
                now: today,
            });
        }

        let mut years = today.year() - birth.year();
        let not_yet = self
            .anniversary_in(birth, today.year())
            .is_some_and(|anniversary| today < anniversary);
        if not_yet {
            years -= 1;
        }

        // today >= birth, so years >= 0
        Ok(years as u32)
    }

    /// Next anniversary on or after the date of `now`.
    ///
    /// `None` when that anniversary falls after [`NaiveDate::MAX`], which can
    /// only happen in chrono's last supported year.
    pub fn next_birthday(&self, birth: &BirthDate, now: impl Into<Moment>) -> Option<NaiveDate> {
        let today = now.into().date();

        match self.anniversary_in(birth, today.year()) {
            Some(this_year) if this_year >= today => Some(this_year),
            _ => self.anniversary_in(birth, today.year().checked_add(1)?),
        }
    }

    /// Days from the date of `now` to the next anniversary, 0 on the day itself.
    ///
    /// If the next anniversary is past [`NaiveDate::MAX`], counts up to the
    /// day after `NaiveDate::MAX` instead, so the result is never 0 off the
    /// anniversary.
    pub fn days_until(&self, birth: &BirthDate, now: impl Into<Moment>) -> u32 {
        let today = now.into().date();

        match self.next_birthday(birth, today) {
            Some(next) => (next - today).num_days() as u32,
            None => (NaiveDate::MAX - today).num_days() as u32 + 1,
        }
    }
}

/// Age in whole years under the default leap-day policy.
pub fn compute_age(birth: &BirthDate, now: impl Into<Moment>) -> Result<u32, BirthdayError> {
    BirthdayCalculator::default().age(birth, now)
}

/// Days until the next birthday under the default leap-day policy.
pub fn days_until_birthday(birth: &BirthDate, now: impl Into<Moment>) -> u32 {
    BirthdayCalculator::default().days_until(birth, now)
}

/// Month and day in short English form, e.g. "Jun 15".
pub fn format_short_date(birth: &BirthDate) -> String {
    birth.date().format("%b %-d").to_string()
}

/// Gregorian leap-year rule
fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn birth(y: i32, m: u32, d: u32) -> BirthDate {
        BirthDate::from_ymd(y, m, d).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_birthday_not_yet_reached() {
        let b = birth(2015, 6, 15);
        assert_eq!(compute_age(&b, day(2024, 6, 10)), Ok(8));
        assert_eq!(days_until_birthday(&b, day(2024, 6, 10)), 5);
    }

    #[test]
    fn test_birthday_today() {
        let b = birth(2015, 6, 15);
        assert_eq!(compute_age(&b, day(2024, 6, 15)), Ok(9));
        assert_eq!(days_until_birthday(&b, day(2024, 6, 15)), 0);
    }

    #[test]
    fn test_birthday_just_passed_wraps() {
        let b = birth(2015, 6, 15);
        assert_eq!(compute_age(&b, day(2024, 6, 16)), Ok(9));
        assert_eq!(days_until_birthday(&b, day(2024, 6, 16)), 364);
    }

    #[test]
    fn test_earlier_month_later_day() {
        // month comparison wins over day comparison
        let b = birth(2010, 3, 5);
        assert_eq!(compute_age(&b, day(2020, 2, 28)), Ok(9));
        assert_eq!(compute_age(&b, day(2020, 4, 1)), Ok(10));
    }

    #[test]
    fn test_end_of_month_birthdays() {
        let b = birth(2012, 1, 31);
        assert_eq!(days_until_birthday(&b, day(2023, 1, 30)), 1);
        assert_eq!(days_until_birthday(&b, day(2023, 2, 1)), 364);

        let b = birth(2012, 12, 31);
        assert_eq!(days_until_birthday(&b, day(2023, 1, 1)), 364);
        assert_eq!(compute_age(&b, day(2023, 12, 30)), Ok(10));
        assert_eq!(compute_age(&b, day(2023, 12, 31)), Ok(11));
    }

    #[test]
    fn test_time_of_day_is_ignored() {
        let b = birth(2015, 6, 15);
        let late_evening = day(2024, 6, 15).and_hms_opt(23, 59, 59).unwrap();
        assert_eq!(days_until_birthday(&b, late_evening), 0);

        let eve = day(2024, 6, 14).and_hms_opt(18, 30, 0).unwrap();
        assert_eq!(days_until_birthday(&b, eve), 1);
        assert_eq!(compute_age(&b, eve), Ok(8));
    }

    #[test]
    fn test_timezone_aware_moment_uses_local_date() {
        let b = birth(2015, 6, 15);
        let offset = chrono::FixedOffset::east_opt(9 * 3600).unwrap();
        let now = offset.with_ymd_and_hms(2024, 6, 15, 1, 0, 0).unwrap();
        assert_eq!(days_until_birthday(&b, now), 0);
    }

    #[test]
    fn test_born_today_is_zero() {
        let b = birth(2024, 3, 10);
        assert_eq!(compute_age(&b, day(2024, 3, 10)), Ok(0));
        assert_eq!(days_until_birthday(&b, day(2024, 3, 10)), 0);
        assert_eq!(days_until_birthday(&b, day(2024, 3, 11)), 364);
    }

    #[test]
    fn test_moment_before_birth_is_rejected() {
        let b = birth(2024, 3, 10);
        assert_eq!(
            compute_age(&b, day(2024, 3, 9)),
            Err(BirthdayError::BeforeBirth {
                birth: day(2024, 3, 10),
                now: day(2024, 3, 9),
            })
        );
        // the countdown is still defined
        assert_eq!(days_until_birthday(&b, day(2024, 3, 9)), 1);
    }

    #[test]
    fn test_leap_day_february_28_policy() {
        let calc = BirthdayCalculator::new(LeapDayPolicy::February28);
        let b = birth(2020, 2, 29);

        assert_eq!(calc.anniversary_in(&b, 2023), Some(day(2023, 2, 28)));
        assert_eq!(calc.anniversary_in(&b, 2024), Some(day(2024, 2, 29)));
        assert_eq!(calc.age(&b, day(2023, 2, 27)), Ok(2));
        assert_eq!(calc.age(&b, day(2023, 2, 28)), Ok(3));
        assert_eq!(calc.days_until(&b, day(2023, 2, 28)), 0);
        assert_eq!(calc.days_until(&b, day(2023, 3, 1)), 365);
        assert_eq!(calc.age(&b, day(2024, 2, 28)), Ok(3));
        assert_eq!(calc.age(&b, day(2024, 2, 29)), Ok(4));
    }

    #[test]
    fn test_leap_day_march_1_policy() {
        let calc = BirthdayCalculator::new(LeapDayPolicy::March1);
        let b = birth(2020, 2, 29);

        assert_eq!(calc.anniversary_in(&b, 2023), Some(day(2023, 3, 1)));
        assert_eq!(calc.age(&b, day(2023, 2, 28)), Ok(2));
        assert_eq!(calc.days_until(&b, day(2023, 2, 28)), 1);
        assert_eq!(calc.age(&b, day(2023, 3, 1)), Ok(3));
        assert_eq!(calc.days_until(&b, day(2023, 3, 1)), 0);
        // 2024 is a leap year again
        assert_eq!(calc.next_birthday(&b, day(2023, 3, 2)), Some(day(2024, 2, 29)));
    }

    #[test]
    fn test_default_policy_is_february_28() {
        assert_eq!(
            BirthdayCalculator::default().leap_day(),
            LeapDayPolicy::February28
        );
    }

    #[test]
    fn test_format_short_date() {
        assert_eq!(format_short_date(&birth(2015, 6, 15)), "Jun 15");
        assert_eq!(format_short_date(&birth(2019, 1, 5)), "Jan 5");
        assert_eq!(format_short_date(&birth(2020, 2, 29)), "Feb 29");
        assert_eq!(format_short_date(&birth(1999, 12, 31)), "Dec 31");
    }

    #[test]
    fn test_from_ymd_rejects_invalid_dates() {
        assert_eq!(
            BirthDate::from_ymd(2015, 13, 1),
            Err(BirthdayError::InvalidMonth(13))
        );
        assert_eq!(
            BirthDate::from_ymd(2015, 0, 1),
            Err(BirthdayError::InvalidMonth(0))
        );
        assert!(matches!(
            BirthDate::from_ymd(2015, 1, 32),
            Err(BirthdayError::InvalidDay { day: 32, .. })
        ));
        assert!(BirthDate::from_ymd(2015, 4, 31).is_err());
        assert!(BirthDate::from_ymd(2015, 6, 0).is_err());
        assert!(BirthDate::from_ymd(2023, 2, 29).is_err());
        assert!(BirthDate::from_ymd(2024, 2, 29).is_ok());
        assert!(BirthDate::from_ymd(1900, 2, 29).is_err());
        assert!(BirthDate::from_ymd(2000, 2, 29).is_ok());
    }

    #[test]
    fn test_parse_birth_date() {
        assert_eq!("2015-06-15".parse::<BirthDate>(), Ok(birth(2015, 6, 15)));
        assert_eq!(
            " 2015-06-15T00:00:00Z ".parse::<BirthDate>(),
            Ok(birth(2015, 6, 15))
        );
        assert_eq!(
            "2015-06-15 08:00:00".parse::<BirthDate>(),
            Ok(birth(2015, 6, 15))
        );
        assert_eq!(
            "2015-13-01".parse::<BirthDate>(),
            Err(BirthdayError::InvalidMonth(13))
        );
        assert!(matches!(
            "15/06/2015".parse::<BirthDate>(),
            Err(BirthdayError::Unparseable { .. })
        ));
        assert!(matches!(
            "".parse::<BirthDate>(),
            Err(BirthdayError::Unparseable { .. })
        ));
    }

    #[test]
    fn test_birth_date_serde() {
        let b = birth(2015, 6, 5);
        assert_eq!(serde_json::to_string(&b).unwrap(), "\"2015-06-05\"");
        assert_eq!(serde_json::from_str::<BirthDate>("\"2015-06-05\"").unwrap(), b);
        assert!(serde_json::from_str::<BirthDate>("\"2015-02-30\"").is_err());
    }

    #[test]
    fn test_is_leap_year() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn test_day_zero_and_day_past_month_end() {
        assert_eq!(
            BirthDate::from_ymd(2015, 6, 0),
            Err(BirthdayError::InvalidDay {
                year: 2015,
                month: 6,
                day: 0
            })
        );
        assert_eq!(
            BirthDate::from_ymd(2023, 2, 29),
            Err(BirthdayError::InvalidDay {
                year: 2023,
                month: 2,
                day: 29
            })
        );
    }

    #[test]
    fn test_last_supported_year_never_reports_zero_off_anniversary() {
        let b = birth(2015, 6, 15);
        let calc = BirthdayCalculator::default();

        assert_eq!(calc.next_birthday(&b, NaiveDate::MAX), None);
        assert_eq!(calc.days_until(&b, NaiveDate::MAX), 1);

        let last_june = NaiveDate::from_ymd_opt(NaiveDate::MAX.year(), 6, 15).unwrap();
        assert_eq!(calc.next_birthday(&b, last_june), Some(last_june));
        assert_eq!(calc.days_until(&b, last_june), 0);
    }
}
