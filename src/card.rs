use std::fmt;

use crate::birthday::{BirthdayCalculator, Moment, format_short_date};
use crate::error::BirthdayError;
use crate::kid::Kid;

/// Birthdays at most this many days away get a countdown badge.
pub const BADGE_WINDOW_DAYS: u32 = 30;

/// Shown in place of a missing photo.
pub const PHOTO_PLACEHOLDER: &str = "🎈";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Today,
    InDays(u32),
}

impl Badge {
    pub fn for_days(days_until: u32) -> Option<Self> {
        match days_until {
            0 => Some(Badge::Today),
            n if n <= BADGE_WINDOW_DAYS => Some(Badge::InDays(n)),
            _ => None,
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Badge::Today => write!(f, "🎂 Today!"),
            Badge::InDays(n) => write!(f, "{n}d"),
        }
    }
}

/// Display values for one kid, computed against a fixed moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KidCard {
    pub id: String,
    pub name: String,
    pub photo: Option<String>,
    pub birthday_label: String,
    pub age: u32,
    pub days_until: u32,
    pub badge: Option<Badge>,
}

impl KidCard {
    pub fn new(
        kid: &Kid,
        calc: &BirthdayCalculator,
        now: impl Into<Moment>,
    ) -> Result<Self, BirthdayError> {
        let now = now.into();
        let age = calc.age(&kid.birthday, now)?;
        let days_until = calc.days_until(&kid.birthday, now);

        Ok(Self {
            id: kid.id.clone(),
            name: kid.name.clone(),
            photo: kid.photo.clone(),
            birthday_label: format_short_date(&kid.birthday),
            age,
            days_until,
            badge: Badge::for_days(days_until),
        })
    }

    pub fn age_label(&self) -> String {
        format!("Age {}", self.age)
    }

    pub fn summary_line(&self) -> String {
        let mut line = format!(
            "{} {}  {}  {}",
            if self.photo.is_some() { "📷" } else { PHOTO_PLACEHOLDER },
            self.name,
            self.birthday_label,
            self.age_label()
        );
        if let Some(badge) = self.badge {
            line.push_str(&format!("  [{badge}]"));
        }
        line
    }
}

/// Soonest birthday first, ties broken by name.
pub fn sort_by_upcoming(cards: &mut [KidCard]) {
    cards.sort_by(|a, b| {
        a.days_until
            .cmp(&b.days_until)
            .then_with(|| a.name.cmp(&b.name))
    });
}
