use chrono::Local;

use crate::birthday::Moment;

/// Source of the current moment.
///
/// Calculations take a [`Moment`] argument; only the outermost caller asks a
/// clock for one, so tests can pin "now" with [`FixedClock`].
pub trait Clock: Send + Sync {
    fn now(&self) -> Moment;
}

/// Wall-clock time in the machine's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Moment {
        Local::now().into()
    }
}

/// Always returns the same moment.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(Moment);

impl FixedClock {
    pub fn new(moment: impl Into<Moment>) -> Self {
        Self(moment.into())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Moment {
        self.0
    }
}
