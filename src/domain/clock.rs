//! Source of "today" for date-range validation.

use chrono::{Local, NaiveDate};

/// Supplies the current calendar date.
///
/// Injected into services so booking rules can be exercised against a fixed
/// date in tests.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local-time system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
