use chrono::{Local, NaiveDate};

/// Clock abstracts access to the current date so aggregates remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current calendar date.
    fn today(&self) -> NaiveDate;
}

/// Wall clock. Month buckets follow the user's local calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}
