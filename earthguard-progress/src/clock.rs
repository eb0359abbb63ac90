//! Calendar-day source used to detect rollovers.

use std::cell::Cell;
use std::rc::Rc;

use chrono::NaiveDate;

/// Trait for abstracting the current calendar day.
///
/// The engine only ever needs the device-local day, never a time of day.
pub trait Clock {
    /// The current local calendar day.
    fn today(&self) -> NaiveDate;
}

/// Production clock backed by the device-local date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Manually-advanced clock for tests and scripted scenarios.
///
/// Clones share the same underlying day, so a test can keep one handle and
/// advance the date the engine observes.
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: Rc<Cell<NaiveDate>>,
}

impl FixedClock {
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Rc::new(Cell::new(today)),
        }
    }

    pub fn set(&self, today: NaiveDate) {
        self.today.set(today);
    }

    /// Move the clock forward by whole days.
    pub fn advance_days(&self, days: u32) {
        let next = self.today.get() + chrono::Days::new(u64::from(days));
        self.today.set(next);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }
}
