//! Clock

use std::cell::Cell;

use jiff::{SignedDuration, Timestamp, civil::Date, tz::TimeZone};

/// Source of the current time.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Timestamp;

    /// Current calendar date in UTC.
    fn today(&self) -> Date {
        self.now().to_zoned(TimeZone::UTC).date()
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<Timestamp>,
}

impl ManualClock {
    /// Creates a clock stopped at `now`.
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Moves the clock forward by `by`.
    ///
    /// # Errors
    ///
    /// Returns an error if the result is outside the supported timestamp range.
    pub fn advance(&self, by: SignedDuration) -> Result<(), jiff::Error> {
        self.now.set(self.now.get().checked_add(by)?);

        Ok(())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}
