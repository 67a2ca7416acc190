use chrono::{DateTime, Utc};

/// Source of the current time.
///
/// Used for the default payload seed and for stamping build metadata.
/// [`SystemClock`] reads the wall clock; [`FixedClock`] pins an instant so
/// artifacts can be reproduced exactly.
///
/// # Examples
///
/// ```
/// use build_smoke::{Clock, FixedClock};
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
/// let clock = FixedClock::new(at);
/// assert_eq!(clock.now_millis(), 1_700_000_000_123);
/// ```
pub trait Clock {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current instant as Unix milliseconds.
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Wall-clock time via [`Utc::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    at: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a clock pinned at `at`.
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.at
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fixed_clock_never_moves() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let clock = FixedClock::new(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now_millis(), at.timestamp_millis());
    }

    #[test]
    fn system_clock_reads_wall_time() {
        let before = Utc::now().timestamp_millis();
        let read = SystemClock.now_millis();
        // after 2020-01-01
        assert!(read > 1_577_836_800_000);
        assert!(read >= before - 1_000);
    }

    #[test]
    fn clock_by_reference() {
        fn read<C: Clock>(clock: C) -> i64 {
            clock.now_millis()
        }

        let clock = FixedClock::new(Utc.timestamp_millis_opt(42).unwrap());
        assert_eq!(read(&clock), 42);
        assert_eq!(read(clock), 42);
    }
}
