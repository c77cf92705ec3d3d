//! Source of "today" for age calculations

use chrono::{NaiveDate, Utc};

/// Supplies the current date
///
/// Pulse and other age figures are computed against a `Clock` rather than
/// reading the system time directly, so reports can be reproduced in tests.
pub trait Clock: Send + Sync {
    /// Returns the current date (UTC)
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock frozen at a given date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(FixedClock(date).today(), date);
    }

    #[test]
    fn test_system_clock_is_today() {
        let before = Utc::now().date_naive();
        let today = SystemClock.today();
        let after = Utc::now().date_naive();
        assert!(today >= before && today <= after);
    }
}
