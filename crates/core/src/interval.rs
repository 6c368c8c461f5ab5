//! Time intervals for cart expiration thresholds.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

/// Unit of an expiration interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalUnit {
    Minute,
    Hour,
    Day,
    Month,
}

impl IntervalUnit {
    fn label(&self) -> &'static str {
        match self {
            IntervalUnit::Minute => "minute",
            IntervalUnit::Hour => "hour",
            IntervalUnit::Day => "day",
            IntervalUnit::Month => "month",
        }
    }
}

/// A number-plus-unit interval, e.g. "2 hours" or "1 day".
///
/// Used both for the scanner's fixed pre-filter window and the user-configured
/// expiration threshold the worker enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    number: u32,
    unit: IntervalUnit,
}

impl Interval {
    pub const fn new(number: u32, unit: IntervalUnit) -> Self {
        Self { number, unit }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn unit(&self) -> IntervalUnit {
        self.unit
    }

    /// The instant this interval before `instant`.
    ///
    /// Month intervals use calendar arithmetic (a month before March 31 is
    /// the end of February), the other units are fixed durations.
    pub fn subtract_from(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        match self.unit {
            IntervalUnit::Minute => instant - Duration::minutes(i64::from(self.number)),
            IntervalUnit::Hour => instant - Duration::hours(i64::from(self.number)),
            IntervalUnit::Day => instant - Duration::days(i64::from(self.number)),
            IntervalUnit::Month => instant - Months::new(self.number),
        }
    }
}

impl core::fmt::Display for Interval {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.number == 1 {
            write!(f, "1 {}", self.unit.label())
        } else {
            write!(f, "{} {}s", self.number, self.unit.label())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn subtracts_fixed_units() {
        let now = at(2024, 6, 15, 12);
        assert_eq!(
            Interval::new(30, IntervalUnit::Minute).subtract_from(now),
            Utc.with_ymd_and_hms(2024, 6, 15, 11, 30, 0).unwrap()
        );
        assert_eq!(
            Interval::new(2, IntervalUnit::Hour).subtract_from(now),
            at(2024, 6, 15, 10)
        );
        assert_eq!(
            Interval::new(3, IntervalUnit::Day).subtract_from(now),
            at(2024, 6, 12, 12)
        );
    }

    #[test]
    fn subtracts_calendar_months() {
        let now = at(2024, 3, 31, 0);
        // A month before March 31 clamps to the end of February (leap year).
        assert_eq!(
            Interval::new(1, IntervalUnit::Month).subtract_from(now),
            at(2024, 2, 29, 0)
        );
    }

    #[test]
    fn display_pluralizes() {
        assert_eq!(Interval::new(1, IntervalUnit::Day).to_string(), "1 day");
        assert_eq!(Interval::new(2, IntervalUnit::Hour).to_string(), "2 hours");
    }
}
