//! Quarter classification.
//!
//! Maps a capture month to a calendar quarter. The year of the destination
//! folder comes from a [`Clock`] by default, not from the photo itself; pass
//! [`YearSource::Capture`] to use the capture year instead.

use chrono::{Datelike, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four three-month calendar buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// Quarter for a month number. Anything past September lands in Q4.
    pub fn from_month(month: u32) -> Self {
        match month {
            1..=3 => Quarter::Q1,
            4..=6 => Quarter::Q2,
            7..=9 => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }

    /// Quarter number, 1-4
    pub fn number(self) -> u32 {
        match self {
            Quarter::Q1 => 1,
            Quarter::Q2 => 2,
            Quarter::Q3 => 3,
            Quarter::Q4 => 4,
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.number())
    }
}

/// Where the year folder comes from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum YearSource {
    /// The year the sorter runs in
    #[default]
    Current,
    /// The year the photo was taken
    Capture,
}

/// Source of "now" for classification
pub trait Clock: Send + Sync {
    fn current_year(&self) -> i32;
}

/// Wall-clock time in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        Local::now().year()
    }
}

/// A clock stuck at one year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i32);

impl Clock for FixedClock {
    fn current_year(&self) -> i32 {
        self.0
    }
}

/// Classify a month into `(year, quarter)`, taking the year from `clock`
pub fn classify(month: u32, clock: &dyn Clock) -> (i32, Quarter) {
    (clock.current_year(), Quarter::from_month(month))
}

/// Classify a capture timestamp according to `source`
pub fn classify_capture(
    captured_at: &NaiveDateTime,
    source: YearSource,
    clock: &dyn Clock,
) -> (i32, Quarter) {
    let (year, quarter) = classify(captured_at.month(), clock);
    match source {
        YearSource::Current => (year, quarter),
        YearSource::Capture => (captured_at.year(), quarter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(year: i32, month: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn quarter_matches_formula_for_every_month() {
        for month in 1..=12u32 {
            let (_, quarter) = classify(month, &FixedClock(2024));
            assert_eq!(quarter.number(), (month - 1) / 3 + 1, "month {}", month);
        }
    }

    #[test]
    fn year_comes_from_clock_not_month() {
        for month in 1..=12u32 {
            assert_eq!(classify(month, &FixedClock(1999)).0, 1999);
        }
    }

    #[test]
    fn system_clock_reports_this_year() {
        assert_eq!(SystemClock.current_year(), Local::now().year());
    }

    #[test]
    fn out_of_range_month_falls_into_q4() {
        assert_eq!(Quarter::from_month(13), Quarter::Q4);
        assert_eq!(Quarter::from_month(0), Quarter::Q4);
    }

    #[test]
    fn current_year_source_ignores_capture_year() {
        let (year, quarter) = classify_capture(&at(2015, 2), YearSource::Current, &FixedClock(2026));
        assert_eq!((year, quarter), (2026, Quarter::Q1));
    }

    #[test]
    fn capture_year_source_uses_photo_year() {
        let (year, quarter) = classify_capture(&at(2015, 11), YearSource::Capture, &FixedClock(2026));
        assert_eq!((year, quarter), (2015, Quarter::Q4));
    }

    #[test]
    fn quarter_displays_with_prefix() {
        assert_eq!(Quarter::Q3.to_string(), "Q3");
    }
}
