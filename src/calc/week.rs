use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A Monday-through-Sunday spending week in the caller's local calendar.
///
/// The span runs from Monday 00:00:00.000 to Sunday 23:59:59.999; a
/// timestamp belongs to exactly one window. Offset 0 is the week containing
/// the reference date, -1 the week before, +1 the week after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeekWindow {
    monday: NaiveDate,
}

impl WeekWindow {
    /// Window containing `date`, snapped to the most recent Monday on or
    /// before it.
    pub fn containing(date: NaiveDate) -> Self {
        let delta = date.weekday().num_days_from_monday() as i64;
        Self {
            monday: date - Duration::days(delta),
        }
    }

    /// Window `offset` whole weeks away from the one containing `date`.
    pub fn with_offset(date: NaiveDate, offset: i64) -> Self {
        let base = Self::containing(date);
        Self {
            monday: base.monday + Duration::days(offset * 7),
        }
    }

    /// The window's Monday.
    pub fn start(&self) -> NaiveDate {
        self.monday
    }

    /// The window's Sunday.
    pub fn end(&self) -> NaiveDate {
        self.monday + Duration::days(6)
    }

    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.contains_date(timestamp.date())
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start() && date <= self.end()
    }

    pub fn next(&self) -> Self {
        Self {
            monday: self.monday + Duration::days(7),
        }
    }

    pub fn previous(&self) -> Self {
        Self {
            monday: self.monday - Duration::days(7),
        }
    }
}

impl fmt::Display for WeekWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mon {} to Sun {}",
            self.start().format("%Y-%m-%d"),
            self.end().format("%Y-%m-%d")
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn every_weekday_snaps_to_the_same_monday() {
        // 2024-01-08 is a Monday.
        let monday = date(2024, 1, 8);
        for day in 8..=14 {
            let window = WeekWindow::containing(date(2024, 1, day));
            assert_eq!(window.start(), monday);
            assert_eq!(window.end(), date(2024, 1, 14));
        }
        assert_eq!(WeekWindow::containing(date(2024, 1, 15)).start(), date(2024, 1, 15));
    }

    #[test]
    fn a_monday_is_its_own_window_start() {
        let window = WeekWindow::containing(date(2024, 1, 8));
        assert_eq!(window.start(), date(2024, 1, 8));
    }

    #[test]
    fn offsets_step_in_whole_weeks() {
        let reference = date(2024, 1, 10);
        assert_eq!(WeekWindow::with_offset(reference, 0).start(), date(2024, 1, 8));
        assert_eq!(WeekWindow::with_offset(reference, -1).start(), date(2024, 1, 1));
        assert_eq!(WeekWindow::with_offset(reference, 1).start(), date(2024, 1, 15));
        assert_eq!(WeekWindow::with_offset(reference, -2).start(), date(2023, 12, 25));
    }

    #[test]
    fn boundaries_are_inclusive_on_both_ends() {
        let window = WeekWindow::containing(date(2024, 1, 10));
        let monday_midnight = NaiveDateTime::new(date(2024, 1, 8), NaiveTime::MIN);
        let sunday_last_milli = NaiveDateTime::new(
            date(2024, 1, 14),
            NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap(),
        );
        let next_monday_midnight = NaiveDateTime::new(date(2024, 1, 15), NaiveTime::MIN);
        assert!(window.contains(monday_midnight));
        assert!(window.contains(sunday_last_milli));
        assert!(!window.contains(next_monday_midnight));
    }

    #[test]
    fn windows_tile_without_gaps_across_a_year_boundary() {
        let window = WeekWindow::containing(date(2023, 12, 29));
        assert_eq!(window.start(), date(2023, 12, 25));
        assert_eq!(window.end(), date(2023, 12, 31));
        assert_eq!(window.next().start(), date(2024, 1, 1));
        assert_eq!(window.next().previous(), window);
    }
}
