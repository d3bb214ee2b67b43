use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// How often a recurring expense charges.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Frequency {
    Weekly,
    BiWeekly,
    Monthly,
    Annually,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Weekly,
        Frequency::BiWeekly,
        Frequency::Monthly,
        Frequency::Annually,
    ];

    /// Date of the occurrence after `current_due` under this frequency.
    ///
    /// Month and year steps keep the day-of-month, clamping to the last day
    /// of shorter target months: Jan 31 lands on Feb 29 in leap years and
    /// Feb 28 otherwise.
    pub fn next_occurrence(&self, current_due: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Weekly => current_due + Duration::days(7),
            Frequency::BiWeekly => current_due + Duration::days(14),
            Frequency::Monthly => shift_month(current_due, 1),
            Frequency::Annually => shift_year(current_due, 1),
        }
    }

    /// Position in the template list display: monthly templates lead,
    /// annual ones close the list.
    pub fn display_rank(&self) -> u8 {
        match self {
            Frequency::Monthly => 0,
            Frequency::Weekly => 1,
            Frequency::BiWeekly => 2,
            Frequency::Annually => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Weekly => "Weekly",
            Frequency::BiWeekly => "Bi-weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Annually => "Annually",
        }
    }

    /// Parses user input leniently, accepting `"bi-weekly"`, `"biweekly"`
    /// and the like.
    pub fn parse(input: &str) -> Option<Frequency> {
        let wanted: String = input
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Frequency::ALL.into_iter().find(|frequency| {
            frequency
                .label()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .map(|c| c.to_ascii_lowercase())
                .collect::<String>()
                == wanted
        })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month() as i32 - 1 + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    shift_month(date, years * 12)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    (28..=31)
        .rev()
        .find(|&day| NaiveDate::from_ymd_opt(year, month, day).is_some())
        .unwrap_or(28)
}
