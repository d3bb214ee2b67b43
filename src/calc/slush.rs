use chrono::NaiveDate;

use crate::book::{Expense, SlushTransaction};

use super::{week_delta, week_spend, WeekWindow};

/// Slush-fund balance split into its stored and derived parts.
///
/// The stored part is the sum of recorded transactions (manual adjustments
/// and annual-payment draws). The derived part is the over/under carry of
/// every completed week and is recomputed on demand, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlushBalance {
    pub stored: f64,
    pub derived: f64,
}

impl SlushBalance {
    pub fn total(&self) -> f64 {
        self.stored + self.derived
    }
}

/// Sum of the recorded slush transactions.
pub fn stored_component(transactions: &[SlushTransaction]) -> f64 {
    transactions.iter().map(|transaction| transaction.amount).sum()
}

/// Accumulated weekly over/under between the budget's start week and the
/// week containing `today`, exclusive. The week in progress never counts;
/// each completed week contributes its delta under the current allowance.
pub fn derived_component(
    weekly_allowance: f64,
    budget_start: NaiveDate,
    today: NaiveDate,
    expenses: &[Expense],
) -> f64 {
    let current = WeekWindow::containing(today);
    let mut window = WeekWindow::containing(budget_start);
    let mut carry = 0.0;
    while window.start() < current.start() {
        carry += week_delta(weekly_allowance, week_spend(expenses, window));
        window = window.next();
    }
    carry
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDateTime, NaiveTime};

    use crate::book::ExpenseCategory;

    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDateTime::new(date(y, m, d), NaiveTime::from_hms_opt(12, 0, 0).unwrap())
    }

    #[test]
    fn stored_component_sums_signed_amounts() {
        let transactions = vec![
            SlushTransaction::deposit(100.0, noon(2024, 1, 2)),
            SlushTransaction::withdrawal(30.0, noon(2024, 1, 9)),
        ];
        assert!((stored_component(&transactions) - 70.0).abs() < TOLERANCE);
    }

    #[test]
    fn derived_component_counts_only_completed_weeks() {
        // Budget starts Monday 2024-01-01; today is in the third week.
        let allowance = 100.0;
        let expenses = vec![
            Expense::new(60.0, ExpenseCategory::Grocery, noon(2024, 1, 3)),
            Expense::new(150.0, ExpenseCategory::Dining, noon(2024, 1, 10)),
            // Week in progress; must not count.
            Expense::new(500.0, ExpenseCategory::Travel, noon(2024, 1, 16)),
        ];
        let carry = derived_component(allowance, date(2024, 1, 1), date(2024, 1, 15), &expenses);
        // Week one: +40, week two: -50.
        assert!((carry - (-10.0)).abs() < TOLERANCE);
    }

    #[test]
    fn derived_component_ignores_slush_funded_spending() {
        let expenses =
            vec![Expense::new(999.0, ExpenseCategory::Travel, noon(2024, 1, 3)).paid_from_slush()];
        let carry = derived_component(100.0, date(2024, 1, 1), date(2024, 1, 8), &expenses);
        assert!((carry - 100.0).abs() < TOLERANCE);
    }

    #[test]
    fn derived_component_is_zero_inside_the_first_week() {
        let carry = derived_component(100.0, date(2024, 1, 1), date(2024, 1, 7), &[]);
        assert_eq!(carry, 0.0);
    }

    #[test]
    fn derived_component_is_zero_for_a_future_start() {
        let carry = derived_component(100.0, date(2024, 3, 4), date(2024, 1, 15), &[]);
        assert_eq!(carry, 0.0);
    }
}
