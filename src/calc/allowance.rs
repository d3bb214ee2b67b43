use serde::{Deserialize, Serialize};

use crate::book::Expense;

use super::WeekWindow;

/// Weeks-per-month divisor for the allowance formula. The tracker has always
/// divided by 4.3, and stored histories depend on it; do not swap in a more
/// precise constant.
pub const WEEKS_PER_MONTH: f64 = 4.3;

/// Money available per week after monthly recurring costs. Goes negative
/// when recurring costs already exceed the budget.
pub fn weekly_allowance(monthly_amount: f64, monthly_recurring_total: f64) -> f64 {
    (monthly_amount - monthly_recurring_total) / WEEKS_PER_MONTH
}

/// Signed difference between the allowance and what a week actually spent.
/// A surplus is positive and flows into the slush fund; an overrun is
/// negative and comes out of it.
pub fn week_delta(weekly_allowance: f64, spent: f64) -> f64 {
    weekly_allowance - spent
}

/// Sums the spending inside `window` that counts against the allowance.
/// Entries paid from the slush fund are excluded by definition.
pub fn week_spend(expenses: &[Expense], window: WeekWindow) -> f64 {
    expenses
        .iter()
        .filter(|expense| !expense.from_slush_fund && window.contains(expense.timestamp))
        .map(|expense| expense.amount)
        .sum()
}

/// How a week compares against its allowance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WeekStanding {
    /// Spent less than the allowance.
    Under,
    /// Spent more than the allowance.
    Over,
    /// Spent the allowance to the cent.
    Even,
}

impl WeekStanding {
    pub fn from_delta(delta: f64) -> Self {
        if delta > f64::EPSILON {
            WeekStanding::Under
        } else if delta < -f64::EPSILON {
            WeekStanding::Over
        } else {
            WeekStanding::Even
        }
    }
}

/// Split of an annual charge between the slush fund and the weekly ledger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnualPayment {
    /// Portion covered by the slush fund.
    pub drawn: f64,
    /// Portion left for the caller to book as a regular expense.
    pub remainder: f64,
    /// Fund balance after the draw.
    pub new_balance: f64,
}

/// Draws as much of `expense_amount` from the slush fund as the balance
/// covers. A balance at or below zero covers nothing, and the draw never
/// pushes a positive balance negative.
pub fn annual_payment(expense_amount: f64, slush_balance: f64) -> AnnualPayment {
    let drawn = expense_amount.min(slush_balance.max(0.0));
    AnnualPayment {
        drawn,
        remainder: expense_amount - drawn,
        new_balance: slush_balance - drawn,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    use crate::book::ExpenseCategory;

    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDateTime::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn allowance_matches_the_worked_example() {
        let allowance = weekly_allowance(2000.0, 865.0);
        assert!((allowance - 1135.0 / 4.3).abs() < TOLERANCE);
        assert!((allowance - 263.95).abs() < 0.01);

        assert!((week_delta(allowance, 200.0) - 63.95).abs() < 0.01);
        assert!((week_delta(allowance, 300.0) + 36.05).abs() < 0.01);
    }

    #[test]
    fn allowance_can_go_negative() {
        let allowance = weekly_allowance(1000.0, 1290.0);
        assert!(allowance < 0.0);
        assert!((allowance - (-290.0 / 4.3)).abs() < TOLERANCE);
    }

    #[test]
    fn week_spend_skips_slush_funded_entries() {
        let window = WeekWindow::containing(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        let expenses = vec![
            Expense::new(40.0, ExpenseCategory::Grocery, noon(2024, 1, 9)),
            Expense::new(25.0, ExpenseCategory::Dining, noon(2024, 1, 12)),
            Expense::new(300.0, ExpenseCategory::Travel, noon(2024, 1, 11)).paid_from_slush(),
            // The previous week; outside the window.
            Expense::new(15.0, ExpenseCategory::Dining, noon(2024, 1, 7)),
        ];
        assert!((week_spend(&expenses, window) - 65.0).abs() < TOLERANCE);
    }

    #[test]
    fn delta_plus_spend_reconstructs_the_allowance() {
        let allowance = weekly_allowance(2430.0, 512.5);
        for spent in [0.0, 12.34, 263.95, 1000.0] {
            let delta = week_delta(allowance, spent);
            assert!((delta + spent - allowance).abs() < TOLERANCE);
        }
    }

    #[test]
    fn standing_classifies_around_zero() {
        assert_eq!(WeekStanding::from_delta(63.95), WeekStanding::Under);
        assert_eq!(WeekStanding::from_delta(-36.05), WeekStanding::Over);
        assert_eq!(WeekStanding::from_delta(0.0), WeekStanding::Even);
    }

    #[test]
    fn annual_payment_fully_covered() {
        let split = annual_payment(300.0, 500.0);
        assert!((split.drawn - 300.0).abs() < TOLERANCE);
        assert!((split.remainder).abs() < TOLERANCE);
        assert!((split.new_balance - 200.0).abs() < TOLERANCE);
    }

    #[test]
    fn annual_payment_partially_covered() {
        let split = annual_payment(300.0, 120.0);
        assert!((split.drawn - 120.0).abs() < TOLERANCE);
        assert!((split.remainder - 180.0).abs() < TOLERANCE);
        assert!(split.new_balance.abs() < TOLERANCE);
    }

    #[test]
    fn annual_payment_with_empty_or_negative_fund() {
        let zero = annual_payment(300.0, 0.0);
        assert_eq!(zero.drawn, 0.0);
        assert!((zero.remainder - 300.0).abs() < TOLERANCE);

        let negative = annual_payment(300.0, -75.0);
        assert_eq!(negative.drawn, 0.0);
        assert!((negative.remainder - 300.0).abs() < TOLERANCE);
        assert!((negative.new_balance + 75.0).abs() < TOLERANCE);
    }

    #[test]
    fn annual_payment_conserves_the_charge() {
        for balance in [-50.0, 0.0, 120.0, 300.0, 900.0] {
            let split = annual_payment(300.0, balance);
            assert!((split.drawn + split.remainder - 300.0).abs() < TOLERANCE);
            assert!(split.drawn >= 0.0);
            assert!(split.remainder >= 0.0);
            assert!((split.new_balance - (balance - split.drawn)).abs() < TOLERANCE);
        }
    }
}
