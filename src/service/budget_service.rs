//! Budget configuration, weekly standings and the slush-fund balance.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::book::{Book, Budget, ExpenseCategory};
use crate::calc::{self, SlushBalance, WeekStanding, WeekWindow};
use crate::schedule;

use super::{ServiceError, ServiceResult};

/// Spending summary for one Monday-to-Sunday window.
#[derive(Debug, Clone)]
pub struct WeekSummary {
    pub window: WeekWindow,
    /// `None` while no budget is configured. Distinct from a zero allowance.
    pub allowance: Option<f64>,
    /// Spending that counted against the allowance.
    pub spent: f64,
    pub delta: Option<f64>,
    pub standing: Option<WeekStanding>,
    pub by_category: Vec<CategorySpend>,
}

/// Per-category share of a week's on-budget spending.
#[derive(Debug, Clone)]
pub struct CategorySpend {
    pub category: ExpenseCategory,
    pub label: String,
    pub total: f64,
}

/// Budget queries and the one mutation the budget supports: replacement.
pub struct BudgetService;

impl BudgetService {
    /// Replaces the single budget slot. The monthly amount must be positive.
    pub fn set_budget(
        book: &mut Book,
        monthly_amount: f64,
        start_date: NaiveDate,
    ) -> ServiceResult<Budget> {
        if monthly_amount <= 0.0 {
            return Err(ServiceError::Invalid(
                "monthly budget must be greater than zero".into(),
            ));
        }
        let budget = Budget::new(monthly_amount, start_date);
        book.set_budget(budget.clone());
        tracing::info!(monthly_amount, %start_date, "budget replaced");
        Ok(budget)
    }

    pub fn current_budget(book: &Book) -> Option<&Budget> {
        book.budget.as_ref()
    }

    /// Weekly allowance under the current budget and active monthly
    /// templates; `None` while no budget is set.
    pub fn weekly_allowance(book: &Book) -> Option<f64> {
        book.budget.as_ref().map(|budget| {
            calc::weekly_allowance(
                budget.monthly_amount,
                schedule::monthly_recurring_total(&book.recurring),
            )
        })
    }

    /// Summary of the week `offset` whole weeks away from the one
    /// containing `today`.
    pub fn week_summary(book: &Book, today: NaiveDate, offset: i64) -> WeekSummary {
        let window = WeekWindow::with_offset(today, offset);
        let spent = calc::week_spend(&book.expenses, window);
        let allowance = Self::weekly_allowance(book);
        let delta = allowance.map(|allowance| calc::week_delta(allowance, spent));
        let standing = delta.map(WeekStanding::from_delta);
        WeekSummary {
            window,
            allowance,
            spent,
            delta,
            standing,
            by_category: Self::category_breakdown(book, window),
        }
    }

    /// Current slush-fund balance: stored transactions plus the derived
    /// over/under carry of completed weeks. Without a budget only the
    /// stored part exists.
    pub fn slush_balance(book: &Book, today: NaiveDate) -> SlushBalance {
        let stored = calc::stored_component(&book.slush);
        let derived = match (book.budget.as_ref(), Self::weekly_allowance(book)) {
            (Some(budget), Some(allowance)) => {
                calc::derived_component(allowance, budget.start_date, today, &book.expenses)
            }
            _ => 0.0,
        };
        SlushBalance { stored, derived }
    }

    fn category_breakdown(book: &Book, window: WeekWindow) -> Vec<CategorySpend> {
        let mut totals: HashMap<(ExpenseCategory, String), f64> = HashMap::new();
        for expense in book
            .expenses
            .iter()
            .filter(|expense| !expense.from_slush_fund && window.contains(expense.timestamp))
        {
            let key = (expense.category, expense.category_name().to_string());
            *totals.entry(key).or_insert(0.0) += expense.amount;
        }
        let mut breakdown: Vec<CategorySpend> = totals
            .into_iter()
            .map(|((category, label), total)| CategorySpend {
                category,
                label,
                total,
            })
            .collect();
        breakdown.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.label.cmp(&b.label))
        });
        breakdown
    }
}
