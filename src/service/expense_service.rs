//! CRUD helpers for concrete expense entries.

use uuid::Uuid;

use crate::book::{Book, Expense};
use crate::calc::WeekWindow;

use super::{ServiceError, ServiceResult};

pub struct ExpenseService;

impl ExpenseService {
    /// Adds an expense and returns its identifier. Amounts must be positive.
    pub fn add(book: &mut Book, expense: Expense) -> ServiceResult<Uuid> {
        if expense.amount <= 0.0 {
            return Err(ServiceError::Invalid(
                "expense amount must be greater than zero".into(),
            ));
        }
        Ok(book.add_expense(expense))
    }

    /// Applies `mutator` to the matching expense. Unknown ids change
    /// nothing and report `false`.
    pub fn update<F>(book: &mut Book, id: Uuid, mutator: F) -> bool
    where
        F: FnOnce(&mut Expense),
    {
        match book.expense_mut(id) {
            Some(expense) => {
                mutator(expense);
                book.touch();
                true
            }
            None => false,
        }
    }

    /// Removes and returns the matching expense; unknown ids are a no-op.
    pub fn remove(book: &mut Book, id: Uuid) -> Option<Expense> {
        book.remove_expense(id)
    }

    /// Every expense, newest first.
    pub fn list(book: &Book) -> Vec<&Expense> {
        let mut entries: Vec<&Expense> = book.expenses.iter().collect();
        entries.sort_by_key(|expense| std::cmp::Reverse((expense.timestamp, expense.id)));
        entries
    }

    /// Expenses inside `window` in chronological order, slush-funded ones
    /// included.
    pub fn list_week(book: &Book, window: WeekWindow) -> Vec<&Expense> {
        let mut entries: Vec<&Expense> = book
            .expenses
            .iter()
            .filter(|expense| window.contains(expense.timestamp))
            .collect();
        entries.sort_by_key(|expense| (expense.timestamp, expense.id));
        entries
    }
}
