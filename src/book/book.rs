use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Budget, Expense, RecurringExpense, SlushTransaction};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Everything the tracker stores for its single local user: the current
/// budget, recurring templates, concrete expenses and stored slush-fund
/// movements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    #[serde(default)]
    pub budget: Option<Budget>,
    #[serde(default)]
    pub recurring: Vec<RecurringExpense>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub slush: Vec<SlushTransaction>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Book::schema_version_default")]
    pub schema_version: u8,
}

impl Book {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            budget: None,
            recurring: Vec::new(),
            expenses: Vec::new(),
            slush: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    /// Replaces the single budget slot; the previous value is discarded.
    pub fn set_budget(&mut self, budget: Budget) {
        self.budget = Some(budget);
        self.touch();
    }

    pub fn add_recurring(&mut self, template: RecurringExpense) -> Uuid {
        let id = template.id;
        self.recurring.push(template);
        self.touch();
        id
    }

    pub fn add_expense(&mut self, expense: Expense) -> Uuid {
        let id = expense.id;
        self.expenses.push(expense);
        self.touch();
        id
    }

    pub fn add_slush(&mut self, transaction: SlushTransaction) -> Uuid {
        let id = transaction.id;
        self.slush.push(transaction);
        self.touch();
        id
    }

    pub fn recurring(&self, id: Uuid) -> Option<&RecurringExpense> {
        self.recurring.iter().find(|template| template.id == id)
    }

    pub fn recurring_mut(&mut self, id: Uuid) -> Option<&mut RecurringExpense> {
        self.recurring.iter_mut().find(|template| template.id == id)
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn expense_mut(&mut self, id: Uuid) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|expense| expense.id == id)
    }

    /// Removes the matching template. Unknown ids leave the book untouched.
    pub fn remove_recurring(&mut self, id: Uuid) -> Option<RecurringExpense> {
        let index = self.recurring.iter().position(|template| template.id == id)?;
        let removed = self.recurring.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn remove_expense(&mut self, id: Uuid) -> Option<Expense> {
        let index = self.expenses.iter().position(|expense| expense.id == id)?;
        let removed = self.expenses.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn remove_slush(&mut self, id: Uuid) -> Option<SlushTransaction> {
        let index = self
            .slush
            .iter()
            .position(|transaction| transaction.id == id)?;
        let removed = self.slush.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn expense_count(&self) -> usize {
        self.expenses.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}
