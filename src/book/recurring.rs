use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Expense, ExpenseCategory, Frequency};

/// A rule that periodically generates concrete expense entries.
///
/// `next_due_date` is the single scheduling cursor: it only ever moves
/// forward, one frequency step at a time, and pausing the template freezes
/// it in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringExpense {
    pub id: Uuid,
    pub amount: f64,
    pub category: ExpenseCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_label: Option<String>,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub next_due_date: NaiveDate,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RecurringExpense {
    /// New active template with the first occurrence due on `start_date`.
    pub fn new(
        amount: f64,
        category: ExpenseCategory,
        frequency: Frequency,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            category,
            custom_label: None,
            frequency,
            start_date,
            next_due_date: start_date,
            is_active: true,
            description: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_custom_label(mut self, label: impl Into<String>) -> Self {
        self.custom_label = Some(label.into());
        self
    }

    /// Overrides the first due date, e.g. for a subscription added mid-cycle.
    pub fn with_next_due_date(mut self, next_due_date: NaiveDate) -> Self {
        self.next_due_date = next_due_date;
        self
    }

    /// Due on or before `as_of`; paused templates are never due.
    pub fn is_due(&self, as_of: NaiveDate) -> bool {
        self.is_active && self.next_due_date <= as_of
    }

    /// Moves the due date one frequency step forward and returns the
    /// occurrence date that was consumed.
    pub fn advance(&mut self) -> NaiveDate {
        let occurrence = self.next_due_date;
        self.next_due_date = self.frequency.next_occurrence(self.next_due_date);
        occurrence
    }

    /// Builds the concrete ledger entry for one occurrence, dated at the
    /// occurrence's midnight and back-referencing this template.
    pub fn generate(&self, occurrence: NaiveDate) -> Expense {
        let mut expense = Expense::new(
            self.amount,
            self.category,
            NaiveDateTime::new(occurrence, NaiveTime::MIN),
        );
        expense.custom_label = self.custom_label.clone();
        expense.description = self.description.clone();
        expense.recurring_id = Some(self.id);
        expense
    }

    pub fn display_name(&self) -> &str {
        self.category.display_name(self.custom_label.as_deref())
    }
}
