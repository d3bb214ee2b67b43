use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ExpenseCategory;

/// One concrete spend in the ledger, whether typed in by hand or generated
/// from a recurring template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub amount: f64,
    pub category: ExpenseCategory,
    /// Free-text category label; only honoured when `category` is `Other`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_label: Option<String>,
    pub timestamp: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Entries paid from the slush fund never count against the weekly
    /// allowance.
    #[serde(default)]
    pub from_slush_fund: bool,
    /// Back-reference to the recurring template that generated this entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_id: Option<Uuid>,
}

impl Expense {
    pub fn new(amount: f64, category: ExpenseCategory, timestamp: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            category,
            custom_label: None,
            timestamp,
            description: None,
            from_slush_fund: false,
            recurring_id: None,
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

    pub fn paid_from_slush(mut self) -> Self {
        self.from_slush_fund = true;
        self
    }

    pub fn is_recurring(&self) -> bool {
        self.recurring_id.is_some()
    }

    /// Category label shown for this entry, honouring the `Other` override.
    pub fn category_name(&self) -> &str {
        self.category.display_name(self.custom_label.as_deref())
    }
}
