use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The single monthly spending budget. Setting a new one replaces the
/// current value in place; the book never keeps a history of budgets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub monthly_amount: f64,
    /// Day the budget takes effect; anchors the derived slush carry.
    pub start_date: NaiveDate,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(monthly_amount: f64, start_date: NaiveDate) -> Self {
        Self {
            monthly_amount,
            start_date,
            updated_at: Utc::now(),
        }
    }
}
