use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One stored slush-fund movement. Positive amounts are deposits, negative
/// amounts withdrawals; annual-payment draws land here as withdrawals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlushTransaction {
    pub id: Uuid,
    pub amount: f64,
    pub timestamp: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SlushTransaction {
    /// Deposit of `magnitude` into the fund. Callers pass the magnitude;
    /// the sign lives in the stored amount.
    pub fn deposit(magnitude: f64, timestamp: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount: magnitude,
            timestamp,
            description: None,
        }
    }

    /// Withdrawal of `magnitude` from the fund.
    pub fn withdrawal(magnitude: f64, timestamp: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount: -magnitude,
            timestamp,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_deposit(&self) -> bool {
        self.amount >= 0.0
    }
}
