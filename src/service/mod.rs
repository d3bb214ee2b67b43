pub mod budget_service;
pub mod expense_service;
pub mod recurring_service;
pub mod slush_service;

pub use budget_service::{BudgetService, CategorySpend, WeekSummary};
pub use expense_service::ExpenseService;
pub use recurring_service::{AnnualPaymentReceipt, RecurringService};
pub use slush_service::SlushService;

use crate::errors::StoreError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    Invalid(String),
}
