//! Expense-book domain models, persistence-friendly types, and helpers.

#[allow(clippy::module_inception)]
pub mod book;
pub mod budget;
pub mod category;
pub mod expense;
pub mod frequency;
pub mod recurring;
pub mod slush;

pub use book::{Book, CURRENT_SCHEMA_VERSION};
pub use budget::Budget;
pub use category::ExpenseCategory;
pub use expense::Expense;
pub use frequency::Frequency;
pub use recurring::RecurringExpense;
pub use slush::SlushTransaction;
