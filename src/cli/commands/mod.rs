pub mod backup;
pub mod budget;
pub mod expense;
pub mod recurring;
pub mod slush;

pub use backup::{handle_backup, BackupCommands};
pub use budget::{handle_budget, handle_week, BudgetCommands};
pub use expense::{handle_expense, ExpenseCommands};
pub use recurring::{handle_recurring, RecurringCommands};
pub use slush::{handle_slush, SlushCommands};
