//! Command-line front end over the services, backed by the JSON store.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::book::{ExpenseCategory, Frequency};
use crate::service::ServiceResult;
use crate::store::JsonStore;

use commands::{
    handle_backup, handle_budget, handle_expense, handle_recurring, handle_slush, handle_week,
    BackupCommands, BudgetCommands, ExpenseCommands, RecurringCommands, SlushCommands,
};

#[derive(Debug, Parser)]
#[command(
    name = "spendwell",
    version,
    about = "Weekly allowance and slush-fund expense tracker"
)]
pub struct Cli {
    /// Directory holding the expense book (defaults to ~/.spendwell)
    #[arg(long, global = true, env = "SPENDWELL_HOME")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Monthly budget
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Summary of one Monday-to-Sunday week
    Week {
        /// 0 = current week, -1 = previous, 1 = next
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i64,
    },

    /// Concrete expenses
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Recurring expense templates
    #[command(subcommand)]
    Recurring(RecurringCommands),

    /// Slush fund
    #[command(subcommand)]
    Slush(SlushCommands),

    /// Book snapshots
    #[command(subcommand)]
    Backup(BackupCommands),
}

/// Parses the process arguments and runs the matching command.
pub fn run_cli() -> ServiceResult<()> {
    let cli = Cli::parse();
    let store = JsonStore::new(cli.data_dir.clone(), None)?;
    dispatch(&store, cli.command)
}

fn dispatch(store: &JsonStore, command: Command) -> ServiceResult<()> {
    match command {
        Command::Budget(command) => handle_budget(store, command),
        Command::Week { offset } => handle_week(store, offset),
        Command::Expense(command) => handle_expense(store, command),
        Command::Recurring(command) => handle_recurring(store, command),
        Command::Slush(command) => handle_slush(store, command),
        Command::Backup(command) => handle_backup(store, command),
    }
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| format!("`{}` is not a date in YYYY-MM-DD form", input))
}

pub(crate) fn parse_uuid(input: &str) -> Result<Uuid, String> {
    input
        .parse::<Uuid>()
        .map_err(|_| format!("`{}` is not a valid id", input))
}

pub(crate) fn parse_category(input: &str) -> Result<ExpenseCategory, String> {
    ExpenseCategory::parse(input).ok_or_else(|| {
        let options = ExpenseCategory::ALL
            .iter()
            .map(|category| category.label().to_lowercase().replace(' ', "-"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("unknown category `{}`; expected one of: {}", input, options)
    })
}

pub(crate) fn parse_frequency(input: &str) -> Result<Frequency, String> {
    Frequency::parse(input).ok_or_else(|| {
        format!(
            "unknown frequency `{}`; expected weekly, bi-weekly, monthly or annually",
            input
        )
    })
}
