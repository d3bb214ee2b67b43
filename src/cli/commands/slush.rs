//! Slush-fund subcommands.

use chrono::Local;
use clap::Subcommand;
use uuid::Uuid;

use crate::cli::output::{dim, money, print_detail, print_section, print_success, print_warning, signed_money};
use crate::cli::parse_uuid;
use crate::service::{BudgetService, ServiceResult, SlushService};
use crate::store::{BookStore, JsonStore};

#[derive(Debug, Subcommand)]
pub enum SlushCommands {
    /// Show the fund balance, stored and carried parts split out
    Balance,
    /// Put money into the fund
    Deposit {
        /// Amount in dollars
        #[arg(long)]
        amount: f64,
        /// Optional note
        #[arg(long)]
        note: Option<String>,
    },
    /// Take money out of the fund
    Withdraw {
        /// Amount in dollars
        #[arg(long)]
        amount: f64,
        /// Optional note
        #[arg(long)]
        note: Option<String>,
    },
    /// List stored fund movements, newest first
    List,
    /// Delete a stored movement by id
    Remove {
        #[arg(long, value_parser = parse_uuid)]
        id: Uuid,
    },
}

pub fn handle_slush(store: &JsonStore, command: SlushCommands) -> ServiceResult<()> {
    match command {
        SlushCommands::Balance => {
            let book = store.load_or_default()?;
            let balance = BudgetService::slush_balance(&book, Local::now().date_naive());
            print_section("Slush fund");
            print_detail(&format!("Stored:      {}", money(balance.stored)));
            print_detail(&format!("Week carry:  {}", money(balance.derived)));
            print_detail(&format!("Total:       {}", signed_money(balance.total())));
            Ok(())
        }
        SlushCommands::Deposit { amount, note } => {
            let mut book = store.load_or_default()?;
            SlushService::deposit(&mut book, amount, Local::now().naive_local(), note)?;
            store.save(&book)?;
            print_success(&format!("Deposited {}", money(amount)));
            Ok(())
        }
        SlushCommands::Withdraw { amount, note } => {
            let mut book = store.load_or_default()?;
            SlushService::withdraw(&mut book, amount, Local::now().naive_local(), note)?;
            store.save(&book)?;
            print_success(&format!("Withdrew {}", money(amount)));
            Ok(())
        }
        SlushCommands::List => {
            let book = store.load_or_default()?;
            print_section("Slush fund movements");
            let entries = SlushService::list(&book);
            if entries.is_empty() {
                print_detail("Nothing recorded.");
            }
            for transaction in entries {
                let note = transaction
                    .description
                    .as_deref()
                    .map(|text| format!("  {}", text))
                    .unwrap_or_default();
                print_detail(&format!(
                    "{}  {:>10}{}  {}",
                    transaction.timestamp.format("%Y-%m-%d %H:%M"),
                    signed_money(transaction.amount),
                    note,
                    dim(&transaction.id.to_string())
                ));
            }
            Ok(())
        }
        SlushCommands::Remove { id } => {
            let mut book = store.load_or_default()?;
            match SlushService::remove(&mut book, id) {
                Some(removed) => {
                    store.save(&book)?;
                    print_success(&format!("Removed movement of {}", money(removed.amount)));
                }
                None => print_warning("No slush movement with that id."),
            }
            Ok(())
        }
    }
}
