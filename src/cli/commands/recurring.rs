//! Recurring-expense subcommands.

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use uuid::Uuid;

use crate::book::{ExpenseCategory, Frequency, RecurringExpense};
use crate::cli::output::{dim, money, print_detail, print_section, print_success, print_warning};
use crate::cli::{parse_category, parse_date, parse_frequency, parse_uuid};
use crate::service::{RecurringService, ServiceResult};
use crate::store::{BookStore, JsonStore};

#[derive(Debug, Subcommand)]
pub enum RecurringCommands {
    /// Add a recurring expense template
    Add {
        /// Amount charged per occurrence, in dollars
        #[arg(long)]
        amount: f64,
        /// Category: rent, subscription, grocery, medical, necessity,
        /// entertainment, dining, travel, non-necessity-goods or other
        #[arg(long, value_parser = parse_category)]
        category: ExpenseCategory,
        /// weekly, bi-weekly, monthly or annually
        #[arg(long, value_parser = parse_frequency)]
        frequency: Frequency,
        /// First day the template applies (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = parse_date)]
        start: Option<NaiveDate>,
        /// First due date when it differs from the start date
        #[arg(long, value_parser = parse_date)]
        due: Option<NaiveDate>,
        /// Free-text label; only honoured with --category other
        #[arg(long)]
        label: Option<String>,
        /// Optional note
        #[arg(long)]
        note: Option<String>,
    },
    /// List every template in display order
    List,
    /// Show templates due on or before a date
    Due {
        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = parse_date)]
        as_of: Option<NaiveDate>,
    },
    /// Generate expenses for every overdue occurrence
    Fire {
        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = parse_date)]
        as_of: Option<NaiveDate>,
    },
    /// Pause a template, freezing its due date
    Pause {
        #[arg(long, value_parser = parse_uuid)]
        id: Uuid,
    },
    /// Resume a paused template
    Resume {
        #[arg(long, value_parser = parse_uuid)]
        id: Uuid,
    },
    /// Delete a template; generated expenses stay in the ledger
    Remove {
        #[arg(long, value_parser = parse_uuid)]
        id: Uuid,
    },
    /// Pay the pending occurrence of an annual template from the slush fund
    Pay {
        #[arg(long, value_parser = parse_uuid)]
        id: Uuid,
    },
}

pub fn handle_recurring(store: &JsonStore, command: RecurringCommands) -> ServiceResult<()> {
    match command {
        RecurringCommands::Add {
            amount,
            category,
            frequency,
            start,
            due,
            label,
            note,
        } => {
            let mut book = store.load_or_default()?;
            let start = start.unwrap_or_else(|| Local::now().date_naive());
            let mut template = RecurringExpense::new(amount, category, frequency, start);
            if let Some(due) = due {
                template = template.with_next_due_date(due);
            }
            if let Some(label) = label {
                template = template.with_custom_label(label);
            }
            if let Some(note) = note {
                template = template.with_description(note);
            }
            let summary = format!(
                "{} {} ({})",
                template.frequency,
                template.display_name(),
                money(template.amount)
            );
            RecurringService::add(&mut book, template)?;
            store.save(&book)?;
            print_success(&format!("Added {}", summary));
            Ok(())
        }
        RecurringCommands::List => {
            let book = store.load_or_default()?;
            print_section("Recurring expenses");
            let templates = RecurringService::list_for_display(&book);
            if templates.is_empty() {
                print_detail("No recurring expenses.");
            }
            for template in templates {
                let paused = if template.is_active { "" } else { " (paused)" };
                print_detail(&format!(
                    "[{:<9}] {:<24} {:>10}  next due {}{}  {}",
                    template.frequency.label().to_lowercase(),
                    template.display_name(),
                    money(template.amount),
                    template.next_due_date,
                    paused,
                    dim(&template.id.to_string())
                ));
            }
            Ok(())
        }
        RecurringCommands::Due { as_of } => {
            let book = store.load_or_default()?;
            let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
            print_section(&format!("Due on or before {}", as_of));
            let due = RecurringService::due(&book, as_of);
            if due.is_empty() {
                print_detail("Nothing due.");
            }
            for template in due {
                print_detail(&format!(
                    "{}  {:<24} {}",
                    template.next_due_date,
                    template.display_name(),
                    money(template.amount)
                ));
            }
            Ok(())
        }
        RecurringCommands::Fire { as_of } => {
            let mut book = store.load_or_default()?;
            let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
            let created = RecurringService::fire_due(&mut book, as_of);
            if created.is_empty() {
                print_detail("Nothing due.");
                return Ok(());
            }
            store.save(&book)?;
            print_success(&format!("Generated {} expense(s)", created.len()));
            for expense in &created {
                print_detail(&format!(
                    "{}  {:<24} {}",
                    expense.timestamp.date(),
                    expense.category_name(),
                    money(expense.amount)
                ));
            }
            Ok(())
        }
        RecurringCommands::Pause { id } => {
            toggle(store, id, false, "Paused")
        }
        RecurringCommands::Resume { id } => {
            toggle(store, id, true, "Resumed")
        }
        RecurringCommands::Remove { id } => {
            let mut book = store.load_or_default()?;
            match RecurringService::remove(&mut book, id) {
                Some(removed) => {
                    store.save(&book)?;
                    print_success(&format!("Removed {}", removed.display_name()));
                }
                None => print_warning("No recurring expense with that id."),
            }
            Ok(())
        }
        RecurringCommands::Pay { id } => {
            let mut book = store.load_or_default()?;
            let now = Local::now().naive_local();
            match RecurringService::pay_annual(&mut book, id, now)? {
                Some(receipt) => {
                    store.save(&book)?;
                    print_success(&format!(
                        "Paid occurrence {}: {} from the slush fund, {} booked as expense",
                        receipt.occurrence,
                        money(receipt.drawn),
                        money(receipt.remainder)
                    ));
                    print_detail(&format!(
                        "Slush fund balance now {}",
                        money(receipt.new_balance)
                    ));
                }
                None => print_warning("No recurring expense with that id."),
            }
            Ok(())
        }
    }
}

fn toggle(store: &JsonStore, id: Uuid, active: bool, verb: &str) -> ServiceResult<()> {
    let mut book = store.load_or_default()?;
    if RecurringService::set_active(&mut book, id, active) {
        let name = RecurringService::get(&book, id)
            .map(|template| template.display_name().to_string())
            .unwrap_or_default();
        store.save(&book)?;
        print_success(&format!("{} {}", verb, name));
    } else {
        print_warning("No recurring expense with that id.");
    }
    Ok(())
}
