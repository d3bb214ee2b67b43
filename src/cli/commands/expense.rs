//! Expense subcommands.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::Subcommand;
use uuid::Uuid;

use crate::book::{Expense, ExpenseCategory};
use crate::calc::WeekWindow;
use crate::cli::output::{dim, money, print_detail, print_section, print_success, print_warning};
use crate::cli::{parse_category, parse_date, parse_uuid};
use crate::service::{ExpenseService, ServiceResult};
use crate::store::{BookStore, JsonStore};

#[derive(Debug, Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// Amount in dollars
        #[arg(long)]
        amount: f64,
        /// Category: rent, subscription, grocery, medical, necessity,
        /// entertainment, dining, travel, non-necessity-goods or other
        #[arg(long, value_parser = parse_category)]
        category: ExpenseCategory,
        /// Free-text label; only honoured with --category other
        #[arg(long)]
        label: Option<String>,
        /// Optional note
        #[arg(long)]
        note: Option<String>,
        /// Pay from the slush fund instead of the weekly allowance
        #[arg(long)]
        slush: bool,
        /// Date for the entry (YYYY-MM-DD, defaults to now)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// List expenses, newest first
    List {
        /// Restrict to one week: 0 = current, -1 = previous, 1 = next
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<i64>,
    },
    /// Delete an expense by id
    Remove {
        #[arg(long, value_parser = parse_uuid)]
        id: Uuid,
    },
}

pub fn handle_expense(store: &JsonStore, command: ExpenseCommands) -> ServiceResult<()> {
    match command {
        ExpenseCommands::Add {
            amount,
            category,
            label,
            note,
            slush,
            date,
        } => {
            let mut book = store.load_or_default()?;
            let timestamp = match date {
                Some(date) => NaiveDateTime::new(date, NaiveTime::MIN),
                None => Local::now().naive_local(),
            };
            let mut expense = Expense::new(amount, category, timestamp);
            if let Some(label) = label {
                expense = expense.with_custom_label(label);
            }
            if let Some(note) = note {
                expense = expense.with_description(note);
            }
            if slush {
                expense = expense.paid_from_slush();
            }
            let summary = format!(
                "{} on {}{}",
                money(expense.amount),
                expense.category_name(),
                if expense.from_slush_fund {
                    " (slush fund)"
                } else {
                    ""
                }
            );
            ExpenseService::add(&mut book, expense)?;
            store.save(&book)?;
            print_success(&format!("Recorded {}", summary));
            Ok(())
        }
        ExpenseCommands::List { offset } => {
            let book = store.load_or_default()?;
            match offset {
                Some(offset) => {
                    let window = WeekWindow::with_offset(Local::now().date_naive(), offset);
                    print_section(&format!("Expenses, week {}", window));
                    print_entries(ExpenseService::list_week(&book, window));
                }
                None => {
                    print_section("Expenses");
                    print_entries(ExpenseService::list(&book));
                }
            }
            Ok(())
        }
        ExpenseCommands::Remove { id } => {
            let mut book = store.load_or_default()?;
            match ExpenseService::remove(&mut book, id) {
                Some(removed) => {
                    store.save(&book)?;
                    print_success(&format!(
                        "Removed {} ({})",
                        money(removed.amount),
                        removed.category_name()
                    ));
                }
                None => print_warning("No expense with that id."),
            }
            Ok(())
        }
    }
}

fn print_entries(entries: Vec<&Expense>) {
    if entries.is_empty() {
        print_detail("Nothing recorded.");
        return;
    }
    for expense in entries {
        let mut tags = String::new();
        if expense.from_slush_fund {
            tags.push_str(" [slush]");
        }
        if expense.is_recurring() {
            tags.push_str(" [recurring]");
        }
        print_detail(&format!(
            "{}  {:<24} {:>10}{}  {}",
            expense.timestamp.format("%Y-%m-%d %H:%M"),
            expense.category_name(),
            money(expense.amount),
            tags,
            dim(&expense.id.to_string())
        ));
    }
}
