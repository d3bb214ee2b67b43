//! Budget subcommands and the weekly summary view.

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::book::Book;
use crate::cli::output::{dim, money, print_detail, print_section, print_success, signed_money};
use crate::cli::parse_date;
use crate::calc::WeekStanding;
use crate::service::{BudgetService, RecurringService, ServiceResult, WeekSummary};
use crate::store::{BookStore, JsonStore};

#[derive(Debug, Subcommand)]
pub enum BudgetCommands {
    /// Set (replace) the monthly budget
    Set {
        /// Monthly budget amount in dollars
        #[arg(long)]
        amount: f64,
        /// Day the budget takes effect (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = parse_date)]
        start: Option<NaiveDate>,
    },
    /// Show the current budget and weekly allowance
    Show,
}

pub fn handle_budget(store: &JsonStore, command: BudgetCommands) -> ServiceResult<()> {
    match command {
        BudgetCommands::Set { amount, start } => {
            let mut book = store.load_or_default()?;
            let start = start.unwrap_or_else(|| Local::now().date_naive());
            let budget = BudgetService::set_budget(&mut book, amount, start)?;
            store.save(&book)?;
            print_success(&format!(
                "Monthly budget set to {} starting {}",
                money(budget.monthly_amount),
                budget.start_date
            ));
            Ok(())
        }
        BudgetCommands::Show => {
            let book = store.load_or_default()?;
            print_budget(&book);
            Ok(())
        }
    }
}

pub fn handle_week(store: &JsonStore, offset: i64) -> ServiceResult<()> {
    let book = store.load_or_default()?;
    let today = Local::now().date_naive();
    let summary = BudgetService::week_summary(&book, today, offset);
    print_week(&summary);
    Ok(())
}

fn print_budget(book: &Book) {
    print_section("Budget");
    match BudgetService::current_budget(book) {
        Some(budget) => {
            print_detail(&format!(
                "Monthly budget:    {} (since {})",
                money(budget.monthly_amount),
                budget.start_date
            ));
            print_detail(&format!(
                "Monthly recurring: {}",
                money(RecurringService::monthly_total(book))
            ));
            if let Some(allowance) = BudgetService::weekly_allowance(book) {
                print_detail(&format!("Weekly allowance:  {}", signed_money(allowance)));
            }
        }
        None => {
            print_detail("No budget set. Run `budget set --amount <dollars>`.");
        }
    }
}

fn print_week(summary: &WeekSummary) {
    print_section(&format!("Week {}", summary.window));
    match summary.allowance {
        Some(allowance) => {
            print_detail(&format!("Allowance: {}", signed_money(allowance)));
            print_detail(&format!("Spent:     {}", money(summary.spent)));
            if let Some(delta) = summary.delta {
                let standing = match summary.standing {
                    Some(WeekStanding::Under) => "under budget",
                    Some(WeekStanding::Over) => "over budget",
                    _ => "on budget",
                };
                print_detail(&format!(
                    "Remaining: {} {}",
                    signed_money(delta),
                    dim(&format!("({})", standing))
                ));
            }
        }
        None => {
            print_detail("No budget set; only spending is tracked.");
            print_detail(&format!("Spent: {}", money(summary.spent)));
        }
    }
    if !summary.by_category.is_empty() {
        print_detail("By category:");
        for entry in &summary.by_category {
            print_detail(&format!("  {:<24} {}", entry.label, money(entry.total)));
        }
    }
}
