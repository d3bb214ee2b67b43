//! Recurring-expense management: CRUD, due checks, occurrence firing and
//! the annual payment flow.

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::book::{Book, Expense, Frequency, RecurringExpense, SlushTransaction};
use crate::calc;
use crate::schedule::{self, MAX_OCCURRENCES_PER_PASS};

use super::{BudgetService, ServiceError, ServiceResult};

/// Outcome of settling one occurrence of an annual template.
#[derive(Debug, Clone)]
pub struct AnnualPaymentReceipt {
    pub template_id: Uuid,
    /// The occurrence that was paid.
    pub occurrence: NaiveDate,
    /// Portion covered by the slush fund.
    pub drawn: f64,
    /// Portion booked as a regular expense.
    pub remainder: f64,
    /// Fund balance after the draw.
    pub new_balance: f64,
    /// Ledger entry created for the remainder, when there was one.
    pub expense_id: Option<Uuid>,
}

pub struct RecurringService;

impl RecurringService {
    /// Adds a template and returns its identifier. Amounts must be
    /// positive and the first due date may not precede the start date.
    pub fn add(book: &mut Book, template: RecurringExpense) -> ServiceResult<Uuid> {
        if template.amount <= 0.0 {
            return Err(ServiceError::Invalid(
                "recurring amount must be greater than zero".into(),
            ));
        }
        if template.next_due_date < template.start_date {
            return Err(ServiceError::Invalid(
                "next due date cannot precede the start date".into(),
            ));
        }
        Ok(book.add_recurring(template))
    }

    /// Applies `mutator` to the matching template. Unknown ids change
    /// nothing and report `false`.
    pub fn update<F>(book: &mut Book, id: Uuid, mutator: F) -> bool
    where
        F: FnOnce(&mut RecurringExpense),
    {
        match book.recurring_mut(id) {
            Some(template) => {
                mutator(template);
                book.touch();
                true
            }
            None => false,
        }
    }

    /// Pauses or resumes a template. Pausing freezes `next_due_date`;
    /// resuming leaves it where it froze, so occurrences missed while
    /// paused become due again. Unknown ids report `false`.
    pub fn set_active(book: &mut Book, id: Uuid, active: bool) -> bool {
        Self::update(book, id, |template| template.is_active = active)
    }

    /// Removes and returns the matching template; unknown ids are a no-op.
    /// Expenses already generated from it keep their back-reference.
    pub fn remove(book: &mut Book, id: Uuid) -> Option<RecurringExpense> {
        book.remove_recurring(id)
    }

    pub fn get(book: &Book, id: Uuid) -> Option<&RecurringExpense> {
        book.recurring(id)
    }

    /// Full template set, paused included, in display order.
    pub fn list_for_display(book: &Book) -> Vec<&RecurringExpense> {
        schedule::display_order(&book.recurring)
    }

    /// Active templates due on or before `as_of`.
    pub fn due(book: &Book, as_of: NaiveDate) -> Vec<&RecurringExpense> {
        schedule::due_recurring(&book.recurring, as_of)
    }

    /// Active monthly total; the figure the allowance subtracts.
    pub fn monthly_total(book: &Book) -> f64 {
        schedule::monthly_recurring_total(&book.recurring)
    }

    pub fn total_by_frequency(book: &Book, frequency: Frequency) -> f64 {
        schedule::total_by_frequency(&book.recurring, frequency)
    }

    /// Fires every overdue occurrence of the weekly, bi-weekly and monthly
    /// templates up to `as_of`: one generated expense per occurrence, dated
    /// at the occurrence, with the due date advanced step by step. Annual
    /// templates are left for [`RecurringService::pay_annual`]. Returns the
    /// created entries.
    pub fn fire_due(book: &mut Book, as_of: NaiveDate) -> Vec<Expense> {
        let mut created = Vec::new();
        for template in book.recurring.iter_mut() {
            if template.frequency == Frequency::Annually {
                continue;
            }
            let mut fired = 0usize;
            while template.is_due(as_of) && fired < MAX_OCCURRENCES_PER_PASS {
                let occurrence = template.advance();
                created.push(template.generate(occurrence));
                fired += 1;
            }
        }
        if !created.is_empty() {
            book.expenses.extend(created.iter().cloned());
            book.touch();
            tracing::info!(count = created.len(), %as_of, "recurring occurrences fired");
        }
        created
    }

    /// Settles the pending occurrence of an annual template against the
    /// slush fund as of `now`.
    ///
    /// The fund covers what its balance allows; any remainder is booked as
    /// a regular expense dated `now`. The draw is persisted as a slush
    /// withdrawal and the template advances one year. Unknown ids are a
    /// no-op reported as `Ok(None)`; a non-annual id is an error.
    pub fn pay_annual(
        book: &mut Book,
        id: Uuid,
        now: NaiveDateTime,
    ) -> ServiceResult<Option<AnnualPaymentReceipt>> {
        let Some(template) = book.recurring(id) else {
            return Ok(None);
        };
        if template.frequency != Frequency::Annually {
            return Err(ServiceError::Invalid(format!(
                "recurring expense `{}` is not annual",
                template.display_name()
            )));
        }
        let amount = template.amount;
        let occurrence = template.next_due_date;
        let category = template.category;
        let custom_label = template.custom_label.clone();
        let description = template.description.clone();
        let label = template.display_name().to_string();

        let balance = BudgetService::slush_balance(book, now.date()).total();
        let split = calc::annual_payment(amount, balance);

        if let Some(template) = book.recurring_mut(id) {
            template.advance();
        }
        if split.drawn > 0.0 {
            book.add_slush(
                SlushTransaction::withdrawal(split.drawn, now)
                    .with_description(format!("Annual payment: {}", label)),
            );
        }
        let mut expense_id = None;
        if split.remainder > 0.0 {
            let mut expense = Expense::new(split.remainder, category, now);
            expense.custom_label = custom_label;
            expense.description = description;
            expense.recurring_id = Some(id);
            expense_id = Some(book.add_expense(expense));
        }
        tracing::info!(
            template = %label,
            drawn = split.drawn,
            remainder = split.remainder,
            "annual payment settled"
        );
        Ok(Some(AnnualPaymentReceipt {
            template_id: id,
            occurrence,
            drawn: split.drawn,
            remainder: split.remainder,
            new_balance: split.new_balance,
            expense_id,
        }))
    }
}
