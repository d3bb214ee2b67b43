//! Recurring-expense scheduling: due queries, per-frequency totals and the
//! display ordering of the template list.

use chrono::NaiveDate;

use crate::book::{Frequency, RecurringExpense};

/// Ceiling on occurrences fired for one template in a single pass. Keeps a
/// template with a far-past due date from looping unbounded.
pub const MAX_OCCURRENCES_PER_PASS: usize = 512;

/// Active templates due on or before `as_of`, earliest due date first.
pub fn due_recurring(templates: &[RecurringExpense], as_of: NaiveDate) -> Vec<&RecurringExpense> {
    let mut due: Vec<&RecurringExpense> = templates
        .iter()
        .filter(|template| template.is_due(as_of))
        .collect();
    due.sort_by_key(|template| (template.next_due_date, template.id));
    due
}

/// Sum of active template amounts for one frequency. Paused templates do
/// not contribute.
pub fn total_by_frequency(templates: &[RecurringExpense], frequency: Frequency) -> f64 {
    templates
        .iter()
        .filter(|template| template.is_active && template.frequency == frequency)
        .map(|template| template.amount)
        .sum()
}

/// Active monthly total; the figure the weekly allowance subtracts.
pub fn monthly_recurring_total(templates: &[RecurringExpense]) -> f64 {
    total_by_frequency(templates, Frequency::Monthly)
}

/// Full template set (paused included) in display order: monthly, weekly,
/// bi-weekly, then annual, with sooner due dates first inside each group.
pub fn display_order(templates: &[RecurringExpense]) -> Vec<&RecurringExpense> {
    let mut ordered: Vec<&RecurringExpense> = templates.iter().collect();
    ordered.sort_by_key(|template| {
        (
            template.frequency.display_rank(),
            template.next_due_date,
            template.id,
        )
    });
    ordered
}

#[cfg(test)]
mod tests {
    use crate::book::ExpenseCategory;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn template(
        amount: f64,
        frequency: Frequency,
        due: NaiveDate,
    ) -> RecurringExpense {
        RecurringExpense::new(amount, ExpenseCategory::Subscription, frequency, due)
    }

    #[test]
    fn due_filter_includes_today_and_earlier() {
        let templates = vec![
            template(10.0, Frequency::Monthly, date(2024, 1, 5)),
            template(20.0, Frequency::Weekly, date(2024, 1, 10)),
            template(30.0, Frequency::Monthly, date(2024, 1, 11)),
        ];
        let due = due_recurring(&templates, date(2024, 1, 10));
        let amounts: Vec<f64> = due.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![10.0, 20.0]);
    }

    #[test]
    fn due_filter_skips_paused_templates() {
        let mut paused = template(10.0, Frequency::Weekly, date(2024, 1, 1));
        paused.is_active = false;
        let templates = vec![paused, template(20.0, Frequency::Weekly, date(2024, 1, 1))];
        let due = due_recurring(&templates, date(2024, 2, 1));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].amount, 20.0);
    }

    #[test]
    fn totals_group_by_frequency_and_skip_paused() {
        let mut paused = template(100.0, Frequency::Monthly, date(2024, 1, 1));
        paused.is_active = false;
        let templates = vec![
            template(800.0, Frequency::Monthly, date(2024, 1, 1)),
            template(15.0, Frequency::Monthly, date(2024, 1, 5)),
            template(50.0, Frequency::Monthly, date(2024, 1, 20)),
            template(12.0, Frequency::Weekly, date(2024, 1, 3)),
            template(90.0, Frequency::Annually, date(2024, 6, 1)),
            paused,
        ];
        assert!((monthly_recurring_total(&templates) - 865.0).abs() < 1e-9);
        assert!((total_by_frequency(&templates, Frequency::Weekly) - 12.0).abs() < 1e-9);
        assert!((total_by_frequency(&templates, Frequency::Annually) - 90.0).abs() < 1e-9);
        assert_eq!(total_by_frequency(&templates, Frequency::BiWeekly), 0.0);
    }

    #[test]
    fn display_order_groups_by_frequency_then_due_date() {
        let templates = vec![
            template(1.0, Frequency::Annually, date(2024, 6, 1)),
            template(2.0, Frequency::Weekly, date(2024, 1, 15)),
            template(3.0, Frequency::Monthly, date(2024, 1, 20)),
            template(4.0, Frequency::BiWeekly, date(2024, 1, 2)),
            template(5.0, Frequency::Weekly, date(2024, 1, 8)),
        ];
        let ordered = display_order(&templates);
        let sequence: Vec<(Frequency, NaiveDate)> = ordered
            .iter()
            .map(|t| (t.frequency, t.next_due_date))
            .collect();
        assert_eq!(
            sequence,
            vec![
                (Frequency::Monthly, date(2024, 1, 20)),
                (Frequency::Weekly, date(2024, 1, 8)),
                (Frequency::Weekly, date(2024, 1, 15)),
                (Frequency::BiWeekly, date(2024, 1, 2)),
                (Frequency::Annually, date(2024, 6, 1)),
            ]
        );
    }

    #[test]
    fn display_order_keeps_paused_templates_visible() {
        let mut paused = template(10.0, Frequency::Monthly, date(2024, 1, 1));
        paused.is_active = false;
        let templates = vec![template(20.0, Frequency::Weekly, date(2024, 1, 1)), paused];
        assert_eq!(display_order(&templates).len(), 2);
    }
}
