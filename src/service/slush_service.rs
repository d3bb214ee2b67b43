//! Manual slush-fund adjustments.

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::book::{Book, SlushTransaction};

use super::{ServiceError, ServiceResult};

pub struct SlushService;

impl SlushService {
    /// Records a manual deposit. The magnitude must be positive; the sign
    /// lives in the stored amount.
    pub fn deposit(
        book: &mut Book,
        magnitude: f64,
        now: NaiveDateTime,
        description: Option<String>,
    ) -> ServiceResult<Uuid> {
        Self::validate(magnitude)?;
        let transaction = describe(SlushTransaction::deposit(magnitude, now), description);
        Ok(book.add_slush(transaction))
    }

    /// Records a manual withdrawal. Withdrawals may push the stored balance
    /// negative; the fund is advisory, not an account with overdraft rules.
    pub fn withdraw(
        book: &mut Book,
        magnitude: f64,
        now: NaiveDateTime,
        description: Option<String>,
    ) -> ServiceResult<Uuid> {
        Self::validate(magnitude)?;
        let transaction = describe(SlushTransaction::withdrawal(magnitude, now), description);
        Ok(book.add_slush(transaction))
    }

    /// Stored transactions, newest first.
    pub fn list(book: &Book) -> Vec<&SlushTransaction> {
        let mut entries: Vec<&SlushTransaction> = book.slush.iter().collect();
        entries.sort_by_key(|transaction| std::cmp::Reverse((transaction.timestamp, transaction.id)));
        entries
    }

    /// Removes and returns the matching transaction; unknown ids are a
    /// no-op.
    pub fn remove(book: &mut Book, id: Uuid) -> Option<SlushTransaction> {
        book.remove_slush(id)
    }

    fn validate(magnitude: f64) -> ServiceResult<()> {
        if magnitude <= 0.0 {
            return Err(ServiceError::Invalid(
                "slush amount must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

fn describe(transaction: SlushTransaction, description: Option<String>) -> SlushTransaction {
    match description {
        Some(text) => transaction.with_description(text),
        None => transaction,
    }
}
