//! Pure budget arithmetic: week windows, the weekly allowance, slush-fund
//! balances and annual-payment splits.
//!
//! Everything here is a total function over its inputs. Validation belongs
//! to the callers; these helpers accept whatever values they are handed.

pub mod allowance;
pub mod slush;
pub mod week;

pub use allowance::{
    annual_payment, week_delta, week_spend, weekly_allowance, AnnualPayment, WeekStanding,
    WEEKS_PER_MONTH,
};
pub use slush::{derived_component, stored_component, SlushBalance};
pub use week::WeekWindow;
