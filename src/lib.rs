#![doc(test(attr(deny(warnings))))]

//! Spendwell Core offers the budget, recurrence, and slush-fund primitives
//! that power a weekly expense tracker and its CLI.

pub mod book;
pub mod calc;
pub mod cli;
pub mod errors;
pub mod schedule;
pub mod service;
pub mod store;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Installs the global tracing subscriber once per process.
pub fn init() {
    INIT_TRACING.call_once(|| {
        init_tracing();
        tracing::info!("Spendwell Core tracing initialized.");
    });
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::from_default_env().add_directive("spendwell_core=info".parse().unwrap());

    fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_is_idempotent() {
        super::init();
        super::init();
    }
}
