//! Domain records of the ledger: accounts, payments and report rows.
//!
//! The structs double as the on-disk layout: their serde field order is the
//! column order of the flat table files.

pub mod errors;
pub mod account;
pub mod payment;
pub mod report;

pub use account::{Account, AccountInput};
pub use payment::{Payment, PaymentInput};
pub use report::ReportEntry;

/// A record that lives in one flat table file, one line per record.
pub trait FlatRecord {
    /// Table name used in logs and error messages.
    const TABLE: &'static str;
    /// Number of comma-separated columns on every line.
    const FIELD_COUNT: usize;

    fn id(&self) -> i64;
}

/// Reject text that would break the comma-separated line format.
pub fn validate_field(name: &str, value: &str) -> Result<(), errors::ModelError> {
    if value.contains([',', '\n', '\r']) {
        return Err(errors::ModelError::Validation(format!(
            "{name} must not contain commas or line breaks"
        )));
    }
    Ok(())
}
