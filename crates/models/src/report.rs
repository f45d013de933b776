use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Name shown for an account id that has no matching account.
pub const UNKNOWN_PERSON: &str = "Unknown";

/// One payment with both account ids resolved to person names.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportEntry {
    pub from_person_name: String,
    pub to_person_name: String,
    pub amount_in_euros: i64,
    pub payment_date: NaiveDate,
}
