use std::collections::HashMap;

use models::{report::UNKNOWN_PERSON, Account, Payment, ReportEntry};

/// Resolve both sides of every payment to a person name, keeping payment order.
///
/// The lookup is rebuilt on each call; ids without an account become `"Unknown"`.
pub fn build_report(accounts: &[Account], payments: &[Payment]) -> Vec<ReportEntry> {
    let names: HashMap<i64, &str> = accounts
        .iter()
        .map(|a| (a.id, a.person_name.as_str()))
        .collect();
    let name_of = |id: i64| names.get(&id).copied().unwrap_or(UNKNOWN_PERSON).to_string();

    payments
        .iter()
        .map(|p| ReportEntry {
            from_person_name: name_of(p.from_account_id),
            to_person_name: name_of(p.to_account_id),
            amount_in_euros: p.amount_in_euros,
            payment_date: p.payment_date,
        })
        .collect()
}
