use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::FlatRecord;

/// A directed transfer of whole euros between two account ids.
/// The ids are not checked against existing accounts.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payment {
    pub id: i64,
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount_in_euros: i64,
    pub payment_date: NaiveDate,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentInput {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount_in_euros: i64,
    pub payment_date: NaiveDate,
}

impl PaymentInput {
    pub fn into_payment(self, id: i64) -> Payment {
        Payment {
            id,
            from_account_id: self.from_account_id,
            to_account_id: self.to_account_id,
            amount_in_euros: self.amount_in_euros,
            payment_date: self.payment_date,
        }
    }
}

impl FlatRecord for Payment {
    const TABLE: &'static str = "payments";
    const FIELD_COUNT: usize = 5;

    fn id(&self) -> i64 {
        self.id
    }
}
