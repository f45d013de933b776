use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, validate_field, FlatRecord};

/// A party that payments are made from or to.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub person_name: String,
    pub address: String,
}

/// Body of an account creation request; the id is assigned by the server.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountInput {
    #[serde(rename = "type")]
    pub kind: String,
    pub person_name: String,
    pub address: String,
}

impl AccountInput {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_field("type", &self.kind)?;
        validate_field("person_name", &self.person_name)?;
        validate_field("address", &self.address)?;
        Ok(())
    }

    pub fn into_account(self, id: i64) -> Account {
        Account { id, kind: self.kind, person_name: self.person_name, address: self.address }
    }
}

impl FlatRecord for Account {
    const TABLE: &'static str = "accounts";
    const FIELD_COUNT: usize = 4;

    fn id(&self) -> i64 {
        self.id
    }
}
