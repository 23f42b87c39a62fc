use serde::{Deserialize, Serialize};

/// One data record of an import file: `first_name,last_name,phone,email`.
///
/// Fields are taken as-is; empty strings are stored as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRow {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

impl ImportRow {
    pub fn new(first_name: &str, last_name: &str, phone: &str, email: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
        }
    }
}
