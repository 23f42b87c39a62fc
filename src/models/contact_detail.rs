use serde::{Deserialize, Serialize};

use super::{Contact, Email, Phone};

/// A contact together with every phone and email row that references it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactDetail {
    pub contact: Contact,
    pub phones: Vec<Phone>,
    pub emails: Vec<Email>,
}

impl ContactDetail {
    pub fn phone_numbers(&self) -> Vec<&str> {
        self.phones.iter().map(|p| p.phone_number.as_str()).collect()
    }

    pub fn email_addresses(&self) -> Vec<&str> {
        self.emails.iter().map(|e| e.email_address.as_str()).collect()
    }

    /// First phone, which is what the edit form pre-fills
    pub fn primary_phone(&self) -> Option<&str> {
        self.phones.first().map(|p| p.phone_number.as_str())
    }

    pub fn primary_email(&self) -> Option<&str> {
        self.emails.first().map(|e| e.email_address.as_str())
    }
}
