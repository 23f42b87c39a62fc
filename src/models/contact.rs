use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl Contact {
    /// Same string the list view shows: surname first.
    pub fn list_label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.last_name, self.first_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_label_is_surname_first() {
        let contact = Contact {
            id: 1,
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
        };
        assert_eq!(contact.list_label(), "Lee Ann");
    }

    #[test]
    fn test_list_label_with_empty_names() {
        let contact = Contact {
            id: 2,
            first_name: String::new(),
            last_name: "Solo".to_string(),
        };
        assert_eq!(contact.list_label(), "Solo ");
    }
}
