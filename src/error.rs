//! Error type shared by the contact store, the CSV reader and the config loader.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    /// No contact has this exact first/last name pair.
    #[error("No contact named \"{first_name} {last_name}\".")]
    ContactNotFound {
        first_name: String,
        last_name: String,
    },

    #[error("No contact with id {0}.")]
    ContactIdNotFound(i64),

    /// An import record did not have exactly four fields.
    #[error("line {line}: expected 4 fields (first_name, last_name, phone, email), found {found}")]
    MalformedRow { line: u64, found: usize },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl StoreError {
    pub fn not_found(first_name: &str, last_name: &str) -> Self {
        Self::ContactNotFound {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }

    /// True for the "nothing matched" family, which callers report as a
    /// plain message rather than a failure.
    pub fn is_lookup_miss(&self) -> bool {
        matches!(self, Self::ContactNotFound { .. } | Self::ContactIdNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = StoreError::not_found("Ann", "Lee");
        assert_eq!(err.to_string(), "No contact named \"Ann Lee\".");
        assert!(err.is_lookup_miss());
    }

    #[test]
    fn test_id_miss_is_lookup_miss() {
        let err = StoreError::ContactIdNotFound(42);
        assert_eq!(err.to_string(), "No contact with id 42.");
        assert!(err.is_lookup_miss());
    }

    #[test]
    fn test_malformed_row_is_not_lookup_miss() {
        let err = StoreError::MalformedRow { line: 3, found: 5 };
        assert!(err.to_string().starts_with("line 3:"));
        assert!(err.to_string().contains("found 5"));
        assert!(!err.is_lookup_miss());
    }
}
