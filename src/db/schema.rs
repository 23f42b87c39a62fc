pub const SCHEMA_VERSION: i32 = 1;

/// Every statement is `IF NOT EXISTS` so that a legacy phone book file (same
/// three tables, no `schema_version`) is adopted without touching its rows.
pub const SCHEMA_V1: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS phones (
    id INTEGER PRIMARY KEY,
    contact_id INTEGER,
    phone TEXT NOT NULL,
    FOREIGN KEY (contact_id) REFERENCES contacts(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS emails (
    id INTEGER PRIMARY KEY,
    contact_id INTEGER,
    email TEXT NOT NULL,
    FOREIGN KEY (contact_id) REFERENCES contacts(id) ON DELETE CASCADE
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_contact_name ON contacts(last_name, first_name);
CREATE INDEX IF NOT EXISTS idx_phone_contact ON phones(contact_id);
CREATE INDEX IF NOT EXISTS idx_email_contact ON emails(contact_id);
"#;
