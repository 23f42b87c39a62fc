use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use tracing::debug;

use crate::error::StoreResult;

mod contacts;
mod schema;

pub use schema::SCHEMA_VERSION;

/// The contact store. Owns the single connection for the life of the process.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database, creating if needed, running migrations
    pub fn open_at(path: &Path) -> StoreResult<Self> {
        // Create parent directories
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        debug!(path = %path.display(), "opening phone book");
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Open in-memory database for testing
    pub fn open_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    /// Release the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> StoreResult<()> {
        self.conn.close().map_err(|(_, e)| e.into())
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        register_casefold(&conn)?;

        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Run `f` inside a transaction. Dropping the transaction on the error
    /// path rolls back everything `f` wrote.
    fn with_transaction<T>(
        &self,
        f: impl FnOnce(&Connection) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let tx = self.conn.unchecked_transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    fn migrate(&self) -> StoreResult<()> {
        let version = self.get_schema_version()?;

        if version == 0 {
            // Run migration in a transaction for atomicity
            self.conn
                .execute_batch(&format!("BEGIN TRANSACTION; {} COMMIT;", schema::SCHEMA_V1))?;
            self.set_schema_version(SCHEMA_VERSION)?;
            debug!(version = SCHEMA_VERSION, "schema created");
        }

        Ok(())
    }

    fn get_schema_version(&self) -> StoreResult<i32> {
        let has_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version')",
            [],
            |row| row.get(0),
        )?;
        if !has_table {
            return Ok(0);
        }

        let version = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(version.unwrap_or(0))
    }

    fn set_schema_version(&self, version: i32) -> StoreResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO schema_version (id, version) VALUES (1, ?)",
            [version],
        )?;
        Ok(())
    }
}

/// `casefold(text)`: Unicode lowercase. SQLite's own `lower()` only folds
/// ASCII, which breaks prefix search on Cyrillic names.
fn register_casefold(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "casefold",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|s| s.to_lowercase()))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_memory() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.get_schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_tables_exist() {
        let db = Database::open_memory().unwrap();

        let tables: Vec<String> = db
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"contacts".to_string()));
        assert!(tables.contains(&"phones".to_string()));
        assert!(tables.contains(&"emails".to_string()));
        assert!(tables.contains(&"schema_version".to_string()));
    }

    #[test]
    fn test_open_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("phonebook.db");

        let db = Database::open_at(&path).unwrap();
        db.add_contact("Ann", "Lee", &["555-1111"], &["ann@example.com"])
            .unwrap();
        db.close().unwrap();

        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.get_schema_version().unwrap(), SCHEMA_VERSION);
        assert_eq!(db.count_contacts().unwrap(), 1);
        let detail = db.get_contact_details("Ann", "Lee").unwrap();
        assert_eq!(detail.phone_numbers(), vec!["555-1111"]);
    }

    #[test]
    fn test_adopts_unversioned_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phonebook.db");

        // Legacy layout: no version table, no cascade
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                "CREATE TABLE contacts (id INTEGER PRIMARY KEY, first_name TEXT NOT NULL, last_name TEXT NOT NULL);
                 CREATE TABLE phones (id INTEGER PRIMARY KEY, contact_id INTEGER, phone TEXT NOT NULL,
                     FOREIGN KEY (contact_id) REFERENCES contacts (id));
                 CREATE TABLE emails (id INTEGER PRIMARY KEY, contact_id INTEGER, email TEXT NOT NULL,
                     FOREIGN KEY (contact_id) REFERENCES contacts (id));
                 INSERT INTO contacts (first_name, last_name) VALUES ('Ivan', 'Petrov');
                 INSERT INTO phones (contact_id, phone) VALUES (1, '555-0000');",
            )
            .unwrap();
        }

        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.get_schema_version().unwrap(), SCHEMA_VERSION);
        assert_eq!(db.list_contacts().unwrap()[0].list_label(), "Petrov Ivan");

        // Children go away even without ON DELETE CASCADE on the old tables
        db.delete_contact("Ivan", "Petrov").unwrap();
        let orphans: i64 = db
            .conn
            .query_row("SELECT COUNT(*) FROM phones", [], |row| row.get(0))
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[test]
    fn test_casefold_handles_cyrillic() {
        let db = Database::open_memory().unwrap();
        let folded: String = db
            .conn
            .query_row("SELECT casefold('АННА Lee')", [], |row| row.get(0))
            .unwrap();
        assert_eq!(folded, "анна lee");
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let db = Database::open_memory().unwrap();

        let result: StoreResult<()> = db.with_transaction(|conn| {
            conn.execute(
                "INSERT INTO contacts (first_name, last_name) VALUES ('Half', 'Written')",
                [],
            )?;
            Err(crate::error::StoreError::ContactIdNotFound(99))
        });

        assert!(result.is_err());
        assert_eq!(db.count_contacts().unwrap(), 0);
    }
}
