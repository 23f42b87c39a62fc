use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info, warn};

use super::Database;
use crate::error::{StoreError, StoreResult};
use crate::models::*;

impl Database {
    // ==================== CONTACT CREATE ====================

    /// Insert a contact plus one row per phone and per email, atomically.
    /// Values are stored exactly as given; nothing is validated.
    pub fn add_contact<P, E>(
        &self,
        first_name: &str,
        last_name: &str,
        phones: &[P],
        emails: &[E],
    ) -> StoreResult<i64>
    where
        P: AsRef<str>,
        E: AsRef<str>,
    {
        let id = self.with_transaction(|conn| {
            insert_contact_rows(conn, first_name, last_name, phones, emails)
        })?;
        info!(id, phones = phones.len(), emails = emails.len(), "added contact");
        Ok(id)
    }

    /// Bulk insert. The whole batch shares one transaction, so a failure
    /// leaves the store as it was before the call.
    pub fn import_contacts(&self, rows: &[ImportRow]) -> StoreResult<Vec<i64>> {
        let ids = self.with_transaction(|conn| {
            rows.iter()
                .map(|row| {
                    insert_contact_rows(
                        conn,
                        &row.first_name,
                        &row.last_name,
                        &[row.phone.as_str()],
                        &[row.email.as_str()],
                    )
                })
                .collect::<StoreResult<Vec<_>>>()
        })?;
        info!(count = ids.len(), "imported contacts");
        Ok(ids)
    }

    // ==================== CONTACT READ ====================

    pub fn get_contact(&self, id: i64) -> StoreResult<Option<Contact>> {
        let contact = self
            .conn
            .query_row(
                "SELECT id, first_name, last_name FROM contacts WHERE id = ?",
                [id],
                row_to_contact,
            )
            .optional()?;
        Ok(contact)
    }

    /// Resolve a name pair to an id. Names are not unique; on a collision the
    /// lowest id wins.
    pub fn find_contact_id(&self, first_name: &str, last_name: &str) -> StoreResult<i64> {
        resolve_contact_id(&self.conn, first_name, last_name)
    }

    /// All contacts in storage order.
    pub fn list_contacts(&self) -> StoreResult<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, first_name, last_name FROM contacts ORDER BY id ASC")?;

        let contacts = stmt
            .query_map([], row_to_contact)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(contacts)
    }

    pub fn count_contacts(&self) -> StoreResult<u32> {
        let count: u32 = self
            .conn
            .query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Contacts whose first or last name starts with `prefix`, ignoring case.
    /// An empty prefix matches everything.
    pub fn search_contacts(&self, prefix: &str) -> StoreResult<Vec<Contact>> {
        let pattern = format!("{}%", escape_like(&prefix.to_lowercase()));
        debug!(prefix, "searching contacts");

        // ESCAPE '\' enables backslash escaping for % and _ literals
        let mut stmt = self.conn.prepare(
            r#"SELECT id, first_name, last_name FROM contacts
               WHERE casefold(first_name) LIKE ?1 ESCAPE '\'
                  OR casefold(last_name) LIKE ?1 ESCAPE '\'
               ORDER BY id ASC"#,
        )?;

        let contacts = stmt
            .query_map([pattern], row_to_contact)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(contacts)
    }

    /// Phones and emails for the contact with this exact name pair.
    pub fn get_contact_details(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> StoreResult<ContactDetail> {
        let id = self.find_contact_id(first_name, last_name)?;
        self.get_contact_detail(id)
    }

    pub fn get_contact_detail(&self, id: i64) -> StoreResult<ContactDetail> {
        let contact = self
            .get_contact(id)?
            .ok_or(StoreError::ContactIdNotFound(id))?;

        Ok(ContactDetail {
            contact,
            phones: self.get_phones_for_contact(id)?,
            emails: self.get_emails_for_contact(id)?,
        })
    }

    pub fn get_phones_for_contact(&self, contact_id: i64) -> StoreResult<Vec<Phone>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, contact_id, phone FROM phones WHERE contact_id = ? ORDER BY id ASC",
        )?;

        let phones = stmt
            .query_map([contact_id], row_to_phone)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(phones)
    }

    pub fn get_emails_for_contact(&self, contact_id: i64) -> StoreResult<Vec<Email>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, contact_id, email FROM emails WHERE contact_id = ? ORDER BY id ASC",
        )?;

        let emails = stmt
            .query_map([contact_id], row_to_email)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(emails)
    }

    // ==================== CONTACT UPDATE ====================

    /// Rename the contact found by its old name pair and overwrite its phone
    /// and email rows. Only `phones[0]` and `emails[0]` are used, and they are
    /// written to every existing row; an empty slice leaves those rows alone.
    /// No rows are added or removed. Returns the id that was updated.
    pub fn update_contact<P, E>(
        &self,
        old_first_name: &str,
        old_last_name: &str,
        new_first_name: &str,
        new_last_name: &str,
        phones: &[P],
        emails: &[E],
    ) -> StoreResult<i64>
    where
        P: AsRef<str>,
        E: AsRef<str>,
    {
        let id = self.with_transaction(|conn| {
            let id = resolve_contact_id(conn, old_first_name, old_last_name)?;
            update_contact_rows(conn, id, new_first_name, new_last_name, phones, emails)?;
            Ok(id)
        })?;
        info!(id, "updated contact");
        Ok(id)
    }

    /// Same overwrite rules as [`Database::update_contact`], addressed by id.
    pub fn update_contact_by_id<P, E>(
        &self,
        id: i64,
        new_first_name: &str,
        new_last_name: &str,
        phones: &[P],
        emails: &[E],
    ) -> StoreResult<()>
    where
        P: AsRef<str>,
        E: AsRef<str>,
    {
        self.with_transaction(|conn| {
            update_contact_rows(conn, id, new_first_name, new_last_name, phones, emails)
        })?;
        info!(id, "updated contact");
        Ok(())
    }

    // ==================== CONTACT DELETE ====================

    /// Delete the contact with this exact name pair and all of its phone and
    /// email rows. Returns the id that was removed.
    pub fn delete_contact(&self, first_name: &str, last_name: &str) -> StoreResult<i64> {
        let id = self.with_transaction(|conn| {
            let id = resolve_contact_id(conn, first_name, last_name)?;
            delete_contact_rows(conn, id)?;
            Ok(id)
        })?;
        info!(id, "deleted contact");
        Ok(id)
    }

    pub fn delete_contact_by_id(&self, id: i64) -> StoreResult<()> {
        self.with_transaction(|conn| delete_contact_rows(conn, id))?;
        info!(id, "deleted contact");
        Ok(())
    }
}

// ==================== ROW WRITERS ====================

fn insert_contact_rows<P, E>(
    conn: &Connection,
    first_name: &str,
    last_name: &str,
    phones: &[P],
    emails: &[E],
) -> StoreResult<i64>
where
    P: AsRef<str>,
    E: AsRef<str>,
{
    conn.execute(
        "INSERT INTO contacts (first_name, last_name) VALUES (?, ?)",
        params![first_name, last_name],
    )?;
    let contact_id = conn.last_insert_rowid();

    for phone in phones {
        conn.execute(
            "INSERT INTO phones (contact_id, phone) VALUES (?, ?)",
            params![contact_id, phone.as_ref()],
        )?;
    }

    for email in emails {
        conn.execute(
            "INSERT INTO emails (contact_id, email) VALUES (?, ?)",
            params![contact_id, email.as_ref()],
        )?;
    }

    Ok(contact_id)
}

fn update_contact_rows<P, E>(
    conn: &Connection,
    id: i64,
    first_name: &str,
    last_name: &str,
    phones: &[P],
    emails: &[E],
) -> StoreResult<()>
where
    P: AsRef<str>,
    E: AsRef<str>,
{
    let updated = conn.execute(
        "UPDATE contacts SET first_name = ?, last_name = ? WHERE id = ?",
        params![first_name, last_name, id],
    )?;
    if updated == 0 {
        return Err(StoreError::ContactIdNotFound(id));
    }

    if let Some(phone) = phones.first() {
        conn.execute(
            "UPDATE phones SET phone = ? WHERE contact_id = ?",
            params![phone.as_ref(), id],
        )?;
    }

    if let Some(email) = emails.first() {
        conn.execute(
            "UPDATE emails SET email = ? WHERE contact_id = ?",
            params![email.as_ref(), id],
        )?;
    }

    Ok(())
}

/// Children are removed explicitly so that tables created without
/// `ON DELETE CASCADE` are cleaned up as well.
fn delete_contact_rows(conn: &Connection, id: i64) -> StoreResult<()> {
    conn.execute("DELETE FROM phones WHERE contact_id = ?", [id])?;
    conn.execute("DELETE FROM emails WHERE contact_id = ?", [id])?;
    let rows = conn.execute("DELETE FROM contacts WHERE id = ?", [id])?;
    if rows == 0 {
        return Err(StoreError::ContactIdNotFound(id));
    }
    Ok(())
}

fn resolve_contact_id(conn: &Connection, first_name: &str, last_name: &str) -> StoreResult<i64> {
    let mut stmt = conn.prepare(
        "SELECT id FROM contacts WHERE first_name = ? AND last_name = ? ORDER BY id ASC",
    )?;
    let ids = stmt
        .query_map(params![first_name, last_name], |row| row.get::<_, i64>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    match ids.as_slice() {
        [] => Err(StoreError::not_found(first_name, last_name)),
        [id] => Ok(*id),
        [id, ..] => {
            warn!(
                first_name,
                last_name,
                matches = ids.len(),
                chosen = *id,
                "name matches several contacts, using the lowest id"
            );
            Ok(*id)
        }
    }
}

/// Escape LIKE metacharacters (% _ \)
fn escape_like(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' | '_' | '\\' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

// ==================== ROW MAPPERS ====================

fn row_to_contact(row: &Row) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
    })
}

fn row_to_phone(row: &Row) -> rusqlite::Result<Phone> {
    Ok(Phone {
        id: row.get("id")?,
        contact_id: row.get("contact_id")?,
        phone_number: row.get("phone")?,
    })
}

fn row_to_email(row: &Row) -> rusqlite::Result<Email> {
    Ok(Email {
        id: row.get("id")?,
        contact_id: row.get("contact_id")?,
        email_address: row.get("email")?,
    })
}
