use anyhow::Result;

use super::prompt::{prompt_field, FormResult};
use super::show::load_detail;
use super::ContactRef;
use crate::db::Database;
use crate::models::ContactDetail;

/// Requested changes to one contact; `None` leaves that part as it is
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EditChanges {
    pub first: Option<String>,
    pub last: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl EditChanges {
    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.last.is_none() && self.phone.is_none() && self.email.is_none()
    }
}

/// Execute the edit command. With no changes given, prompts for each field
/// pre-filled with its current value. Returns `None` when nothing was written.
pub fn run_update(
    db: &Database,
    target: &ContactRef,
    first: Option<String>,
    last: Option<String>,
    phone: Option<String>,
    email: Option<String>,
) -> Result<Option<i64>> {
    let detail = load_detail(db, target)?;

    let requested = EditChanges { first, last, phone, email };
    let mut changes = if requested.is_empty() {
        match edit_form(&detail)? {
            Some(changes) => changes,
            None => {
                println!("Cancelled.");
                return Ok(None);
            }
        }
    } else {
        requested
    };

    // The store only overwrites existing rows
    let label = detail.contact.list_label();
    if changes.phone.is_some() && detail.phones.is_empty() {
        println!("{} has no phone on record; phone not changed.", label);
        changes.phone = None;
    }
    if changes.email.is_some() && detail.emails.is_empty() {
        println!("{} has no email on record; email not changed.", label);
        changes.email = None;
    }

    let current = &detail.contact;
    let new_first = changes.first.unwrap_or_else(|| current.first_name.clone());
    let new_last = changes.last.unwrap_or_else(|| current.last_name.clone());
    let renamed = new_first != current.first_name || new_last != current.last_name;
    if !renamed && changes.phone.is_none() && changes.email.is_none() {
        println!("Nothing to update.");
        return Ok(None);
    }

    let phones: Vec<String> = changes.phone.into_iter().collect();
    let emails: Vec<String> = changes.email.into_iter().collect();

    let id = match target {
        ContactRef::Name { first, last } => {
            db.update_contact(first, last, &new_first, &new_last, &phones, &emails)?
        }
        ContactRef::Id(id) => {
            db.update_contact_by_id(*id, &new_first, &new_last, &phones, &emails)?;
            *id
        }
    };

    println!("Updated: {} {}", new_last, new_first);
    Ok(Some(id))
}

/// Prompt for every field, pre-filled from `detail`. Phone and email are
/// only reported as changes when the answer differs from the first value on
/// record, so an untouched answer never collapses several rows into one.
fn edit_form(detail: &ContactDetail) -> Result<Option<EditChanges>> {
    let contact = &detail.contact;
    let FormResult::Value(first) = prompt_field("First name", Some(&*contact.first_name))? else {
        return Ok(None);
    };
    let FormResult::Value(last) = prompt_field("Last name", Some(&*contact.last_name))? else {
        return Ok(None);
    };

    let current_phone = detail.primary_phone();
    let FormResult::Value(phone) = prompt_field("Phone", current_phone)? else {
        return Ok(None);
    };
    let current_email = detail.primary_email();
    let FormResult::Value(email) = prompt_field("Email", current_email)? else {
        return Ok(None);
    };

    Ok(Some(EditChanges {
        first: Some(first),
        last: Some(last),
        phone: changed(phone, current_phone),
        email: changed(email, current_email),
    }))
}

fn changed(answer: String, current: Option<&str>) -> Option<String> {
    (answer != current.unwrap_or("")).then_some(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    const NONE: &[&str] = &[];

    fn setup_test_db() -> (Database, i64) {
        let db = Database::open_memory().unwrap();
        let id = db
            .add_contact("John", "Smith", &["555-1234"], &["john@example.com"])
            .unwrap();
        (db, id)
    }

    #[test]
    fn test_update_first_name() {
        let (db, id) = setup_test_db();

        let updated = run_update(
            &db,
            &ContactRef::name("John", "Smith"),
            Some("Johnny".to_string()),
            None,
            None,
            None,
        )
        .unwrap();
        assert_eq!(updated, Some(id));

        let detail = db.get_contact_detail(id).unwrap();
        assert_eq!(detail.contact.first_name, "Johnny");
        assert_eq!(detail.contact.last_name, "Smith");
        assert_eq!(detail.phone_numbers(), vec!["555-1234"]);
        assert!(db.find_contact_id("John", "Smith").is_err());
    }

    #[test]
    fn test_update_email_by_id() {
        let (db, id) = setup_test_db();

        run_update(
            &db,
            &ContactRef::Id(id),
            None,
            None,
            None,
            Some("new@example.com".to_string()),
        )
        .unwrap();

        let detail = db.get_contact_detail(id).unwrap();
        assert_eq!(detail.email_addresses(), vec!["new@example.com"]);
        assert_eq!(detail.contact.first_name, "John");
    }

    #[test]
    fn test_update_missing_contact() {
        let (db, _) = setup_test_db();

        let err = run_update(&db, &ContactRef::name("Jane", "Doe"), None, None, None, None)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::ContactNotFound { .. })
        ));
    }

    #[test]
    fn test_phone_without_rows_is_reported_not_written() {
        let db = Database::open_memory().unwrap();
        let id = db.add_contact("Ann", "Lee", NONE, NONE).unwrap();

        let updated = run_update(
            &db,
            &ContactRef::Id(id),
            None,
            None,
            Some("555-9999".to_string()),
            Some("a@b.c".to_string()),
        )
        .unwrap();

        assert_eq!(updated, None);
        let detail = db.get_contact_detail(id).unwrap();
        assert!(detail.phones.is_empty());
        assert!(detail.emails.is_empty());
    }

    #[test]
    fn test_rename_still_applies_when_phone_has_no_rows() {
        let db = Database::open_memory().unwrap();
        let id = db.add_contact("Ann", "Lee", NONE, &["ann@example.com"]).unwrap();

        let updated = run_update(
            &db,
            &ContactRef::name("Ann", "Lee"),
            None,
            Some("Park".to_string()),
            Some("555-9999".to_string()),
            None,
        )
        .unwrap();

        assert_eq!(updated, Some(id));
        let detail = db.get_contact_detail(id).unwrap();
        assert_eq!(detail.contact.last_name, "Park");
        assert!(detail.phones.is_empty());
        assert_eq!(detail.email_addresses(), vec!["ann@example.com"]);
    }

    #[test]
    fn test_changed_compares_with_first_value() {
        assert_eq!(changed("555-1234".to_string(), Some("555-1234")), None);
        assert_eq!(changed("".to_string(), None), None);
        assert_eq!(
            changed("555-0000".to_string(), Some("555-1234")),
            Some("555-0000".to_string())
        );
        assert_eq!(changed("".to_string(), Some("555-1234")), Some(String::new()));
    }

    #[test]
    fn test_edit_changes_is_empty() {
        assert!(EditChanges::default().is_empty());
        assert!(!EditChanges {
            phone: Some(String::new()),
            ..Default::default()
        }
        .is_empty());
    }
}
