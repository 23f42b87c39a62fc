use anyhow::Result;

use super::prompt::{prompt_field, FormResult};
use crate::db::Database;

type AddForm = (String, String, Vec<String>, Vec<String>);

/// Execute the add command. Returns `None` when the form was cancelled.
pub fn run_add(
    db: &Database,
    first: Option<String>,
    last: Option<String>,
    phones: Vec<String>,
    emails: Vec<String>,
) -> Result<Option<i64>> {
    // If no name provided, run interactive mode
    let (first, last, phones, emails) = if first.is_none() && last.is_none() {
        match interactive_mode(phones, emails)? {
            Some(form) => form,
            None => {
                println!("Cancelled.");
                return Ok(None);
            }
        }
    } else {
        (first.unwrap_or_default(), last.unwrap_or_default(), phones, emails)
    };

    let phones = at_least_one(phones);
    let emails = at_least_one(emails);
    let id = db.add_contact(&first, &last, &phones, &emails)?;

    println!("Created: {} {} (id {})", last, first, id);
    Ok(Some(id))
}

/// A contact always gets a phone row and an email row, empty when nothing
/// was given, so that `edit` has a row to overwrite later.
fn at_least_one(values: Vec<String>) -> Vec<String> {
    if values.is_empty() {
        vec![String::new()]
    } else {
        values
    }
}

/// Prompt for the fields of the add form. Empty answers are kept as empty
/// strings; `None` means the user cancelled.
fn interactive_mode(mut phones: Vec<String>, mut emails: Vec<String>) -> Result<Option<AddForm>> {
    let FormResult::Value(first) = prompt_field("First name", None)? else {
        return Ok(None);
    };
    let FormResult::Value(last) = prompt_field("Last name", None)? else {
        return Ok(None);
    };

    if phones.is_empty() {
        let FormResult::Value(phone) = prompt_field("Phone", None)? else {
            return Ok(None);
        };
        phones.push(phone);
    }

    if emails.is_empty() {
        let FormResult::Value(email) = prompt_field("Email", None)? else {
            return Ok(None);
        };
        emails.push(email);
    }

    Ok(Some((first, last, phones, emails)))
}
