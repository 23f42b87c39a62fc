use anyhow::Result;

use crate::db::Database;
use crate::models::Contact;

/// Execute the list command
pub fn run_list(db: &Database, show_ids: bool) -> Result<()> {
    let contacts = db.list_contacts()?;
    if contacts.is_empty() {
        println!("No contacts.");
        return Ok(());
    }

    for line in render_lines(&contacts, show_ids) {
        println!("{}", line);
    }
    Ok(())
}

/// Execute the search command
pub fn run_search(db: &Database, prefix: &str, show_ids: bool) -> Result<()> {
    let contacts = db.search_contacts(prefix)?;
    if contacts.is_empty() {
        println!("No matches.");
        return Ok(());
    }

    for line in render_lines(&contacts, show_ids) {
        println!("{}", line);
    }
    Ok(())
}

/// One line per contact, "last first", optionally prefixed with the id
pub fn render_lines(contacts: &[Contact], show_ids: bool) -> Vec<String> {
    contacts
        .iter()
        .map(|c| {
            if show_ids {
                format!("[{}] {}", c.id, c.list_label())
            } else {
                c.list_label()
            }
        })
        .collect()
}
