use anyhow::Result;
use inquire::Confirm;

use super::display::print_contact_detail;
use super::show::load_detail;
use super::ContactRef;
use crate::db::Database;

/// Execute the delete command. Returns whether a contact was deleted.
pub fn run_delete(db: &Database, target: &ContactRef, force: bool) -> Result<bool> {
    if force {
        let label = match target {
            ContactRef::Name { first, last } => {
                db.delete_contact(first, last)?;
                format!("{} {}", last, first)
            }
            ContactRef::Id(id) => {
                let contact = load_detail(db, target)?.contact;
                db.delete_contact_by_id(*id)?;
                contact.list_label()
            }
        };
        println!("Deleted: {}", label);
        return Ok(true);
    }

    let detail = load_detail(db, target)?;
    print_contact_detail(&detail);
    println!();

    let confirmed = Confirm::new(&format!("Delete {}?", detail.contact.list_label()))
        .with_default(false)
        .prompt()
        .unwrap_or(false);

    if !confirmed {
        println!("Cancelled.");
        return Ok(false);
    }

    // Delete by id so a name collision cannot hit a different row
    db.delete_contact_by_id(detail.contact.id)?;
    println!("Deleted: {}", detail.contact.list_label());
    Ok(true)
}
