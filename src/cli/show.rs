use anyhow::Result;

use super::display::print_contact_detail;
use super::ContactRef;
use crate::db::Database;
use crate::models::ContactDetail;

/// Execute the show command
pub fn run_show(db: &Database, target: &ContactRef) -> Result<ContactDetail> {
    let detail = load_detail(db, target)?;
    print_contact_detail(&detail);
    Ok(detail)
}

pub(crate) fn load_detail(db: &Database, target: &ContactRef) -> Result<ContactDetail> {
    let detail = match target {
        ContactRef::Id(id) => db.get_contact_detail(*id)?,
        ContactRef::Name { first, last } => db.get_contact_details(first, last)?,
    };
    Ok(detail)
}
