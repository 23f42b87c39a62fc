mod contact;
mod contact_detail;
mod email;
mod import_row;
mod phone;

pub use contact::Contact;
pub use contact_detail::ContactDetail;
pub use email::Email;
pub use import_row::ImportRow;
pub use phone::Phone;
