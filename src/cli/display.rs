use crate::models::ContactDetail;

/// Lines of the details view: names, then phones and emails joined by ", "
pub fn format_contact_detail(detail: &ContactDetail) -> Vec<String> {
    vec![
        format!("First name: {}", detail.contact.first_name),
        format!("Last name:  {}", detail.contact.last_name),
        format!("Phone:      {}", detail.phone_numbers().join(", ")),
        format!("Email:      {}", detail.email_addresses().join(", ")),
    ]
}

pub fn print_contact_detail(detail: &ContactDetail) {
    for line in format_contact_detail(detail) {
        println!("{}", line.trim_end());
    }
}
