//! Display helpers for contacts

use crate::contact::Contact;

/// Strip everything except ASCII digits.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Render a US phone number as `(AAA) BBB-CCCC` or `+1 (AAA) BBB-CCCC`.
///
/// Only exactly 10 digits, or 11 digits with a leading `1`, are reformatted.
/// Any other shape (7-digit local numbers, international numbers) is returned
/// exactly as given.
///
/// # Example
/// ```
/// use contactbook_core::format::format_us_phone_number;
///
/// assert_eq!(format_us_phone_number("4155551212"), "(415) 555-1212");
/// assert_eq!(format_us_phone_number("555-1212"), "555-1212");
/// ```
pub fn format_us_phone_number(value: &str) -> String {
    let digits = digits_only(value);

    match digits.len() {
        11 if digits.starts_with('1') => {
            let d = &digits[1..];
            format!("+1 ({}) {}-{}", &d[0..3], &d[3..6], &d[6..10])
        }
        10 => format!("({}) {}-{}", &digits[0..3], &digits[3..6], &digits[6..10]),
        _ => value.to_owned(),
    }
}

/// Three-line text block for pasting a contact into an email.
pub fn build_contact_email_clipboard_text(contact: &Contact) -> String {
    format!(
        "Name: {}\nEmail: {}\nPhone: {}",
        contact.name,
        contact.email,
        format_us_phone_number(&contact.phone)
    )
}
