use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

/// Characters a phone number may be written with: optional leading `+`, then
/// digits, spaces, dashes and parentheses.
pub static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ()\-]+$").expect("valid phone regex"));

/// Digit count allowed once separators are stripped (E.164 caps at 15).
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 7..=15;

/// Phone numbers in the shape of `PHONE_REGEX` carrying 7 to 15 digits.
pub fn valid_phone(value: &str) -> Result<(), ValidationError> {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    if !PHONE_REGEX.is_match(value) || !PHONE_DIGITS.contains(&digits) {
        return Err(ValidationError::new("phone"));
    }
    Ok(())
}

/// Rejects lists with blank entries.
pub fn no_blank_entries(items: &Vec<String>) -> Result<(), ValidationError> {
    if items.iter().any(|s| s.trim().is_empty()) {
        let mut err = ValidationError::new("blank_entry");
        err.message = Some("Entries must not be blank".into());
        return Err(err);
    }
    Ok(())
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be blank".into());
        return Err(err);
    }
    Ok(())
}
