/// Normalize a phone number to `+55` plus DDD and subscriber digits.
/// Non-digits are stripped, the country code is prepended when absent, and
/// the result is capped at 13 digits. Numbers already starting with `55`
/// are not double-prefixed.
pub fn normalize(input: &str) -> String {
    let mut digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if !digits.starts_with("55") {
        digits.insert_str(0, "55");
    }
    digits.truncate(13);
    format!("+{digits}")
}

/// A complete number carries exactly 13 digits: country code, DDD and a
/// 9-digit mobile number.
pub fn is_complete(phone: &str) -> bool {
    phone.chars().filter(char::is_ascii_digit).count() == 13
}
