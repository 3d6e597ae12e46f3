//! Uzbek mobile number normalization.

/// Country calling code without the plus sign.
pub const COUNTRY_CODE: &str = "998";

/// Mobile operator prefixes accepted for local 9-digit input.
pub const OPERATOR_PREFIXES: [&str; 8] = ["90", "91", "93", "94", "95", "97", "98", "99"];

/// Normalize a phone number to `+998XXXXXXXXX`.
///
/// Non-digit characters are ignored. Accepts a 9-digit local number with a
/// known operator prefix, or a 12-digit number starting with `998`.
/// Returns `None` for anything else. Idempotent on its own output.
pub fn normalize_phone(input: &str) -> Option<String> {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();

    let local = match digits.len() {
        9 if OPERATOR_PREFIXES.iter().any(|p| digits.starts_with(p)) => digits.as_str(),
        12 if digits.starts_with(COUNTRY_CODE) => &digits[COUNTRY_CODE.len()..],
        _ => return None,
    };

    Some(format!("+{}{}", COUNTRY_CODE, local))
}
