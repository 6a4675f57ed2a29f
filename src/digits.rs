//! Localization of numerals between ASCII and Persian script.

/// Persian-script digits indexed by their ASCII value.
pub const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

/// Replaces every ASCII digit with its Persian-script equivalent.
///
/// All other characters pass through unchanged.
pub fn to_persian_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => PERSIAN_DIGITS[d as usize],
            None => c,
        })
        .collect()
}

/// Replaces every Persian-script digit with its ASCII equivalent.
///
/// Inverse of [`to_persian_digits`]; all other characters pass through.
pub fn to_ascii_digits(s: &str) -> String {
    s.chars()
        .map(|c| match PERSIAN_DIGITS.iter().position(|&p| p == c) {
            Some(d) => char::from(b'0' + d as u8),
            None => c,
        })
        .collect()
}
