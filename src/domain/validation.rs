use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

// 11 digits: "01", a carrier digit from {0,1,2,5}, then 8 more digits.
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^01[0125]\d{8}$").expect("phone pattern is valid"));
// Four-digit year; month and day may drop their leading zero.
static DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}$").expect("date pattern is valid"));

/// Checks a mobile number against the local carrier numbering scheme.
///
/// No normalization is applied: spaces, dashes or a country prefix make the
/// number invalid.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

/// Parses a `YYYY-MM-DD` calendar date.
///
/// The shape is checked first: chrono alone would accept signed or short
/// years and leading whitespace.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    if !DATE_SHAPE.is_match(text) {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

/// Boolean form of [`parse_date`].
pub fn is_valid_date(text: &str) -> bool {
    parse_date(text).is_some()
}
