//! Format predicates for phone numbers, identity cards, URLs, emails and names.

use regex::Regex;
use serde_json::Value;
use std::borrow::Cow;
use std::sync::OnceLock;

// Pre-compiled regex patterns. Digits are `[0-9]`, `\d` also matches non-ASCII digits.
static MOBILE_REGEX: OnceLock<Regex> = OnceLock::new();
static LANDLINE_REGEX: OnceLock<Regex> = OnceLock::new();
static ID_CARD_18_REGEX: OnceLock<Regex> = OnceLock::new();
static ID_CARD_15_REGEX: OnceLock<Regex> = OnceLock::new();
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static URL_REGEX: OnceLock<Regex> = OnceLock::new();
static NAME_REGEX: OnceLock<Regex> = OnceLock::new();

/// Weights for the ISO 7064 MOD 11-2 check digit of an 18-digit ID.
const ID_CARD_WEIGHTS: [u32; 17] = [7, 9, 10, 5, 8, 4, 2, 1, 6, 3, 7, 9, 10, 5, 8, 4, 2];
const ID_CARD_CHECK_CODES: [u8; 11] = *b"10X98765432";

fn mobile_regex() -> &'static Regex {
    MOBILE_REGEX.get_or_init(|| Regex::new(r"^1[3-9][0-9]{9}$").unwrap())
}

fn landline_regex() -> &'static Regex {
    // [area code with optional dash] subscriber number [optional extension]
    LANDLINE_REGEX.get_or_init(|| Regex::new(r"^(?:0[0-9]{2,3}-?)?[2-9][0-9]{6,7}(?:-[0-9]{1,6})?$").unwrap())
}

fn id_card_18_regex() -> &'static Regex {
    ID_CARD_18_REGEX.get_or_init(|| {
        Regex::new(r"^[1-9][0-9]{5}((?:18|19|20)[0-9]{2})([0-9]{2})([0-9]{2})[0-9]{3}[0-9Xx]$").unwrap()
    })
}

fn id_card_15_regex() -> &'static Regex {
    ID_CARD_15_REGEX.get_or_init(|| Regex::new(r"^[1-9][0-9]{5}([0-9]{2})([0-9]{2})([0-9]{2})[0-9]{3}$").unwrap())
}

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        // RFC 5322 simplified email regex
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
        ).unwrap()
    })
}

fn url_regex() -> &'static Regex {
    URL_REGEX.get_or_init(|| Regex::new(r"^(https?|ftp)://[^\s/$.?#].[^\s]*$").unwrap())
}

fn name_regex() -> &'static Regex {
    // Han characters, optionally joined by a middle dot for transliterated names
    NAME_REGEX.get_or_init(|| {
        Regex::new(r"^[\x{4e00}-\x{9fa5}]+(?:·[\x{4e00}-\x{9fa5}]+)*$").unwrap()
    })
}

/// Text of a string or number value; `None` for every other shape.
fn phone_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        _ => None,
    }
}

/// Check whether a value is a mainland China mobile number (`1[3-9]` + 9 digits).
pub fn is_chinese_mobile_phone(value: &Value) -> bool {
    phone_text(value).is_some_and(|s| mobile_regex().is_match(&s))
}

/// Check whether a value is a mainland China landline number.
///
/// Accepts an optional area code (`010`, `0755-`), a 7 or 8 digit subscriber
/// number and an optional dash-separated extension.
pub fn is_chinese_landline(value: &Value) -> bool {
    phone_text(value).is_some_and(|s| landline_regex().is_match(&s))
}

/// Check whether a value is either a mobile or a landline number.
pub fn is_chinese_phone(value: &Value) -> bool {
    is_chinese_mobile_phone(value) || is_chinese_landline(value)
}

/// Check whether a value is a resident identity card number.
///
/// 18-character numbers must carry a real birth date and a correct check
/// digit (`X` accepted in either case). Legacy 15-digit numbers are checked
/// for their birth date only.
pub fn is_chinese_id_card(value: &Value) -> bool {
    let Some(text) = phone_text(value) else {
        return false;
    };

    if let Some(caps) = id_card_18_regex().captures(&text) {
        let birth_ok = match (
            caps[1].parse::<u32>(),
            caps[2].parse::<u32>(),
            caps[3].parse::<u32>(),
        ) {
            (Ok(y), Ok(m), Ok(d)) => is_calendar_date(y, m, d),
            _ => false,
        };
        return birth_ok && id_card_check_digit_ok(text.as_bytes());
    }

    if let Some(caps) = id_card_15_regex().captures(&text) {
        return match (
            caps[1].parse::<u32>(),
            caps[2].parse::<u32>(),
            caps[3].parse::<u32>(),
        ) {
            (Ok(y), Ok(m), Ok(d)) => is_calendar_date(1900 + y, m, d),
            _ => false,
        };
    }

    false
}

/// Check whether a value is an `http`, `https` or `ftp` URL.
pub fn is_url(value: &Value) -> bool {
    value.as_str().is_some_and(|s| url_regex().is_match(s))
}

/// Check whether a value is an email address.
pub fn is_email(value: &Value) -> bool {
    value.as_str().is_some_and(|s| email_regex().is_match(s))
}

/// Check whether a value is a personal name written in Han characters.
///
/// At least two characters are required; `·` may join name parts.
pub fn is_chinese_name(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| s.chars().count() >= 2 && name_regex().is_match(s))
}

fn id_card_check_digit_ok(id: &[u8]) -> bool {
    let sum: u32 = id[..17]
        .iter()
        .zip(ID_CARD_WEIGHTS)
        .map(|(digit, weight)| u32::from(digit - b'0') * weight)
        .sum();
    let expected = ID_CARD_CHECK_CODES[(sum % 11) as usize];
    id[17].to_ascii_uppercase() == expected
}

fn is_calendar_date(year: u32, month: u32, day: u32) -> bool {
    let days_in_month = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        _ => return false,
    };
    (1..=days_in_month).contains(&day)
}
