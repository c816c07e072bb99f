//! Phone number validation and canonicalisation

use once_cell::sync::Lazy;
use regex::Regex;

/// Whitespace, hyphens and parentheses stripped before matching
static FORMATTING_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-\(\)]").unwrap());

/// Accepted formats: generic international, Azerbaijani mobile, national mobile
static ACCEPTED_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\+\d{10,15}$").unwrap(),
        Regex::new(r"^\+994(50|51|55|70|77|99)\d{7}$").unwrap(),
        Regex::new(r"^0(50|51|55|70|77|99)\d{7}$").unwrap(),
    ]
});

const MIN_DIGITS: usize = 10;
const MAX_DIGITS: usize = 15;
const NATIONAL_LENGTH: usize = 10;

/// Validates and canonicalises phone numbers
///
/// `normalize` maps everything `validate` accepts to a stable `+<digits>`
/// form, which is the storage key.
#[derive(Debug, Clone)]
pub struct PhoneValidator {
    country_code: String,
}

impl PhoneValidator {
    /// `country_code` is given without the leading `+`
    pub fn new(country_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
        }
    }

    pub fn validate(&self, raw: &str) -> bool {
        let mut cleaned = Self::clean(raw);
        if Self::is_national(&cleaned) {
            cleaned = format!("+{}{}", self.country_code, &cleaned[1..]);
        }

        let digits = cleaned.chars().filter(|c| c.is_ascii_digit()).count();
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits) {
            return false;
        }

        ACCEPTED_PATTERNS.iter().any(|p| p.is_match(&cleaned))
    }

    pub fn normalize(&self, raw: &str) -> String {
        let cleaned = Self::clean(raw);
        if cleaned.starts_with('+') {
            cleaned
        } else if cleaned.starts_with(&self.country_code) {
            format!("+{}", cleaned)
        } else if Self::is_national(&cleaned) {
            format!("+{}{}", self.country_code, &cleaned[1..])
        } else {
            cleaned
        }
    }

    fn clean(raw: &str) -> String {
        FORMATTING_REGEX.replace_all(raw, "").into_owned()
    }

    fn is_national(cleaned: &str) -> bool {
        cleaned.starts_with('0') && cleaned.len() == NATIONAL_LENGTH
    }
}

impl Default for PhoneValidator {
    fn default() -> Self {
        Self::new("994")
    }
}
