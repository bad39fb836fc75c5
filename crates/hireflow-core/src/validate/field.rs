//! Single-value format checks.
//!
//! Every function here is pure: same input, same answer. Optional fields
//! (URLs, profile links, salary) treat an empty value as valid; required-ness
//! is expressed separately by [`Rule::Required`](super::rule::Rule::Required).

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use url::Url;

use hireflow_types::field::FileRef;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Minimum password length.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Per-criterion password check, exposed individually for strength meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    pub is_valid: bool,
    pub min_length: bool,
    pub has_upper: bool,
    pub has_lower: bool,
    pub has_digit: bool,
}

impl PasswordStrength {
    /// Number of satisfied criteria, 0..=4.
    pub fn score(&self) -> u8 {
        [self.min_length, self.has_upper, self.has_lower, self.has_digit]
            .iter()
            .filter(|ok| **ok)
            .count() as u8
    }
}

/// `local@domain.tld` shape; no whitespace, exactly one `@`.
pub fn validate_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// 10 to 15 digits once every non-digit is stripped.
pub fn validate_phone(value: &str) -> bool {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    (10..=15).contains(&digits)
}

/// Letter and digit classes are ASCII only; other characters count toward
/// the length and nothing else.
pub fn validate_password(value: &str) -> PasswordStrength {
    let min_length = value.chars().count() >= PASSWORD_MIN_LEN;
    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());

    PasswordStrength {
        is_valid: min_length && has_upper && has_lower && has_digit,
        min_length,
        has_upper,
        has_lower,
        has_digit,
    }
}

/// Empty is valid. Otherwise the value must parse as a URL with a host,
/// after prefixing `https://` when no scheme is given.
pub fn validate_url(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return true;
    }

    let lower = value.to_ascii_lowercase();
    let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
        value.to_string()
    } else {
        format!("https://{value}")
    };

    match Url::parse(&candidate) {
        Ok(url) => url.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}

/// Empty is valid; otherwise the value only has to mention `linkedin.com`.
pub fn validate_linkedin(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.to_ascii_lowercase().contains("linkedin.com")
}

/// Empty is valid; otherwise the value only has to mention `github.com`.
pub fn validate_github(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.to_ascii_lowercase().contains("github.com")
}

/// At least two characters after trimming, and no digits.
pub fn validate_name(value: &str) -> bool {
    let value = value.trim();
    value.chars().count() >= 2 && !value.chars().any(|c| c.is_ascii_digit())
}

/// Free-text salary such as `$50,000 - $80,000` or `90k`. Empty is valid.
pub fn validate_salary(value: &str) -> bool {
    let value = value.trim();
    value.is_empty()
        || value.chars().all(|c| {
            c.is_ascii_digit() || c.is_whitespace() || matches!(c, '$' | ',' | 'k' | 'K' | '-' | '.')
        })
}

/// Parse `YYYY-MM-DD` or `YYYY-MM` (the latter as the first of the month).
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d"))
        .ok()
}

pub fn validate_date(value: &str) -> bool {
    parse_date(value).is_some()
}

/// Extension in `accept` (case-insensitive) and size at most `max_bytes`.
pub fn validate_file(file: &FileRef, accept: &[&str], max_bytes: u64) -> bool {
    let ext_ok = accept.is_empty()
        || file
            .extension()
            .is_some_and(|ext| accept.iter().any(|a| a.eq_ignore_ascii_case(&ext)));
    ext_ok && file.size_bytes <= max_bytes
}
