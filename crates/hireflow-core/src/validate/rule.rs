//! Declarative validation rules.
//!
//! Rules are `'static` data so every wizard's rule set can live in a `static`
//! table. Each rule targets one field (where its message is reported) and may
//! read other fields; those are its dependencies, revalidated when they change.

use std::collections::BTreeMap;

use hireflow_types::field::FieldValue;

use super::field::{
    parse_date, validate_date, validate_email, validate_file, validate_github, validate_linkedin,
    validate_name, validate_password, validate_phone, validate_salary, validate_url,
};

/// One check against a draft's fields.
///
/// Format rules (`Email`, `Phone`, `Url`, ...) pass on blank values; pair them
/// with `Required` for mandatory fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required {
        field: &'static str,
        message: &'static str,
    },
    Email {
        field: &'static str,
        message: &'static str,
    },
    Phone {
        field: &'static str,
        message: &'static str,
    },
    Password {
        field: &'static str,
        message: &'static str,
    },
    Url {
        field: &'static str,
        message: &'static str,
    },
    LinkedIn {
        field: &'static str,
        message: &'static str,
    },
    GitHub {
        field: &'static str,
        message: &'static str,
    },
    Name {
        field: &'static str,
        message: &'static str,
    },
    Salary {
        field: &'static str,
        message: &'static str,
    },
    Date {
        field: &'static str,
        message: &'static str,
    },
    /// Date format check on an end date, skipped while `ongoing` is set.
    EndDate {
        field: &'static str,
        ongoing: &'static str,
        message: &'static str,
    },
    /// Trimmed character count of a non-blank text.
    MinLength {
        field: &'static str,
        min: usize,
        message: &'static str,
    },
    /// Number of non-blank entries in a list.
    MinEntries {
        field: &'static str,
        min: usize,
        message: &'static str,
    },
    /// `field` must equal `other` (confirm-password).
    Matches {
        field: &'static str,
        other: &'static str,
        message: &'static str,
    },
    /// `end` must not precede `start` unless the `ongoing` flag is set.
    DateOrder {
        start: &'static str,
        end: &'static str,
        ongoing: &'static str,
        message: &'static str,
    },
    /// Boolean that must be checked (terms of service).
    Accepted {
        field: &'static str,
        message: &'static str,
    },
    /// Selected file must have an accepted extension and size.
    File {
        field: &'static str,
        accept: &'static [&'static str],
        max_bytes: u64,
        message: &'static str,
    },
}

impl Rule {
    /// Field the failure message is reported against.
    pub fn target(&self) -> &'static str {
        match *self {
            Rule::Required { field, .. }
            | Rule::Email { field, .. }
            | Rule::Phone { field, .. }
            | Rule::Password { field, .. }
            | Rule::Url { field, .. }
            | Rule::LinkedIn { field, .. }
            | Rule::GitHub { field, .. }
            | Rule::Name { field, .. }
            | Rule::Salary { field, .. }
            | Rule::Date { field, .. }
            | Rule::EndDate { field, .. }
            | Rule::MinLength { field, .. }
            | Rule::MinEntries { field, .. }
            | Rule::Matches { field, .. }
            | Rule::Accepted { field, .. }
            | Rule::File { field, .. } => field,
            Rule::DateOrder { end, .. } => end,
        }
    }

    /// Other fields whose value this rule reads.
    pub fn dependencies(&self) -> Vec<&'static str> {
        match *self {
            Rule::Matches { other, .. } => vec![other],
            Rule::EndDate { ongoing, .. } => vec![ongoing],
            Rule::DateOrder { start, ongoing, .. } => vec![start, ongoing],
            _ => Vec::new(),
        }
    }

    pub fn message(&self) -> &'static str {
        match *self {
            Rule::Required { message, .. }
            | Rule::Email { message, .. }
            | Rule::Phone { message, .. }
            | Rule::Password { message, .. }
            | Rule::Url { message, .. }
            | Rule::LinkedIn { message, .. }
            | Rule::GitHub { message, .. }
            | Rule::Name { message, .. }
            | Rule::Salary { message, .. }
            | Rule::Date { message, .. }
            | Rule::EndDate { message, .. }
            | Rule::MinLength { message, .. }
            | Rule::MinEntries { message, .. }
            | Rule::Matches { message, .. }
            | Rule::DateOrder { message, .. }
            | Rule::Accepted { message, .. }
            | Rule::File { message, .. } => message,
        }
    }

    /// Whether the rule holds for the given fields.
    pub fn passes(&self, fields: &BTreeMap<String, FieldValue>) -> bool {
        match *self {
            Rule::Required { field, .. } => fields.get(field).is_some_and(|v| !v.is_blank()),
            Rule::Email { field, .. } => format_ok(fields, field, validate_email),
            Rule::Phone { field, .. } => format_ok(fields, field, validate_phone),
            Rule::Password { field, .. } => format_ok(fields, field, password_ok),
            Rule::Url { field, .. } => format_ok(fields, field, validate_url),
            Rule::LinkedIn { field, .. } => format_ok(fields, field, validate_linkedin),
            Rule::GitHub { field, .. } => format_ok(fields, field, validate_github),
            Rule::Name { field, .. } => format_ok(fields, field, validate_name),
            Rule::Salary { field, .. } => format_ok(fields, field, validate_salary),
            Rule::Date { field, .. } => format_ok(fields, field, validate_date),
            Rule::EndDate { field, ongoing, .. } => {
                flag_of(fields, ongoing) || format_ok(fields, field, validate_date)
            }
            Rule::MinLength { field, min, .. } => {
                let value = text_of(fields, field).trim();
                value.is_empty() || value.chars().count() >= min
            }
            Rule::MinEntries { field, min, .. } => {
                let count = fields
                    .get(field)
                    .and_then(FieldValue::as_list)
                    .map(|items| items.iter().filter(|i| !i.trim().is_empty()).count())
                    .unwrap_or(0);
                count >= min
            }
            Rule::Matches { field, other, .. } => {
                let value = text_of(fields, field);
                value.is_empty() || value == text_of(fields, other)
            }
            Rule::DateOrder {
                start,
                end,
                ongoing,
                ..
            } => {
                if flag_of(fields, ongoing) {
                    return true;
                }
                match (
                    parse_date(text_of(fields, start)),
                    parse_date(text_of(fields, end)),
                ) {
                    (Some(s), Some(e)) => e >= s,
                    // Missing or malformed dates are someone else's message.
                    _ => true,
                }
            }
            Rule::Accepted { field, .. } => flag_of(fields, field),
            Rule::File {
                field,
                accept,
                max_bytes,
                ..
            } => match fields.get(field).and_then(FieldValue::as_file) {
                Some(file) => validate_file(file, accept, max_bytes),
                None => true,
            },
        }
    }
}

/// Blank values pass every format check.
fn format_ok(fields: &BTreeMap<String, FieldValue>, name: &str, check: fn(&str) -> bool) -> bool {
    let value = text_of(fields, name);
    value.trim().is_empty() || check(value)
}

fn password_ok(value: &str) -> bool {
    validate_password(value).is_valid
}

fn flag_of(fields: &BTreeMap<String, FieldValue>, name: &str) -> bool {
    fields
        .get(name)
        .and_then(FieldValue::as_flag)
        .unwrap_or(false)
}

/// Text or choice value of a field, empty when missing.
fn text_of<'a>(fields: &'a BTreeMap<String, FieldValue>, name: &str) -> &'a str {
    fields.get(name).and_then(FieldValue::as_text).unwrap_or("")
}
