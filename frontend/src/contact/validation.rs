use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::draft::{Draft, Field};
use super::mailer::EmailParams;
use crate::config;

pub const PLACEHOLDER: &str = "N/A";

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    EmailInvalid,
}

impl ValidationError {
    pub fn field(self) -> Field {
        match self {
            ValidationError::NameRequired | ValidationError::NameTooShort => Field::Name,
            ValidationError::EmailRequired | ValidationError::EmailInvalid => Field::Email,
        }
    }
}

/// Trims, strips angle brackets and caps the value at
/// [`config::MAX_INPUT_LENGTH`] UTF-16 code units.
pub fn sanitize(input: &str) -> String {
    let mut units = 0;
    input
        .trim()
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .take_while(|c| {
            units += c.len_utf16();
            units <= config::MAX_INPUT_LENGTH
        })
        .collect()
}

fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

fn or_placeholder(value: String) -> String {
    if value.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        value
    }
}

/// A sanitized, validated contact request. Optional fields carry
/// [`PLACEHOLDER`] when left blank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub organization: String,
    pub location: String,
    pub message: String,
}

impl Submission {
    pub fn into_params(self, to_email: &str) -> EmailParams {
        EmailParams {
            to_email: to_email.to_string(),
            from_name: self.name,
            from_email: self.email,
            phone: self.phone,
            organization: self.organization,
            location: self.location,
            message: self.message,
        }
    }
}

/// Validates the raw form values. Errors come back in field order, at most
/// one per field.
pub fn validate(fields: &Draft) -> Result<Submission, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let name = sanitize(&fields.name);
    if name.is_empty() {
        errors.push(ValidationError::NameRequired);
    } else if utf16_len(&name) < 2 {
        errors.push(ValidationError::NameTooShort);
    }

    let email = sanitize(&fields.email);
    if email.is_empty() {
        errors.push(ValidationError::EmailRequired);
    } else if !EMAIL_PATTERN.is_match(&email) {
        errors.push(ValidationError::EmailInvalid);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Submission {
        name,
        email,
        phone: or_placeholder(sanitize(&fields.phone)),
        organization: or_placeholder(sanitize(&fields.organization)),
        location: or_placeholder(sanitize(&fields.location)),
        message: or_placeholder(sanitize(&fields.message)),
    })
}
