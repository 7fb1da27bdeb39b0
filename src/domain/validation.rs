//! The single rule set for contact form input.
//!
//! The submission handler runs these rules authoritatively; presentation code
//! may run [`validate_contact_form`] first to show per-field hints without a
//! round trip.

use crate::domain::submission::{ContactForm, ContactFormInput};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

pub const NAME_MIN_CHARS: usize = 2;
pub const MESSAGE_MIN_CHARS: usize = 10;

pub const NAME_TOO_SHORT: &str = "Name must be at least 2 characters";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const MESSAGE_TOO_SHORT: &str = "Message must be at least 10 characters";

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email shape pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Violations keyed by field, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    fn insert(&mut self, field: Field, message: &'static str) {
        self.0.insert(field, message);
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}

/// Rejections the submission handler reports back to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields are required.")]
    MissingFields,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("{message}.")]
    Rule { field: Field, message: &'static str },
}

/// Permissive `local@domain.tld` shape check. Not RFC 5322 validation.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Applies every rule and collects all violations. Missing fields count as empty.
///
/// # Errors
/// Returns the per-field violations when any rule fails.
pub fn validate_contact_form(input: &ContactFormInput) -> Result<ContactForm, FieldErrors> {
    let name = input.name.as_deref().unwrap_or_default();
    let email = input.email.as_deref().unwrap_or_default();
    let message = input.message.as_deref().unwrap_or_default();

    let mut errors = FieldErrors::default();
    if char_len(name) < NAME_MIN_CHARS {
        errors.insert(Field::Name, NAME_TOO_SHORT);
    }
    if !is_valid_email(email) {
        errors.insert(Field::Email, EMAIL_INVALID);
    }
    if char_len(message) < MESSAGE_MIN_CHARS {
        errors.insert(Field::Message, MESSAGE_TOO_SHORT);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ContactForm { name: name.to_owned(), email: email.to_owned(), message: message.to_owned() })
}

/// The handler's view of the rules: presence first, then email shape, then the rest.
///
/// # Errors
/// Returns the first rejection in that order.
pub fn check_submission(input: &ContactFormInput) -> Result<ContactForm, ValidationError> {
    if !input.is_complete() {
        return Err(ValidationError::MissingFields);
    }

    validate_contact_form(input).map_err(|errors| {
        if errors.get(Field::Email).is_some() {
            return ValidationError::InvalidEmail;
        }
        errors
            .iter()
            .next()
            .map_or(ValidationError::MissingFields, |(field, message)| ValidationError::Rule { field, message })
    })
}
