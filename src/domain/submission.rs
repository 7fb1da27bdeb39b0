use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Raw contact form fields as they arrive from a client. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactFormInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ContactFormInput {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: Some(name.into()), email: Some(email.into()), message: Some(message.into()) }
    }

    /// True when every field is present and non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.message].iter().all(|field| field.as_deref().is_some_and(|v| !v.is_empty()))
    }
}

/// A contact form that passed every validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) message: String,
}

impl ContactForm {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Stamps the form with the server clock, producing the row to insert.
    #[must_use]
    pub fn into_new_submission(self, created_at: OffsetDateTime) -> NewSubmission {
        NewSubmission { name: self.name, email: self.email, message: self.message, created_at }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: OffsetDateTime,
}

/// A persisted submission as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// What the store hands back after a successful insert.
///
/// Serialized untagged: stored rows become a JSON array, the demo notice an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SubmissionReceipt {
    Stored(Vec<ContactSubmission>),
    Demo { message: String },
}

impl SubmissionReceipt {
    #[must_use]
    pub fn submission_ids(&self) -> Vec<&str> {
        match self {
            Self::Stored(rows) => rows.iter().map(|row| row.id.as_str()).collect(),
            Self::Demo { .. } => Vec::new(),
        }
    }
}
