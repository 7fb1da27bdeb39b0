use crate::domain::submission::{NewSubmission, SubmissionReceipt};
use async_trait::async_trait;
use thiserror::Error;

const UNDEFINED_TABLE: &str = "42P01";
const INSUFFICIENT_PRIVILEGE: &str = "42501";

/// Failure reported by a submission store: the backend's message and, when it has one, its error code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Database error: {message} (Code: {})", .code.as_deref().unwrap_or("none"))]
pub struct StoreError {
    pub message: String,
    pub code: Option<String>,
}

impl StoreError {
    #[must_use]
    pub fn new(message: impl Into<String>, code: Option<String>) -> Self {
        Self { message: message.into(), code }
    }

    /// The backend's own text, as it would appear in its logs.
    #[must_use]
    pub fn raw_text(&self) -> String {
        match &self.code {
            Some(code) => format!("{} (Code: {code})", self.message),
            None => self.message.clone(),
        }
    }

    /// Classifies by SQLSTATE when the backend sent a known one, otherwise by text.
    #[must_use]
    pub fn category(&self) -> FailureCategory {
        match self.code.as_deref() {
            Some(UNDEFINED_TABLE) => FailureCategory::MissingTable,
            Some(INSUFFICIENT_PRIVILEGE) => FailureCategory::PermissionDenied,
            _ => FailureCategory::classify(&self.raw_text()),
        }
    }
}

/// Coarse buckets for turning raw backend error text into something a visitor can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    MissingTable,
    PermissionDenied,
    Store,
    Unknown,
}

impl FailureCategory {
    /// Best-effort substring match on backend error text.
    #[must_use]
    pub fn classify(text: &str) -> Self {
        let lowered = text.to_lowercase();
        if lowered.starts_with("relation ") && lowered.contains("does not exist") {
            Self::MissingTable
        } else if lowered.contains("permission denied") {
            Self::PermissionDenied
        } else if lowered.contains("database error") || lowered.contains("connection") {
            Self::Store
        } else {
            Self::Unknown
        }
    }

    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::MissingTable => "Database table not found. Please contact the site administrator.",
            Self::PermissionDenied => "Database permission denied. Please contact the site administrator.",
            Self::Store => "Database error. Please try again later.",
            Self::Unknown => "Something went wrong. Please try again later.",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingTable => "missing_table",
            Self::PermissionDenied => "permission_denied",
            Self::Store => "store",
            Self::Unknown => "unknown",
        }
    }
}

#[async_trait]
pub trait SubmissionStore: Send + Sync + std::fmt::Debug {
    /// Inserts one submission. Either the row is written and returned, or nothing is written.
    ///
    /// # Errors
    /// Returns `StoreError` with the backend's message and code when the insert fails.
    async fn insert(&self, submission: &NewSubmission) -> Result<SubmissionReceipt, StoreError>;
}
