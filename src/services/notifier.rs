use crate::domain::submission::NewSubmission;
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Email API rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Email transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// A fully addressed, rendered email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait ContactNotifier: Send + Sync + std::fmt::Debug {
    /// Tells the site owner about a stored submission.
    ///
    /// # Errors
    /// Returns `MailError` when delivery fails. Callers treat this as non-fatal.
    async fn notify(&self, submission: &NewSubmission) -> Result<(), MailError>;
}

/// Builds the owner notification. Replies go straight to the submitter.
#[must_use]
pub fn render_notification(submission: &NewSubmission, from: &str, to: &str) -> OutboundEmail {
    let name = escape_html(&submission.name);
    let email = escape_html(&submission.email);
    let message = escape_html(&submission.message).replace('\n', "<br>");

    let html = format!(
        "<h2>New contact form submission</h2>\
         <p><strong>Name:</strong> {name}</p>\
         <p><strong>Email:</strong> {email}</p>\
         <p><strong>Message:</strong></p>\
         <p>{message}</p>"
    );

    OutboundEmail {
        from: from.to_owned(),
        to: vec![to.to_owned()],
        reply_to: submission.email.clone(),
        subject: format!("New contact form submission from {}", submission.name),
        html,
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
