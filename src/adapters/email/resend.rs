use crate::domain::submission::NewSubmission;
use crate::services::notifier::{ContactNotifier, MailError, OutboundEmail, render_notification};
use async_trait::async_trait;
use std::fmt;

/// Sends owner notifications through the Resend HTTP API (`POST /emails`).
#[derive(Clone)]
pub struct ResendNotifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
    to: String,
}

impl fmt::Debug for ResendNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResendNotifier")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

impl ResendNotifier {
    #[must_use]
    pub fn new(client: reqwest::Client, api_base: &str, api_key: &str, from: &str, to: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/emails", api_base.trim_end_matches('/')),
            api_key: api_key.to_owned(),
            from: from.to_owned(),
            to: to.to_owned(),
        }
    }

    /// Posts one rendered email.
    ///
    /// # Errors
    /// Returns `MailError::Transport` if the request cannot be sent, or
    /// `MailError::Rejected` if the API answers with a non-success status.
    #[tracing::instrument(level = "debug", skip(self, email), fields(subject = %email.subject))]
    pub async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let response = self.client.post(&self.endpoint).bearer_auth(&self.api_key).json(email).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected { status: status.as_u16(), body });
        }

        tracing::debug!(status = status.as_u16(), "Notification email accepted");
        Ok(())
    }
}

#[async_trait]
impl ContactNotifier for ResendNotifier {
    async fn notify(&self, submission: &NewSubmission) -> Result<(), MailError> {
        let email = render_notification(submission, &self.from, &self.to);
        self.send(&email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::post};
    use std::sync::{Arc, Mutex};
    use time::macros::datetime;

    type Captured = Arc<Mutex<Vec<(Option<String>, serde_json::Value)>>>;

    async fn spawn_api(status: StatusCode) -> (String, Captured) {
        let captured: Captured = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&captured);
        let app = Router::new().route(
            "/emails",
            post(move |headers: HeaderMap, Json(body): Json<serde_json::Value>| {
                let sink = Arc::clone(&sink);
                async move {
                    let auth = headers.get("authorization").and_then(|v| v.to_str().ok()).map(str::to_owned);
                    sink.lock().unwrap().push((auth, body));
                    (status, Json(serde_json::json!({ "id": "email_1" })))
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/"), captured)
    }

    fn submission() -> NewSubmission {
        NewSubmission {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            message: "Hello, I would like to collaborate.".to_string(),
            created_at: datetime!(2025-01-02 03:04:05 UTC),
        }
    }

    #[tokio::test]
    async fn test_notify_posts_rendered_email() {
        let (base, captured) = spawn_api(StatusCode::OK).await;
        let notifier =
            ResendNotifier::new(reqwest::Client::new(), &base, "re_test", "site@example.com", "owner@example.com");

        notifier.notify(&submission()).await.unwrap();

        let requests = captured.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let (auth, body) = &requests[0];
        assert_eq!(auth.as_deref(), Some("Bearer re_test"));
        assert_eq!(body["from"], "site@example.com");
        assert_eq!(body["to"], serde_json::json!(["owner@example.com"]));
        assert_eq!(body["reply_to"], "jane@example.com");
        assert_eq!(body["subject"], "New contact form submission from Jane Doe");
    }

    #[tokio::test]
    async fn test_non_success_status_is_rejected() {
        let (base, _captured) = spawn_api(StatusCode::UNPROCESSABLE_ENTITY).await;
        let notifier =
            ResendNotifier::new(reqwest::Client::new(), &base, "re_test", "site@example.com", "owner@example.com");

        let err = notifier.notify(&submission()).await.unwrap_err();
        assert!(matches!(err, MailError::Rejected { status: 422, .. }));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let notifier = ResendNotifier::new(
            reqwest::Client::new(),
            "https://api.resend.com",
            "re_secret",
            "site@example.com",
            "owner@example.com",
        );
        let rendered = format!("{notifier:?}");
        assert!(!rendered.contains("re_secret"));
        assert!(rendered.contains("https://api.resend.com/emails"));
    }
}
