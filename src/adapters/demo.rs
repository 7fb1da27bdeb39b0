use crate::domain::submission::{NewSubmission, SubmissionReceipt};
use crate::services::store::{StoreError, SubmissionStore};
use async_trait::async_trait;

pub const DEMO_RECEIPT_MESSAGE: &str = "Thank you for your message! (Demo mode - database not configured)";

/// Stands in for the database when none is configured. Logs the submission and stores nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct DemoSubmissionStore;

#[async_trait]
impl SubmissionStore for DemoSubmissionStore {
    async fn insert(&self, submission: &NewSubmission) -> Result<SubmissionReceipt, StoreError> {
        tracing::info!(
            name = %submission.name,
            email = %submission.email,
            message_len = submission.message.chars().count(),
            "Contact submission received (database not configured)"
        );
        Ok(SubmissionReceipt::Demo { message: DEMO_RECEIPT_MESSAGE.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[tokio::test]
    async fn test_demo_store_returns_notice() {
        let submission = NewSubmission {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            message: "Hello, I would like to collaborate.".to_string(),
            created_at: OffsetDateTime::now_utc(),
        };

        let receipt = DemoSubmissionStore.insert(&submission).await.unwrap();
        assert_eq!(receipt, SubmissionReceipt::Demo { message: DEMO_RECEIPT_MESSAGE.to_string() });
    }
}
