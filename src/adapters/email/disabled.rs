use crate::domain::submission::NewSubmission;
use crate::services::notifier::{ContactNotifier, MailError};
use async_trait::async_trait;

/// Used when no email credentials are configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl ContactNotifier for DisabledNotifier {
    async fn notify(&self, _submission: &NewSubmission) -> Result<(), MailError> {
        tracing::debug!("Email notifications disabled, skipping");
        Ok(())
    }
}
