use crate::domain::submission::{ContactFormInput, NewSubmission, SubmissionReceipt};
use crate::domain::validation::check_submission;
use crate::error::Result;
use crate::services::notifier::ContactNotifier;
use crate::services::store::SubmissionStore;
use opentelemetry::{KeyValue, global, metrics::Counter};
use std::fmt;
use std::sync::Arc;
use time::OffsetDateTime;

pub const SUCCESS_MESSAGE: &str = "Thank you for your message! I will get back to you soon.";

/// Where a single submission got to before a response was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStage {
    Received,
    Validated,
    Persisted,
    Notified,
}

impl SubmissionStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Validated => "validated",
            Self::Persisted => "persisted",
            Self::Notified => "notified",
        }
    }
}

impl fmt::Display for SubmissionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
struct Metrics {
    submissions_total: Counter<u64>,
    notifications_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("portfolio-server");
        Self {
            submissions_total: meter
                .u64_counter("contact_submissions_total")
                .with_description("Contact submissions by outcome (accepted, rejected, failed)")
                .build(),
            notifications_total: meter
                .u64_counter("contact_notifications_total")
                .with_description("Owner notification attempts by outcome (sent, failed)")
                .build(),
        }
    }
}

/// Runs the contact pipeline: validate, store, notify. No retries, one insert per call.
#[derive(Clone, Debug)]
pub struct ContactService {
    store: Arc<dyn SubmissionStore>,
    notifier: Arc<dyn ContactNotifier>,
    metrics: Metrics,
}

impl ContactService {
    #[must_use]
    pub fn new(store: Arc<dyn SubmissionStore>, notifier: Arc<dyn ContactNotifier>) -> Self {
        Self { store, notifier, metrics: Metrics::new() }
    }

    /// Validates and stores one submission, then notifies the owner on a best-effort basis.
    ///
    /// # Errors
    /// Returns `AppError::Validation` before any side effect when the input is rejected,
    /// or `AppError::Persistence` when the store fails. Notification failures are never returned.
    #[tracing::instrument(
        skip(self, input),
        fields(stage = %SubmissionStage::Received, submission_id = tracing::field::Empty),
        err(level = "warn")
    )]
    pub async fn submit(&self, input: ContactFormInput) -> Result<SubmissionReceipt> {
        let form = check_submission(&input).inspect_err(|_| {
            self.metrics.submissions_total.add(1, &[KeyValue::new("outcome", "rejected")]);
        })?;
        record_stage(SubmissionStage::Validated);

        let submission = form.into_new_submission(OffsetDateTime::now_utc());
        let receipt = self.store.insert(&submission).await.inspect_err(|_| {
            self.metrics.submissions_total.add(1, &[KeyValue::new("outcome", "failed")]);
        })?;
        record_stage(SubmissionStage::Persisted);
        if let Some(id) = receipt.submission_ids().first() {
            tracing::Span::current().record("submission_id", *id);
        }
        self.metrics.submissions_total.add(1, &[KeyValue::new("outcome", "accepted")]);
        tracing::info!(message_len = submission.message.chars().count(), "Contact submission stored");

        self.notify(&submission).await;
        record_stage(SubmissionStage::Notified);

        Ok(receipt)
    }

    async fn notify(&self, submission: &NewSubmission) {
        match self.notifier.notify(submission).await {
            Ok(()) => {
                self.metrics.notifications_total.add(1, &[KeyValue::new("outcome", "sent")]);
            }
            Err(e) => {
                self.metrics.notifications_total.add(1, &[KeyValue::new("outcome", "failed")]);
                tracing::warn!(error = %e, "Failed to send contact notification");
            }
        }
    }
}

fn record_stage(stage: SubmissionStage) {
    tracing::Span::current().record("stage", stage.as_str());
}
