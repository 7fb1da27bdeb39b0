use crate::domain::submission::SubmissionReceipt;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ContactAccepted {
    pub success: bool,
    pub message: &'static str,
    pub data: SubmissionReceipt,
}

impl ContactAccepted {
    #[must_use]
    pub const fn new(message: &'static str, data: SubmissionReceipt) -> Self {
        Self { success: true, message, data }
    }
}
