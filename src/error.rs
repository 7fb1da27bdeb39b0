use crate::domain::validation::ValidationError;
use crate::services::store::StoreError;
use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid submission: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Persistence(#[from] StoreError),
    #[error("Unreadable request body: {0}")]
    Body(#[from] BytesRejection),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation(e) => {
                tracing::debug!(reason = %e, "Rejected contact submission");
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            Self::Persistence(e) => {
                let category = e.category();
                tracing::error!(
                    error = %e.message,
                    code = e.code.as_deref().unwrap_or("none"),
                    category = category.as_str(),
                    "Failed to store contact submission"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, category.user_message().to_string())
            }
            Self::Body(e) => {
                let status = e.status();
                tracing::debug!(status = status.as_u16(), reason = %e.body_text(), "Rejected request body");
                let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    "Request body is too large."
                } else {
                    "Could not read request body."
                };
                (status, message.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
