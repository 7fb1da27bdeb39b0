use crate::api::AppState;
use crate::api::schemas::contact::ContactAccepted;
use crate::domain::submission::ContactFormInput;
use crate::domain::validation::ValidationError;
use crate::error::{AppError, Result};
use crate::services::contact_service::SUCCESS_MESSAGE;
use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    response::IntoResponse,
};

/// `POST /api/contact`. The body is read as JSON whatever its declared content type;
/// anything unparseable is treated the same as missing fields.
pub async fn submit(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse> {
    let body = body?;
    let input: ContactFormInput = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "Failed to parse contact payload");
        AppError::Validation(ValidationError::MissingFields)
    })?;

    let receipt = state.contact_service.submit(input).await?;

    Ok(Json(ContactAccepted::new(SUCCESS_MESSAGE, receipt)))
}
