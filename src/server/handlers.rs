// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::error::RelayError;
use crate::models::gemini::GenerateContentRequest;
use crate::vision::read_image_field;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, info};

/// Handler for `POST /operation`.
///
/// Reads the `image` field, asks Gemini to solve the operation shown in it
/// and relays Gemini's response as JSON.
pub async fn operation_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, RelayError> {
    let client = state
        .gemini_client
        .as_ref()
        .ok_or(RelayError::MissingCredential)?;

    let multipart = multipart.map_err(|e| match e.status() {
        StatusCode::PAYLOAD_TOO_LARGE => RelayError::PayloadTooLarge(e.body_text()),
        _ => RelayError::MissingImage(e.body_text()),
    })?;
    let image = read_image_field(multipart).await?;

    info!(image_bytes = image.len(), model = client.model(), "Received operation request");

    let request = GenerateContentRequest::operation(&image);
    let gemini_resp = client.generate_content(&request).await?;

    if let Some(text) = gemini_resp.text() {
        debug!("Gemini answer (first 200 chars): {}", text.chars().take(200).collect::<String>());
    }

    let body = serde_json::to_vec(&gemini_resp).map_err(RelayError::Serialization)?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// Handler for `OPTIONS /operation` (CORS preflight).
///
/// The CORS headers themselves are added by middleware.
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

/// Any other method on `/operation`
pub async fn method_not_allowed_handler() -> RelayError {
    RelayError::MethodNotAllowed
}
