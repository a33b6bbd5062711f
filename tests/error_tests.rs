// Error handling tests
// Author: kelexine (https://github.com/kelexine)

use axum::body::to_bytes;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use gemini_relay::error::RelayError;

#[test]
fn test_error_status_codes() {
    let cases = vec![
        (RelayError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED),
        (RelayError::MissingImage("missing 'image' field".to_string()), StatusCode::BAD_REQUEST),
        (RelayError::ImageRead("connection reset".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        (RelayError::MissingCredential, StatusCode::INTERNAL_SERVER_ERROR),
        (RelayError::GeminiApi("HTTP 503".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        (RelayError::ContentBlocked("prompt blocked: SAFETY".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        (RelayError::Internal("boom".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (error, status) in cases {
        assert_eq!(error.status_code(), status, "{}", error);
    }
}

#[test]
fn test_missing_image_message_is_descriptive() {
    let error = RelayError::MissingImage("missing 'image' field".to_string());
    assert_eq!(error.public_message(), "Failed to read image: missing 'image' field");
}

#[test]
fn test_upstream_details_stay_private() {
    let error = RelayError::GeminiApi("HTTP 400: API key not valid".to_string());
    assert!(format!("{}", error).contains("API key not valid"));
    assert_eq!(error.public_message(), "Failed to generate content");

    let error = RelayError::ImageRead("stream truncated".to_string());
    assert_eq!(error.public_message(), "Failed to process image");
}

#[test]
fn test_serialization_error_message() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error = RelayError::Serialization(json_error);
    assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error.public_message(), "Failed to serialize response");
}

#[tokio::test]
async fn test_error_response_is_plain_text() {
    let response = RelayError::MissingCredential.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"API key is not configured");
}

#[test]
fn test_method_not_allowed_sets_allow_header() {
    let response = RelayError::MethodNotAllowed.into_response();
    assert_eq!(response.headers()[header::ALLOW], "POST, OPTIONS");
}

#[test]
fn test_payload_too_large_error() {
    let error = RelayError::PayloadTooLarge("length limit exceeded".to_string());
    assert_eq!(error.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(error.public_message(), "Request body too large");
}
