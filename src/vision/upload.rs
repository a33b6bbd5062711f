// Multipart image extraction
// Author: kelexine (https://github.com/kelexine)

use super::models::{detect_mime_type, ImageFormat, IMAGE_FIELD};
use crate::error::{RelayError, Result};
use crate::models::gemini::{InlineData, Part};
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use base64::Engine;
use bytes::Bytes;
use tracing::{debug, warn};

/// Read the `image` field from a multipart form.
///
/// A malformed form, a missing field or an empty field is a client error
/// (400). Failing to read the bytes of a field that was found is reported as
/// a server-side read failure (500). Running into the body limit while
/// streaming is reported as 413 either way.
pub async fn read_image_field(mut multipart: Multipart) -> Result<Bytes> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| stream_error(e, RelayError::MissingImage))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            debug!("Skipping multipart field {:?}", field.name());
            continue;
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| stream_error(e, RelayError::ImageRead))?;

        if data.is_empty() {
            return Err(RelayError::MissingImage(format!(
                "field '{}' is empty",
                IMAGE_FIELD
            )));
        }

        match detect_mime_type(&data) {
            Some(ImageFormat::Jpeg) => {}
            Some(other) => warn!(
                "Uploaded image looks like {}, forwarding as image/jpeg",
                other.mime_type()
            ),
            None => warn!("Uploaded image has unrecognized format, forwarding as image/jpeg"),
        }

        return Ok(data);
    }

    Err(RelayError::MissingImage(format!(
        "missing '{}' field",
        IMAGE_FIELD
    )))
}

fn stream_error(error: MultipartError, otherwise: fn(String) -> RelayError) -> RelayError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        RelayError::PayloadTooLarge(error.body_text())
    } else {
        otherwise(error.body_text())
    }
}

/// Build the inline data part for an uploaded image, always tagged as JPEG.
pub fn jpeg_part(data: &[u8]) -> Part {
    Part::InlineData {
        inline_data: InlineData {
            mime_type: ImageFormat::Jpeg.mime_type().to_string(),
            data: base64::engine::general_purpose::STANDARD.encode(data),
        },
    }
}
