// Gemini API client module
// Author: kelexine (https://github.com/kelexine)

mod client;

pub use client::GeminiClient;

use crate::models::gemini::{Content, GenerateContentRequest, Part};
use crate::vision::jpeg_part;

/// Prompt sent alongside every uploaded image.
pub const OPERATION_PROMPT: &str = "¿puedes realizar la operacion que aparece en la imagen?";

impl GenerateContentRequest {
    /// Single user turn: the image as inline JPEG followed by [`OPERATION_PROMPT`].
    pub fn operation(image: &[u8]) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: Some(vec![
                    jpeg_part(image),
                    Part::Text {
                        text: OPERATION_PROMPT.to_string(),
                    },
                ]),
            }],
        }
    }
}
