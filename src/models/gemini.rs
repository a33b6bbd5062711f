// Gemini generateContent wire types
// Author: kelexine (https://github.com/kelexine)
// Mirrors generativelanguage.googleapis.com/v1beta, camelCase on the wire

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Gemini generate content request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns; the relay always sends a single user turn.
    pub contents: Vec<Content>,
}

/// Content in a turn (user or model)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>, // "user" or "model"
    /// `None` when the field was absent; an empty array stays empty on the way out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<Part>>,
}

/// Individual part of content in a Gemini request/response.
///
/// Parts the relay does not model (function calls, thoughts, extra
/// metadata) land in `Other` untouched, so they survive re-serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum Part {
    /// Text content part.
    Text { text: String },

    /// Inline data (images, etc).
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },

    Other(Value),
}

impl Part {
    /// Get text content if this is a Text part
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// Inline image data for vision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String, // base64 encoded
}

/// Gemini generate content response.
///
/// Only the fields the relay inspects are typed; everything else is kept
/// in `extra` and written back out as received.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<Candidate>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    pub fn text(&self) -> Option<String> {
        let content = self.first_candidate()?.content.as_ref()?;
        let parts = content.parts.as_ref()?;
        let text: String = parts.iter().filter_map(Part::as_text).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Reason the prompt or the first candidate was blocked, if any.
    pub fn block_reason(&self) -> Option<String> {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
        {
            if reason != "BLOCK_REASON_UNSPECIFIED" {
                return Some(format!("prompt blocked: {}", reason));
            }
        }

        match self.first_candidate() {
            Some(candidate) if candidate.finish_reason.as_deref() == Some("SAFETY") => {
                Some("candidate blocked: SAFETY".to_string())
            }
            _ => None,
        }
    }

    fn first_candidate(&self) -> Option<&Candidate> {
        self.candidates.as_ref()?.first()
    }
}

/// Response candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Feedback on the prompt itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Token usage metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Tokens in the input prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_token_count: Option<u32>,

    /// Tokens in the generated response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates_token_count: Option<u32>,

    /// Total tokens (prompt + candidates).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_token_count: Option<u32>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_response_fields_survive() {
        let raw = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "12 + 30 = "},
                        {"text": "42"},
                        {"text": "hidden", "thought": true}
                    ]
                },
                "finishReason": "STOP",
                "index": 0,
                "safetyRatings": []
            }],
            "usageMetadata": {"promptTokenCount": 270, "totalTokenCount": 280, "candidatesTokenCount": 10},
            "modelVersion": "gemini-1.5-flash-002"
        });

        let response: GenerateContentResponse = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(response.text().as_deref(), Some("12 + 30 = 42"));
        assert_eq!(response.usage_metadata.as_ref().unwrap().total_token_count, Some(280));
        assert_eq!(serde_json::to_value(&response).unwrap(), raw);
    }

    #[test]
    fn test_opaque_response_round_trips() {
        let raw = json!({"result": "42"});
        let response: GenerateContentResponse = serde_json::from_value(raw.clone()).unwrap();
        assert!(response.candidates.is_none());
        assert_eq!(serde_json::to_value(&response).unwrap(), raw);
    }

    #[test]
    fn test_block_reason_from_prompt_feedback() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY", "safetyRatings": []}
        }))
        .unwrap();
        assert_eq!(response.block_reason().as_deref(), Some("prompt blocked: SAFETY"));
    }

    #[test]
    fn test_block_reason_from_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"finishReason": "SAFETY", "index": 0}]
        }))
        .unwrap();
        assert!(response.block_reason().is_some());
        assert!(response.text().is_none());
    }

    #[test]
    fn test_unspecified_block_reason_is_not_blocked() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "BLOCK_REASON_UNSPECIFIED"},
            "candidates": [{"finishReason": "STOP"}]
        }))
        .unwrap();
        assert!(response.block_reason().is_none());
    }

    #[test]
    fn test_empty_arrays_survive() {
        let raw = json!({
            "candidates": [{
                "content": {"parts": [], "role": "model"},
                "finishReason": "STOP"
            }]
        });
        let response: GenerateContentResponse = serde_json::from_value(raw.clone()).unwrap();
        assert!(response.text().is_none());
        assert_eq!(serde_json::to_value(&response).unwrap(), raw);

        let raw = json!({"candidates": [], "promptFeedback": {"blockReason": "OTHER"}});
        let response: GenerateContentResponse = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(response.candidates.as_deref().map(<[Candidate]>::len), Some(0));
        assert_eq!(serde_json::to_value(&response).unwrap(), raw);
    }
}
