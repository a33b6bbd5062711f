// Gemini API client
// Author: kelexine (https://github.com/kelexine)

use crate::config::{ApiKey, GeminiConfig};
use crate::error::{RelayError, Result};
use crate::models::gemini::{GenerateContentRequest, GenerateContentResponse};
use crate::utils::logging::sanitize;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, info};

/// Client for the public Google Gemini API.
///
/// Authenticates with an API key sent in the `x-goog-api-key` header and
/// calls `generateContent` on a single configured model. The underlying
/// `reqwest::Client` keeps a connection pool shared by all requests.
pub struct GeminiClient {
    http_client: Client,
    config: GeminiConfig,
    api_key: ApiKey,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// A client-side timeout is only set when `timeout_seconds` is configured.
    pub fn new(config: &GeminiConfig, api_key: ApiKey) -> Result<Self> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .tcp_nodelay(true)
            .use_rustls_tls();

        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        let http_client = builder
            .build()
            .map_err(|e| RelayError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created HTTP client with connection pooling and keep-alive");

        Ok(Self {
            http_client,
            config: config.clone(),
            api_key,
        })
    }

    /// Get the configured model name
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Get the API base_url
    pub fn base_url(&self) -> &str {
        &self.config.api_base_url
    }

    fn generate_content_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Call Gemini `generateContent` API (blocking, single attempt).
    ///
    /// Non-2xx replies, unparseable bodies and blocked prompts all come back
    /// as errors; nothing is retried.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.generate_content_url();
        debug!("Calling generateContent API for model: {}", self.config.model);

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| RelayError::GeminiApi(format!("HTTP error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let error_msg = Self::extract_error_message(&error_text).unwrap_or(error_text);
            error!("Gemini API error: HTTP {} - {}", status, sanitize(&error_msg));
            return Err(RelayError::GeminiApi(format!("HTTP {}: {}", status, error_msg)));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| RelayError::GeminiApi(format!("Failed to read response body: {}", e)))?;

        debug!(
            "Raw Gemini response (first 500 chars): {}",
            sanitize(&response_text.chars().take(500).collect::<String>())
        );

        let gemini_response: GenerateContentResponse = serde_json::from_str(&response_text)
            .map_err(|e| {
                error!("Failed to parse Gemini response: {}", e);
                RelayError::GeminiApi(format!("Response parsing error: {}", e))
            })?;

        if let Some(reason) = gemini_response.block_reason() {
            return Err(RelayError::ContentBlocked(reason));
        }

        if let Some(usage) = &gemini_response.usage_metadata {
            info!(
                model = %self.config.model,
                prompt_tokens = usage.prompt_token_count.unwrap_or(0),
                output_tokens = usage.candidates_token_count.unwrap_or(0),
                "Gemini call completed"
            );
        }

        Ok(gemini_response)
    }

    /// Extract error message from API response JSON
    fn extract_error_message(response_text: &str) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(serde::Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
            status: Option<String>,
        }

        if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(response_text) {
            if let Some(error) = error_resp.error {
                return error.message.or(error.status);
            }
        }
        None
    }
}
