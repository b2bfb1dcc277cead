//! GeminiProvider -- concrete [`ModelGateway`] implementation for Google
//! Gemini.
//!
//! Sends single-turn requests to the Generative Language API
//! (`models/{model}:generateContent`) with the API key in the
//! `x-goog-api-key` header. The key is wrapped in
//! [`secrecy::SecretString`] and is never logged or included in `Debug`
//! output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use sada_core::model::{ModelGateway, ModelInvocation};
use sada_types::config::ModelConfig;
use sada_types::error::ModelError;

use super::types::{
    Blob, Content, GenerateContentRequest, GenerateContentResponse, GeminiErrorResponse,
    GenerationConfig, Part, SystemInstruction,
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Google Gemini model provider.
///
/// Implements [`ModelGateway`] for the `generateContent` endpoint.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing HTTP request headers. The provider intentionally does not
/// derive `Debug`.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    timeout_ms: u64,
    max_output_tokens: u32,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Gemini API key wrapped in SecretString
    /// * `model` - Model identifier (e.g., "gemini-2.0-flash")
    /// * `timeout` - Whole-request timeout; expiry surfaces as
    ///   [`ModelError::Timeout`]
    pub fn new(api_key: SecretString, model: String, timeout: Duration, max_output_tokens: u32) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
            timeout_ms: timeout.as_millis() as u64,
            max_output_tokens,
        }
    }

    /// Create a provider from the `[model]` config section.
    pub fn from_config(config: &ModelConfig, api_key: SecretString) -> Self {
        let mut provider = Self::new(
            api_key,
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
            config.max_output_tokens,
        );
        if let Some(base_url) = &config.base_url {
            provider.base_url = base_url.trim_end_matches('/').to_string();
        }
        provider
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Convert a [`ModelInvocation`] into a [`GenerateContentRequest`].
    ///
    /// Consumes the invocation: a staged attachment is usable exactly once
    /// and becomes the inline data part here.
    fn to_request(&self, invocation: ModelInvocation) -> GenerateContentRequest {
        let mut parts = vec![Part::Text {
            text: invocation.prompt,
        }];
        if let Some(staged) = invocation.attachment {
            let mime_type = staged.mime_type().to_string();
            parts.push(Part::Inline {
                inline_data: Blob {
                    mime_type,
                    data: encode_inline(&staged.into_bytes()),
                },
            });
        }

        GenerateContentRequest {
            system_instruction: Some(SystemInstruction {
                parts: vec![Part::Text {
                    text: invocation.system,
                }],
            }),
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.max_output_tokens,
            },
        }
    }

    fn map_http_error(&self, status: reqwest::StatusCode, body: String) -> ModelError {
        // The error envelope is best-effort; fall back to the raw body.
        let message = serde_json::from_str::<GeminiErrorResponse>(&body)
            .map(|envelope| envelope.error.message)
            .unwrap_or(body);

        match status.as_u16() {
            401 | 403 => ModelError::AuthenticationFailed,
            429 => ModelError::RateLimited {
                retry_after_ms: None,
            },
            _ => ModelError::Provider {
                message: format!("HTTP {status}: {message}"),
            },
        }
    }
}

/// Extract the response text from the first candidate, concatenating its
/// text parts. An absent or empty candidate (e.g. a safety block) is a
/// [`ModelError::Blocked`].
fn extract_text(response: GenerateContentResponse) -> Result<String, ModelError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(ModelError::Blocked("no candidates returned".to_string()));
    };

    let text = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate
            .finish_reason
            .unwrap_or_else(|| "empty response".to_string());
        return Err(ModelError::Blocked(reason));
    }

    Ok(text)
}

fn encode_inline(bytes: &[u8]) -> String {
    use base64::Engine as _;
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

impl ModelGateway for GeminiProvider {
    async fn generate(&self, invocation: ModelInvocation) -> Result<String, ModelError> {
        let session_id = invocation.session_id;
        let body = self.to_request(invocation);
        let url = self.url();

        tracing::debug!(%session_id, model = %self.model, "sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout(self.timeout_ms)
                } else {
                    ModelError::Provider {
                        message: format!("HTTP request failed: {e}"),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(self.map_http_error(status, error_body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Deserialization(format!("failed to parse response: {e}")))?;

        extract_text(parsed)
    }
}
