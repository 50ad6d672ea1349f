//! Gemini-style generative endpoint client
//!
//! REST client for a `models/{model}:generateContent` endpoint: a text
//! part plus an optional base64 inline-data part go out, candidate text
//! comes back. Every request carries an explicit timeout and transient
//! failures are retried with exponential backoff.

use crate::adapters::ai::{GenerativeModel, InlineDocument};
use crate::config::AiConfig;
use crate::domain::{AiError, Result, VitalError};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Response shape of a generateContent call, reduced to what we read
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// REST client for the generative endpoint
pub struct GeminiClient {
    /// HTTP client with the configured timeout baked in
    client: Client,

    /// Endpoint configuration
    config: AiConfig,
}

impl GeminiClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: AiConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| {
                VitalError::Ai(AiError::ConnectionFailed(format!(
                    "Failed to build HTTP client: {e}"
                )))
            })?;

        Ok(Self { client, config })
    }

    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Whether an error is worth retrying
    fn is_transient(error: &VitalError) -> bool {
        matches!(
            error,
            VitalError::Ai(
                AiError::ConnectionFailed(_)
                    | AiError::Timeout(_)
                    | AiError::RateLimited(_)
                    | AiError::ServerError { .. }
            )
        )
    }

    /// Retry a request with exponential backoff on transient failures
    async fn retry_request<F, T, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let retry = &self.config.retry;
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    attempt += 1;
                    if attempt >= retry.max_retries || !Self::is_transient(&e) {
                        return Err(e);
                    }

                    let delay_ms = retry.initial_delay_ms
                        * (retry.backoff_multiplier.powf((attempt - 1) as f64) as u64);
                    let delay_ms = delay_ms.min(retry.max_delay_ms);

                    tracing::warn!(
                        attempt = attempt,
                        max_retries = retry.max_retries,
                        delay_ms = delay_ms,
                        error = %e,
                        "Retrying AI request after error"
                    );

                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }

    async fn send_once(
        &self,
        prompt: &str,
        attachment: Option<&InlineDocument>,
    ) -> Result<String> {
        use secrecy::ExposeSecret;

        let mut parts = vec![serde_json::json!({ "text": prompt })];
        if let Some(doc) = attachment {
            parts.push(serde_json::json!({
                "inlineData": {
                    "mimeType": doc.mime_type,
                    "data": general_purpose::STANDARD.encode(&doc.data),
                }
            }));
        }
        let body = serde_json::json!({ "contents": [{ "parts": parts }] });

        let response = self
            .client
            .post(self.request_url())
            .header("x-goog-api-key", self.config.api_key.expose_secret().as_str())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VitalError::Ai(AiError::Timeout(e.to_string()))
                } else {
                    VitalError::Ai(AiError::ConnectionFailed(e.to_string()))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            let error = match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    AiError::AuthenticationFailed(message)
                }
                StatusCode::TOO_MANY_REQUESTS => AiError::RateLimited(message),
                s if s.is_server_error() => AiError::ServerError {
                    status: s.as_u16(),
                    message,
                },
                s => AiError::ClientError {
                    status: s.as_u16(),
                    message,
                },
            };
            return Err(VitalError::Ai(error));
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            VitalError::Ai(AiError::ConnectionFailed(format!(
                "Failed to read response body: {e}"
            )))
        })?;

        let text: String = parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            return Err(VitalError::Ai(AiError::EmptyResponse));
        }

        Ok(text)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, prompt: &str, attachment: Option<&InlineDocument>) -> Result<String> {
        tracing::debug!(
            model = %self.config.model,
            has_attachment = attachment.is_some(),
            "Sending generateContent request"
        );

        self.retry_request(|| self.send_once(prompt, attachment))
            .await
    }
}
