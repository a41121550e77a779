//! Ollama generation backend client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use codehub_core::config::generation::GenerationConfig;
use codehub_core::error::AppError;
use codehub_core::result::AppResult;
use codehub_core::traits::GenerationBackend;

/// Request body for Ollama's `/api/generate` endpoint.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// The subset of Ollama's generate response we consume.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Generation backend backed by an Ollama instance over HTTP.
///
/// One synchronous (non-streaming) call per generation, bounded by the
/// configured request timeout. There is no retry here; retry policy is a
/// caller concern.
#[derive(Debug, Clone)]
pub struct OllamaBackend {
    /// Shared HTTP client with the timeout baked in.
    client: reqwest::Client,
    /// Base URL of the Ollama instance.
    base_url: String,
    /// Model name passed on every request.
    model: String,
}

impl OllamaBackend {
    /// Creates a backend client from generation configuration.
    pub fn new(config: &GenerationConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::configuration(format!("Failed to build generation HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl GenerationBackend for OllamaBackend {
    fn backend_type(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        debug!(model = %self.model, prompt_chars = prompt.len(), "Calling generation backend");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::generation_backend(format!("Generation backend timed out: {e}"))
                } else {
                    AppError::generation_backend(format!("Generation backend unreachable: {e}"))
                }
            })?;

        let response = response.error_for_status().map_err(|e| {
            AppError::generation_backend(format!("Generation backend returned an error: {e}"))
        })?;

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            AppError::generation_backend(format!("Malformed generation backend response: {e}"))
        })?;

        Ok(parsed.response)
    }
}
