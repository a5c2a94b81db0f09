// src/api/client.rs
//! HTTP client for an OpenAI-compatible chat-completions service.
//!
//! A thin wrapper around reqwest: authentication, one request per prompt,
//! retries for transient upstream failures. Prompt content is never
//! inspected here.

use super::connection::{build_client, HttpClientSettings};
use super::responses::{error_message, parse_completion_text, parse_structured};
use crate::algebras::{GenerationError, GenerationService};
use crate::config::GenerationSettings;
use crate::error::AppError;
use crate::error_recovery::{retry_with_backoff, RetryPolicy};
use crate::types::ApiKey;
use reqwest::{header, Client};
use serde_json::json;

/// Generation service backed by `POST {api_base}/chat/completions`.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    client: Client,
    endpoint: String,
    model: String,
    retry: RetryPolicy,
}

impl ChatCompletionsClient {
    /// Creates a client authenticated with `api_key`.
    pub fn new(api_key: &ApiKey, settings: &GenerationSettings) -> Result<Self, AppError> {
        let http = HttpClientSettings::default().with_request_timeout(settings.request_timeout);
        let client = build_client(&http, Self::create_headers(api_key)?)?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/chat/completions",
                settings.api_base.trim_end_matches('/')
            ),
            model: settings.model.clone(),
            retry: settings.retry,
        })
    }

    /// Creates the default headers for chat-completions requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API key format: {}", e))
            })?,
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Builds the request body for a single user prompt.
    fn request_body(&self, prompt: &str, json_mode: bool) -> serde_json::Value {
        let mut body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });
        if json_mode {
            body["response_format"] = json!({ "type": "json_object" });
        }
        body
    }

    /// Sends one completion request and returns the generated text.
    async fn post_completion(&self, body: &serde_json::Value) -> Result<String, GenerationError> {
        log::debug!("POST {} (model {})", self.endpoint, self.model);

        let response = self.client.post(&self.endpoint).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            log::warn!("Generation service responded {}", status);
            return Err(GenerationError::Upstream {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        parse_completion_text(&text)
    }

    async fn complete(&self, prompt: &str, json_mode: bool) -> Result<String, GenerationError> {
        let body = self.request_body(prompt, json_mode);
        retry_with_backoff(
            || self.post_completion(&body),
            self.retry,
            GenerationError::is_retryable,
        )
        .await
    }
}

#[async_trait::async_trait]
impl GenerationService for ChatCompletionsClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        self.complete(prompt, false).await
    }

    async fn generate_structured(
        &self,
        prompt: &str,
    ) -> Result<serde_json::Value, GenerationError> {
        let text = self.complete(prompt, true).await?;
        parse_structured(&text)
    }
}
