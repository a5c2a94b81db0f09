//! Generative text algebra.

use super::error::GenerationError;
use async_trait::async_trait;

/// The generative text service a mix is synthesized with.
///
/// # Laws
///
/// - **L1 (Opaque-Prompt)**: The prompt is sent as given; implementations
///   never rewrite it.
/// - **L2 (Structured-Is-Json)**: `generate_structured` only succeeds with
///   a parsed JSON value; unparseable output is
///   [`GenerationError::MalformedOutput`].
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Generates free text from a prompt.
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Generates a JSON document from a prompt.
    async fn generate_structured(&self, prompt: &str)
        -> Result<serde_json::Value, GenerationError>;
}
