// src/api/responses.rs
//! Wire shapes of the chat-completions API and helpers to read them.

use crate::algebras::GenerationError;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Extracts the first choice's text from a chat-completions body.
pub fn parse_completion_text(body: &str) -> Result<String, GenerationError> {
    let completion: ChatCompletion =
        serde_json::from_str(body).map_err(|e| GenerationError::MalformedOutput {
            reason: format!("unexpected completion body: {}", e),
        })?;

    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(GenerationError::EmptyResponse)
}

/// Parses generated text as JSON, tolerating a surrounding code fence.
pub fn parse_structured(text: &str) -> Result<serde_json::Value, GenerationError> {
    serde_json::from_str(strip_code_fence(text)).map_err(|e| GenerationError::MalformedOutput {
        reason: format!("expected JSON: {}", e),
    })
}

/// Best-effort readable message from an error response body.
pub fn error_message(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return envelope.error.message;
    }
    body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect()
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the opening fence line.
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    body.trim_end().trim_end_matches("```").trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_choice_content_is_returned() {
        let body = json!({
            "choices": [
                {"message": {"role": "assistant", "content": "World news."}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        })
        .to_string();
        assert_eq!(parse_completion_text(&body).unwrap(), "World news.");
    }

    #[test]
    fn test_missing_or_blank_content_is_empty_response() {
        let body = json!({"choices": []}).to_string();
        assert_eq!(parse_completion_text(&body), Err(GenerationError::EmptyResponse));

        let body = json!({"choices": [{"message": {"content": "  "}}]}).to_string();
        assert_eq!(parse_completion_text(&body), Err(GenerationError::EmptyResponse));

        let body = json!({"choices": [{"message": {"content": null}}]}).to_string();
        assert_eq!(parse_completion_text(&body), Err(GenerationError::EmptyResponse));
    }

    #[test]
    fn test_non_json_body_is_malformed() {
        assert!(matches!(
            parse_completion_text("<html>502</html>"),
            Err(GenerationError::MalformedOutput { .. })
        ));
    }

    #[test]
    fn test_structured_output_tolerates_code_fence() {
        let fenced = "```json\n{\"quotes\": []}\n```";
        assert_eq!(parse_structured(fenced).unwrap(), json!({"quotes": []}));
        assert_eq!(parse_structured(" {\"a\": 1} ").unwrap(), json!({"a": 1}));
        assert!(parse_structured("quotes: none").is_err());
    }

    #[test]
    fn test_error_message_prefers_envelope() {
        let body = json!({"error": {"message": "Rate limit reached", "type": "requests"}}).to_string();
        assert_eq!(error_message(&body), "Rate limit reached");

        let long = "x".repeat(500);
        assert_eq!(error_message(&long).len(), ERROR_BODY_PREVIEW_LENGTH);
    }
}
