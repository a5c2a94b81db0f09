//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use crate::constants::{DEFAULT_WORD_COUNT, LENGTH_WORD_COUNTS};
use std::fmt;
use url::Url;

/// API key for the generation service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key with validation
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();

        if key.is_empty() {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot be empty".to_string(),
            });
        }

        if key.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot contain whitespace".to_string(),
            });
        }

        if key.len() < 8 {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key is too short".to_string(),
            });
        }

        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact API key in display
        let visible: String = self.0.chars().take(4).collect();
        write!(f, "{}...", visible)
    }
}

/// Validated URL type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUrl(Url);

impl ValidatedUrl {
    /// Parses an http(s) or file URL.
    pub fn parse(url: &str) -> Result<Self, ValidationError> {
        match Url::parse(url) {
            Ok(parsed_url) => {
                if !matches!(parsed_url.scheme(), "http" | "https" | "file") {
                    return Err(ValidationError::InvalidUrl {
                        url: url.to_string(),
                        reason: "Only HTTP, HTTPS and file URLs are supported".to_string(),
                    });
                }
                Ok(Self(parsed_url))
            }
            Err(e) => Err(ValidationError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Appends `path` to this URL, treating it as a directory.
    pub fn join_path(&self, path: &str) -> String {
        format!("{}/{}", self.0.as_str().trim_end_matches('/'), path)
    }
}

impl fmt::Display for ValidatedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of artifact a bowl is mixed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputType {
    NewsArticle,
    BlogPost,
    Custom,
}

impl OutputType {
    /// Parses the wire label stored on a bowl. Unknown labels yield `None`.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "newsArticle" => Some(Self::NewsArticle),
            "blogPost" => Some(Self::BlogPost),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewsArticle => "newsArticle",
            Self::BlogPost => "blogPost",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested artifact length, expressed as a word count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordBudget(u32);

impl WordBudget {
    /// Looks up a bowl length label. Unrecognised labels fall back to the
    /// `longForm` count instead of failing.
    pub fn from_label(label: &str) -> Self {
        let words = LENGTH_WORD_COUNTS
            .iter()
            .find(|(name, _)| *name == label)
            .map(|(_, words)| *words)
            .unwrap_or(DEFAULT_WORD_COUNT);
        Self(words)
    }

    pub fn words(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for WordBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} words", self.0)
    }
}

/// Publishable markup, ready for the artifact store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn new(content: String) -> Self {
        Self(content)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
