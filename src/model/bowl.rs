use super::ContentItem;
use crate::types::{BowlId, OutputType, WordBudget};
use serde::{Deserialize, Serialize};

/// Current shape of the persisted bowl record.
pub const BOWL_SCHEMA_VERSION: u32 = 1;

fn current_schema_version() -> u32 {
    BOWL_SCHEMA_VERSION
}

fn default_length() -> String {
    "longForm".to_string()
}

fn default_source() -> String {
    "all".to_string()
}

/// Output configuration a user chose for a bowl.
///
/// `output` and `length` stay raw labels: an unknown output type must be
/// reported with the offending value, and an unknown length silently
/// falls back to the default word count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BowlConfig {
    #[serde(default)]
    pub output: String,
    #[serde(default = "default_length")]
    pub length: String,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_instructions: Option<String>,
}

impl BowlConfig {
    pub fn new(output: impl Into<String>, length: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            length: length.into(),
            source: default_source(),
            custom_instructions: None,
        }
    }

    pub fn with_custom_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.custom_instructions = Some(instructions.into());
        self
    }

    pub fn output_type(&self) -> Option<OutputType> {
        OutputType::parse(&self.output)
    }

    pub fn word_budget(&self) -> WordBudget {
        WordBudget::from_label(&self.length)
    }
}

/// The persisted metadata document of a bowl.
///
/// Older record shapes that lack `contents`, `creations` or a schema
/// version still load; missing lists default to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BowlMeta {
    #[serde(default = "current_schema_version")]
    pub schema_version: u32,
    #[serde(flatten)]
    pub config: BowlConfig,
    #[serde(default)]
    pub contents: Vec<ContentItem>,
    #[serde(default)]
    pub creations: Vec<String>,
}

impl BowlMeta {
    pub fn new(config: BowlConfig) -> Self {
        Self {
            schema_version: BOWL_SCHEMA_VERSION,
            config,
            contents: Vec::new(),
            creations: Vec::new(),
        }
    }

    pub fn with_content(mut self, item: ContentItem) -> Self {
        self.contents.push(item);
        self
    }

    /// Captures what a mix needs to read from this record.
    pub fn snapshot(&self, id: &BowlId) -> BowlSnapshot {
        BowlSnapshot {
            id: id.clone(),
            config: self.config.clone(),
            contents: self.contents.clone(),
        }
    }
}

/// Read-only view of a bowl handed to the orchestrator with a mix request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BowlSnapshot {
    pub id: BowlId,
    #[serde(flatten)]
    pub config: BowlConfig,
    #[serde(default)]
    pub contents: Vec<ContentItem>,
}
