// src/mix/strategy.rs
//! Maps a bowl's output type and first content item to a synthesis strategy.

use super::failure::MixFailure;
use crate::constants::TRANSCRIPT_CONTENT_TYPE;
use crate::model::BowlConfig;
use crate::types::{OutputType, WordBudget};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Clean, extract and compose a news article from a transcript.
    Transcript,
    News { budget: WordBudget },
    Blog { budget: WordBudget },
    Custom { instructions: String },
}

impl Strategy {
    /// Picks the strategy for a bowl.
    ///
    /// Only the first item's content type is consulted: a bowl whose first
    /// item is a transcript takes the transcript path however many items
    /// follow it, and a transcript anywhere else does not.
    pub fn select(config: &BowlConfig, first_kind: Option<&str>) -> Result<Self, MixFailure> {
        let output = config
            .output_type()
            .ok_or_else(|| MixFailure::UnknownOutputType(config.output.clone()))?;

        let strategy = match output {
            OutputType::NewsArticle if first_kind == Some(TRANSCRIPT_CONTENT_TYPE) => {
                Self::Transcript
            }
            OutputType::NewsArticle => Self::News {
                budget: config.word_budget(),
            },
            OutputType::BlogPost => Self::Blog {
                budget: config.word_budget(),
            },
            OutputType::Custom => {
                let instructions = config
                    .custom_instructions
                    .as_deref()
                    .map(str::trim)
                    .filter(|text| !text.is_empty())
                    .ok_or(MixFailure::MissingInstructions)?;
                Self::Custom {
                    instructions: instructions.to_string(),
                }
            }
        };

        log::debug!("Selected {} strategy for output '{}'", strategy.name(), output);
        Ok(strategy)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Transcript => "transcript",
            Self::News { .. } => "news",
            Self::Blog { .. } => "blog",
            Self::Custom { .. } => "custom",
        }
    }

    /// Blog posts come back from the service as HTML and are published as is.
    pub fn needs_paragraph_markup(&self) -> bool {
        !matches!(self, Self::Blog { .. })
    }
}
