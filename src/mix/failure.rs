// src/mix/failure.rs
//! Why a mix aborted, and what the client is told about it.
//!
//! Failure details are logged in full. Clients only ever see the fixed
//! alert text returned by [`MixFailure::alert`].

use crate::algebras::{GenerationError, StoreError};
use crate::constants::{ALERT_EMPTY_BOWL, ALERT_LOGIN_EXPIRED, ALERT_MIX_FAILED, ALERT_SAVE_FAILED};
use crate::error::AppError;
use thiserror::Error;

/// The stage a generation call belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    Compose,
    CleanTranscript,
    ExtractFacts,
    ExtractQuotes,
    WriteArticle,
}

impl std::fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Compose => "compose",
            Self::CleanTranscript => "clean transcript",
            Self::ExtractFacts => "extract facts",
            Self::ExtractQuotes => "extract quotes",
            Self::WriteArticle => "write article",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum MixFailure {
    #[error("identity token was rejected")]
    LoginExpired,

    #[error("bowl has no contents")]
    EmptyBowl,

    #[error("unknown output type: {0}")]
    UnknownOutputType(String),

    #[error("custom output requested without instructions")]
    MissingInstructions,

    #[error("could not render prompt: {0}")]
    Prompt(#[source] AppError),

    #[error("generation failed during {stage}: {source}")]
    Generation {
        stage: GenerationStage,
        #[source]
        source: GenerationError,
    },

    #[error("could not publish creation: {0}")]
    Publish(#[source] StoreError),

    #[error("could not append creation to bowl: {0}")]
    Persist(#[source] StoreError),

    #[error("mix panicked: {0}")]
    Panicked(String),
}

impl MixFailure {
    pub fn generation(stage: GenerationStage, source: GenerationError) -> Self {
        Self::Generation { stage, source }
    }

    /// The user-visible alert for this failure.
    pub fn alert(&self) -> String {
        match self {
            Self::LoginExpired => ALERT_LOGIN_EXPIRED.to_string(),
            Self::EmptyBowl => ALERT_EMPTY_BOWL.to_string(),
            Self::UnknownOutputType(value) => format!("unknown output type: {}", value),
            Self::Persist(_) => ALERT_SAVE_FAILED.to_string(),
            Self::MissingInstructions
            | Self::Prompt(_)
            | Self::Generation { .. }
            | Self::Publish(_)
            | Self::Panicked(_) => ALERT_MIX_FAILED.to_string(),
        }
    }
}

impl From<MixFailure> for AppError {
    fn from(failure: MixFailure) -> Self {
        AppError::MixAborted {
            alert: failure.alert(),
        }
    }
}
