// src/lib.rs
//! aimixer library: mixes the contents of a bowl into a single published creation.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `MixerConfig`, `GenerationSettings`
//! - **Domain model**: `BowlMeta`, `BowlSnapshot`, `ContentItem`, `MixRequest`, etc.
//! - **Domain types**: `BowlId`, `AccountId`, `Namespace`, `IdentityToken`, etc.
//! - **Capabilities**: the collaborator traits a mix depends on
//! - **Adapters**: HTTP, file-system and in-memory implementations of them
//! - **Orchestration**: `Mixer`, `StatusChannel`, `MixEvent`

mod algebras;
mod api;
mod config;
mod constants;
mod error;
mod error_recovery;
mod formatting;
mod mix;
mod model;
mod output;
mod store;
mod types;

// --- Error Handling ---
pub use crate::error::AppError;
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, GenerationSettings, MixerConfig};
pub use crate::error_recovery::{retry_with_backoff, RetryPolicy};

// --- Domain Model ---
pub use crate::model::{
    BowlConfig, BowlMeta, BowlSnapshot, ContentItem, Identity, MixRequest, Quote, QuoteSheet,
    ResolvedContent, BOWL_SCHEMA_VERSION,
};

// --- Domain Types ---
pub use crate::types::{
    AccountId, ApiKey, BowlId, IdentityToken, Markup, Namespace, OutputType, ValidatedUrl,
    WordBudget,
};

// --- Capabilities ---
pub use crate::algebras::{
    ArtifactStore, ContentFetcher, FetchError, GenerationError, GenerationService,
    IdentityValidator, RecordStore, StoreError,
};

// --- Adapters ---
pub use crate::api::{ChatCompletionsClient, HttpClientSettings, HttpContentFetcher};
pub use crate::output::{creation_filename, DirectoryArtifactStore};
pub use crate::store::{FileRecordStore, MemoryRecordStore, TokenFileValidator};

// --- Formatting ---
pub use crate::formatting::{text_to_markup, PromptComposer, Publisher};

// --- Orchestration ---
pub use crate::mix::{
    compose_creation, resolve_contents, BusyGuard, Collaborators, GenerationStage, MixEvent,
    MixFailure, MixOutcome, MixState, Mixer, StatusChannel, Strategy, TranscriptPipeline,
};
