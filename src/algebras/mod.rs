//! Capability algebras for aimixer.
//!
//! This module defines algebraic traits that represent **capabilities**,
//! not implementations. Each trait is:
//!
//! - **Object-safe** - can be used as `dyn Trait`
//! - **Documented with laws** - properties that all implementations must satisfy
//! - **Async via `async_trait`**
//!
//! # Architecture
//!
//! ```text
//! Orchestrator (mix/)
//!         ↓
//! Algebras (algebras/)
//!         ↓
//! Interpreters (api/, store/, output/)
//! ```
//!
//! # Capability Traits
//!
//! - [`IdentityValidator`] - session token validation
//! - [`RecordStore`] - bowl metadata by id
//! - [`ArtifactStore`] - publishing markup under a namespace
//! - [`ContentFetcher`] - dereferencing content URLs
//! - [`GenerationService`] - text and structured generation

pub mod content;
pub mod error;
pub mod generation;
pub mod identity;
pub mod storage;

pub use content::ContentFetcher;
pub use error::{FetchError, GenerationError, StoreError};
pub use generation::GenerationService;
pub use identity::IdentityValidator;
pub use storage::{ArtifactStore, RecordStore};
