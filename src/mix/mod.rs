// src/mix/mod.rs
//! The mix orchestrator.
//!
//! A mix moves through
//! `Idle -> Validating -> ResolvingContent -> Composing -> Publishing -> Persisting -> Done`,
//! and can end in `Aborted` from any of those states. Whatever happens, the
//! client sees `busy(true)`, then advisory messages, then exactly one
//! terminal event (`alert` or `creationAdded`), then `busy(false)`.

mod compose;
mod events;
mod failure;
mod resolver;
mod strategy;
mod transcript;

pub use compose::compose_creation;
pub use events::{BusyGuard, MixEvent, StatusChannel};
pub use failure::{GenerationStage, MixFailure};
pub use resolver::resolve_contents;
pub use strategy::Strategy;
pub use transcript::TranscriptPipeline;

use crate::algebras::{
    ArtifactStore, ContentFetcher, GenerationService, IdentityValidator, RecordStore,
};
use crate::constants::{MESSAGE_GATHERING, MESSAGE_SAVING};
use crate::formatting::PromptComposer;
use crate::model::MixRequest;
use crate::output::creation_filename;
use crate::types::{BowlId, Namespace};
use futures::FutureExt;
use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixState {
    Idle,
    Validating,
    ResolvingContent,
    Composing,
    Publishing,
    Persisting,
    Done,
    Aborted,
}

impl fmt::Display for MixState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::ResolvingContent => "resolving content",
            Self::Composing => "composing",
            Self::Publishing => "publishing",
            Self::Persisting => "persisting",
            Self::Done => "done",
            Self::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// How a mix ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MixOutcome {
    Created { bowl_id: BowlId, creation: String },
    Aborted { alert: String },
}

impl MixOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }

    pub fn alert(&self) -> Option<&str> {
        match self {
            Self::Aborted { alert } => Some(alert),
            Self::Created { .. } => None,
        }
    }
}

/// The external services a mix depends on.
#[derive(Clone)]
pub struct Collaborators {
    pub identity: Arc<dyn IdentityValidator>,
    pub records: Arc<dyn RecordStore>,
    pub artifacts: Arc<dyn ArtifactStore>,
    pub fetcher: Arc<dyn ContentFetcher>,
    pub generator: Arc<dyn GenerationService>,
}

pub struct Mixer {
    collaborators: Collaborators,
    composer: PromptComposer,
}

impl Mixer {
    pub fn new(collaborators: Collaborators, composer: PromptComposer) -> Self {
        Self {
            collaborators,
            composer,
        }
    }

    /// Runs one mix to completion, reporting over `status`.
    ///
    /// Never fails and never panics: every failure, including a panic inside
    /// a collaborator, becomes an alert on the channel and an `Aborted` outcome.
    pub async fn mix(&self, request: MixRequest, status: &StatusChannel) -> MixOutcome {
        let started = Instant::now();
        enter(&request.bowl_id, MixState::Idle);
        let busy = BusyGuard::raise(status);
        log::info!(
            "Mix of bowl {} ({} items, output '{}') started",
            request.bowl_id,
            request.bowl.contents.len(),
            request.bowl.config.output
        );

        let result = match AssertUnwindSafe(self.run(&request, status))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(panic) => Err(MixFailure::Panicked(panic_message(panic.as_ref()))),
        };

        let outcome = match result {
            Ok(creation) => {
                log::info!(
                    "Mix of bowl {} finished in {}ms: {}",
                    request.bowl_id,
                    started.elapsed().as_millis(),
                    creation
                );
                status.creation_added(request.bowl_id.clone(), creation.clone());
                MixOutcome::Created {
                    bowl_id: request.bowl_id.clone(),
                    creation,
                }
            }
            Err(failure) => {
                enter(&request.bowl_id, MixState::Aborted);
                log::error!(
                    "Mix of bowl {} aborted after {}ms: {}",
                    request.bowl_id,
                    started.elapsed().as_millis(),
                    failure
                );
                let alert = failure.alert();
                status.alert(alert.clone());
                MixOutcome::Aborted { alert }
            }
        };

        drop(busy);
        outcome
    }

    async fn run(&self, request: &MixRequest, status: &StatusChannel) -> Result<String, MixFailure> {
        let bowl_id = &request.bowl_id;
        let bowl = &request.bowl;

        enter(bowl_id, MixState::Validating);
        let identity = self
            .collaborators
            .identity
            .validate(&request.identity_token)
            .await
            .ok_or(MixFailure::LoginExpired)?;
        let namespace = Namespace::for_bowl(&identity.account_id, bowl_id);

        // Selection only needs the declared type of the first item, so an
        // unusable output type is rejected before anything is fetched, even
        // when the bowl is empty.
        let first_kind = bowl.contents.first().map(|item| item.kind.as_str());
        let strategy = Strategy::select(&bowl.config, first_kind)?;
        if bowl.contents.is_empty() {
            return Err(MixFailure::EmptyBowl);
        }

        enter(bowl_id, MixState::ResolvingContent);
        status.message(MESSAGE_GATHERING);
        let resolved = resolve_contents(self.collaborators.fetcher.as_ref(), &bowl.contents).await;

        enter(bowl_id, MixState::Composing);
        let markup = compose_creation(
            &strategy,
            &resolved,
            &self.composer,
            self.collaborators.generator.as_ref(),
            status,
        )
        .await?;

        enter(bowl_id, MixState::Publishing);
        let link = self
            .collaborators
            .artifacts
            .upload_markup(&markup, &namespace, &creation_filename())
            .await
            .map_err(MixFailure::Publish)?;

        enter(bowl_id, MixState::Persisting);
        status.message(MESSAGE_SAVING);
        let meta = self
            .collaborators
            .records
            .append_creation(bowl_id, &link)
            .await
            .map_err(MixFailure::Persist)?;
        log::debug!("Bowl {} now has {} creations", bowl_id, meta.creations.len());

        enter(bowl_id, MixState::Done);
        Ok(link)
    }
}

fn enter(bowl_id: &BowlId, state: MixState) {
    log::info!("Mix of bowl {}: {}", bowl_id, state);
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
