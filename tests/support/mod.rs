// tests/support/mod.rs
//! In-process fakes for every collaborator a mix talks to.

#![allow(dead_code)]

use aimixer::{
    AccountId, ArtifactStore, BowlId, BowlMeta, Collaborators, ContentFetcher, FetchError,
    GenerationError, GenerationService, Identity, IdentityToken, Markup, MemoryRecordStore,
    MixEvent, MixOutcome, MixRequest, Mixer, Namespace, PromptComposer, RecordStore,
    StatusChannel, StoreError, TokenFileValidator,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const VALID_TOKEN: &str = "valid-session";
pub const ACCOUNT: &str = "acct-1";
pub const BOWL: &str = "bowl-1";

pub fn bowl_id() -> BowlId {
    BowlId::parse(BOWL).unwrap()
}

// --- Content fetcher ---

/// Serves fixed bodies by URL; unknown URLs fail with 404.
#[derive(Default)]
pub struct ScriptedFetcher {
    bodies: HashMap<String, String>,
    pub requested: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }

    pub fn request_count(&self) -> usize {
        self.requested.lock().len()
    }
}

#[async_trait]
impl ContentFetcher for ScriptedFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.requested.lock().push(url.to_string());
        self.bodies.get(url).cloned().ok_or(FetchError::HttpStatus {
            url: url.to_string(),
            status: 404,
        })
    }
}

// --- Generation service ---

type Responder = Box<dyn Fn(&str) -> Result<String, GenerationError> + Send + Sync>;

/// Answers text prompts through a responder and records every prompt.
pub struct ScriptedGenerator {
    respond: Responder,
    structured: Result<Value, GenerationError>,
    pub text_prompts: Mutex<Vec<String>>,
    pub structured_prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(
        respond: impl Fn(&str) -> Result<String, GenerationError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            structured: Ok(serde_json::json!({ "quotes": [] })),
            text_prompts: Mutex::new(Vec::new()),
            structured_prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always answers `reply`.
    pub fn replying(reply: &'static str) -> Self {
        Self::new(move |_| Ok(reply.to_string()))
    }

    /// Always fails with a server error.
    pub fn failing() -> Self {
        Self::new(|_| {
            Err(GenerationError::Upstream {
                status: 500,
                message: "internal upstream detail".to_string(),
            })
        })
    }

    pub fn with_structured(mut self, value: Value) -> Self {
        self.structured = Ok(value);
        self
    }

    pub fn call_count(&self) -> usize {
        self.text_prompts.lock().len() + self.structured_prompts.lock().len()
    }
}

#[async_trait]
impl GenerationService for ScriptedGenerator {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        self.text_prompts.lock().push(prompt.to_string());
        (self.respond)(prompt)
    }

    async fn generate_structured(&self, prompt: &str) -> Result<Value, GenerationError> {
        self.structured_prompts.lock().push(prompt.to_string());
        self.structured.clone()
    }
}

// --- Artifact store ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub namespace: String,
    pub filename: String,
    pub markup: String,
}

/// Keeps uploads in memory and links them under `https://cdn.example/`.
#[derive(Default)]
pub struct RecordingArtifactStore {
    pub uploads: Mutex<Vec<Upload>>,
}

#[async_trait]
impl ArtifactStore for RecordingArtifactStore {
    async fn upload_markup(
        &self,
        markup: &Markup,
        namespace: &Namespace,
        filename: &str,
    ) -> Result<String, StoreError> {
        self.uploads.lock().push(Upload {
            namespace: namespace.to_string(),
            filename: filename.to_string(),
            markup: markup.as_str().to_string(),
        });
        Ok(format!("https://cdn.example/{}/{}", namespace, filename))
    }
}

// --- Record store ---

/// Reads through to a memory store but refuses every write.
pub struct ReadOnlyRecordStore {
    inner: MemoryRecordStore,
    pub rejected_writes: AtomicUsize,
}

impl ReadOnlyRecordStore {
    pub fn new(inner: MemoryRecordStore) -> Self {
        Self {
            inner,
            rejected_writes: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RecordStore for ReadOnlyRecordStore {
    async fn get_bowl_meta(&self, id: &BowlId) -> Result<BowlMeta, StoreError> {
        self.inner.get_bowl_meta(id).await
    }

    async fn put_bowl_meta(&self, _id: &BowlId, _meta: &BowlMeta) -> Result<(), StoreError> {
        self.rejected_writes.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Io {
            message: "record store is read-only".to_string(),
        })
    }

    async fn append_creation(&self, _id: &BowlId, _link: &str) -> Result<BowlMeta, StoreError> {
        self.rejected_writes.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Io {
            message: "record store is read-only".to_string(),
        })
    }
}

// --- Harness ---

pub fn sessions() -> TokenFileValidator {
    TokenFileValidator::from_sessions(HashMap::from([(
        VALID_TOKEN.to_string(),
        Identity {
            account_id: AccountId::parse(ACCOUNT).unwrap(),
            email: "reporter@example.com".to_string(),
            username: "reporter".to_string(),
            domain: None,
        },
    )]))
}

/// One mix against fakes, with handles to inspect afterwards.
pub struct Harness {
    pub fetcher: Arc<ScriptedFetcher>,
    pub generator: Arc<ScriptedGenerator>,
    pub artifacts: Arc<RecordingArtifactStore>,
    pub records: Arc<MemoryRecordStore>,
    read_only_records: bool,
}

impl Harness {
    pub fn new(generator: ScriptedGenerator) -> Self {
        Self {
            fetcher: Arc::new(ScriptedFetcher::new()),
            generator: Arc::new(generator),
            artifacts: Arc::new(RecordingArtifactStore::default()),
            records: Arc::new(MemoryRecordStore::new()),
            read_only_records: false,
        }
    }

    pub fn with_fetcher(mut self, fetcher: ScriptedFetcher) -> Self {
        self.fetcher = Arc::new(fetcher);
        self
    }

    pub fn with_read_only_records(mut self) -> Self {
        self.read_only_records = true;
        self
    }

    /// Stores `meta` as the bowl and mixes it with `token`.
    pub async fn mix(&self, meta: BowlMeta, token: &str) -> (MixOutcome, Vec<MixEvent>) {
        self.records.put_bowl_meta(&bowl_id(), &meta).await.unwrap();

        let records: Arc<dyn RecordStore> = if self.read_only_records {
            Arc::new(ReadOnlyRecordStore::new(
                MemoryRecordStore::new().with_bowl(bowl_id(), meta.clone()),
            ))
        } else {
            self.records.clone()
        };

        let mixer = Mixer::new(
            Collaborators {
                identity: Arc::new(sessions()),
                records,
                artifacts: self.artifacts.clone(),
                fetcher: self.fetcher.clone(),
                generator: self.generator.clone(),
            },
            PromptComposer::new().unwrap(),
        );

        let request = MixRequest::new(
            IdentityToken::new(token).unwrap(),
            meta.snapshot(&bowl_id()),
        );
        let (status, mut rx) = StatusChannel::new();
        let outcome = mixer.mix(request, &status).await;
        drop(status);

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        (outcome, events)
    }

    pub async fn stored_creations(&self) -> Vec<String> {
        self.records
            .get_bowl_meta(&bowl_id())
            .await
            .unwrap()
            .creations
    }
}

pub fn terminal_events(events: &[MixEvent]) -> Vec<&MixEvent> {
    events.iter().filter(|e| e.is_terminal()).collect()
}

pub fn messages(events: &[MixEvent]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|e| match e {
            MixEvent::Message(m) => Some(m.as_str()),
            _ => None,
        })
        .collect()
}
