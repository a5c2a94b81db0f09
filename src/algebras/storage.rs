//! Storage algebras: bowl records and published artifacts.

use super::error::StoreError;
use crate::model::BowlMeta;
use crate::types::{BowlId, Markup, Namespace};
use async_trait::async_trait;

/// Bowl metadata, addressed by bowl id.
///
/// # Laws
///
/// - **L1 (Read-Your-Write)**: after `put_bowl_meta(id, m)` succeeds,
///   `get_bowl_meta(id)` returns `m`.
/// - **L2 (Keyed-Access)**: records are addressed by id only. Ids are bound
///   as keys, never spliced into query text.
///
/// The store owns write atomicity. `append_creation` is a plain
/// read-modify-write, so two mixes finishing against the same bowl at the
/// same time can race unless an implementation overrides it.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get_bowl_meta(&self, id: &BowlId) -> Result<BowlMeta, StoreError>;

    async fn put_bowl_meta(&self, id: &BowlId, meta: &BowlMeta) -> Result<(), StoreError>;

    /// Appends a creation link to a bowl's record.
    async fn append_creation(&self, id: &BowlId, link: &str) -> Result<BowlMeta, StoreError> {
        let mut meta = self.get_bowl_meta(id).await?;
        meta.creations.push(link.to_string());
        self.put_bowl_meta(id, &meta).await?;
        Ok(meta)
    }
}

/// Where published creations are stored.
///
/// # Laws
///
/// - **L1 (Link-Per-Upload)**: each successful upload returns a link that
///   resolves to exactly the uploaded markup.
/// - **L2 (Namespaced)**: the returned link locates the artifact under
///   `namespace/filename`.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn upload_markup(
        &self,
        markup: &Markup,
        namespace: &Namespace,
        filename: &str,
    ) -> Result<String, StoreError>;
}
