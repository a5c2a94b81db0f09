//! JSON-file record store: one document per bowl under a directory.

use crate::algebras::{RecordStore, StoreError};
use crate::model::BowlMeta;
use crate::types::BowlId;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Stores each bowl as `<root>/<bowl-id>.json`.
///
/// Writes go to a temporary sibling and are renamed into place, so a reader
/// never sees a half-written record. Appends are serialised within the
/// process; other processes sharing the directory can still race.
pub struct FileRecordStore {
    root: PathBuf,
    append_lock: Mutex<()>,
}

impl FileRecordStore {
    /// Opens (creating if needed) a store rooted at `root`.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        log::debug!("Record store at {}", root.display());
        Ok(Self {
            root,
            append_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // Bowl ids are validated to [A-Za-z0-9_-], so they are safe file stems.
    fn record_path(&self, id: &BowlId) -> PathBuf {
        self.root.join(format!("{}.json", id.as_str()))
    }
}

#[async_trait]
impl RecordStore for FileRecordStore {
    async fn get_bowl_meta(&self, id: &BowlId) -> Result<BowlMeta, StoreError> {
        let path = self.record_path(id);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound {
                    key: id.to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    async fn put_bowl_meta(&self, id: &BowlId, meta: &BowlMeta) -> Result<(), StoreError> {
        let path = self.record_path(id);
        let temp = self
            .root
            .join(format!(".{}.{}.tmp", id.as_str(), uuid::Uuid::new_v4().as_simple()));

        let content = serde_json::to_string_pretty(meta)?;
        tokio::fs::write(&temp, content).await?;
        if let Err(e) = tokio::fs::rename(&temp, &path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }

        log::debug!("Wrote bowl record {}", path.display());
        Ok(())
    }

    async fn append_creation(&self, id: &BowlId, link: &str) -> Result<BowlMeta, StoreError> {
        let _guard = self.append_lock.lock().await;
        let mut meta = self.get_bowl_meta(id).await?;
        meta.creations.push(link.to_string());
        self.put_bowl_meta(id, &meta).await?;
        Ok(meta)
    }
}
