//! In-process record store.

use crate::algebras::{RecordStore, StoreError};
use crate::model::BowlMeta;
use crate::types::BowlId;
use async_trait::async_trait;
use dashmap::DashMap;

/// Bowl records held in a concurrent map.
///
/// Appends take the entry's shard lock, so concurrent mixes against one
/// bowl never lose a creation.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    bowls: DashMap<BowlId, BowlMeta>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bowl(self, id: BowlId, meta: BowlMeta) -> Self {
        self.bowls.insert(id, meta);
        self
    }

    pub fn len(&self) -> usize {
        self.bowls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bowls.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get_bowl_meta(&self, id: &BowlId) -> Result<BowlMeta, StoreError> {
        self.bowls
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound {
                key: id.to_string(),
            })
    }

    async fn put_bowl_meta(&self, id: &BowlId, meta: &BowlMeta) -> Result<(), StoreError> {
        self.bowls.insert(id.clone(), meta.clone());
        Ok(())
    }

    async fn append_creation(&self, id: &BowlId, link: &str) -> Result<BowlMeta, StoreError> {
        let mut entry = self.bowls.get_mut(id).ok_or_else(|| StoreError::NotFound {
            key: id.to_string(),
        })?;
        entry.creations.push(link.to_string());
        Ok(entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BowlConfig;
    use std::sync::Arc;

    fn bowl_id(s: &str) -> BowlId {
        BowlId::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_read_your_write() {
        let store = MemoryRecordStore::new();
        let id = bowl_id("b1");
        let meta = BowlMeta::new(BowlConfig::new("newsArticle", "concise"));

        store.put_bowl_meta(&id, &meta).await.unwrap();
        assert_eq!(store.get_bowl_meta(&id).await.unwrap(), meta);
    }

    #[tokio::test]
    async fn test_missing_bowl_is_not_found() {
        let store = MemoryRecordStore::new();
        let err = store.get_bowl_meta(&bowl_id("nope")).await.unwrap_err();
        assert!(err.is_not_found());

        let err = store.append_creation(&bowl_id("nope"), "x").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_all_kept() {
        let id = bowl_id("b1");
        let store = Arc::new(MemoryRecordStore::new().with_bowl(
            id.clone(),
            BowlMeta::new(BowlConfig::new("newsArticle", "concise")),
        ));

        let mut tasks = Vec::new();
        for n in 0..16 {
            let store = Arc::clone(&store);
            let id = id.clone();
            tasks.push(tokio::spawn(async move {
                store.append_creation(&id, &format!("link-{}", n)).await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(store.get_bowl_meta(&id).await.unwrap().creations.len(), 16);
    }
}
