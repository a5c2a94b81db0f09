// src/output/writer.rs
//! Publishes creations to a directory served under a public base URL.
//!
//! This module is the only place artifact bytes are written.

use super::paths::{artifact_path, is_safe_filename};
use crate::algebras::{ArtifactStore, StoreError};
use crate::types::{Markup, Namespace, ValidatedUrl};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Artifact store writing `<root>/<namespace>/<filename>` and linking to
/// `<public_base>/<namespace>/<filename>`.
pub struct DirectoryArtifactStore {
    root: PathBuf,
    public_base: ValidatedUrl,
}

impl DirectoryArtifactStore {
    pub fn new(root: impl Into<PathBuf>, public_base: ValidatedUrl) -> Self {
        Self {
            root: root.into(),
            public_base,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ArtifactStore for DirectoryArtifactStore {
    async fn upload_markup(
        &self,
        markup: &Markup,
        namespace: &Namespace,
        filename: &str,
    ) -> Result<String, StoreError> {
        if !is_safe_filename(filename) {
            return Err(StoreError::Io {
                message: format!("refusing unsafe artifact filename '{}'", filename),
            });
        }

        let started = Instant::now();
        let path = artifact_path(&self.root, namespace, filename);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, markup.as_str()).await?;

        let link = self
            .public_base
            .join_path(&format!("{}/{}", namespace.as_str(), filename));

        log::info!(
            "Published {} bytes to {} in {}ms",
            markup.len(),
            path.display(),
            started.elapsed().as_millis()
        );
        Ok(link)
    }
}
