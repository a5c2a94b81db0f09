//! Identity validation against a JSON file of known session tokens.

use crate::algebras::IdentityValidator;
use crate::error::AppError;
use crate::model::Identity;
use crate::types::IdentityToken;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Validates tokens against `{ "<token>": Identity }` loaded from disk.
pub struct TokenFileValidator {
    path: Option<PathBuf>,
    sessions: RwLock<HashMap<String, Identity>>,
}

impl TokenFileValidator {
    /// Loads sessions from `path`. A missing file means no valid sessions.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        let sessions = read_sessions(&path).await?;
        log::info!("Loaded {} session(s) from {}", sessions.len(), path.display());
        Ok(Self {
            path: Some(path),
            sessions: RwLock::new(sessions),
        })
    }

    pub fn from_sessions(sessions: HashMap<String, Identity>) -> Self {
        Self {
            path: None,
            sessions: RwLock::new(sessions),
        }
    }

    /// Re-reads the sessions file, replacing the known tokens.
    pub async fn reload(&self) -> Result<usize, AppError> {
        let Some(path) = &self.path else {
            return Ok(self.sessions.read().len());
        };
        let sessions = read_sessions(path).await?;
        let count = sessions.len();
        *self.sessions.write() = sessions;
        Ok(count)
    }
}

async fn read_sessions(path: &Path) -> Result<HashMap<String, Identity>, AppError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::warn!("No sessions file at {}", path.display());
            Ok(HashMap::new())
        }
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl IdentityValidator for TokenFileValidator {
    async fn validate(&self, token: &IdentityToken) -> Option<Identity> {
        let identity = self.sessions.read().get(token.as_str()).cloned();
        if identity.is_none() {
            log::debug!("Rejected session token {}", token);
        }
        identity
    }
}
