//! Session validation algebra.

use crate::model::Identity;
use crate::types::IdentityToken;
use async_trait::async_trait;

/// Resolves a session token to the identity it belongs to.
///
/// Returns `None` for unknown, expired or revoked tokens. Implementations
/// do not distinguish those cases to the caller.
#[async_trait]
pub trait IdentityValidator: Send + Sync {
    async fn validate(&self, token: &IdentityToken) -> Option<Identity>;
}
