//! Content retrieval algebra.

use super::error::FetchError;
use async_trait::async_trait;

/// Dereferences a content URL into its body text.
///
/// # Laws
///
/// - **L1 (Body-Only)**: A successful fetch returns the response body as
///   text, unmodified.
/// - **L2 (No-Side-Effects)**: Fetching never mutates a bowl or any store.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}
