// src/mix/resolver.rs
//! Turns bowl content items into resolved content.
//!
//! All fetches run concurrently and results keep the bowl's order. A fetch
//! that fails degrades its item to empty text; resolution itself never fails.

use crate::algebras::{ContentFetcher, FetchError};
use crate::model::{ContentItem, ResolvedContent};
use futures::future::join_all;
use std::time::Instant;

pub async fn resolve_contents(
    fetcher: &dyn ContentFetcher,
    items: &[ContentItem],
) -> Vec<ResolvedContent> {
    let started = Instant::now();
    let resolved = join_all(items.iter().map(|item| resolve_item(fetcher, item))).await;

    let fetched = resolved.iter().filter(|r| !r.text.is_empty()).count();
    log::info!(
        "Resolved {}/{} content items in {}ms",
        fetched,
        items.len(),
        started.elapsed().as_millis()
    );
    resolved
}

async fn resolve_item(fetcher: &dyn ContentFetcher, item: &ContentItem) -> ResolvedContent {
    let result = match item.source_url() {
        Some(url) => fetcher.fetch_text(url).await,
        None => Err(FetchError::MissingUrl {
            title: item.title.clone(),
        }),
    };

    match result {
        Ok(text) => ResolvedContent::from_item(item, text),
        Err(e) => {
            log::warn!("Using empty text for '{}': {}", item.title, e);
            ResolvedContent::unfetched(item)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Answers from a fixed table; slower for earlier URLs so completion
    /// order differs from request order.
    struct TableFetcher {
        bodies: HashMap<&'static str, &'static str>,
    }

    #[async_trait]
    impl ContentFetcher for TableFetcher {
        async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
            let delay = match url {
                "https://a.example" => 30,
                "https://b.example" => 10,
                _ => 0,
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            self.bodies
                .get(url)
                .map(|body| body.to_string())
                .ok_or(FetchError::HttpStatus {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }

    fn fetcher() -> TableFetcher {
        TableFetcher {
            bodies: HashMap::from([
                ("https://a.example", "alpha"),
                ("https://b.example", "beta"),
                ("https://info.example", "info body"),
            ]),
        }
    }

    #[tokio::test]
    async fn test_order_is_preserved() {
        let items = vec![
            ContentItem::new("A", "article").with_link("https://a.example"),
            ContentItem::new("B", "article").with_link("https://b.example"),
        ];
        let resolved = resolve_contents(&fetcher(), &items).await;
        let texts: Vec<_> = resolved.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["alpha", "beta"]);
    }

    #[tokio::test]
    async fn test_failures_degrade_to_empty_text() {
        let items = vec![
            ContentItem::new("Gone", "article").with_link("https://missing.example"),
            ContentItem::new("No link", "article"),
            ContentItem::new("B", "article").with_link("https://b.example"),
        ];
        let resolved = resolve_contents(&fetcher(), &items).await;
        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved[0].title, "Gone");
        assert_eq!(resolved[0].text, "");
        assert_eq!(resolved[1].text, "");
        assert_eq!(resolved[2].text, "beta");
    }

    #[tokio::test]
    async fn test_info_link_is_preferred() {
        let items = vec![ContentItem::new("Both", "article")
            .with_link("https://a.example")
            .with_info_link("https://info.example")];
        let resolved = resolve_contents(&fetcher(), &items).await;
        assert_eq!(resolved[0].text, "info body");
    }

    /// Every fetch waits until all of them have started.
    struct RendezvousFetcher {
        barrier: tokio::sync::Barrier,
    }

    #[async_trait]
    impl ContentFetcher for RendezvousFetcher {
        async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
            self.barrier.wait().await;
            Ok(format!("body of {}", url))
        }
    }

    #[tokio::test]
    async fn test_fetches_run_concurrently() {
        let items: Vec<_> = ["https://a.example", "https://b.example", "https://c.example"]
            .iter()
            .map(|url| ContentItem::new("Item", "article").with_link(*url))
            .collect();
        let fetcher = RendezvousFetcher {
            barrier: tokio::sync::Barrier::new(items.len()),
        };

        let resolved = tokio::time::timeout(
            Duration::from_secs(2),
            resolve_contents(&fetcher, &items),
        )
        .await
        .expect("fetches were not in flight together");

        assert_eq!(resolved[2].text, "body of https://c.example");
    }

    #[tokio::test]
    async fn test_empty_input() {
        assert!(resolve_contents(&fetcher(), &[]).await.is_empty());
    }
}
