// src/api/fetcher.rs
//! Fetches the body of a content item's URL.

use super::connection::{build_client, HttpClientSettings};
use crate::algebras::{ContentFetcher, FetchError};
use crate::error::AppError;
use crate::types::ValidatedUrl;
use reqwest::{header::HeaderMap, Client};

/// Content fetcher doing a plain HTTP GET per item.
#[derive(Clone)]
pub struct HttpContentFetcher {
    client: Client,
}

impl HttpContentFetcher {
    pub fn new(settings: &HttpClientSettings) -> Result<Self, AppError> {
        let client = build_client(settings, HeaderMap::new())?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl ContentFetcher for HttpContentFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let url = ValidatedUrl::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if url.as_url().scheme() == "file" {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
                reason: "file URLs are not fetched".to_string(),
            });
        }

        log::debug!("GET {}", url);
        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        log::debug!("Fetched {} bytes from {}", text.len(), url);
        Ok(text)
    }
}
