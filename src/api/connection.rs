// src/api/connection.rs
//! HTTP client construction shared by every outbound adapter.
//!
//! Each adapter builds and owns its client; nothing is cached at process
//! scope.

use reqwest::{header::HeaderMap, Client, ClientBuilder};
use std::time::Duration;

/// Connection settings for an outbound HTTP client.
#[derive(Debug, Clone)]
pub struct HttpClientSettings {
    /// Maximum idle connections per host
    pub max_idle_per_host: usize,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Whole-request timeout; a hung upstream fails instead of stalling a mix
    pub request_timeout: Duration,
    /// How long idle connections are kept
    pub pool_idle_timeout: Duration,
    /// TCP keep-alive interval
    pub tcp_keepalive: Option<Duration>,
}

impl HttpClientSettings {
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for HttpClientSettings {
    fn default() -> Self {
        Self {
            max_idle_per_host: 10,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            pool_idle_timeout: Duration::from_secs(90),
            tcp_keepalive: Some(Duration::from_secs(60)),
        }
    }
}

/// Builds a client with the given settings and default headers.
pub fn build_client(
    settings: &HttpClientSettings,
    headers: HeaderMap,
) -> Result<Client, reqwest::Error> {
    let mut builder = ClientBuilder::new()
        .default_headers(headers)
        .user_agent(concat!("aimixer/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(settings.max_idle_per_host)
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .pool_idle_timeout(settings.pool_idle_timeout);

    if let Some(keepalive) = settings.tcp_keepalive {
        builder = builder.tcp_keepalive(keepalive);
    }

    builder.build()
}
