// src/api/mod.rs
//! Outbound HTTP interpreters for the generation and content algebras.
//!
//! Business logic depends on the traits in `algebras`, never on HTTP details.

pub mod client;
pub mod connection;
pub mod fetcher;
mod responses;

pub use client::ChatCompletionsClient;
pub use connection::HttpClientSettings;
pub use fetcher::HttpContentFetcher;
