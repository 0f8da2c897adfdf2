//! HTTP client module
//!
//! Thin wrapper over reqwest: base URL joining, default headers,
//! bearer authentication and status classification. Every request is a single
//! attempt; failures are returned to the caller unchanged.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
