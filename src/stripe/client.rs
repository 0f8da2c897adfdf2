//! Stripe HTTP client

use crate::auth::AuthConfig;
use crate::config::SourceConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::types::{JsonValue, RawRecord};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

/// Production API root
pub const STRIPE_API_BASE: &str = "https://api.stripe.com";

/// API version every request is pinned to
pub const STRIPE_API_VERSION: &str = "2023-10-16";

/// Envelope of a list endpoint response
#[derive(Debug, Deserialize)]
struct ListResponse {
    data: Vec<JsonValue>,
    #[serde(default)]
    has_more: bool,
}

/// Error payload returned by Stripe on non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type", default)]
    error_type: String,
    #[serde(default)]
    message: String,
}

/// Authenticated client for Stripe list endpoints
#[derive(Debug)]
pub struct StripeClient {
    http: HttpClient,
}

impl StripeClient {
    /// Client against the production API
    pub fn new(config: &SourceConfig) -> Result<Self> {
        Self::with_base_url(config, STRIPE_API_BASE)
    }

    /// Client against another API root (used by tests)
    pub fn with_base_url(config: &SourceConfig, base_url: &str) -> Result<Self> {
        config.validate()?;
        let base = Url::parse(base_url)?;

        let http_config = HttpClientConfig::builder()
            .base_url(base.as_str())
            .header("Stripe-Version", STRIPE_API_VERSION)
            .build();
        let http = HttpClient::with_auth(http_config, AuthConfig::bearer(&config.api_key))?;

        Ok(Self { http })
    }

    /// Fetch the first page of a list endpoint, at most `limit` items
    pub async fn list(&self, endpoint: &str, limit: usize) -> Result<Vec<RawRecord>> {
        let path = format!("/v1/{endpoint}");
        let request = RequestConfig::new().query("limit", limit.to_string());

        let page: ListResponse = self
            .http
            .get_json_with_config(&path, request)
            .await
            .map_err(decode_api_error)
            .and_then(|value: JsonValue| {
                serde_json::from_value(value).map_err(|e| Error::malformed(endpoint, e.to_string()))
            })?;

        debug!("Listed {} {}", page.data.len(), endpoint);
        if page.has_more {
            warn!(
                "{endpoint}: more than {limit} items available, only the first {limit} are read"
            );
        }

        page.data
            .into_iter()
            .map(|item| match item {
                JsonValue::Object(map) => Ok(map),
                other => Err(Error::malformed(
                    endpoint,
                    format!("expected object item, got {other}"),
                )),
            })
            .collect()
    }
}

/// Turn a Stripe error body into a typed error when it parses as one
fn decode_api_error(err: Error) -> Error {
    match err {
        Error::HttpStatus { status, body } => match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) => Error::StripeApi {
                status,
                error_type: envelope.error.error_type,
                message: envelope.error.message,
            },
            Err(_) => Error::HttpStatus { status, body },
        },
        other => other,
    }
}
