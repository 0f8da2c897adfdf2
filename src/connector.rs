//! Connector trait and the Stripe connector
//!
//! Defines the surface a host uses: `spec()` for the option schema,
//! `check()` for a credential probe and `read()` for the batch sequence.

use crate::config::{option_schema, ConfigField, SourceConfig};
use crate::engine::{BatchReader, ResourceFetcher};
use crate::error::Result;
use crate::normalize::Normalizer;
use crate::stripe::{descriptors, StripeClient, RESOURCES, STRIPE_API_BASE};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

// ============================================================================
// Connector Spec (for UI)
// ============================================================================

/// Connector specification returned by spec()
#[derive(Debug, Clone, Serialize)]
pub struct ConnectorSpec {
    /// Connector name
    pub name: String,

    /// Human-readable title
    pub title: String,

    /// Description
    pub description: Option<String>,

    /// Configuration options
    pub options: Vec<ConfigField>,
}

// ============================================================================
// Connector Trait
// ============================================================================

/// Core trait that connectors implement
#[async_trait]
pub trait Connector: Send + Sync {
    /// Returns the connector specification (for UI/validation)
    fn spec(&self) -> ConnectorSpec;

    /// Resource names in emission order
    fn resources(&self) -> Vec<&str>;

    /// Probe the credentials. Never fails; any error is logged and reported
    /// as `false`.
    async fn check(&self, config: &SourceConfig) -> bool;

    /// Start a read over all resources, or the named subset
    async fn read(&self, config: &SourceConfig, only: Option<&[String]>) -> Result<BatchReader>;
}

// ============================================================================
// Stripe Connector
// ============================================================================

/// Stripe source
#[derive(Debug, Clone)]
pub struct StripeConnector {
    base_url: String,
}

impl Default for StripeConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl StripeConnector {
    /// Connector against the production API
    pub fn new() -> Self {
        Self {
            base_url: STRIPE_API_BASE.to_string(),
        }
    }

    /// Connector against another API root
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn client(&self, config: &SourceConfig) -> Result<StripeClient> {
        StripeClient::with_base_url(config, &self.base_url)
    }
}

#[async_trait]
impl Connector for StripeConnector {
    fn spec(&self) -> ConnectorSpec {
        ConnectorSpec {
            name: "stripe".to_string(),
            title: "Stripe".to_string(),
            description: Some(
                "Customers, charges, invoices, subscriptions and other billing data".to_string(),
            ),
            options: option_schema(),
        }
    }

    fn resources(&self) -> Vec<&str> {
        RESOURCES.iter().map(|(name, _)| *name).collect()
    }

    async fn check(&self, config: &SourceConfig) -> bool {
        let result = match self.client(config) {
            Ok(client) => client.list("customers", 1).await.map(|_| ()),
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                info!("Connection check succeeded");
                true
            }
            Err(e) if e.is_auth_failure() => {
                error!("Connection check failed, API key rejected: {e}");
                false
            }
            Err(e) => {
                error!("Connection check failed: {e}");
                false
            }
        }
    }

    async fn read(&self, config: &SourceConfig, only: Option<&[String]>) -> Result<BatchReader> {
        let client = Arc::new(self.client(config)?);
        let mut fetcher = ResourceFetcher::new(descriptors(client));
        if let Some(names) = only {
            fetcher = fetcher.select(names)?;
        }

        info!("Reading {} resources", fetcher.len());
        Ok(fetcher.reader(Normalizer::new(config.redacted_key())))
    }
}
