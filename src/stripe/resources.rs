//! Resource catalog

use super::client::StripeClient;
use crate::engine::{FetchOperation, ResourceDescriptor};
use crate::error::Result;
use crate::types::RawRecord;
use async_trait::async_trait;
use std::sync::Arc;

/// Items requested per resource. Only the first page is read.
pub const PAGE_SIZE: usize = 100;

/// Exported resources in emission order: (display name, list endpoint)
pub const RESOURCES: &[(&str, &str)] = &[
    ("customers", "customers"),
    ("charges", "charges"),
    ("invoices", "invoices"),
    ("subscriptions", "subscriptions"),
    ("products", "products"),
    ("prices", "prices"),
    ("paymentIntents", "payment_intents"),
    ("payouts", "payouts"),
    ("refunds", "refunds"),
    ("balanceTransactions", "balance_transactions"),
    ("events", "events"),
    ("disputes", "disputes"),
];

/// First page of one Stripe list endpoint
#[derive(Debug, Clone)]
pub struct StripeList {
    client: Arc<StripeClient>,
    endpoint: &'static str,
    limit: usize,
}

impl StripeList {
    pub fn new(client: Arc<StripeClient>, endpoint: &'static str) -> Self {
        Self {
            client,
            endpoint,
            limit: PAGE_SIZE,
        }
    }

    /// Override the page size
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint
    }
}

#[async_trait]
impl FetchOperation for StripeList {
    async fn fetch(&self) -> Result<Vec<RawRecord>> {
        self.client.list(self.endpoint, self.limit).await
    }
}

/// The full descriptor list, sharing one client
pub fn descriptors(client: Arc<StripeClient>) -> Vec<ResourceDescriptor> {
    RESOURCES
        .iter()
        .map(|(name, endpoint)| {
            ResourceDescriptor::new(*name, StripeList::new(Arc::clone(&client), *endpoint))
        })
        .collect()
}
