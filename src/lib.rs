//! # stripe-source
//!
//! A Stripe data source for reporting tools. Given a secret API key it
//! fetches a fixed list of billing resources and yields each as a row batch
//! with inferred column types.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use stripe_source::{Connector, SourceConfig, StripeConnector};
//!
//! #[tokio::main]
//! async fn main() -> stripe_source::Result<()> {
//!     let connector = StripeConnector::new();
//!     let config = SourceConfig::new("sk_test_...");
//!
//!     if !connector.check(&config).await {
//!         return Ok(());
//!     }
//!
//!     let mut batches = connector.read(&config, None).await?.into_stream();
//!     while let Some(batch) = batches.next().await {
//!         let batch = batch?;
//!         println!("{}: {} rows", batch.name, batch.expected_row_count);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   raw records   ┌──────────────┐   RowBatch   ┌────────┐
//! │   Fetcher    │ ──────────────▶ │  Normalizer  │ ───────────▶ │ caller │
//! │ (sequential) │                 │ flatten+infer│              │        │
//! └──────────────┘                 └──────────────┘              └────────┘
//!        │ failure: log and skip          │ empty: emit nothing
//! ```
//!
//! Resources are always emitted in this order: customers, charges,
//! invoices, subscriptions, products, prices, paymentIntents, payouts,
//! refunds, balanceTransactions, events, disputes.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Source configuration and option schema
pub mod config;

/// Authentication
pub mod auth;

/// HTTP client
pub mod http;

/// Stripe client and resource catalog
pub mod stripe;

/// Flattening and row batches
pub mod normalize;

/// Column type inference
pub mod schema;

/// Sequential fetch loop and batch stream
pub mod engine;

/// Connector trait and Stripe connector
pub mod connector;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::SourceConfig;
pub use connector::{Connector, StripeConnector};
pub use engine::{BatchReader, BatchStream, ReadStats};
pub use error::{Error, Result};
pub use normalize::{FieldValue, Row, RowBatch};
pub use schema::{ColumnType, EvidenceType, TypeFidelity};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
