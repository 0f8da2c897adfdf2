//! Stripe API access
//!
//! A small client for Stripe list endpoints plus the fixed catalog of
//! resources the connector exports.
//!
//! All requests are authenticated with the secret key as a bearer token and
//! pinned to [`STRIPE_API_VERSION`]. Only the first page of each list is
//! read.

mod client;
mod resources;

pub use client::{StripeClient, STRIPE_API_BASE, STRIPE_API_VERSION};
pub use resources::{descriptors, StripeList, PAGE_SIZE, RESOURCES};
