//! Authentication module
//!
//! Stripe takes the secret key as a bearer token. Requests without
//! credentials use [`AuthConfig::None`].

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;
