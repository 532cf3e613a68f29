//! Service-account authentication: assertion signing and bearer-token exchange.
//!
//! Every dispatch drives the same two-step flow: [`assertion::sign`] turns the credential into a
//! short-lived RS256 assertion, and [`exchange::exchange`] trades that assertion for a bearer
//! [`AccessToken`] via the OAuth 2.0 JWT-bearer grant. Neither step caches anything; a dispatch
//! always authenticates from scratch.

pub mod assertion;
pub mod exchange;

mod secret;

pub use assertion::{SignedAssertion, SigningError};
pub use exchange::{AccessToken, ExchangeError};
pub use secret::SecretString;

/// OAuth scope requested inside every signed assertion.
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
/// Narrow Firebase messaging scope.
///
/// Not requested by [`assertion::sign`]; the broader [`CLOUD_PLATFORM_SCOPE`] is what the flow
/// has always sent operationally. Declared for deployments that need to tighten the grant.
pub const FIREBASE_MESSAGING_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
