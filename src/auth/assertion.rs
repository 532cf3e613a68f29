//! Time-bounded RS256 assertion built from a service-account credential.

// crates.io
use jsonwebtoken::{Algorithm, EncodingKey, Header};
// self
use crate::{
	_prelude::*,
	auth::{self, SecretString},
	credential::Credentials,
};

/// Lifetime of a signed assertion; expiry is always exactly this far past issuance.
pub const ASSERTION_LIFETIME: Duration = Duration::seconds(3600);

/// Ephemeral signed JWT asserting the service account's identity to the token issuer.
///
/// Created fresh for every dispatch attempt and never persisted.
#[derive(Clone, Debug)]
pub struct SignedAssertion(SecretString);
impl SignedAssertion {
	/// Returns the compact JWS value for embedding into the grant body.
	pub fn expose(&self) -> &str {
		self.0.expose()
	}
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
	iss: &'a str,
	sub: &'a str,
	aud: &'a str,
	iat: i64,
	exp: i64,
	scope: &'a str,
}
impl<'a> AssertionClaims<'a> {
	fn new(credentials: &'a Credentials, issued_at: OffsetDateTime) -> Self {
		let iat = issued_at.unix_timestamp();

		Self {
			iss: &credentials.client_email,
			sub: &credentials.client_email,
			aud: &credentials.token_uri,
			iat,
			exp: iat + ASSERTION_LIFETIME.whole_seconds(),
			scope: auth::CLOUD_PLATFORM_SCOPE,
		}
	}
}

/// Builds and signs an assertion for `credentials` at the current wall-clock time.
///
/// Pure function of the credential and the clock; the only failure modes are an unparseable
/// private key and a signing failure inside the JWT encoder.
pub fn sign(credentials: &Credentials) -> Result<SignedAssertion, SigningError> {
	sign_at(credentials, OffsetDateTime::now_utc())
}

pub(crate) fn sign_at(
	credentials: &Credentials,
	issued_at: OffsetDateTime,
) -> Result<SignedAssertion, SigningError> {
	let key = EncodingKey::from_rsa_pem(credentials.private_key.expose().as_bytes())
		.map_err(|source| SigningError::InvalidKey { source })?;
	let mut header = Header::new(Algorithm::RS256);

	header.kid = Some(credentials.private_key_id.clone());

	let claims = AssertionClaims::new(credentials, issued_at);
	let signed = jsonwebtoken::encode(&header, &claims, &key)
		.map_err(|source| SigningError::Encode { source })?;

	Ok(SignedAssertion(SecretString::new(signed)))
}

/// Failures raised while building or signing an assertion.
#[derive(Debug, ThisError)]
pub enum SigningError {
	/// The credential's private key is not a parseable PEM-encoded RSA key.
	#[error("Private key could not be parsed as a PEM-encoded RSA key.")]
	InvalidKey {
		/// Underlying key-parsing failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
	/// The claim set could not be signed into a compact JWS.
	#[error("Assertion could not be signed.")]
	Encode {
		/// Underlying encoder failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
}

#[cfg(test)]
mod tests {
	// crates.io
	use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
	use serde_json::Value;
	// self
	use super::*;
	use crate::_preludet::fixture_credentials;

	fn decode_claims(assertion: &SignedAssertion) -> Value {
		let payload = assertion
			.expose()
			.split('.')
			.nth(1)
			.expect("Compact JWS should carry a payload segment.");
		let bytes =
			URL_SAFE_NO_PAD.decode(payload).expect("Payload segment should be base64url.");

		serde_json::from_slice(&bytes).expect("Payload segment should decode as JSON claims.")
	}

	#[test]
	fn sign_sets_key_id_header_and_hour_expiry() {
		let credentials = fixture_credentials();
		let issued_at = OffsetDateTime::from_unix_timestamp(1_700_000_000)
			.expect("Fixture timestamp should be valid.");
		let assertion = sign_at(&credentials, issued_at)
			.expect("Signing with the fixture key should succeed.");
		let header = jsonwebtoken::decode_header(assertion.expose())
			.expect("Signed assertion header should decode.");

		assert_eq!(header.alg, Algorithm::RS256);
		assert_eq!(header.kid.as_deref(), Some("fixture-key-id"));

		let claims = decode_claims(&assertion);

		assert_eq!(claims["iss"], credentials.client_email.as_str());
		assert_eq!(claims["sub"], credentials.client_email.as_str());
		assert_eq!(claims["aud"], credentials.token_uri.as_str());
		assert_eq!(claims["scope"], auth::CLOUD_PLATFORM_SCOPE);
		assert_eq!(claims["iat"], 1_700_000_000_i64);
		assert_eq!(claims["exp"], 1_700_000_000_i64 + 3_600);
	}

	#[test]
	fn sign_rejects_malformed_private_keys() {
		let mut credentials = fixture_credentials();

		credentials.private_key = SecretString::new("not a pem key");

		let err = sign(&credentials).expect_err("Signing with a malformed key should fail.");

		assert!(matches!(err, SigningError::InvalidKey { .. }));
	}

	#[test]
	fn assertions_are_fresh_per_call() {
		let credentials = fixture_credentials();
		let first = sign_at(
			&credentials,
			OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("Valid timestamp."),
		)
		.expect("First signing should succeed.");
		let second = sign_at(
			&credentials,
			OffsetDateTime::from_unix_timestamp(1_700_000_060).expect("Valid timestamp."),
		)
		.expect("Second signing should succeed.");

		assert_ne!(first.expose(), second.expose());
	}
}
