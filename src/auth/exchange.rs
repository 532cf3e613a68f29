//! OAuth 2.0 JWT-bearer grant against the credential's token endpoint.

// crates.io
use serde_json::Value;
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	auth::{SecretString, SignedAssertion},
	error::TransportError,
	http::{self, HttpTransport, TransportRequest},
};

/// Grant type identifier of the OAuth 2.0 JWT-bearer flow.
pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Short-lived bearer token returned by the token issuer.
///
/// Requested fresh on every dispatch; the expiry is informational only and never enforced or
/// cached by this crate.
#[derive(Clone, Debug)]
pub struct AccessToken {
	secret: SecretString,
	expires_in: Option<Duration>,
}
impl AccessToken {
	/// Returns the redacted bearer secret.
	pub fn secret(&self) -> &SecretString {
		&self.secret
	}

	/// Returns the nominal lifetime reported by the issuer, when present.
	pub fn expires_in(&self) -> Option<Duration> {
		self.expires_in
	}
}

/// Exchanges a signed assertion for a bearer token at `token_uri`.
///
/// A single attempt with no retry. HTTP status codes are never consulted: any decoded body
/// without a usable `access_token` string is a failure.
pub async fn exchange<T>(
	transport: &T,
	token_uri: &str,
	assertion: &SignedAssertion,
) -> Result<AccessToken, ExchangeError>
where
	T: ?Sized + HttpTransport,
{
	let url =
		Url::parse(token_uri).map_err(|source| ExchangeError::InvalidEndpoint { source })?;
	let body = form_urlencoded::Serializer::new(String::new())
		.append_pair("grant_type", JWT_BEARER_GRANT_TYPE)
		.append_pair("assertion", assertion.expose())
		.finish();
	let request = TransportRequest {
		url,
		bearer: None,
		content_type: http::FORM_CONTENT_TYPE,
		body: body.into_bytes(),
	};
	let response = transport.execute(request).await?;
	let decoded: Value = serde_json::from_slice(&response.body)
		.map_err(|source| ExchangeError::MalformedResponse { source })?;
	let secret = decoded
		.get("access_token")
		.and_then(Value::as_str)
		.map(SecretString::new)
		.ok_or(ExchangeError::MissingToken)?;
	let expires_in = decoded.get("expires_in").and_then(Value::as_i64).map(Duration::seconds);

	Ok(AccessToken { secret, expires_in })
}

/// Failures raised during the JWT-bearer exchange.
#[derive(Debug, ThisError)]
pub enum ExchangeError {
	/// Token endpoint URI could not be parsed.
	#[error("Token endpoint URI is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Transport failure while calling the token endpoint.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Token endpoint returned a body that is not valid JSON.
	#[error("Token endpoint returned a body that is not valid JSON.")]
	MalformedResponse {
		/// Underlying decode failure.
		#[source]
		source: serde_json::Error,
	},
	/// Decoded response carried no `access_token` string field.
	#[error("Token endpoint response is missing an `access_token` string.")]
	MissingToken,
}
