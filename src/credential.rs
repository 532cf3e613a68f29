//! Service-account credential model, validation gate, and file loading.

// std
use std::{
	fs,
	path::{Path, PathBuf},
};
// self
use crate::{_prelude::*, auth::SecretString};

/// Google service-account credentials used to sign assertions and exchange bearer tokens.
///
/// Constructed once—from a JSON document via [`Credentials::from_file`] or supplied directly—and
/// immutable thereafter. The [`Dispatcher`](crate::dispatch::Dispatcher) constructor runs
/// [`Credentials::validate`]; loading alone performs no validation, so callers that bypass the
/// dispatcher gate accept a late failure during signing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
	/// Credential kind marker, `service_account` for documents this crate consumes.
	#[serde(rename = "type", skip_serializing_if = "String::is_empty")]
	pub kind: String,
	/// Project whose messaging endpoint receives the dispatches.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub project_id: String,
	/// Identifier of the RSA key pair, forwarded as the assertion's `kid` header.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub private_key_id: String,
	/// PEM-encoded RSA private key; redacted from all formatter output.
	#[serde(skip_serializing_if = "SecretString::is_empty")]
	pub private_key: SecretString,
	/// Service-account email, used as both issuer and subject of the assertion.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub client_email: String,
	/// Unique client identifier of the service account.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub client_id: String,
	/// Authorization endpoint advertised by the credential document.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub auth_uri: String,
	/// Token issuance endpoint targeted by the JWT-bearer exchange.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub token_uri: String,
	/// Public certificate URL of the auth provider.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub auth_provider_x509_cert_url: String,
	/// Public certificate URL of this client.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub client_x509_cert_url: String,
}
impl Credentials {
	/// Loads credentials from the service-account JSON document at `path`.
	///
	/// Returns a typed error instead of aborting; callers decide whether a bad credential file
	/// is fatal.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CredentialFileError> {
		let path = path.as_ref();
		let bytes = fs::read(path)
			.map_err(|source| CredentialFileError::Read { path: path.to_path_buf(), source })?;
		let mut deserializer = serde_json::Deserializer::from_slice(&bytes);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| CredentialFileError::Parse { path: path.to_path_buf(), source })
	}

	/// Checks the eight required fields in a fixed order, failing fast on the first empty one.
	pub fn validate(&self) -> Result<(), ValidationError> {
		let checks: [(&'static str, bool); 8] = [
			("project_id", self.project_id.is_empty()),
			("private_key", self.private_key.is_empty()),
			("client_email", self.client_email.is_empty()),
			("client_id", self.client_id.is_empty()),
			("auth_uri", self.auth_uri.is_empty()),
			("token_uri", self.token_uri.is_empty()),
			("auth_provider_x509_cert_url", self.auth_provider_x509_cert_url.is_empty()),
			("client_x509_cert_url", self.client_x509_cert_url.is_empty()),
		];

		match checks.into_iter().find_map(|(field, empty)| empty.then_some(field)) {
			Some(field) => Err(ValidationError::MissingField { field }),
			None => Ok(()),
		}
	}
}

/// Error returned when the credential required-field gate fails.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ValidationError {
	/// A required credential field was empty.
	#[error("Credential field `{field}` is required.")]
	MissingField {
		/// Name of the first missing field, in validation order.
		field: &'static str,
	},
}

/// Failures raised while loading a credential document from disk.
#[derive(Debug, ThisError)]
pub enum CredentialFileError {
	/// The file could not be read.
	#[error("Failed to read credential file {}.", path.display())]
	Read {
		/// Path supplied by the caller.
		path: PathBuf,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// The file is not a valid service-account JSON document.
	#[error("Failed to parse credential file {}.", path.display())]
	Parse {
		/// Path supplied by the caller.
		path: PathBuf,
		/// Structured decode failure naming the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
