//! Dispatch-level error types shared across credentials, authentication, and sends.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical dispatch error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Credential failed the required-field gate.
	#[error(transparent)]
	Validation(#[from] crate::credential::ValidationError),
	/// Credential document could not be loaded from disk.
	#[error(transparent)]
	CredentialFile(#[from] crate::credential::CredentialFileError),
	/// A send-mode precondition failed before any network activity.
	#[error(transparent)]
	Precondition(#[from] crate::dispatch::PreconditionError),

	/// Bearer token could not be obtained; the send call was never attempted.
	#[error("Failed to obtain a bearer token for the dispatch.")]
	Authentication {
		/// Signing or exchange failure that aborted the dispatch.
		#[source]
		source: AuthError,
	},
	/// Message payload could not be encoded to wire JSON.
	#[error("Failed to serialize the message payload.")]
	Serialization {
		/// Underlying serializer failure.
		#[source]
		source: serde_json::Error,
	},
	/// Messaging endpoint URL could not be built from the project id.
	#[error("Messaging endpoint URL is invalid.")]
	Endpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Transport failure on the send call (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Messaging endpoint returned a body this crate could not decode.
	#[error("Messaging endpoint returned an undecodable response (HTTP {status}).")]
	ResponseDecode {
		/// Structured decode failure naming the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Messaging endpoint rejected the message with a well-formed error envelope.
	#[error("Messaging endpoint rejected the message: {status}: {message}.")]
	Remote {
		/// Machine-readable status code from the error envelope.
		status: String,
		/// Human-readable message from the error envelope.
		message: String,
	},
}

/// Authentication failures that abort a dispatch before the send call.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Assertion could not be built or signed.
	#[error(transparent)]
	Signing(#[from] crate::auth::SigningError),
	/// Signed assertion could not be exchanged for an access token.
	#[error(transparent)]
	Exchange(#[from] crate::auth::ExchangeError),
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the remote endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the remote endpoint.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
