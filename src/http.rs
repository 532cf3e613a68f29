//! Transport primitives for the token-exchange and message-send calls.
//!
//! [`HttpTransport`] is the crate's only dependency on an HTTP stack. Both remote calls this
//! crate performs are plain POSTs, so a [`TransportRequest`] carries a URL, an optional bearer
//! secret, a content type, and the body bytes—no method field. Callers substitute test doubles
//! or alternate stacks by implementing the trait; [`CallProbe`] covers the recording needs such
//! doubles have.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::CONTENT_TYPE;
// self
use crate::{_prelude::*, auth::SecretString, error::TransportError};

/// Content type of the form-encoded token-exchange body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
/// Content type of the JSON message-send body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Boxed future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<TransportResponse, TransportError>> + 'a + Send>>;

/// Outbound POST handed to a transport.
#[derive(Clone, Debug)]
pub struct TransportRequest {
	/// Destination URL.
	pub url: Url,
	/// Bearer secret attached as an `Authorization` header, when present.
	pub bearer: Option<SecretString>,
	/// MIME type of `body`.
	pub content_type: &'static str,
	/// Raw request body bytes.
	pub body: Vec<u8>,
}

/// Response surfaced back from a transport.
#[derive(Clone, Debug)]
pub struct TransportResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body bytes.
	pub body: Vec<u8>,
}

/// Abstraction over HTTP stacks capable of executing the crate's outbound POSTs.
///
/// Implementations must be `Send + Sync + 'static` so one dispatcher can serve concurrent
/// callers, and the returned future must be `Send` for the lifetime of the in-flight call.
/// Timeout enforcement is the implementation's concern; the dispatcher imposes none.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes a single POST, returning the raw response or a transport failure.
	fn execute(&self, request: TransportRequest) -> TransportFuture<'_>;
}

/// Records every request executed through a transport double.
///
/// Cloned probes share one log, so a test can keep a handle while the transport moves into the
/// dispatcher and later assert how many calls were attempted and with what headers.
#[derive(Clone, Debug, Default)]
pub struct CallProbe(Arc<Mutex<Vec<CallRecord>>>);
impl CallProbe {
	/// Appends a request snapshot to the shared log.
	pub fn record(&self, request: &TransportRequest) {
		self.0.lock().push(CallRecord {
			url: request.url.clone(),
			bearer: request.bearer.clone(),
			content_type: request.content_type,
		});
	}

	/// Returns how many requests have been recorded so far.
	pub fn calls(&self) -> usize {
		self.0.lock().len()
	}

	/// Returns the recorded snapshots, consuming them from the log.
	pub fn take(&self) -> Vec<CallRecord> {
		std::mem::take(&mut *self.0.lock())
	}
}

/// Snapshot of a single probed request.
#[derive(Clone, Debug)]
pub struct CallRecord {
	/// Destination URL of the request.
	pub url: Url,
	/// Bearer secret attached to the request, still redacted.
	pub bearer: Option<SecretString>,
	/// MIME type of the request body.
	pub content_type: &'static str,
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
/// Configure timeouts and TLS on the wrapped client; the dispatcher imposes neither.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn execute(&self, request: TransportRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let TransportRequest { url, bearer, content_type, body } = request;
			let mut builder = client.post(url).header(CONTENT_TYPE, content_type).body(body);

			if let Some(bearer) = &bearer {
				builder = builder.bearer_auth(bearer.expose());
			}

			let response = builder.send().await.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

			Ok(TransportResponse { status, body })
		})
	}
}
