//! Message dispatch over the FCM HTTP v1 `messages:send` endpoint.
//!
//! A [`Dispatcher`] holds a validated service-account credential and a transport. Every send
//! performs the full authentication handshake—sign an assertion, exchange it for a bearer
//! token—then POSTs the message. Nothing is cached between sends and nothing is retried.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, assertion, exchange},
	credential::Credentials,
	error::AuthError,
	http::{self, HttpTransport, TransportRequest, TransportResponse},
	message::{Message, MessagePayload},
	obs::{self, SendMode, SendOutcome, SendSpan},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

/// Origin of the FCM HTTP v1 API.
pub const MESSAGING_ORIGIN: &str = "https://fcm.googleapis.com";

/// Dispatcher backed by the default reqwest transport.
#[cfg(feature = "reqwest")]
pub type ReqwestDispatcher = Dispatcher<ReqwestTransport>;

/// Authenticated FCM message sender.
///
/// Cheap to clone; clones share the transport. The credential is validated once at
/// construction, so a constructed dispatcher never fails a send on missing credential fields.
pub struct Dispatcher<T>
where
	T: ?Sized + HttpTransport,
{
	credentials: Credentials,
	transport: Arc<T>,
}
impl<T> Dispatcher<T>
where
	T: HttpTransport,
{
	/// Builds a dispatcher from a credential and an explicit transport.
	///
	/// Fails when the credential is missing any required field.
	pub fn with_transport(credentials: Credentials, transport: T) -> Result<Self> {
		credentials.validate()?;

		Ok(Self { credentials, transport: Arc::new(transport) })
	}
}
impl<T> Dispatcher<T>
where
	T: ?Sized + HttpTransport,
{
	/// Returns the credential this dispatcher authenticates with.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Sends a message as-is, forwarding whichever target field the caller populated.
	///
	/// No local precondition; the remote service rejects missing or ambiguous targets.
	pub async fn send(&self, message: Message) -> Result<()> {
		self.dispatch(SendMode::Direct, MessagePayload { message }).await
	}

	/// Sends a message to every device in its `tokens` field.
	///
	/// Fails with a precondition error when the token list is absent or empty; nothing is
	/// signed or sent in that case.
	pub async fn send_to_multiple(&self, message: Message) -> Result<()> {
		if message.tokens.as_deref().is_none_or(<[String]>::is_empty) {
			return Err(PreconditionError::EmptyTokenList.into());
		}

		self.dispatch(SendMode::Multicast, MessagePayload { message }).await
	}

	/// Sends a message to the topic named by its `topic` field.
	///
	/// Fails with a precondition error when the topic is absent or empty; nothing is signed
	/// or sent in that case.
	pub async fn send_to_topic(&self, message: Message) -> Result<()> {
		if message.topic.as_deref().is_none_or(str::is_empty) {
			return Err(PreconditionError::MissingTopic.into());
		}

		self.dispatch(SendMode::Topic, MessagePayload { message }).await
	}

	/// Sends a message to the subscription condition in its `condition` field.
	///
	/// Fails with a precondition error when the condition is absent or empty; nothing is
	/// signed or sent in that case.
	pub async fn send_to_condition(&self, message: Message) -> Result<()> {
		if message.condition.as_deref().is_none_or(str::is_empty) {
			return Err(PreconditionError::MissingCondition.into());
		}

		self.dispatch(SendMode::Condition, MessagePayload { message }).await
	}

	async fn dispatch(&self, mode: SendMode, payload: MessagePayload) -> Result<()> {
		let span = SendSpan::new(mode, "dispatch");

		span.instrument(async move {
			obs::record_send_outcome(mode, SendOutcome::Attempt);

			let result = self.dispatch_inner(&payload).await;

			match &result {
				Ok(()) => obs::record_send_outcome(mode, SendOutcome::Success),
				Err(_) => obs::record_send_outcome(mode, SendOutcome::Failure),
			}

			result
		})
		.await
	}

	async fn dispatch_inner(&self, payload: &MessagePayload) -> Result<()> {
		let body = serde_json::to_vec(payload).map_err(|source| Error::Serialization { source })?;
		let url = messaging_endpoint(&self.credentials.project_id)?;
		// Authentication failures abort here; the send call is never attempted with a missing
		// or empty bearer token.
		let token =
			self.bearer_token().await.map_err(|source| Error::Authentication { source })?;
		let request = TransportRequest {
			url,
			bearer: Some(token.secret().clone()),
			content_type: http::JSON_CONTENT_TYPE,
			body,
		};
		let response = self.transport.execute(request).await?;

		classify_response(&response)
	}

	async fn bearer_token(&self) -> Result<AccessToken, AuthError> {
		let assertion = assertion::sign(&self.credentials)?;
		let token =
			exchange::exchange(self.transport.as_ref(), &self.credentials.token_uri, &assertion)
				.await?;

		Ok(token)
	}
}
#[cfg(feature = "reqwest")]
impl Dispatcher<ReqwestTransport> {
	/// Builds a dispatcher over a default reqwest client.
	///
	/// Fails when the credential is missing any required field.
	pub fn new(credentials: Credentials) -> Result<Self> {
		Self::with_transport(credentials, ReqwestTransport::default())
	}
}
impl<T> Clone for Dispatcher<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self { credentials: self.credentials.clone(), transport: self.transport.clone() }
	}
}
impl<T> Debug for Dispatcher<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Dispatcher")
			.field("project_id", &self.credentials.project_id)
			.finish_non_exhaustive()
	}
}

/// Builds the `messages:send` URL for a project.
pub fn messaging_endpoint(project_id: &str) -> Result<Url> {
	Url::parse(&format!("{MESSAGING_ORIGIN}/v1/projects/{project_id}/messages:send"))
		.map_err(|source| Error::Endpoint { source })
}

fn classify_response(response: &TransportResponse) -> Result<()> {
	if response.status == 200 {
		let mut deserializer = serde_json::Deserializer::from_slice(&response.body);

		serde_path_to_error::deserialize::<_, serde_json::Value>(&mut deserializer)
			.map_err(|source| Error::ResponseDecode { source, status: response.status })?;

		Ok(())
	} else {
		let mut deserializer = serde_json::Deserializer::from_slice(&response.body);
		let envelope: ErrorEnvelope = serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| Error::ResponseDecode { source, status: response.status })?;

		Err(Error::Remote { status: envelope.error.status, message: envelope.error.message })
	}
}

#[derive(Deserialize)]
struct ErrorEnvelope {
	error: RemoteFailure,
}
#[derive(Deserialize)]
struct RemoteFailure {
	status: String,
	message: String,
}

/// Send-mode preconditions checked before any signing or network activity.
#[derive(Debug, ThisError)]
pub enum PreconditionError {
	/// Topic send attempted without a populated `topic` field.
	#[error("Topic sends require a non-empty `topic` field.")]
	MissingTopic,
	/// Condition send attempted without a populated `condition` field.
	#[error("Condition sends require a non-empty `condition` field.")]
	MissingCondition,
	/// Multi-device send attempted without any registration tokens.
	#[error("Multi-device sends require a non-empty `tokens` list.")]
	EmptyTokenList,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::fixture_credentials;

	fn response(status: u16, body: &str) -> TransportResponse {
		TransportResponse { status, body: body.as_bytes().to_vec() }
	}

	#[test]
	fn messaging_endpoint_substitutes_the_project_id() {
		let url = messaging_endpoint("demo-project").expect("Endpoint should build.");

		assert_eq!(
			url.as_str(),
			"https://fcm.googleapis.com/v1/projects/demo-project/messages:send",
		);
	}

	#[test]
	fn classify_accepts_success_json() {
		classify_response(&response(200, r#"{"name":"projects/demo/messages/1"}"#))
			.expect("Decodable success bodies should classify as Ok.");
	}

	#[test]
	fn classify_rejects_undecodable_success_bodies() {
		let err = classify_response(&response(200, "<html>gateway error</html>"))
			.expect_err("Non-JSON success bodies should classify as a decode failure.");

		assert!(matches!(err, Error::ResponseDecode { status: 200, .. }));
	}

	#[test]
	fn classify_extracts_remote_failures() {
		let body = r#"{"error":{"code":400,"status":"INVALID_ARGUMENT","message":"testing"}}"#;
		let err = classify_response(&response(400, body))
			.expect_err("Well-formed error envelopes should classify as remote failures.");

		match err {
			Error::Remote { status, message } => {
				assert_eq!(status, "INVALID_ARGUMENT");
				assert_eq!(message, "testing");
			},
			other => panic!("Expected a remote failure, got {other:?}."),
		}
	}

	#[test]
	fn classify_rejects_malformed_error_envelopes() {
		let err = classify_response(&response(400, "{}"))
			.expect_err("Envelope-less error bodies should classify as a decode failure.");

		assert!(matches!(err, Error::ResponseDecode { status: 400, .. }));
	}

	#[test]
	fn constructor_gates_on_credential_validation() {
		let mut credentials = fixture_credentials();

		credentials.project_id.clear();

		let err = Dispatcher::with_transport(credentials, crate::_preludet::ScriptedTransport::new([]))
			.map(|_| ())
			.expect_err("Construction should fail for an incomplete credential.");

		assert!(matches!(err, Error::Validation(_)));
	}
}
