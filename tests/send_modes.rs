// self
use fcm_dispatch::{_preludet::*, dispatch::PreconditionError, message::Message};

#[tokio::test]
async fn topic_sends_require_a_topic() {
	let (dispatcher, probe) = scripted_dispatcher([]);

	for message in [Message::default(), Message { topic: Some(String::new()), ..Message::default() }]
	{
		let err = dispatcher
			.send_to_topic(message)
			.await
			.expect_err("Topicless sends should fail the precondition gate.");

		assert!(matches!(err, Error::Precondition(PreconditionError::MissingTopic)));
	}

	assert_eq!(probe.calls(), 0, "Failed preconditions should cause no network activity.");
}

#[tokio::test]
async fn condition_sends_require_a_condition() {
	let (dispatcher, probe) = scripted_dispatcher([]);
	let err = dispatcher
		.send_to_condition(Message::default())
		.await
		.expect_err("Conditionless sends should fail the precondition gate.");

	assert!(matches!(err, Error::Precondition(PreconditionError::MissingCondition)));
	assert_eq!(probe.calls(), 0);
}

#[tokio::test]
async fn multicast_sends_require_tokens() {
	let (dispatcher, probe) = scripted_dispatcher([]);

	for message in
		[Message::default(), Message { tokens: Some(Vec::new()), ..Message::default() }]
	{
		let err = dispatcher
			.send_to_multiple(message)
			.await
			.expect_err("Tokenless multicast sends should fail the precondition gate.");

		assert!(matches!(err, Error::Precondition(PreconditionError::EmptyTokenList)));
	}

	assert_eq!(probe.calls(), 0);
}

#[tokio::test]
async fn populated_targets_dispatch_normally() {
	let (dispatcher, probe) = scripted_dispatcher([
		ScriptedReply::Respond(200, TOKEN_OK_BODY),
		ScriptedReply::Respond(200, "{}"),
		ScriptedReply::Respond(200, TOKEN_OK_BODY),
		ScriptedReply::Respond(200, "{}"),
		ScriptedReply::Respond(200, TOKEN_OK_BODY),
		ScriptedReply::Respond(200, "{}"),
	]);

	dispatcher
		.send_to_topic(Message { topic: Some("news".into()), ..Message::default() })
		.await
		.expect("Topic sends with a topic should succeed.");
	dispatcher
		.send_to_condition(Message {
			condition: Some("'news' in topics && 'sports' in topics".into()),
			..Message::default()
		})
		.await
		.expect("Condition sends with a condition should succeed.");
	dispatcher
		.send_to_multiple(Message {
			tokens: Some(vec!["device-a".into(), "device-b".into()]),
			..Message::default()
		})
		.await
		.expect("Multicast sends with tokens should succeed.");

	assert_eq!(probe.calls(), 6);
}
