//! Wire shapes of the FCM HTTP v1 `messages:send` payload.
//!
//! The dispatcher treats the payload as an opaque serializable blob apart from the target
//! fields the send-mode façade inspects. Every optional field is skipped during serialization,
//! so the wire JSON carries only what the caller populated.

// self
use crate::_prelude::*;

/// Outer envelope POSTed to the `messages:send` endpoint.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MessagePayload {
	/// The message to deliver.
	#[serde(default)]
	pub message: Message,
}

/// A single FCM message with its target, content, and platform overrides.
///
/// Exactly one of [`token`](Message::token), [`tokens`](Message::tokens),
/// [`topic`](Message::topic), or [`condition`](Message::condition) should be populated; the
/// remote service rejects ambiguous targets.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
	/// Registration token of a single target device.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub token: Option<String>,
	/// Registration tokens for multi-device sends.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tokens: Option<Vec<String>>,
	/// Topic name target, without the `/topics/` prefix.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub topic: Option<String>,
	/// Boolean condition over topic subscriptions, e.g. `'a' in topics && 'b' in topics`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub condition: Option<String>,
	/// Basic notification content rendered by the receiving platform.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notification: Option<Notification>,
	/// Arbitrary string-keyed payload data.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<HashMap<String, String>>,
	/// Android-specific delivery overrides.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub android: Option<AndroidConfig>,
	/// Web-push-specific delivery overrides.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub webpush: Option<WebpushConfig>,
	/// APNs-specific delivery overrides.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub apns: Option<ApnsConfig>,
}

/// Cross-platform notification content.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Notification {
	/// Notification title.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Notification body text.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub body: Option<String>,
	/// Image URL shown with the notification.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub image: Option<String>,
	/// Icon resource name or URL.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub icon: Option<String>,
	/// Sound to play on delivery.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sound: Option<String>,
	/// Tag replacing an existing notification with the same value.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tag: Option<String>,
	/// Icon color in `#rrggbb` notation.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
	/// Action taken when the user taps the notification.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub click_action: Option<String>,
	/// Localization key of the body string.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub body_loc_key: Option<String>,
	/// Format arguments of the localized body.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub body_loc_args: Option<String>,
	/// Localization key of the title string.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title_loc_key: Option<String>,
	/// Relative priority hint for the notification.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notification_priority: Option<String>,
}

/// Android delivery overrides.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AndroidConfig {
	/// Collapse key grouping collapsible messages.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub collapse_key: Option<String>,
	/// Delivery priority, `normal` or `high`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub priority: Option<String>,
	/// Time-to-live as a duration string, e.g. `3600s`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ttl: Option<String>,
	/// Package name the registration token must match.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub restricted_package_name: Option<String>,
	/// Android-specific data payload overriding the message-level one.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<HashMap<String, String>>,
	/// Android-specific notification overrides.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notification: Option<Notification>,
	/// FCM SDK feature options.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub fcm_options: Option<HashMap<String, String>>,
	/// Allows delivery while the device is in direct-boot mode.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub direct_boot_ok: Option<bool>,
}

/// Web-push delivery overrides.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebpushConfig {
	/// HTTP headers forwarded to the push service.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub headers: Option<HashMap<String, String>>,
	/// Web-push-specific data payload overriding the message-level one.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<HashMap<String, String>>,
	/// Web-push-specific notification overrides.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notification: Option<Notification>,
	/// FCM SDK feature options.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub fcm_options: Option<HashMap<String, String>>,
}

/// APNs delivery overrides.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApnsConfig {
	/// APNs request headers, e.g. `apns-priority`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub headers: Option<HashMap<String, String>>,
	/// APNs payload wrapping the `aps` dictionary.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub payload: Option<ApnsPayload>,
}

/// APNs payload carrying the `aps` dictionary.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ApnsPayload {
	/// The `aps` dictionary evaluated by the device.
	#[serde(default)]
	pub aps: Aps,
}

/// The APNs `aps` dictionary.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Aps {
	/// Alert content shown to the user.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub alert: Option<ApnsAlert>,
	/// Badge count shown on the app icon.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub badge: Option<u32>,
	/// Sound to play on delivery.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sound: Option<String>,
	/// Set to 1 for background-update notifications.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub content_available: Option<u8>,
	/// Thread identifier grouping related notifications.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub thread_id: Option<String>,
	/// Notification category registered by the app.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub category: Option<String>,
}

/// APNs alert content; the wire keys use APNs' kebab-case convention.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApnsAlert {
	/// Alert title.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Alert subtitle.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub subtitle: Option<String>,
	/// Alert body text.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub body: Option<String>,
	/// Localization key of the title string.
	#[serde(rename = "title-loc-key", skip_serializing_if = "Option::is_none")]
	pub title_loc_key: Option<String>,
	/// Format arguments of the localized title.
	#[serde(rename = "title-loc-args", skip_serializing_if = "Option::is_none")]
	pub title_loc_args: Option<String>,
	/// Localization key of the action button label.
	#[serde(rename = "action-loc-key", skip_serializing_if = "Option::is_none")]
	pub action_loc_key: Option<String>,
	/// Localization key of the body string.
	#[serde(rename = "loc-key", skip_serializing_if = "Option::is_none")]
	pub loc_key: Option<String>,
	/// Format arguments of the localized body.
	#[serde(rename = "loc-args", skip_serializing_if = "Option::is_none")]
	pub loc_args: Option<String>,
	/// Launch image shown when the app opens from the notification.
	#[serde(rename = "launch-image", skip_serializing_if = "Option::is_none")]
	pub launch_image: Option<String>,
}

/// FCM feature options attached to an APNs message.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApnsFcmOptions {
	/// Analytics label associated with the message.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub analytics_label: Option<String>,
	/// Image URL shown with the notification.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub image: Option<String>,
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn minimal_token_message_serializes_sparsely() {
		let payload = MessagePayload {
			message: Message { token: Some("device-token".into()), ..Message::default() },
		};
		let wire = serde_json::to_value(&payload).expect("Payload should serialize.");

		assert_eq!(wire, json!({ "message": { "token": "device-token" } }));
	}

	#[test]
	fn apns_alert_uses_kebab_case_keys() {
		let payload = MessagePayload {
			message: Message {
				token: Some("device-token".into()),
				apns: Some(ApnsConfig {
					headers: Some(HashMap::from_iter([(
						"apns-priority".to_owned(),
						"10".to_owned(),
					)])),
					payload: Some(ApnsPayload {
						aps: Aps {
							alert: Some(ApnsAlert {
								title: Some("Release rollout".into()),
								loc_key: Some("release.body".into()),
								..ApnsAlert::default()
							}),
							badge: Some(1),
							sound: Some("default".into()),
							..Aps::default()
						},
					}),
				}),
				..Message::default()
			},
		};
		let wire = serde_json::to_value(&payload).expect("Payload should serialize.");
		let alert = &wire["message"]["apns"]["payload"]["aps"]["alert"];

		assert_eq!(alert["loc-key"], "release.body");
		assert!(alert.get("loc_key").is_none());
		assert_eq!(wire["message"]["apns"]["headers"]["apns-priority"], "10");
		assert_eq!(wire["message"]["apns"]["payload"]["aps"]["badge"], 1);
	}

	#[test]
	fn wire_documents_round_trip_through_the_shapes() {
		let wire = json!({
			"message": {
				"topic": "news",
				"notification": { "title": "Hello", "body": "World" },
				"data": { "key": "value" },
				"android": { "priority": "high", "direct_boot_ok": true },
			}
		});
		let payload: MessagePayload =
			serde_json::from_value(wire).expect("Wire document should deserialize.");

		assert_eq!(payload.message.topic.as_deref(), Some("news"));
		assert_eq!(
			payload.message.android.as_ref().and_then(|a| a.priority.as_deref()),
			Some("high"),
		);
		assert!(payload.message.token.is_none());
	}
}
