//! Sends a topic notification through the default reqwest transport using a service-account
//! credential file named by the `FCM_CREDENTIALS` environment variable.

// std
use std::env;
// crates.io
use color_eyre::Result;
// self
use fcm_dispatch::{
	credential::Credentials,
	dispatch::ReqwestDispatcher,
	message::{Message, Notification},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let credentials_path = env::var("FCM_CREDENTIALS")?;
	let topic = env::var("FCM_TOPIC").unwrap_or_else(|_| "news".into());
	let dispatcher = ReqwestDispatcher::new(Credentials::from_file(&credentials_path)?)?;
	let message = Message {
		topic: Some(topic.clone()),
		notification: Some(Notification {
			title: Some("Hello".into()),
			body: Some("World".into()),
			..Notification::default()
		}),
		..Message::default()
	};

	dispatcher.send_to_topic(message).await?;

	println!("Notification delivered to topic {topic}.");

	Ok(())
}
