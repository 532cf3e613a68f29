//! Optional observability helpers for message dispatch.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `fcm_dispatch.send` with the `mode`
//!   (targeting mode) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `fcm_dispatch_send_total` counter for every
//!   attempt/success/failure, labeled by `mode` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Targeting modes observed by the dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SendMode {
	/// Single registration token.
	Direct,
	/// Multiple registration tokens.
	Multicast,
	/// Named topic.
	Topic,
	/// Boolean condition over topic subscriptions.
	Condition,
}
impl SendMode {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			SendMode::Direct => "direct",
			SendMode::Multicast => "multicast",
			SendMode::Topic => "topic",
			SendMode::Condition => "condition",
		}
	}
}
impl Display for SendMode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each dispatch attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SendOutcome {
	/// Entry to a dispatch helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl SendOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			SendOutcome::Attempt => "attempt",
			SendOutcome::Success => "success",
			SendOutcome::Failure => "failure",
		}
	}
}
impl Display for SendOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
