// self
use crate::obs::{SendMode, SendOutcome};

/// Records a dispatch outcome via the global metrics recorder (when enabled).
pub fn record_send_outcome(mode: SendMode, outcome: SendOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"fcm_dispatch_send_total",
			"mode" => mode.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (mode, outcome);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_send_outcome_noop_without_metrics() {
		record_send_outcome(SendMode::Direct, SendOutcome::Failure);
	}
}
