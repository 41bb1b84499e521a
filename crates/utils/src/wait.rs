use std::time::Duration;

use thiserror::Error;
use tokio::time::{sleep, Instant};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("condition not met within {timeout:?}")]
pub struct WaitTimeout {
	pub timeout: Duration,
}

/// Await a condition with a deadline, polling it every `interval`.
///
/// The bounded-wait building block for callers racing a job's observable
/// state against their own deadline, e.g. before deciding to cancel. The
/// condition is checked once before any sleep, so an already-true condition
/// returns immediately.
pub async fn poll_until(
	timeout: Duration,
	interval: Duration,
	mut condition: impl FnMut() -> bool,
) -> Result<(), WaitTimeout> {
	let deadline = Instant::now() + timeout;

	loop {
		if condition() {
			return Ok(());
		}

		if Instant::now() >= deadline {
			return Err(WaitTimeout { timeout });
		}

		sleep(interval).await;
	}
}
