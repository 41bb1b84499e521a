use async_channel as chan;
use async_trait::async_trait;
use foreman_job_system::{Job, JobState};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SampleError {
	#[error("sample error")]
	SampleError,
}

/// Completes as soon as it runs.
#[derive(Debug)]
pub struct ReadyJob {
	id: String,
	state: JobState,
}

impl ReadyJob {
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			state: JobState::new(),
		}
	}
}

#[async_trait]
impl Job<SampleError> for ReadyJob {
	fn id(&self) -> &str {
		&self.id
	}

	fn name(&self) -> &str {
		"ready"
	}

	fn state(&self) -> &JobState {
		&self.state
	}

	async fn run(&self) -> Result<(), SampleError> {
		Ok(())
	}
}

/// Runs until its work gets aborted.
#[derive(Debug)]
pub struct NeverJob {
	id: String,
	state: JobState,
}

impl NeverJob {
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			state: JobState::new(),
		}
	}
}

#[async_trait]
impl Job<SampleError> for NeverJob {
	fn id(&self) -> &str {
		&self.id
	}

	fn name(&self) -> &str {
		"never"
	}

	fn state(&self) -> &JobState {
		&self.state
	}

	async fn run(&self) -> Result<(), SampleError> {
		std::future::pending::<()>().await;
		Ok(())
	}
}

/// Completes once signaled by the test.
#[derive(Debug)]
pub struct WaitSignalJob {
	id: String,
	state: JobState,
	signal_rx: chan::Receiver<()>,
}

impl WaitSignalJob {
	pub fn new(id: impl Into<String>) -> (Self, chan::Sender<()>) {
		let (signal_tx, signal_rx) = chan::bounded(1);
		(
			Self {
				id: id.into(),
				state: JobState::new(),
				signal_rx,
			},
			signal_tx,
		)
	}
}

#[async_trait]
impl Job<SampleError> for WaitSignalJob {
	fn id(&self) -> &str {
		&self.id
	}

	fn name(&self) -> &str {
		"wait signal"
	}

	fn state(&self) -> &JobState {
		&self.state
	}

	async fn run(&self) -> Result<(), SampleError> {
		self.signal_rx.recv().await.ok();
		info!("WaitSignalJob <id='{}'> released", self.id);
		Ok(())
	}
}

/// Fails with an error as soon as it runs.
#[derive(Debug)]
pub struct BrokenJob {
	id: String,
	state: JobState,
}

impl BrokenJob {
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			state: JobState::new(),
		}
	}
}

#[async_trait]
impl Job<SampleError> for BrokenJob {
	fn id(&self) -> &str {
		&self.id
	}

	fn name(&self) -> &str {
		"broken"
	}

	fn state(&self) -> &JobState {
		&self.state
	}

	async fn run(&self) -> Result<(), SampleError> {
		Err(SampleError::SampleError)
	}
}

/// Signals that it began, then panics mid-flight.
#[derive(Debug)]
pub struct PanickingJob {
	id: String,
	state: JobState,
	began_tx: chan::Sender<()>,
}

impl PanickingJob {
	pub fn new(id: impl Into<String>) -> (Self, chan::Receiver<()>) {
		let (began_tx, began_rx) = chan::bounded(1);
		(
			Self {
				id: id.into(),
				state: JobState::new(),
				began_tx,
			},
			began_rx,
		)
	}
}

#[async_trait]
impl Job<SampleError> for PanickingJob {
	fn id(&self) -> &str {
		&self.id
	}

	fn name(&self) -> &str {
		"panicking"
	}

	fn state(&self) -> &JobState {
		&self.state
	}

	async fn run(&self) -> Result<(), SampleError> {
		self.began_tx.send(()).await.ok();
		panic!("PanickingJob fell over")
	}
}
