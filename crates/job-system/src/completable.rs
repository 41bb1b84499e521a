use std::{fmt, future::Future, pin::Pin, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use super::{
	error::RunError,
	job::{Job, JobId, JobState, ProgressHandle},
};

type BoxedAction<E> =
	Box<dyn FnOnce(ProgressHandle) -> Pin<Box<dyn Future<Output = Result<(), E>> + Send>> + Send>;

/// A [`Job`] adapting an arbitrary caller-supplied asynchronous action.
///
/// The action receives a [`ProgressHandle`] onto this job's own state so it
/// can report progress while running. It is consumed on first run; the
/// manager dispatches every submitted job exactly once.
pub struct CompletableJob<E: RunError> {
	id: JobId,
	name: String,
	state: Arc<JobState>,
	action: Mutex<Option<BoxedAction<E>>>,
}

impl<E: RunError> CompletableJob<E> {
	pub fn new<F, Fut>(id: impl Into<JobId>, name: impl Into<String>, action: F) -> Self
	where
		F: FnOnce(ProgressHandle) -> Fut + Send + 'static,
		Fut: Future<Output = Result<(), E>> + Send + 'static,
	{
		Self {
			id: id.into(),
			name: name.into(),
			state: Arc::new(JobState::new()),
			action: Mutex::new(Some(Box::new(|progress| Box::pin(action(progress))))),
		}
	}
}

impl<E: RunError> fmt::Debug for CompletableJob<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CompletableJob")
			.field("id", &self.id)
			.field("name", &self.name)
			.field("state", &self.state)
			.finish_non_exhaustive()
	}
}

#[async_trait]
impl<E: RunError> Job<E> for CompletableJob<E> {
	fn id(&self) -> &str {
		&self.id
	}

	fn name(&self) -> &str {
		&self.name
	}

	fn state(&self) -> &JobState {
		&self.state
	}

	async fn run(&self) -> Result<(), E> {
		let Some(action) = self.action.lock().await.take() else {
			warn!(job_id = %self.id, "Completable job action already consumed, nothing to run");
			return Ok(());
		};

		action(ProgressHandle::new(Arc::clone(&self.state))).await
	}
}
