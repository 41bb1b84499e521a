use std::{collections::HashMap, sync::Arc};

use tokio::{
	spawn,
	sync::RwLock,
	task::{AbortHandle, JoinHandle},
};
use tracing::{debug, error, info, instrument, trace};

use super::{
	error::{Error, RunError},
	job::{IntoJob, Job, JobId},
	page::PageResult,
};

/// An opaque reference to a job's in-flight work, associated 1:1 with a job
/// id from dispatch until reconciliation.
#[derive(Debug)]
struct ExecutionHandle {
	abort: AbortHandle,
}

impl ExecutionHandle {
	const fn new(abort: AbortHandle) -> Self {
		Self { abort }
	}

	/// Request abortion of the work, reporting whether it was still live.
	///
	/// Advisory only: abortion lands at the work's next await point, and work
	/// that slipped into completion concurrently still reports `true` here.
	/// The reconciliation task is the authority on the final outcome.
	fn request_cancel(&self) -> bool {
		if self.abort.is_finished() {
			false
		} else {
			self.abort.abort();
			true
		}
	}
}

/// The manager's internal state: every tracked job, plus the execution
/// handles of those whose work has not yet reconciled.
///
/// `pending`'s keys are a subset of `jobs`' keys, with one transient
/// exception: deleting a running job erases its `jobs` entry immediately
/// while reconciliation, the sole remover of `pending` entries, sweeps the
/// handle moments later. No public read path observes the orphaned handle.
struct Registry<E: RunError> {
	jobs: HashMap<JobId, Arc<dyn Job<E>>>,
	pending: HashMap<JobId, ExecutionHandle>,
}

impl<E: RunError> Default for Registry<E> {
	fn default() -> Self {
		Self {
			jobs: HashMap::new(),
			pending: HashMap::new(),
		}
	}
}

/// Tracks submitted jobs, runs them on the shared worker pool (the Tokio
/// runtime this manager lives on), and reconciles their terminal state.
///
/// All operations are safe to call concurrently from arbitrary tasks; they
/// contend only on the registry lock, which is held for map operations and
/// never across job execution.
pub struct JobManager<E: RunError> {
	registry: Arc<RwLock<Registry<E>>>,
}

impl<E: RunError> Default for JobManager<E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<E: RunError> JobManager<E> {
	#[must_use]
	pub fn new() -> Self {
		Self {
			registry: Arc::new(RwLock::new(Registry::default())),
		}
	}

	/// Accept a job, dispatch its work and start tracking it.
	///
	/// Returns `Ok(false)` without mutating anything when the id is already
	/// tracked. The duplicate check and both registry inserts run under a
	/// single write guard, so concurrent submitters of one id elect exactly
	/// one winner.
	#[instrument(skip_all)]
	pub async fn submit(&self, job: impl IntoJob<E>) -> Result<bool, Error> {
		let job = job.into_job();
		let job_id = job.id().to_owned();

		if job_id.is_empty() {
			return Err(Error::EmptyJobId);
		}

		let mut registry = self.registry.write().await;

		if registry.jobs.contains_key(&job_id) || registry.pending.contains_key(&job_id) {
			debug!(%job_id, "Rejecting duplicate job submission;");
			return Ok(false);
		}

		registry.jobs.insert(job_id.clone(), Arc::clone(&job));

		let work = spawn({
			let job = Arc::clone(&job);
			async move { job.run().await }
		});

		registry
			.pending
			.insert(job_id.clone(), ExecutionHandle::new(work.abort_handle()));

		drop(registry);

		info!(%job_id, job_name = %job.name(), "Dispatched job;");

		spawn(Self::reconcile(Arc::clone(&self.registry), job, work));

		Ok(true)
	}

	/// Copies the work's terminal outcome back onto the job's status fields
	/// and releases the execution handle. Runs exactly once per submitted
	/// job, on whichever runtime worker completes the work.
	async fn reconcile(
		registry: Arc<RwLock<Registry<E>>>,
		job: Arc<dyn Job<E>>,
		work: JoinHandle<Result<(), E>>,
	) {
		let job_id = job.id().to_owned();
		let state = job.state();

		match work.await {
			Ok(Ok(())) => {
				debug!(%job_id, "Job completed;");
			}
			Ok(Err(e)) => {
				state.set_exited_unexpectedly();
				error!(%job_id, %e, "Job exited with error;");
			}
			Err(e) if e.is_cancelled() => {
				state.set_canceled();
				info!(%job_id, "Job canceled;");
			}
			Err(e) => {
				state.set_exited_unexpectedly();
				error!(%job_id, %e, "Job panicked;");
			}
		}

		state.set_finished();
		state.stamp_finished_at();

		registry.write().await.pending.remove(&job_id);

		trace!(%job_id, "Released execution handle;");
	}

	/// Request cancellation of a job's in-flight work.
	///
	/// Returns `false` for jobs the manager does not know, and for jobs that
	/// already reconciled, where there is nothing left to stop. The `canceled`
	/// flag itself is set by reconciliation, not here; observe it through
	/// [`get_job`](Self::get_job).
	#[instrument(skip(self))]
	pub async fn cancel(&self, job_id: &str) -> bool {
		let registry = self.registry.read().await;

		if !registry.jobs.contains_key(job_id) {
			return false;
		}

		let Some(handle) = registry.pending.get(job_id) else {
			return false;
		};

		let requested = handle.request_cancel();

		debug!(%job_id, %requested, "Requested job cancellation;");

		requested
	}

	/// Remove a job from the registry, cancelling its work first if it is
	/// still in flight.
	///
	/// Unknown ids and already-reconciled jobs are treated as success: the
	/// entry, if any, is simply erased. Returns `false` only when a running
	/// job's work could not be cancelled, in which case the registry is left
	/// untouched.
	#[instrument(skip(self))]
	pub async fn delete(&self, job_id: &str) -> bool {
		let mut registry = self.registry.write().await;

		if !registry.jobs.contains_key(job_id) {
			return true;
		}

		match registry
			.pending
			.get(job_id)
			.map(ExecutionHandle::request_cancel)
		{
			None => {
				// already reconciled, nothing to stop
				registry.jobs.remove(job_id);
				info!(%job_id, "Deleted finished job;");
				true
			}
			Some(true) => {
				registry.jobs.remove(job_id);
				info!(%job_id, "Deleted running job;");
				true
			}
			Some(false) => {
				debug!(%job_id, "Could not cancel job, leaving registry untouched;");
				false
			}
		}
	}

	/// Direct lookup; no side effects.
	pub async fn get_job(&self, job_id: &str) -> Option<Arc<dyn Job<E>>> {
		self.registry.read().await.jobs.get(job_id).map(Arc::clone)
	}

	/// A page of all tracked jobs, finished or not.
	///
	/// `page` is 1-based. Iteration order is unspecified but stable while the
	/// registry is unmodified, so walking consecutive pages with no
	/// concurrent submit/delete covers every job exactly once. Under
	/// concurrent mutation `total` is a point-in-time estimate, not a
	/// promise that two fetches are mutually consistent.
	pub async fn get_jobs(
		&self,
		page: usize,
		page_size: usize,
	) -> Result<PageResult<Arc<dyn Job<E>>>, Error> {
		if page == 0 || page_size == 0 {
			return Err(Error::InvalidPageRequest { page, page_size });
		}

		let start = (page - 1) * page_size;

		let registry = self.registry.read().await;
		let total = registry.jobs.len();
		let items = registry
			.jobs
			.values()
			.skip(start)
			.take(page_size)
			.map(Arc::clone)
			.collect();

		Ok(PageResult::new(page, page_size, total, items))
	}
}
