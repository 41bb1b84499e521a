use std::sync::{
	atomic::{AtomicBool, AtomicI32, Ordering},
	Arc,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use super::error::RunError;

/// A unique identifier for a job, supplied by the caller before submission.
///
/// Uniqueness is enforced by the manager at submit time, not by this alias.
pub type JobId = String;

/// The shared status record of a job.
///
/// Written by at most one reconciliation task (terminal flags and
/// `finished_at`) plus the running action itself (`progress`), and read
/// concurrently by pagination and query callers without further
/// synchronization. Readers get an eventually-consistent view, not an atomic
/// snapshot: independent fields may be observed mid-update relative to each
/// other.
#[derive(Debug)]
pub struct JobState {
	progress: AtomicI32,
	finished: AtomicBool,
	canceled: AtomicBool,
	exited_unexpectedly: AtomicBool,
	created_at: DateTime<Utc>,
	finished_at: OnceCell<DateTime<Utc>>,
}

impl Default for JobState {
	fn default() -> Self {
		Self::new()
	}
}

impl JobState {
	#[must_use]
	pub fn new() -> Self {
		Self {
			progress: AtomicI32::new(0),
			finished: AtomicBool::new(false),
			canceled: AtomicBool::new(false),
			exited_unexpectedly: AtomicBool::new(false),
			created_at: Utc::now(),
			finished_at: OnceCell::new(),
		}
	}

	/// Caller-updated percentage indicator; no bounds are enforced here.
	pub fn progress(&self) -> i32 {
		self.progress.load(Ordering::Acquire)
	}

	pub fn set_progress(&self, progress: i32) {
		self.progress.store(progress, Ordering::Release);
	}

	pub fn is_finished(&self) -> bool {
		self.finished.load(Ordering::Acquire)
	}

	pub fn is_canceled(&self) -> bool {
		self.canceled.load(Ordering::Acquire)
	}

	pub fn has_exited_unexpectedly(&self) -> bool {
		self.exited_unexpectedly.load(Ordering::Acquire)
	}

	#[must_use]
	pub const fn created_at(&self) -> DateTime<Utc> {
		self.created_at
	}

	/// Unset until the job reconciles, then set exactly once.
	pub fn finished_at(&self) -> Option<DateTime<Utc>> {
		self.finished_at.get().copied()
	}

	pub(crate) fn set_finished(&self) {
		self.finished.store(true, Ordering::Release);
	}

	pub(crate) fn set_canceled(&self) {
		self.canceled.store(true, Ordering::Release);
	}

	pub(crate) fn set_exited_unexpectedly(&self) {
		self.exited_unexpectedly.store(true, Ordering::Release);
	}

	pub(crate) fn stamp_finished_at(&self) {
		// Reconciliation is the single writer; a second set can only happen if
		// that discipline is broken, in which case the first stamp wins.
		self.finished_at.set(Utc::now()).ok();
	}
}

/// A write handle onto a job's own `progress` field, given to the running
/// action so it can report progress without holding the job itself.
#[derive(Debug, Clone)]
pub struct ProgressHandle {
	state: Arc<JobState>,
}

impl ProgressHandle {
	pub(crate) fn new(state: Arc<JobState>) -> Self {
		Self { state }
	}

	pub fn set(&self, progress: i32) {
		self.state.set_progress(progress);
	}

	#[must_use]
	pub fn get(&self) -> i32 {
		self.state.progress()
	}
}

/// Point-in-time snapshot of a job's public surface, safe to hand across
/// serialization boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobReport {
	pub id: JobId,
	pub name: String,
	pub progress: i32,
	pub finished: bool,
	pub canceled: bool,
	pub exited_unexpectedly: bool,
	pub created_at: DateTime<Utc>,
	pub finished_at: Option<DateTime<Utc>>,
	pub is_async: bool,
}

/// The main trait representing a unit of trackable asynchronous work.
///
/// All jobs tracked by one manager fail with the same unified error type, so
/// reconciliation can log and record any outcome uniformly.
///
/// We're currently using the [`async_trait`](https://docs.rs/async-trait)
/// crate to allow dyn async traits, due to a limitation in the Rust language.
#[async_trait]
pub trait Job<E: RunError>: Send + Sync + 'static {
	/// Identity key within the registry; assigned before submission and never
	/// changed afterwards.
	fn id(&self) -> &str;

	/// Descriptive label, not required to be unique.
	fn name(&self) -> &str;

	/// The shared status record this job reports through.
	fn state(&self) -> &JobState;

	/// Caller-declared hint carried as inert metadata; the manager never
	/// branches on it.
	fn is_async(&self) -> bool {
		false
	}

	/// Snapshot the job's current status.
	fn report(&self) -> JobReport {
		let state = self.state();

		JobReport {
			id: self.id().to_owned(),
			name: self.name().to_owned(),
			progress: state.progress(),
			finished: state.is_finished(),
			canceled: state.is_canceled(),
			exited_unexpectedly: state.has_exited_unexpectedly(),
			created_at: state.created_at(),
			finished_at: state.finished_at(),
			is_async: self.is_async(),
		}
	}

	/// The work itself. Invoked exactly once by the manager, on the shared
	/// worker pool. Returning an error marks the job as having exited
	/// unexpectedly during reconciliation.
	async fn run(&self) -> Result<(), E>;
}

/// A helper trait to convert any type implementing [`Job<E>`] into an
/// `Arc<dyn Job<E>>`, the form the registry shares between the worker pool
/// and query callers.
pub trait IntoJob<E: RunError>: Send {
	fn into_job(self) -> Arc<dyn Job<E>>;
}

/// Blanket implementation for all types that implement [`Job<E>`]
impl<J: Job<E>, E: RunError> IntoJob<E> for J {
	fn into_job(self) -> Arc<dyn Job<E>> {
		Arc::new(self)
	}
}
