//!
//! # Job System
//!
//! Foreman's Job System is a library that tracks units of asynchronous work
//! through their whole lifecycle: callers submit identified jobs, the system
//! runs them in parallel on the shared worker pool, reconciles their terminal
//! state when they finish, fail, or get cancelled, and serves paginated
//! listings of everything it tracks.
//!
//! Just bring your own unified error type and submit some jobs. Aside from
//! dispatch and bookkeeping the system gives you:
//! - Atomic duplicate-id rejection, safe under concurrent submitters;
//! - Best-effort cancellation and idempotent deletion by job id;
//! - Progress reporting from inside a running job through a write handle;
//! - Status snapshots ([`JobReport`]) safe to hand across serialization boundaries.
//!
//!
//! ## Basic example
//!
//! ```
//! use foreman_job_system::{CompletableJob, JobManager};
//! use std::convert::Infallible;
//!
//! #[tokio::main]
//! async fn main() {
//!     let manager = JobManager::new();
//!
//!     let job = CompletableJob::new("job-1", "count to ten", |progress| async move {
//!         for done in 1..=10 {
//!             progress.set(done * 10);
//!         }
//!         Ok::<_, Infallible>(())
//!     });
//!
//!     assert!(manager.submit(job).await.unwrap());
//!     assert!(manager.get_job("job-1").await.is_some());
//! }
//! ```

#![warn(
	clippy::all,
	clippy::pedantic,
	clippy::correctness,
	clippy::perf,
	clippy::style,
	clippy::suspicious,
	clippy::complexity,
	clippy::nursery,
	clippy::unwrap_used,
	unused_qualifications,
	rust_2018_idioms,
	trivial_casts,
	trivial_numeric_casts,
	unused_allocation,
	clippy::unnecessary_cast,
	clippy::cast_lossless,
	clippy::cast_possible_truncation,
	clippy::cast_possible_wrap,
	clippy::cast_precision_loss,
	clippy::cast_sign_loss,
	clippy::dbg_macro,
	clippy::deprecated_cfg_attr,
	clippy::separated_literal_suffix,
	deprecated
)]
#![forbid(deprecated_in_future)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

mod completable;
mod error;
mod job;
mod manager;
mod page;

pub use completable::CompletableJob;
pub use error::{Error, RunError};
pub use job::{IntoJob, Job, JobId, JobReport, JobState, ProgressHandle};
pub use manager::JobManager;
pub use page::PageResult;
