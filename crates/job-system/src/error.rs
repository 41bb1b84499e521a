use std::{error, fmt};

use thiserror::Error;

/// Errors returned by the manager's own operations.
///
/// These signal precondition violations on the caller's side. Outcomes of the
/// jobs themselves (errors, panics, cancellations) never surface here, they
/// are captured into the job's state during reconciliation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
	#[error("job id must not be empty")]
	EmptyJobId,
	#[error("invalid page request <page='{page}', page_size='{page_size}'>, both must be at least 1")]
	InvalidPageRequest { page: usize, page_size: usize },
}

/// Bound for the unified error type jobs can fail with.
///
/// Bring your own: any `std::error::Error` that can cross task boundaries
/// qualifies, so the whole system shares a single error type per manager.
pub trait RunError: error::Error + fmt::Debug + Send + Sync + 'static {}

impl<T: error::Error + fmt::Debug + Send + Sync + 'static> RunError for T {}
