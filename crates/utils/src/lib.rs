//! Caller-side utilities for the job system's boundaries: minting job
//! identifiers before submission, and waiting on a job's observable state
//! with a deadline. The manager itself never depends on either.

pub mod id;
pub mod wait;
