//! Application layer: execution policies used around external calls.
//!
//! Callers classify an address with [`crate::domain`] first and only then
//! wrap the resulting network or LLM call in [`retry`]. The two never call
//! each other.
//!
//! # Modules
//!
//! - [`retry`] - Bounded retry with exponential backoff (blocking and async)

pub mod retry;

pub use retry::{RetryPolicy, retry_with_backoff, retry_with_backoff_async};
