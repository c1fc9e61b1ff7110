//! Centralized error handling for the EPG aggregator.
//!
//! Two kinds of failure exist in this system: per-source failures
//! (transport, decompression, parsing) that are logged and skipped so the
//! run can continue with the remaining sources, and fatal failures
//! (configuration, allow-list load, output write) that abort the run.

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for per-source fetch Results
pub type FetchResult<T> = Result<T, FetchError>;
