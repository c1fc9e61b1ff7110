//! Error type definitions for the EPG aggregator.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level application error type
///
/// Every variant here is fatal to the run. Recoverable per-source failures
/// are represented by [`FetchError`] and are handled inside the aggregation
/// loop; they only surface here when explicitly promoted.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors (unreadable or invalid config file, bad URLs)
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The allow-list file could not be read; without it there is nothing
    /// meaningful to aggregate
    #[error("Failed to load allow-list from {path}: {source}")]
    AllowListLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output artifact could not be written
    #[error("Failed to write output to {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Per-source errors, when promoted to a run-level failure
    #[error("Source error: {0}")]
    Source(#[from] FetchError),
}

/// Per-source fetch errors
///
/// All variants are recoverable: the aggregation engine logs them and moves
/// on to the next source.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network failure or non-2xx response from a source
    #[error("Transport error fetching {url}: {message}")]
    Transport { url: String, message: String },

    /// Gzip decoding failure for a `.gz` source
    #[error("Failed to decompress {url}: {message}")]
    Decompress { url: String, message: String },

    /// Malformed XML from a source
    #[error("Failed to parse XML from {url}: {message}")]
    Parse { url: String, message: String },
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl FetchError {
    /// Create a transport error
    pub fn transport<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a decompression error
    pub fn decompress<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Decompress {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Parse {
            url: url.into(),
            message: message.into(),
        }
    }
}
