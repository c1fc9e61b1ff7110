//! XMLTV EPG aggregation library.
//!
//! Fetches a configured list of remote XMLTV documents (raw or
//! gzip-compressed), filters channels and programmes against an allow-list
//! of channel identifiers, applies a small set of title rewrites, and merges
//! everything into a single `<tv>` document.

pub mod allowlist;
pub mod config;
pub mod errors;
pub mod ingestor;
pub mod output;
pub mod sources;
pub mod xmltv;
