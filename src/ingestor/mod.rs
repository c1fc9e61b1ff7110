//! Aggregation of XMLTV sources into one merged document

pub mod engine;
pub mod normalize;

pub use engine::{AggregationEngine, merge_source};
pub use normalize::normalize_title;
