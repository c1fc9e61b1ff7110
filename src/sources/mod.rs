//! XMLTV source fetching

pub mod fetcher;

pub use fetcher::{ContentFetcher, HttpContentFetcher, decode_source, fetch_document, is_gzip_url};
