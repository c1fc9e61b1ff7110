//! Fetching and decoding of remote XMLTV sources
//!
//! A source is a plain URL; a literal `.gz` suffix marks its payload as
//! gzip-compressed. Fetching is stateless and every failure maps to a
//! per-source [`FetchError`] so the aggregation loop can skip the source and
//! carry on.

use std::io::Read;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use flate2::read::GzDecoder;
use reqwest::Client;
use tracing::{debug, info};

use crate::errors::{FetchError, FetchResult};
use crate::xmltv::XmltvDocument;

/// Seam for retrieving raw bytes from a source URL
///
/// Production uses [`HttpContentFetcher`]; tests inject in-memory fakes.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetch the raw (possibly compressed) bytes addressed by `url`
    async fn fetch_bytes(&self, url: &str) -> FetchResult<Bytes>;
}

/// HTTP implementation of [`ContentFetcher`] backed by reqwest
pub struct HttpContentFetcher {
    client: Client,
}

impl HttpContentFetcher {
    /// Create a fetcher with only a connection timeout, leaving transfers of
    /// large guides unbounded
    pub fn new(connect_timeout: Duration) -> Self {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

impl Default for HttpContentFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

#[async_trait]
impl ContentFetcher for HttpContentFetcher {
    async fn fetch_bytes(&self, url: &str) -> FetchResult<Bytes> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::transport(
                url,
                format!(
                    "HTTP {} {}",
                    response.status().as_u16(),
                    response.status().canonical_reason().unwrap_or("Unknown")
                ),
            ));
        }

        response
            .bytes()
            .await
            .map_err(|e| FetchError::transport(url, format!("Failed to read response: {e}")))
    }
}

/// Whether a source URL addresses gzip-compressed content
///
/// Detection is purely by the literal `.gz` suffix; there is no per-source
/// configuration and no content sniffing.
pub fn is_gzip_url(url: &str) -> bool {
    url.ends_with(".gz")
}

/// Fetch one source and parse it into an XMLTV document
pub async fn fetch_document<F>(fetcher: &F, url: &str) -> FetchResult<XmltvDocument>
where
    F: ContentFetcher + ?Sized,
{
    info!("Fetching XMLTV source: {url}");
    let bytes = fetcher.fetch_bytes(url).await?;
    debug!("Fetched {} bytes from {url}", bytes.len());
    decode_source(url, &bytes)
}

/// Decode (if `.gz`) and parse raw source bytes
pub fn decode_source(url: &str, bytes: &[u8]) -> FetchResult<XmltvDocument> {
    let raw = if is_gzip_url(url) {
        let mut decoder = GzDecoder::new(bytes);
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .map_err(|e| FetchError::decompress(url, e.to_string()))?;
        decompressed
    } else {
        bytes.to_vec()
    };

    let content = String::from_utf8(raw)
        .map_err(|e| FetchError::parse(url, format!("Invalid UTF-8 in XMLTV content: {e}")))?;

    XmltvDocument::parse(&content).map_err(|e| FetchError::parse(url, e.to_string()))
}
