//! The aggregation engine
//!
//! Walks the configured source list in order, fetches each XMLTV document,
//! filters its channels and programmes against the allow-list, rewrites the
//! special-cased titles, and appends the survivors into one merged `<tv>`
//! document. Per-source failures are logged and skipped; they never abort
//! the run.

use tracing::{info, warn};

use crate::allowlist::ChannelAllowList;
use crate::sources::{ContentFetcher, fetch_document};
use crate::xmltv::XmltvDocument;

use super::normalize::normalize_title;

/// Orchestrates fetching, filtering, and merging across all sources
pub struct AggregationEngine<F: ContentFetcher> {
    fetcher: F,
}

impl<F: ContentFetcher> AggregationEngine<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Run the full aggregation over `sources` in list order
    ///
    /// The returned document holds, per source, all matching channel
    /// elements (in document order) followed by that source's matching
    /// programme elements; across sources, list order is preserved.
    pub async fn run(&self, sources: &[String], allow_list: &ChannelAllowList) -> XmltvDocument {
        let mut output = XmltvDocument::new();

        for url in sources {
            match fetch_document(&self.fetcher, url).await {
                Ok(document) => merge_source(&document, allow_list, &mut output),
                Err(error) => warn!("Skipping source: {error}"),
            }
        }

        output
    }
}

/// Filter one parsed source document into the merged output
///
/// Channels first, then programmes, each in document order. Elements whose
/// identifier is missing or not allow-listed are dropped silently. Nothing
/// is de-duplicated: a channel supplied by two sources appears twice.
pub fn merge_source(
    document: &XmltvDocument,
    allow_list: &ChannelAllowList,
    output: &mut XmltvDocument,
) {
    let mut channels = 0usize;
    let mut programmes = 0usize;

    for channel in document.channels() {
        let Some(id) = channel.id() else { continue };
        if allow_list.contains(id) {
            info!("tvg-id matched: {id}");
            output.append(channel.to_element());
            channels += 1;
        }
    }

    for programme in document.programmes() {
        let Some(channel_id) = programme.channel() else {
            continue;
        };
        if !allow_list.contains(channel_id) {
            continue;
        }

        let mut element = programme.to_element();
        if let Some(title) = programme.title_text() {
            let normalized = normalize_title(&title, programme.subtitle_text().as_deref());
            if let Some(title_element) = element.find_child_mut("title") {
                title_element.set_text(normalized);
            }
        }
        // A programme without a title node is appended unmodified.
        output.append(element);
        programmes += 1;
    }

    info!("Merged {channels} channels and {programmes} programmes");
}
