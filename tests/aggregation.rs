//! End-to-end aggregation tests with an injected in-memory fetcher.

use std::collections::HashMap;
use std::io::{Read, Write};

use async_trait::async_trait;
use bytes::Bytes;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use epg_aggregator::allowlist::ChannelAllowList;
use epg_aggregator::errors::FetchError;
use epg_aggregator::ingestor::AggregationEngine;
use epg_aggregator::output::EpgWriter;
use epg_aggregator::sources::ContentFetcher;
use epg_aggregator::xmltv::{XmltvDocument, serialize_document};

/// In-memory fetcher mapping URLs to canned response bodies
struct FakeFetcher {
    responses: HashMap<String, Bytes>,
}

impl FakeFetcher {
    fn new(responses: &[(&str, Vec<u8>)]) -> Self {
        Self {
            responses: responses
                .iter()
                .map(|(url, body)| (url.to_string(), Bytes::from(body.clone())))
                .collect(),
        }
    }
}

#[async_trait]
impl ContentFetcher for FakeFetcher {
    async fn fetch_bytes(&self, url: &str) -> Result<Bytes, FetchError> {
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::transport(url, "HTTP 404 Not Found"))
    }
}

fn gzip(data: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

const SOURCE_A: &str = r#"<tv>
  <channel id="espn.us"><display-name>ESPN</display-name></channel>
  <channel id="shop.us"><display-name>Shopping</display-name></channel>
  <programme channel="espn.us" start="20240101000000 +0000" stop="20240101010000 +0000">
    <title>NHL Hockey</title>
    <sub-title>Rangers vs Bruins</sub-title>
  </programme>
  <programme channel="espn.us" start="20240101010000 +0000" stop="20240101020000 +0000">
    <title>NHL Hockey</title>
  </programme>
  <programme channel="shop.us" start="20240101000000 +0000">
    <title>Infomercial</title>
  </programme>
</tv>"#;

const SOURCE_B: &str = r#"<tv>
  <channel id="tnt.us"><display-name>TNT</display-name></channel>
  <programme channel="tnt.us" start="20240101000000 +0000">
    <title>Regular Show</title>
    <sub-title>The Power</sub-title>
  </programme>
</tv>"#;

fn allow_list() -> ChannelAllowList {
    ChannelAllowList::from_lines("espn.us\ntnt.us\n")
}

fn sources(urls: &[&str]) -> Vec<String> {
    urls.iter().map(|url| url.to_string()).collect()
}

#[tokio::test]
async fn aggregates_filters_and_preserves_source_order() {
    let fetcher = FakeFetcher::new(&[
        ("http://a.example/epg.xml", SOURCE_A.as_bytes().to_vec()),
        ("http://b.example/epg.xml.gz", gzip(SOURCE_B)),
    ]);
    let engine = AggregationEngine::new(fetcher);

    let output = engine
        .run(
            &sources(&["http://a.example/epg.xml", "http://b.example/epg.xml.gz"]),
            &allow_list(),
        )
        .await;

    // Source A's elements come first: its channel, then its programmes,
    // then source B's channel and programme.
    let ids: Vec<Option<String>> = output
        .channels()
        .map(|c| c.id().map(str::to_string))
        .collect();
    assert_eq!(ids, [Some("espn.us".to_string()), Some("tnt.us".to_string())]);

    let names: Vec<String> = output
        .root()
        .child_elements()
        .map(|e| e.name.clone())
        .collect();
    assert_eq!(
        names,
        ["channel", "programme", "programme", "channel", "programme"]
    );

    // Nothing from the non-allow-listed channel survives.
    assert!(
        output
            .programmes()
            .all(|p| p.channel() != Some("shop.us"))
    );
}

#[tokio::test]
async fn rewrites_titles_with_and_without_subtitle() {
    let fetcher = FakeFetcher::new(&[("http://a.example/epg.xml", SOURCE_A.as_bytes().to_vec())]);
    let engine = AggregationEngine::new(fetcher);

    let output = engine
        .run(&sources(&["http://a.example/epg.xml"]), &allow_list())
        .await;

    let titles: Vec<Option<String>> = output.programmes().map(|p| p.title_text()).collect();
    assert_eq!(titles[0].as_deref(), Some("NHL Hockey Rangers vs Bruins"));
    assert_eq!(titles[1].as_deref(), Some("NHL Hockey No subtitle"));
}

#[tokio::test]
async fn failed_source_is_skipped_and_later_sources_still_contribute() {
    let fetcher = FakeFetcher::new(&[("http://b.example/epg.xml.gz", gzip(SOURCE_B))]);
    let engine = AggregationEngine::new(fetcher);

    let output = engine
        .run(
            &sources(&[
                "http://missing.example/epg.xml",
                "http://b.example/epg.xml.gz",
            ]),
            &allow_list(),
        )
        .await;

    assert_eq!(output.channels().count(), 1);
    assert_eq!(output.programmes().count(), 1);
}

#[tokio::test]
async fn malformed_source_contributes_nothing() {
    let fetcher = FakeFetcher::new(&[
        ("http://broken.example/epg.xml", b"<tv><channel>".to_vec()),
        ("http://b.example/epg.xml.gz", gzip(SOURCE_B)),
    ]);
    let engine = AggregationEngine::new(fetcher);

    let output = engine
        .run(
            &sources(&[
                "http://broken.example/epg.xml",
                "http://b.example/epg.xml.gz",
            ]),
            &allow_list(),
        )
        .await;

    assert_eq!(output.channels().count(), 1);
    assert_eq!(
        output.channels().next().unwrap().id(),
        Some("tnt.us")
    );
}

#[tokio::test]
async fn aggregation_is_idempotent_over_unchanged_inputs() {
    let run = || async {
        let fetcher =
            FakeFetcher::new(&[("http://a.example/epg.xml", SOURCE_A.as_bytes().to_vec())]);
        let engine = AggregationEngine::new(fetcher);
        engine
            .run(&sources(&["http://a.example/epg.xml"]), &allow_list())
            .await
    };

    let first = run().await;
    let second = run().await;
    assert_eq!(
        serialize_document(first.root()),
        serialize_document(second.root())
    );
}

#[tokio::test]
async fn written_artifacts_agree_after_decompression() {
    let fetcher = FakeFetcher::new(&[("http://a.example/epg.xml", SOURCE_A.as_bytes().to_vec())]);
    let engine = AggregationEngine::new(fetcher);
    let output = engine
        .run(&sources(&["http://a.example/epg.xml"]), &allow_list())
        .await;

    let directory = tempfile::tempdir().unwrap();
    let plain_path = directory.path().join("epg.xml");
    let gz_path = directory.path().join("epg.xml.gz");

    EpgWriter::write(&output, &plain_path).unwrap();
    EpgWriter::write_compressed(&output, &gz_path).unwrap();

    let plain = std::fs::read(&plain_path).unwrap();
    assert!(plain.starts_with(br#"<?xml version="1.0" encoding="UTF-8"?>"#));

    let compressed = std::fs::read(&gz_path).unwrap();
    let mut decoder = GzDecoder::new(compressed.as_slice());
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed).unwrap();
    assert_eq!(decompressed, plain);

    // The artifact parses back into the same number of elements.
    let reparsed = XmltvDocument::parse(std::str::from_utf8(&plain).unwrap()).unwrap();
    assert_eq!(reparsed.channels().count(), output.channels().count());
    assert_eq!(reparsed.programmes().count(), output.programmes().count());
}
