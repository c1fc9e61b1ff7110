//! Writing the merged document to disk
//!
//! Both artifacts (plain XML and the gzip-compressed copy) are produced from
//! the same serialized bytes, written to a named temp file in the target
//! directory and persisted by rename, so a failed run never leaves a
//! partial artifact observable.

use std::io::Write;
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::NamedTempFile;
use tracing::info;

use crate::errors::{AppError, AppResult};
use crate::xmltv::{XmltvDocument, serialize_document};

/// Serializes the merged EPG document to its output artifacts
pub struct EpgWriter;

impl EpgWriter {
    /// Write the document as UTF-8 XML with an XML declaration
    pub fn write(document: &XmltvDocument, path: &Path) -> AppResult<()> {
        let bytes = serialize_document(document.root());
        Self::persist(path, &bytes)?;
        info!("New EPG saved to {}", path.display());
        Ok(())
    }

    /// Write the identical serialization through a gzip encoder
    pub fn write_compressed(document: &XmltvDocument, path: &Path) -> AppResult<()> {
        let bytes = serialize_document(document.root());

        let map = |source: std::io::Error| AppError::OutputWrite {
            path: path.to_path_buf(),
            source,
        };
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&bytes).map_err(map)?;
        let compressed = encoder.finish().map_err(map)?;

        Self::persist(path, &compressed)?;
        info!("New EPG saved to {}", path.display());
        Ok(())
    }

    fn persist(path: &Path, bytes: &[u8]) -> AppResult<()> {
        let map = |source: std::io::Error| AppError::OutputWrite {
            path: path.to_path_buf(),
            source,
        };

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(directory).map_err(map)?;

        let mut temp = NamedTempFile::new_in(directory).map_err(map)?;
        temp.write_all(bytes).map_err(map)?;
        temp.persist(path).map_err(|e| map(e.error))?;
        Ok(())
    }
}
