//! Quick-XML based XMLTV document handling
//!
//! This module provides a generic ordered element tree parsed with a
//! streaming quick-xml reader, plus typed views over the XMLTV elements we
//! actually inspect (`channel` and `programme`). Everything the views do not
//! name is opaque and round-trips verbatim through serialization.

pub mod document;
pub mod tree;

pub use document::{ChannelElement, ProgrammeElement, XmltvDocument};
pub use tree::{Element, Node, XmltvParseError, parse_document, serialize_document};
