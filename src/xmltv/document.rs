//! Typed views over a parsed XMLTV document
//!
//! The aggregation engine only ever inspects a handful of things: the `id`
//! attribute of `channel` elements, and the `channel` attribute plus `title`
//! and `sub-title` children of `programme` elements. These views expose
//! exactly that as explicit `Option`s; everything else stays opaque and is
//! copied verbatim.

use super::tree::{Element, XmltvParseError, parse_document};

/// A parsed XMLTV document, or the accumulating merged output
#[derive(Debug, Clone)]
pub struct XmltvDocument {
    root: Element,
}

impl XmltvDocument {
    /// Create an empty `<tv>` document to merge into
    pub fn new() -> Self {
        Self {
            root: Element::new("tv"),
        }
    }

    /// Parse XMLTV text into a document
    ///
    /// Any well-formed root element is accepted; only direct children named
    /// `channel` and `programme` participate in aggregation.
    pub fn parse(content: &str) -> Result<Self, XmltvParseError> {
        Ok(Self {
            root: parse_document(content)?,
        })
    }

    /// Direct `channel` children in document order
    pub fn channels(&self) -> impl Iterator<Item = ChannelElement<'_>> {
        self.root
            .child_elements()
            .filter(|element| element.name == "channel")
            .map(|element| ChannelElement { element })
    }

    /// Direct `programme` children in document order
    pub fn programmes(&self) -> impl Iterator<Item = ProgrammeElement<'_>> {
        self.root
            .child_elements()
            .filter(|element| element.name == "programme")
            .map(|element| ProgrammeElement { element })
    }

    /// Append an element to the document root, preserving encounter order
    pub fn append(&mut self, element: Element) {
        self.root.children.push(super::tree::Node::Element(element));
    }

    /// The document root
    pub fn root(&self) -> &Element {
        &self.root
    }
}

impl Default for XmltvDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// View over a `channel` element
#[derive(Debug, Clone, Copy)]
pub struct ChannelElement<'a> {
    element: &'a Element,
}

impl<'a> ChannelElement<'a> {
    /// The channel identifier (`id` attribute), if present
    pub fn id(&self) -> Option<&'a str> {
        self.element.attribute("id")
    }

    /// Owned copy of the underlying element, descendants included
    pub fn to_element(&self) -> Element {
        self.element.clone()
    }
}

/// View over a `programme` element
#[derive(Debug, Clone, Copy)]
pub struct ProgrammeElement<'a> {
    element: &'a Element,
}

impl ProgrammeElement<'_> {
    /// The channel identifier (`channel` attribute), if present
    pub fn channel(&self) -> Option<&str> {
        self.element.attribute("channel")
    }

    /// Text of the first `title` child; `None` when the node is absent
    pub fn title_text(&self) -> Option<String> {
        self.element.find_child("title").map(Element::text)
    }

    /// Text of the first `sub-title` child
    ///
    /// `None` only when the node is wholly absent. A present-but-empty
    /// `sub-title` yields `Some("")`, which matters for the title rewrite
    /// placeholder rule.
    pub fn subtitle_text(&self) -> Option<String> {
        self.element.find_child("sub-title").map(Element::text)
    }

    /// Owned copy of the underlying element, descendants included
    pub fn to_element(&self) -> Element {
        self.element.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<tv>
  <channel id="espn.us"><display-name>ESPN</display-name></channel>
  <channel><display-name>anonymous</display-name></channel>
  <programme channel="espn.us" start="20240101000000 +0000" stop="20240101010000 +0000">
    <title>NHL Hockey</title>
    <sub-title>Rangers vs Bruins</sub-title>
  </programme>
  <programme channel="espn.us" start="20240101010000 +0000">
    <desc>no title here</desc>
  </programme>
  <programme channel="espn.us" start="20240101020000 +0000">
    <title>Movie</title>
    <sub-title/>
  </programme>
</tv>"#;

    #[test]
    fn iterates_channels_and_programmes_in_order() {
        let document = XmltvDocument::parse(SAMPLE).unwrap();
        let ids: Vec<Option<&str>> = document.channels().map(|c| c.id()).collect();
        assert_eq!(ids, [Some("espn.us"), None]);
        assert_eq!(document.programmes().count(), 3);
    }

    #[test]
    fn title_absence_is_distinguished_from_presence() {
        let document = XmltvDocument::parse(SAMPLE).unwrap();
        let titles: Vec<Option<String>> = document.programmes().map(|p| p.title_text()).collect();
        assert_eq!(titles[0].as_deref(), Some("NHL Hockey"));
        assert_eq!(titles[1], None);
        assert_eq!(titles[2].as_deref(), Some("Movie"));
    }

    #[test]
    fn empty_subtitle_node_is_present_with_empty_text() {
        let document = XmltvDocument::parse(SAMPLE).unwrap();
        let subtitles: Vec<Option<String>> =
            document.programmes().map(|p| p.subtitle_text()).collect();
        assert_eq!(subtitles[0].as_deref(), Some("Rangers vs Bruins"));
        assert_eq!(subtitles[1], None);
        assert_eq!(subtitles[2].as_deref(), Some(""));
    }
}
