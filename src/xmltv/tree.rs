//! Generic ordered XML element tree
//!
//! Parsed with a streaming quick-xml reader and written back with
//! quick-xml escaping. Attribute order, child order, and text content are
//! preserved so that elements we never inspect round-trip verbatim. CDATA
//! sections are folded into text; comments and processing instructions are
//! dropped.

use quick_xml::Reader;
use quick_xml::escape::{EscapeError, escape, unescape};
use quick_xml::events::Event;
use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// Errors produced while building an element tree from XML text
#[derive(Error, Debug)]
pub enum XmltvParseError {
    #[error("XML syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("Invalid attribute: {0}")]
    Attr(#[from] AttrError),

    #[error("Invalid character reference: {0}")]
    Escape(#[from] EscapeError),

    #[error("document contains no root element")]
    NoRootElement,

    #[error("unexpected closing tag </{0}>")]
    UnexpectedClose(String),
}

/// A child of an element: either a nested element or a run of text
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element with ordered attributes and ordered children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Look up an attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate direct child elements in document order
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// First direct child element with the given name
    pub fn find_child(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|element| element.name == name)
    }

    /// Mutable access to the first direct child element with the given name
    pub fn find_child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(element) if element.name == name => Some(element),
            _ => None,
        })
    }

    /// Concatenated direct text content of this element
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Replace the direct text content, keeping child elements in place
    pub fn set_text<S: Into<String>>(&mut self, text: S) {
        self.children.retain(|node| matches!(node, Node::Element(_)));
        self.children.insert(0, Node::Text(text.into()));
    }
}

/// Parse an XML document into its root element
pub fn parse_document(content: &str) -> Result<Element, XmltvParseError> {
    let mut reader = Reader::from_str(content);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(end) => {
                let Some(element) = stack.pop() else {
                    let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                    return Err(XmltvParseError::UnexpectedClose(name));
                };
                attach(&mut stack, &mut root, element);
            }
            Event::Text(text) => {
                if let Some(parent) = stack.last_mut() {
                    let raw = String::from_utf8_lossy(&text);
                    let unescaped = unescape(&raw)?;
                    push_text(parent, &unescaped);
                }
            }
            Event::CData(cdata) => {
                if let Some(parent) = stack.last_mut() {
                    let text = String::from_utf8_lossy(&cdata).into_owned();
                    push_text(parent, &text);
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            // carry nothing we aggregate.
            _ => {}
        }
    }

    root.ok_or(XmltvParseError::NoRootElement)
}

/// Serialize a document to UTF-8 XML bytes with an XML declaration
pub fn serialize_document(root: &Element) -> Vec<u8> {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    write_element(&mut out, root);
    out.into_bytes()
}

fn element_from_start(
    start: &quick_xml::events::BytesStart,
) -> Result<Element, XmltvParseError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(name);
    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attribute.value);
        let value = unescape(&raw)?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(element));
    } else if root.is_none() {
        *root = Some(element);
    }
    // Anything after the root element is not well-formed XML in a way that
    // matters here; quick-xml rejects most of it before we get this far.
}

fn push_text(parent: &mut Element, text: &str) {
    // Adjacent text runs (e.g. text split around a CDATA section) merge into
    // one node so Element::text sees a single value.
    if let Some(Node::Text(existing)) = parent.children.last_mut() {
        existing.push_str(text);
    } else {
        parent.children.push(Node::Text(text.to_string()));
    }
}

fn write_element(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        out.push_str(&format!(" {}=\"{}\"", key, escape(value.as_str())));
    }

    if element.children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in &element.children {
        match child {
            Node::Element(child) => write_element(out, child),
            Node::Text(text) => out.push_str(&escape(text.as_str())),
        }
    }
    out.push_str(&format!("</{}>", element.name));
}
