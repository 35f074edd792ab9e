//! Quick-XML backed document tree
//!
//! RSS feeds are small enough to hold in memory, and the rebuild step needs
//! random access to channel children (copy metadata, collect items at any
//! depth, re-emit kept subtrees verbatim), so the streaming events are
//! materialized into a lightweight tree rather than processed in one pass.

use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::Cursor;

use crate::errors::FeedError;

/// Maximum element nesting accepted from upstream documents.
const MAX_ELEMENT_DEPTH: usize = 64;

/// One XML element: name, attributes and children in document order.
///
/// Text stored in [`XmlNode::Text`] is unescaped; serialization re-escapes
/// it, so a round trip preserves content rather than byte-for-byte markup.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
    CData(String),
}

impl XmlElement {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Iterate over child elements, skipping text and CDATA nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            _ => None,
        })
    }

    /// First direct child element with the given name.
    pub fn first_child(&self, name: &str) -> Option<&XmlElement> {
        self.child_elements().find(|child| child.name == name)
    }

    /// All descendant elements with the given name, at any depth, in
    /// document order. A matching element's own subtree is still searched,
    /// so nested matches are returned as well.
    pub fn descendants_named<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        collect_descendants(self, name, &mut found);
        found
    }

    /// Concatenated direct text and CDATA content of this element.
    /// Text inside child elements is not included.
    pub fn direct_text(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            match child {
                XmlNode::Text(t) | XmlNode::CData(t) => text.push_str(t),
                XmlNode::Element(_) => {}
            }
        }
        text
    }
}

fn collect_descendants<'a>(
    element: &'a XmlElement,
    name: &str,
    found: &mut Vec<&'a XmlElement>,
) {
    for child in element.child_elements() {
        if child.name == name {
            found.push(child);
        }
        collect_descendants(child, name, found);
    }
}

/// Parse an XML document into its root element.
///
/// Comments, processing instructions and the XML declaration are dropped.
/// Documents nested deeper than [`MAX_ELEMENT_DEPTH`] are rejected.
pub fn parse(content: &str) -> Result<XmlElement, FeedError> {
    let mut reader = Reader::from_str(content);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                if stack.len() >= MAX_ELEMENT_DEPTH {
                    return Err(FeedError::TooDeep(MAX_ELEMENT_DEPTH));
                }
                stack.push(element_from_start(e)?);
            }
            Ok(Event::Empty(ref e)) => {
                let element = element_from_start(e)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(XmlNode::Element(element)),
                    None => place_root(&mut root, element)?,
                }
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| FeedError::Malformed("unexpected closing tag".to_string()))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(XmlNode::Element(element)),
                    None => place_root(&mut root, element)?,
                }
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| FeedError::Malformed(e.to_string()))?;
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(XmlNode::Text(text.into_owned()));
                }
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8(e.into_inner().into_owned())
                    .map_err(|e| FeedError::Malformed(e.to_string()))?;
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(XmlNode::CData(text));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(FeedError::Malformed(e.to_string())),
        }
    }

    if !stack.is_empty() {
        return Err(FeedError::Malformed("unclosed element".to_string()));
    }

    root.ok_or_else(|| FeedError::Malformed("document has no root element".to_string()))
}

fn place_root(root: &mut Option<XmlElement>, element: XmlElement) -> Result<(), FeedError> {
    if root.is_some() {
        return Err(FeedError::Malformed(
            "document has multiple root elements".to_string(),
        ));
    }
    *root = Some(element);
    Ok(())
}

fn element_from_start(e: &BytesStart<'_>) -> Result<XmlElement, FeedError> {
    let name = std::str::from_utf8(e.name().as_ref())
        .map_err(|e| FeedError::Malformed(format!("invalid UTF-8 in element name: {e}")))?
        .to_string();

    let mut element = XmlElement::new(name);
    for attr in e.attributes() {
        let attr = attr.map_err(|e| FeedError::Malformed(e.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| FeedError::Malformed(format!("invalid UTF-8 in attribute name: {e}")))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| FeedError::Malformed(e.to_string()))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

/// Serialize an element tree to a compact XML string.
///
/// No XML declaration is emitted; the element itself is the whole output.
pub fn to_xml_string(root: &XmlElement) -> Result<String, FeedError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    write_element(&mut writer, root)?;
    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| FeedError::Serialize(e.to_string()))
}

fn write_element(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    element: &XmlElement,
) -> Result<(), FeedError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        writer
            .write_event(Event::Empty(start))
            .map_err(|e| FeedError::Serialize(e.to_string()))?;
        return Ok(());
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| FeedError::Serialize(e.to_string()))?;

    for child in &element.children {
        match child {
            XmlNode::Element(child) => write_element(writer, child)?,
            XmlNode::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(|e| FeedError::Serialize(e.to_string()))?,
            XmlNode::CData(text) => writer
                .write_event(Event::CData(BytesCData::new(text.as_str())))
                .map_err(|e| FeedError::Serialize(e.to_string()))?,
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(|e| FeedError::Serialize(e.to_string()))
}
