//! In-memory XML element tree
//!
//! Both input documents are small enough to read whole, so they are parsed
//! eagerly into an owned tree of [`XmlElement`]s that the taxonomy and
//! destinations readers navigate by name.
//!
//! # Architecture
//!
//! ```text
//! &str → [quick-xml events] → element stack → XmlElement (root)
//! ```
//!
//! Comments, processing instructions, the XML declaration and the doctype are
//! dropped. Whitespace-only text between elements is dropped too; CDATA
//! sections are always kept, since they carry the destination content.

use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// A syntax error found while parsing a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (at byte {position})")]
pub struct XmlError {
    /// Human-readable diagnostic
    pub message: String,

    /// Byte offset into the input where the problem was noticed
    pub position: u64,
}

impl XmlError {
    fn new(message: impl Into<String>, position: u64) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// Nested element
    Element(XmlElement),

    /// Character data, entities already unescaped
    Text(String),

    /// Raw `<![CDATA[...]]>` content
    CData(String),
}

/// An element with its attributes and children in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    /// Tag name, including any namespace prefix
    pub name: String,

    /// Attributes in source order
    pub attributes: IndexMap<String, String>,

    /// Child nodes in source order
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Create an empty element with the given tag name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add an attribute (builder style).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Append a child element (builder style).
    pub fn with_element(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// Append a text node (builder style).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// Look up an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Child elements with the given tag name, in document order.
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.elements().filter(move |element| element.name == name)
    }

    /// First child element with the given tag name.
    pub fn first_element(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|element| element.name == name)
    }

    /// CDATA sections attached directly to this element.
    pub fn cdata_blocks(&self) -> impl Iterator<Item = &str> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::CData(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Direct text content (text and CDATA children), trimmed.
    ///
    /// Returns `None` when the element carries no non-blank text.
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .children
            .iter()
            .filter_map(|child| match child {
                XmlNode::Text(text) | XmlNode::CData(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect();
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Parse a complete document and return its root element.
///
/// # Errors
///
/// Returns [`XmlError`] if the input is not well-formed: mismatched or
/// unclosed tags, bad attributes, undecodable entities, or a document with
/// no root element or more than one.
pub fn parse_document(input: &str) -> Result<XmlElement, XmlError> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().check_end_names = true;

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event()
            .map_err(|e| XmlError::new(e.to_string(), position))?;

        match event {
            Event::Start(start) => {
                stack.push(open_element(&start, position)?);
            }
            Event::Empty(start) => {
                let element = open_element(&start, position)?;
                attach(&mut stack, &mut root, element, position)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| XmlError::new("unexpected closing tag", position))?;
                attach(&mut stack, &mut root, element, position)?;
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| XmlError::new(e.to_string(), position))?;
                if let Some(parent) = stack.last_mut() {
                    if !text.trim().is_empty() {
                        parent.children.push(XmlNode::Text(text.into_owned()));
                    }
                } else if !text.trim().is_empty() {
                    return Err(XmlError::new("text outside the root element", position));
                }
            }
            Event::CData(cdata) => {
                let text = String::from_utf8_lossy(&cdata).into_owned();
                match stack.last_mut() {
                    Some(parent) => parent.children.push(XmlNode::CData(text)),
                    None => {
                        return Err(XmlError::new("CDATA outside the root element", position))
                    }
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    let end = reader.buffer_position() as u64;
    if let Some(open) = stack.last() {
        return Err(XmlError::new(
            format!("unclosed element <{}>", open.name),
            end,
        ));
    }
    root.ok_or_else(|| XmlError::new("document has no root element", end))
}

fn open_element(start: &BytesStart<'_>, position: u64) -> Result<XmlElement, XmlError> {
    let mut element = XmlElement::new(String::from_utf8_lossy(start.name().as_ref()));
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| XmlError::new(e.to_string(), position))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| XmlError::new(e.to_string(), position))?
            .into_owned();
        element.attributes.insert(key, value);
    }
    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
    position: u64,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(XmlNode::Element(element));
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(XmlError::new(
            format!("second root element <{}>", element.name),
            position,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_nested_elements_and_attributes() {
        let root = parse_document(
            r#"<?xml version="1.0"?>
            <taxonomies>
              <taxonomy code="a &amp; b">
                <taxonomy_name>World</taxonomy_name>
                <node atlas_node_id="1"/>
              </taxonomy>
            </taxonomies>"#,
        )
        .unwrap();

        assert_eq!(root.name, "taxonomies");
        let taxonomy = root.first_element("taxonomy").unwrap();
        assert_eq!(taxonomy.attribute("code"), Some("a & b"));
        let names: Vec<_> = taxonomy.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["taxonomy_name", "node"]);
        assert_eq!(
            taxonomy.first_element("taxonomy_name").unwrap().text(),
            Some("World".to_string())
        );
    }

    #[test]
    fn test_first_element_outlives_name() {
        let root = parse_document("<a><b/><c/></a>").unwrap();
        let found = {
            let name = String::from("c");
            root.first_element(&name)
        };
        assert_eq!(found.map(|e| e.name.as_str()), Some("c"));
        assert!(root.first_element("d").is_none());
    }

    #[test]
    fn test_cdata_blocks_kept_verbatim() {
        let root =
            parse_document("<overview><![CDATA[one <b>&</b>]]>\n<![CDATA[two]]></overview>").unwrap();
        let blocks: Vec<_> = root.cdata_blocks().collect();
        assert_eq!(blocks, vec!["one <b>&</b>", "two"]);
    }

    #[test]
    fn test_whitespace_text_dropped() {
        let root = parse_document("<a>\n  <b/>\n</a>").unwrap();
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.text(), None);
    }

    #[test]
    fn test_comments_ignored() {
        let root = parse_document("<!-- hi --><a><!-- inner --><b/></a>").unwrap();
        assert_eq!(root.elements().count(), 1);
    }

    #[test]
    fn test_mismatched_tag_is_error() {
        assert!(parse_document("<a><b></a>").is_err());
    }

    #[test]
    fn test_unclosed_element_is_error() {
        assert!(parse_document("<a><b></b>").is_err());
    }

    #[test]
    fn test_empty_document_is_error() {
        let err = parse_document("   ").unwrap_err();
        assert_eq!(err.message, "document has no root element");
    }

    #[test]
    fn test_second_root_is_error() {
        assert!(parse_document("<a/><b/>").is_err());
    }

    #[test]
    fn test_builder_matches_parse() {
        let built = XmlElement::new("node")
            .with_attribute("atlas_node_id", "7")
            .with_element(XmlElement::new("node_name").with_text("Paris"));
        let parsed =
            parse_document(r#"<node atlas_node_id="7"><node_name>Paris</node_name></node>"#)
                .unwrap();
        assert_eq!(built, parsed);
    }
}
