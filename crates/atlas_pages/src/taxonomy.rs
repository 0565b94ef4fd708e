//! Taxonomy tree
//!
//! The taxonomy document looks like this:
//!
//! ```text
//! <taxonomies>
//!   <taxonomy>
//!     <taxonomy_name>World</taxonomy_name>
//!     <node atlas_node_id="355064">
//!       <node_name>Africa</node_name>
//!       <node atlas_node_id="355611">
//!         <node_name>South Africa</node_name>
//!         ...
//! ```
//!
//! Navigation to the starting point is by element name, one level at a time,
//! with a distinct error for each level that is missing. The `<taxonomy>`
//! element itself becomes the root page: it gets id [`ROOT_ID`] and the text
//! of `<taxonomy_name>` as its display name.

use crate::error::{AtlasError, Document, Result};
use crate::id::AtlasId;
use crate::xml::XmlElement;

/// Top-level element of the taxonomy document.
pub const TAXONOMIES_ELEMENT: &str = "taxonomies";

/// Second-level element holding one taxonomy.
pub const TAXONOMY_ELEMENT: &str = "taxonomy";

/// Child of `<taxonomy>` naming the whole tree.
pub const TAXONOMY_NAME_ELEMENT: &str = "taxonomy_name";

/// Child element carrying a node's display name.
pub const NODE_NAME_ELEMENT: &str = "node_name";

/// Attribute carrying a node's id.
pub const NODE_ID_ATTRIBUTE: &str = "atlas_node_id";

/// Id given to the synthetic root built from `<taxonomy>`.
pub const ROOT_ID: u64 = 1;

/// One entry in the hierarchy.
///
/// A node without an id or without a name produces no page, though its
/// children still can.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaxonomyNode {
    /// Node id, from `atlas_node_id`
    pub id: Option<AtlasId>,

    /// Display name, from the `<node_name>` child
    pub name: Option<String>,

    /// Child nodes in document order
    pub children: Vec<TaxonomyNode>,
}

impl TaxonomyNode {
    /// Create a renderable node with no children.
    pub fn new(id: impl Into<AtlasId>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            children: Vec::new(),
        }
    }

    /// Append a child (builder style).
    pub fn with_child(mut self, child: TaxonomyNode) -> Self {
        self.children.push(child);
        self
    }

    /// Build a node from an element.
    ///
    /// The id comes from the `atlas_node_id` attribute and the name from the
    /// first `<node_name>` child. Every other child element becomes a child
    /// node, whatever its tag.
    pub fn from_element(element: &XmlElement) -> Self {
        Self {
            id: element.attribute(NODE_ID_ATTRIBUTE).and_then(AtlasId::parse),
            name: element
                .first_element(NODE_NAME_ELEMENT)
                .and_then(XmlElement::text),
            children: child_nodes(element, NODE_NAME_ELEMENT),
        }
    }

    /// Id and name, if this node produces a page.
    pub fn page_identity(&self) -> Option<(&AtlasId, &str)> {
        match (&self.id, &self.name) {
            (Some(id), Some(name)) => Some((id, name.as_str())),
            _ => None,
        }
    }

    /// Whether this node produces a page.
    pub fn is_renderable(&self) -> bool {
        self.page_identity().is_some()
    }

    /// Number of nodes in this sub-tree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TaxonomyNode::node_count).sum::<usize>()
    }

    /// Number of renderable nodes in this sub-tree.
    pub fn renderable_count(&self) -> usize {
        usize::from(self.is_renderable())
            + self
                .children
                .iter()
                .map(TaxonomyNode::renderable_count)
                .sum::<usize>()
    }
}

fn child_nodes(element: &XmlElement, name_element: &str) -> Vec<TaxonomyNode> {
    element
        .elements()
        .filter(|child| child.name != name_element)
        .map(TaxonomyNode::from_element)
        .collect()
}

fn missing(expected: &'static str, parent: impl Into<String>) -> AtlasError {
    AtlasError::MissingElement {
        document: Document::Taxonomy,
        expected,
        parent: parent.into(),
    }
}

/// Locate the taxonomy in a parsed document and build the page tree.
///
/// # Errors
///
/// Returns [`AtlasError::MissingElement`] naming the first of
/// `<taxonomies>`, `<taxonomy>` or `<taxonomy_name>` that is absent.
pub fn load_tree(document: &XmlElement) -> Result<TaxonomyNode> {
    if document.name != TAXONOMIES_ELEMENT {
        return Err(missing(
            TAXONOMIES_ELEMENT,
            format!("document root (found <{}>)", document.name),
        ));
    }

    let taxonomy = document
        .first_element(TAXONOMY_ELEMENT)
        .ok_or_else(|| missing(TAXONOMY_ELEMENT, format!("<{TAXONOMIES_ELEMENT}>")))?;

    let taxonomy_name = taxonomy
        .first_element(TAXONOMY_NAME_ELEMENT)
        .ok_or_else(|| missing(TAXONOMY_NAME_ELEMENT, format!("<{TAXONOMY_ELEMENT}>")))?;

    Ok(TaxonomyNode {
        id: Some(AtlasId::from(ROOT_ID)),
        name: taxonomy_name.text(),
        children: child_nodes(taxonomy, TAXONOMY_NAME_ELEMENT),
    })
}
