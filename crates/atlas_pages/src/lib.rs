//! # Atlas Pages
//!
//! Renders a destination taxonomy as a set of cross-linked static HTML pages.
//!
//! Two XML documents go in: a hierarchical taxonomy of places and a flat list
//! of destination descriptions. One `lp_<id>.html` file comes out per
//! taxonomy node that has both an id and a name, linking up to its parent and
//! down to its children, with the node's description embedded.
//!
//! ## Architecture
//!
//! ```text
//! destinations.xml → [xml] → [descriptions] → DescriptionIndex ─┐
//!                                                                ├→ [render] → lp_*.html
//! taxonomy.xml     → [xml] → [taxonomy]     → TaxonomyNode ─────┘
//! ```
//!
//! - **xml**: eager parse into an owned element tree
//! - **descriptions**: id → paragraph-wrapped section content
//! - **taxonomy**: the page tree, located by element name
//! - **render** / **template**: depth-first walk, one page per node
//! - **pipeline**: ties the above together for a single run
//!
//! ## Example
//!
//! ```
//! use atlas_pages::{DescriptionIndex, PageRenderer, SectionFilter, TaxonomyNode};
//! use atlas_pages::xml::parse_document;
//!
//! let destinations = parse_document(
//!     r#"<destinations>
//!          <destination atlas_id="2"><overview><![CDATA[Old continent.]]></overview></destination>
//!        </destinations>"#,
//! )
//! .unwrap();
//! let index = DescriptionIndex::build(&destinations, &SectionFilter::default());
//!
//! let tree = TaxonomyNode::new(1u64, "World").with_child(TaxonomyNode::new(2u64, "Europe"));
//! let renderer = PageRenderer::new(&index, "unused");
//! let (_, page) = renderer.page_for(&tree.children[0], &[&tree]).unwrap();
//!
//! assert_eq!(page.description, "<p>Old continent.</p>");
//! assert_eq!(page.up_links[0].href, "lp_1.html");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod descriptions;
pub mod error;
pub mod id;
pub mod pipeline;
pub mod render;
pub mod taxonomy;
pub mod template;
pub mod xml;

// Re-export main types
pub use config::{NavigationStyle, RenderOptions, SectionFilter, DEFAULT_SECTION};
pub use descriptions::{DescriptionIndex, DestinationRecord};
pub use error::{AtlasError, Document, Result};
pub use id::AtlasId;
pub use pipeline::{generate, GenerateConfig, GenerateReport};
pub use render::{page_file_name, PageRenderer, RenderSummary};
pub use taxonomy::{load_tree, TaxonomyNode};
pub use template::{HtmlTemplate, Link, Markup, PageContent};

/// Atlas Pages version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
