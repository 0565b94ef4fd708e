//! Page rendering
//!
//! Walks the taxonomy depth-first, parent before children, children in
//! document order, writing one file per renderable node. The parent of each
//! node is not stored in the tree; the walk carries the chain of ancestors
//! down with it.

use std::fs;
use std::path::PathBuf;

use log::{debug, trace};

use crate::config::{NavigationStyle, RenderOptions};
use crate::descriptions::DescriptionIndex;
use crate::error::{AtlasError, Result};
use crate::id::AtlasId;
use crate::taxonomy::TaxonomyNode;
use crate::template::{HtmlTemplate, Link, PageContent};

/// File name of the page for a node id: `lp_<id>.html`.
///
/// The id is written as it appears in the taxonomy, not in its canonical
/// lookup form, so `"042"` and `"42"` name different pages. Used both for the
/// file written and for every link to it.
pub fn page_file_name(id: &AtlasId) -> String {
    format!("lp_{id}.html")
}

/// Counts from one walk of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    /// Files written
    pub pages_written: usize,

    /// Nodes visited that lacked an id or a name
    pub nodes_skipped: usize,
}

/// Writes the pages for a taxonomy tree into an existing directory.
#[derive(Debug)]
pub struct PageRenderer<'a> {
    index: &'a DescriptionIndex,
    output_dir: PathBuf,
    template: HtmlTemplate,
    options: RenderOptions,
}

impl<'a> PageRenderer<'a> {
    /// Create a renderer with default options.
    pub fn new(index: &'a DescriptionIndex, output_dir: impl Into<PathBuf>) -> Self {
        Self::with_options(index, output_dir, RenderOptions::default())
    }

    /// Create a renderer with the given options.
    pub fn with_options(
        index: &'a DescriptionIndex,
        output_dir: impl Into<PathBuf>,
        options: RenderOptions,
    ) -> Self {
        Self {
            index,
            output_dir: output_dir.into(),
            template: HtmlTemplate::new(),
            options,
        }
    }

    /// Render every renderable node under (and including) `root`.
    ///
    /// The root is rendered with no parent, so its page has no "Up to" link.
    ///
    /// # Errors
    ///
    /// Stops at the first page that cannot be written and returns
    /// [`AtlasError::WriteOutput`]. Pages written before that stay on disk.
    pub fn render_tree(&self, root: &TaxonomyNode) -> Result<RenderSummary> {
        self.render_subtree(root, None)
    }

    /// Render a sub-tree whose root has the given parent.
    pub fn render_subtree(
        &self,
        node: &TaxonomyNode,
        parent: Option<&TaxonomyNode>,
    ) -> Result<RenderSummary> {
        let mut summary = RenderSummary::default();
        let mut ancestors: Vec<&TaxonomyNode> = parent.into_iter().collect();
        self.visit(node, &mut ancestors, &mut summary)?;
        Ok(summary)
    }

    fn visit<'t>(
        &self,
        node: &'t TaxonomyNode,
        ancestors: &mut Vec<&'t TaxonomyNode>,
        summary: &mut RenderSummary,
    ) -> Result<()> {
        match self.page_for(node, ancestors) {
            Some((id, page)) => {
                self.write_page(id, &page)?;
                summary.pages_written += 1;
            }
            None => {
                trace!("skipping node without id or name: {:?}", node.id);
                summary.nodes_skipped += 1;
            }
        }

        ancestors.push(node);
        for child in &node.children {
            self.visit(child, ancestors, summary)?;
        }
        ancestors.pop();
        Ok(())
    }

    /// Assemble the page content for a node, or `None` if it is not
    /// renderable. `ancestors` runs from the outermost ancestor to the
    /// parent.
    pub fn page_for<'t>(
        &self,
        node: &'t TaxonomyNode,
        ancestors: &[&TaxonomyNode],
    ) -> Option<(&'t AtlasId, PageContent)> {
        let (id, name) = node.page_identity()?;

        let up_candidates: &[&TaxonomyNode] = match self.options.navigation {
            NavigationStyle::Parent => match ancestors.split_last() {
                Some((parent, _)) => std::slice::from_ref(parent),
                None => &[],
            },
            NavigationStyle::Ancestors => ancestors,
        };

        let page = PageContent {
            title: self.options.markup.apply(name).into_owned(),
            up_links: up_candidates
                .iter()
                .filter_map(|ancestor| self.link_to(ancestor))
                .collect(),
            child_links: node
                .children
                .iter()
                .filter_map(|child| self.link_to(child))
                .collect(),
            description: self.description_for(id),
        };
        Some((id, page))
    }

    fn link_to(&self, node: &TaxonomyNode) -> Option<Link> {
        let (id, name) = node.page_identity()?;
        Some(Link::new(
            page_file_name(id),
            self.options.markup.apply(name),
        ))
    }

    fn description_for(&self, id: &AtlasId) -> String {
        if self.options.section_headings {
            self.index
                .get(id)
                .map(|record| record.sectioned_description())
                .unwrap_or_default()
        } else {
            self.index.lookup(id).to_string()
        }
    }

    fn write_page(&self, id: &AtlasId, page: &PageContent) -> Result<()> {
        let path = self.output_dir.join(page_file_name(id));
        let html = self.template.render(page);
        fs::write(&path, html).map_err(|source| AtlasError::WriteOutput {
            path: path.clone(),
            source,
        })?;
        debug!("wrote {}", path.display());
        Ok(())
    }
}
