//! End-to-end generation: read both documents, index, render

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::{RenderOptions, SectionFilter};
use crate::descriptions::{destinations_root, DescriptionIndex};
use crate::error::{AtlasError, Document, Result};
use crate::render::PageRenderer;
use crate::taxonomy::load_tree;
use crate::xml::{parse_document, XmlElement};

/// Inputs and settings for one run.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Taxonomy XML file
    pub taxonomy_path: PathBuf,

    /// Destinations XML file
    pub destinations_path: PathBuf,

    /// Existing directory the pages are written into
    pub output_dir: PathBuf,

    /// Sections whose content makes up each description
    pub sections: SectionFilter,

    /// Rendering options
    pub options: RenderOptions,
}

impl GenerateConfig {
    /// Create a configuration with the default section filter and options.
    pub fn new(
        taxonomy_path: impl Into<PathBuf>,
        destinations_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            taxonomy_path: taxonomy_path.into(),
            destinations_path: destinations_path.into(),
            output_dir: output_dir.into(),
            sections: SectionFilter::default(),
            options: RenderOptions::default(),
        }
    }

    /// Replace the section filter.
    pub fn with_sections(mut self, sections: SectionFilter) -> Self {
        self.sections = sections;
        self
    }

    /// Replace the rendering options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    /// Pages written
    pub pages_written: usize,

    /// Taxonomy nodes that produced no page
    pub nodes_skipped: usize,

    /// Destinations with an indexed description
    pub destinations_indexed: usize,

    /// Directory the pages were written into
    pub output_dir: PathBuf,
}

/// Read and parse one input document.
///
/// # Errors
///
/// [`AtlasError::ReadInput`] if the file cannot be read,
/// [`AtlasError::MalformedXml`] if it is not well-formed.
pub fn read_document(document: Document, path: &Path) -> Result<XmlElement> {
    let text = fs::read_to_string(path).map_err(|source| AtlasError::ReadInput {
        document,
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&text).map_err(|e| AtlasError::MalformedXml {
        document,
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Run the whole pipeline.
///
/// Both documents are read and validated before any page is written, so an
/// input problem never leaves partial output behind. A write failure part way
/// through the walk does.
pub fn generate(config: &GenerateConfig) -> Result<GenerateReport> {
    let taxonomy_document = read_document(Document::Taxonomy, &config.taxonomy_path)?;
    let tree = load_tree(&taxonomy_document)?;
    info!(
        "loaded taxonomy from {}: {} nodes, {} with a page",
        config.taxonomy_path.display(),
        tree.node_count(),
        tree.renderable_count()
    );

    let destinations_document = read_document(Document::Destinations, &config.destinations_path)?;
    let index = DescriptionIndex::build_with_markup(
        destinations_root(&destinations_document)?,
        &config.sections,
        config.options.markup,
    );
    info!(
        "indexed {} destinations from {} (sections: {})",
        index.len(),
        config.destinations_path.display(),
        config.sections.names().collect::<Vec<_>>().join(", ")
    );

    let renderer = PageRenderer::with_options(&index, &config.output_dir, config.options.clone());
    let summary = renderer.render_tree(&tree)?;
    info!(
        "wrote {} pages to {}",
        summary.pages_written,
        config.output_dir.display()
    );

    Ok(GenerateReport {
        pages_written: summary.pages_written,
        nodes_skipped: summary.nodes_skipped,
        destinations_indexed: index.len(),
        output_dir: config.output_dir.clone(),
    })
}
