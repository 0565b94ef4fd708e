//! Generation configuration

use std::collections::BTreeSet;

use crate::template::Markup;

/// Section used when no section names are supplied.
pub const DEFAULT_SECTION: &str = "overview";

/// Set of tag names whose CDATA contributes to a destination description.
///
/// An empty set is never held: building from no names yields
/// `{"overview"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionFilter {
    names: BTreeSet<String>,
}

impl Default for SectionFilter {
    fn default() -> Self {
        Self {
            names: BTreeSet::from([DEFAULT_SECTION.to_string()]),
        }
    }
}

impl SectionFilter {
    /// Build a filter from section names, falling back to the default when
    /// the list is empty.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            Self::default()
        } else {
            Self { names }
        }
    }

    /// Whether a tag name is one of the selected sections.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Selected section names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// How a page links back up the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationStyle {
    /// A single "Up to" link to the immediate parent
    #[default]
    Parent,

    /// One "Up to" link per renderable ancestor, outermost first
    Ancestors,
}

/// Options controlling how pages are rendered.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Upward navigation style
    pub navigation: NavigationStyle,

    /// Group the description under one `<h3>` heading per section
    pub section_headings: bool,

    /// Whether names and text blocks are escaped before interpolation
    pub markup: Markup,
}

impl RenderOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the upward navigation style.
    pub fn with_navigation(mut self, navigation: NavigationStyle) -> Self {
        self.navigation = navigation;
        self
    }

    /// Enable or disable per-section headings.
    pub fn with_section_headings(mut self, enabled: bool) -> Self {
        self.section_headings = enabled;
        self
    }

    /// Set the markup mode.
    pub fn with_markup(mut self, markup: Markup) -> Self {
        self.markup = markup;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_falls_back_to_overview() {
        let filter = SectionFilter::new(Vec::<String>::new());
        assert_eq!(filter, SectionFilter::default());
        assert!(filter.contains("overview"));
        assert_eq!(filter.names().collect::<Vec<_>>(), vec!["overview"]);
    }

    #[test]
    fn test_explicit_sections_replace_default() {
        let filter = SectionFilter::new(["history", "money", "history"]);
        assert!(filter.contains("history"));
        assert!(filter.contains("money"));
        assert!(!filter.contains("overview"));
        assert_eq!(filter.names().count(), 2);
    }

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_navigation(NavigationStyle::Ancestors)
            .with_section_headings(true)
            .with_markup(Markup::Escaped);
        assert_eq!(options.navigation, NavigationStyle::Ancestors);
        assert!(options.section_headings);
        assert_eq!(options.markup, Markup::Escaped);
    }
}
