//! Destination description index
//!
//! Turns the destinations document into a map from [`AtlasId`] to the HTML
//! fragment shown on that destination's page.
//!
//! For each `<destination>` directly under the root, the whole sub-tree is
//! walked depth-first. Every element whose tag is in the [`SectionFilter`]
//! contributes its own CDATA blocks, each wrapped in `<p>…</p>`. Elements
//! outside the filter contribute nothing themselves but are still descended
//! into, so a selected section nested anywhere below a destination is found.

use std::collections::{BTreeMap, HashMap};

use log::{debug, trace, warn};

use crate::config::SectionFilter;
use crate::error::{AtlasError, Document, Result};
use crate::id::AtlasId;
use crate::template::Markup;
use crate::xml::XmlElement;

/// Root element of the destinations document.
pub const DESTINATIONS_ELEMENT: &str = "destinations";

/// Element holding one destination.
pub const DESTINATION_ELEMENT: &str = "destination";

/// Attribute carrying a destination's id.
pub const DESTINATION_ID_ATTRIBUTE: &str = "atlas_id";

/// Check that a parsed document is a destinations document and return its
/// root.
pub fn destinations_root(document: &XmlElement) -> Result<&XmlElement> {
    if document.name == DESTINATIONS_ELEMENT {
        Ok(document)
    } else {
        Err(AtlasError::MissingElement {
            document: Document::Destinations,
            expected: DESTINATIONS_ELEMENT,
            parent: format!("document root (found <{}>)", document.name),
        })
    }
}

/// Assembled description of one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationRecord {
    /// Destination id
    pub id: AtlasId,

    /// Every selected paragraph, in document order
    pub description: String,

    /// The same paragraphs grouped by section name
    pub sections: BTreeMap<String, String>,
}

impl DestinationRecord {
    /// Description with an `<h3>` heading before each section that has
    /// content, sections in name order.
    pub fn sectioned_description(&self) -> String {
        let mut html = String::with_capacity(self.description.len() + 32 * self.sections.len());
        for (section, paragraphs) in &self.sections {
            html.push_str("<h3>");
            html.push_str(&capitalize(section));
            html.push_str("</h3>");
            html.push_str(paragraphs);
        }
        html
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Accumulated paragraphs for the destination currently being walked.
#[derive(Debug, Default)]
struct Fragments {
    combined: String,
    sections: BTreeMap<String, String>,
}

fn collect_fragments(
    element: &XmlElement,
    filter: &SectionFilter,
    markup: Markup,
    mut fragments: Fragments,
) -> Fragments {
    if filter.contains(&element.name) {
        for block in element.cdata_blocks() {
            let paragraph = format!("<p>{}</p>", markup.apply(block));
            fragments.combined.push_str(&paragraph);
            fragments
                .sections
                .entry(element.name.clone())
                .or_default()
                .push_str(&paragraph);
        }
    }
    element.elements().fold(fragments, |fragments, child| {
        collect_fragments(child, filter, markup, fragments)
    })
}

/// Map from destination id to its assembled description.
///
/// Built once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct DescriptionIndex {
    records: HashMap<AtlasId, DestinationRecord>,
}

impl DescriptionIndex {
    /// Index a destinations root, interpolating CDATA verbatim.
    pub fn build(root: &XmlElement, filter: &SectionFilter) -> Self {
        Self::build_with_markup(root, filter, Markup::Verbatim)
    }

    /// Index a destinations root, passing each CDATA block through `markup`.
    ///
    /// Destinations with a missing, blank or zero `atlas_id` are skipped. A
    /// repeated id replaces the earlier entry.
    pub fn build_with_markup(root: &XmlElement, filter: &SectionFilter, markup: Markup) -> Self {
        let mut records = HashMap::new();

        for destination in root.elements_named(DESTINATION_ELEMENT) {
            let id = match destination
                .attribute(DESTINATION_ID_ATTRIBUTE)
                .and_then(AtlasId::parse)
            {
                Some(id) if !id.is_zero() => id,
                _ => {
                    trace!("skipping destination without a usable {DESTINATION_ID_ATTRIBUTE}");
                    continue;
                }
            };

            let fragments = collect_fragments(destination, filter, markup, Fragments::default());
            trace!(
                "indexed destination {id}: {} bytes of description",
                fragments.combined.len()
            );

            let record = DestinationRecord {
                id: id.clone(),
                description: fragments.combined,
                sections: fragments.sections,
            };
            if records.insert(id.clone(), record).is_some() {
                warn!("destination {id} appears more than once; keeping the last one");
            }
        }

        debug!("indexed {} destinations", records.len());
        Self { records }
    }

    /// Description for an id, or `""` when there is none.
    pub fn lookup(&self, id: &AtlasId) -> &str {
        self.records
            .get(id)
            .map(|record| record.description.as_str())
            .unwrap_or("")
    }

    /// Full record for an id.
    pub fn get(&self, id: &AtlasId) -> Option<&DestinationRecord> {
        self.records.get(id)
    }

    /// Whether an id has an entry.
    pub fn contains(&self, id: &AtlasId) -> bool {
        self.records.contains_key(id)
    }

    /// Number of indexed destinations.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing was indexed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;
    use pretty_assertions::assert_eq;

    fn index(xml: &str, sections: &[&str]) -> DescriptionIndex {
        let document = parse_document(xml).unwrap();
        let root = destinations_root(&document).unwrap();
        DescriptionIndex::build(root, &SectionFilter::new(sections.iter().copied()))
    }

    fn id(raw: &str) -> AtlasId {
        AtlasId::parse(raw).unwrap()
    }

    #[test]
    fn test_two_overviews_concatenate() {
        let index = index(
            r#"<destinations>
                 <destination atlas_id="42">
                   <overview><![CDATA[A]]></overview>
                   <overview><![CDATA[B]]></overview>
                 </destination>
               </destinations>"#,
            &[],
        );
        assert_eq!(index.lookup(&id("42")), "<p>A</p><p>B</p>");
    }

    #[test]
    fn test_nested_sections_found_through_unselected_parents() {
        let index = index(
            r#"<destinations>
                 <destination atlas_id="7">
                   <history>
                     <history><![CDATA[Old]]></history>
                     <overview><![CDATA[Nested]]></overview>
                   </history>
                   <introductory><introduction><overview><![CDATA[Deep]]></overview></introduction></introductory>
                 </destination>
               </destinations>"#,
            &[],
        );
        assert_eq!(index.lookup(&id("7")), "<p>Nested</p><p>Deep</p>");
    }

    #[test]
    fn test_multiple_sections_keep_document_order() {
        let index = index(
            r#"<destinations>
                 <destination atlas_id="7">
                   <money><![CDATA[Cash]]></money>
                   <overview><![CDATA[Intro]]><![CDATA[More]]></overview>
                 </destination>
               </destinations>"#,
            &["overview", "money"],
        );
        assert_eq!(index.lookup(&id("7")), "<p>Cash</p><p>Intro</p><p>More</p>");

        let record = index.get(&id("7")).unwrap();
        assert_eq!(record.sections["money"], "<p>Cash</p>");
        assert_eq!(record.sections["overview"], "<p>Intro</p><p>More</p>");
        assert_eq!(
            record.sectioned_description(),
            "<h3>Money</h3><p>Cash</p><h3>Overview</h3><p>Intro</p><p>More</p>"
        );
    }

    #[test]
    fn test_plain_text_is_not_collected() {
        let index = index(
            r#"<destinations>
                 <destination atlas_id="1"><overview>plain words</overview></destination>
               </destinations>"#,
            &[],
        );
        assert!(index.contains(&id("1")));
        assert_eq!(index.lookup(&id("1")), "");
    }

    #[test]
    fn test_zero_and_missing_ids_are_skipped() {
        let index = index(
            r#"<destinations>
                 <destination atlas_id="0"><overview><![CDATA[Z]]></overview></destination>
                 <destination><overview><![CDATA[N]]></overview></destination>
                 <destination atlas_id=""><overview><![CDATA[E]]></overview></destination>
               </destinations>"#,
            &[],
        );
        assert!(index.is_empty());
        assert_eq!(index.lookup(&id("0")), "");
    }

    #[test]
    fn test_duplicate_id_last_write_wins() {
        let index = index(
            r#"<destinations>
                 <destination atlas_id="5"><overview><![CDATA[first]]></overview></destination>
                 <destination atlas_id="05"><overview><![CDATA[second]]></overview></destination>
               </destinations>"#,
            &[],
        );
        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup(&id("5")), "<p>second</p>");
    }

    #[test]
    fn test_only_direct_destination_children_are_indexed() {
        let index = index(
            r#"<destinations>
                 <group><destination atlas_id="9"><overview><![CDATA[X]]></overview></destination></group>
               </destinations>"#,
            &[],
        );
        assert!(index.is_empty());
    }

    #[test]
    fn test_destination_element_itself_can_match() {
        let index = index(
            r#"<destinations>
                 <destination atlas_id="3"><![CDATA[Top]]></destination>
               </destinations>"#,
            &["destination"],
        );
        assert_eq!(index.lookup(&id("3")), "<p>Top</p>");
    }

    #[test]
    fn test_escaped_markup_applies_to_blocks() {
        let document = parse_document(
            r#"<destinations><destination atlas_id="2"><overview><![CDATA[Fish & <i>chips</i>]]></overview></destination></destinations>"#,
        )
        .unwrap();
        let index = DescriptionIndex::build_with_markup(
            &document,
            &SectionFilter::default(),
            Markup::Escaped,
        );
        assert_eq!(
            index.lookup(&id("2")),
            "<p>Fish &amp; &lt;i&gt;chips&lt;/i&gt;</p>"
        );
    }

    #[test]
    fn test_wrong_root_is_missing_element() {
        let document = parse_document("<places/>").unwrap();
        let err = destinations_root(&document).unwrap_err();
        assert!(matches!(
            err,
            AtlasError::MissingElement {
                document: Document::Destinations,
                expected: "destinations",
                ..
            }
        ));
    }
}
