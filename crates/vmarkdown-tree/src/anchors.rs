//! Header anchors: unique slugs and self-links on every heading.

use std::collections::HashSet;

use crate::document::Document;
use crate::node::NodeId;

/// Text of the self-link appended to each heading.
pub const ANCHOR_LINK_TEXT: &str = " (\u{b6})";

/// Class of the self-link appended to each heading.
pub const ANCHOR_LINK_CLASS: &str = "header_anchor_link";

/// A heading that received an anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingRecord {
    /// Heading level, 1 to 6.
    pub level: u8,
    /// Unique slug, also the heading's `id`.
    pub slug: String,
    /// Heading text before the anchor link was added.
    pub text: String,
    /// The heading element.
    pub node: NodeId,
}

/// Slugs already handed out within one document.
#[derive(Debug, Default)]
pub struct SlugRegistry {
    used: HashSet<String>,
}

impl SlugRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `slug`, suffixing `_2`, `_3`, ... until it is unused.
    pub fn uniqify(&mut self, slug: &str) -> String {
        let mut candidate = slug.to_owned();
        let mut count = 2;
        while self.used.contains(&candidate) {
            candidate = format!("{slug}_{count}");
            count += 1;
        }
        self.used.insert(candidate.clone());
        candidate
    }
}

/// Lowercase, spaces to underscores, keep only `[a-z0-9_]`.
#[must_use]
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}

/// Give every `h1`..`h6` a unique `id` and a trailing self-link.
///
/// Returns one record per heading in document order.
pub fn add_header_anchors(doc: &mut Document, slugs: &mut SlugRegistry) -> Vec<HeadingRecord> {
    let headings = doc.find_elements(|el| el.heading_level().is_some());
    let mut records = Vec::with_capacity(headings.len());

    for node in headings {
        let Some(level) = doc.element(node).and_then(|el| el.heading_level()) else {
            continue;
        };
        let text = doc.text_content(node);
        let slug = slugs.uniqify(&slugify(&text));

        if let Some(el) = doc.element_mut(node) {
            el.set_attr("id", slug.clone());
        }

        let link = doc.create_element("a");
        if let Some(el) = doc.element_mut(link) {
            el.set_attr("href", format!("#{slug}"));
            el.set_class(ANCHOR_LINK_CLASS);
        }
        let glyph = doc.create_text(ANCHOR_LINK_TEXT);
        doc.append(link, glyph);
        doc.append(node, link);

        records.push(HeadingRecord {
            level,
            slug,
            text,
            node,
        });
    }

    tracing::debug!(count = records.len(), "assigned header anchors");
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_html;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello_world");
        assert_eq!(slugify("What's new in 3.12?"), "whats_new_in_312");
        assert_eq!(slugify("Über-cool"), "bercool");
        assert_eq!(slugify("snake_case stays"), "snake_case_stays");
    }

    #[test]
    fn test_uniqify() {
        let mut slugs = SlugRegistry::new();
        assert_eq!(slugs.uniqify("a"), "a");
        assert_eq!(slugs.uniqify("a"), "a_2");
        assert_eq!(slugs.uniqify("a"), "a_3");
        assert_eq!(slugs.uniqify("a_2"), "a_2_2");
        assert_eq!(slugs.uniqify("b"), "b");
    }

    #[test]
    fn test_anchor_shape() {
        let mut doc = parse_html("<h2>Getting Started</h2>").unwrap();
        let records = add_header_anchors(&mut doc, &mut SlugRegistry::new());
        assert_eq!(
            doc.to_html(),
            "<h2 id=\"getting_started\">Getting Started<a href=\"#getting_started\" class=\"header_anchor_link\"> (\u{b6})</a></h2>"
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, 2);
        assert_eq!(records[0].text, "Getting Started");
    }

    #[test]
    fn test_duplicate_headings_get_unique_slugs() {
        let mut doc =
            parse_html("<h1>Notes</h1><h2>Notes</h2><p>x</p><h3>Notes</h3><h2>Other</h2>").unwrap();
        let records = add_header_anchors(&mut doc, &mut SlugRegistry::new());
        let slugs: Vec<&str> = records.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["notes", "notes_2", "notes_3", "other"]);

        let ids: Vec<String> = records
            .iter()
            .map(|r| doc.element(r.node).unwrap().attr("id").unwrap().to_owned())
            .collect();
        assert_eq!(ids, vec!["notes", "notes_2", "notes_3", "other"]);
    }

    #[test]
    fn test_records_in_document_order() {
        let mut doc = parse_html("<div><h3>c</h3></div><h1>a</h1><section><h6>f</h6></section>")
            .unwrap();
        let records = add_header_anchors(&mut doc, &mut SlugRegistry::new());
        let levels: Vec<u8> = records.iter().map(|r| r.level).collect();
        assert_eq!(levels, vec![3, 1, 6]);
    }
}
