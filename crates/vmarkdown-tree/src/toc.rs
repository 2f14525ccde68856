//! Table of contents built from heading records.

use crate::anchors::HeadingRecord;
use crate::document::Document;
use crate::error::TreeError;
use crate::node::NodeId;

/// Deepest HTML heading level.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// `id` of the root TOC list.
pub const TOC_ID: &str = "table_of_contents";

/// Caption text placed as the first child of the root TOC list.
pub const TOC_CAPTION: &str = "Table of contents";

/// An open list in the TOC under construction and the heading level it holds.
struct OpenList {
    list: NodeId,
    level: Option<u8>,
}

/// Build a nested `<ol>` of links and insert it right after the first `h1`.
///
/// Headings deeper than `max_level` are left out, as is the first `h1`
/// itself. Levels above [`MAX_HEADING_LEVEL`] are treated as
/// [`MAX_HEADING_LEVEL`]. Does nothing when the document has no `h1`.
///
/// A heading shallower than every open list (for example an `h2` after the
/// TOC started at `h4`) resets the root list to its level and is appended at
/// the top, so out-of-order documents still get a flat, complete TOC.
///
/// # Errors
///
/// Returns [`TreeError::InvalidTocLevel`] when `max_level` is 0. The check
/// runs before the tree is touched.
pub fn add_toc(
    doc: &mut Document,
    headings: &[HeadingRecord],
    max_level: u8,
) -> Result<(), TreeError> {
    if max_level == 0 {
        return Err(TreeError::InvalidTocLevel(max_level));
    }
    let max_level = max_level.min(MAX_HEADING_LEVEL);

    let Some(first_h1) = doc.first_element("h1") else {
        tracing::debug!("document has no h1, skipping table of contents");
        return Ok(());
    };

    let root = doc.create_element("ol");
    if let Some(el) = doc.element_mut(root) {
        el.set_attr("id", TOC_ID);
    }
    let caption = doc.create_text(TOC_CAPTION);
    doc.append(root, caption);

    let mut open = vec![OpenList {
        list: root,
        level: None,
    }];
    let mut entries = 0;

    for heading in headings
        .iter()
        .filter(|h| h.node != first_h1 && h.level <= max_level)
    {
        let item = toc_item(doc, heading);
        let level = heading.level;

        let (mut list, list_level) = climb(&mut open, level);

        if level > list_level {
            let nested = doc.create_element("ol");
            let parent = last_item(doc, list).unwrap_or(list);
            doc.append(parent, nested);
            open.push(OpenList {
                list: nested,
                level: Some(level),
            });
            list = nested;
        }

        doc.append(list, item);
        entries += 1;
    }

    doc.insert_after(first_h1, root);
    tracing::debug!(entries, max_level, "built table of contents");
    Ok(())
}

/// Close lists deeper than `level` and return the list to append into,
/// with its level.
///
/// The root list is never closed: if `level` is shallower than the root, the
/// root takes on `level`.
fn climb(open: &mut Vec<OpenList>, level: u8) -> (NodeId, u8) {
    loop {
        let depth = open.len();
        let top = &mut open[depth - 1];
        let top_level = *top.level.get_or_insert(level);
        if level >= top_level {
            return (top.list, top_level);
        }
        if depth == 1 {
            top.level = Some(level);
            return (top.list, level);
        }
        open.pop();
    }
}

fn last_item(doc: &Document, list: NodeId) -> Option<NodeId> {
    doc.children(list)
        .iter()
        .rev()
        .copied()
        .find(|&child| doc.is_element(child, "li"))
}

fn toc_item(doc: &mut Document, heading: &HeadingRecord) -> NodeId {
    let item = doc.create_element("li");
    let link = doc.create_element("a");
    if let Some(el) = doc.element_mut(link) {
        el.set_attr("href", format!("#{}", heading.slug));
    }
    let text = doc.create_text(heading.text.clone());
    doc.append(link, text);
    doc.append(item, link);
    item
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchors::{SlugRegistry, add_header_anchors};
    use crate::parser::parse_html;
    use pretty_assertions::assert_eq;

    fn build(html: &str, max_level: u8) -> Document {
        let mut doc = parse_html(html).unwrap();
        let records = add_header_anchors(&mut doc, &mut SlugRegistry::new());
        add_toc(&mut doc, &records, max_level).unwrap();
        doc
    }

    fn toc_html(doc: &Document) -> String {
        let toc = doc
            .find_elements(|el| el.attr("id") == Some(TOC_ID))
            .into_iter()
            .next()
            .unwrap();
        doc.node_to_html(toc)
    }

    fn count_items(doc: &Document) -> usize {
        doc.find_elements(|el| el.name == "li").len()
    }

    #[test]
    fn test_nesting() {
        let doc = build("<h1>Intro</h1><h2>A</h2><h3>A.1</h3><h2>B</h2>", 6);
        assert_eq!(
            toc_html(&doc),
            concat!(
                r#"<ol id="table_of_contents">Table of contents"#,
                r##"<li><a href="#a">A</a><ol><li><a href="#a1">A.1</a></li></ol></li>"##,
                r##"<li><a href="#b">B</a></li>"##,
                "</ol>"
            )
        );
    }

    #[test]
    fn test_inserted_after_first_h1() {
        let doc = build("<body><h1>Intro</h1><p>text</p><h2>A</h2></body>", 6);
        let body = doc.first_element("body").unwrap();
        let children = doc.children(body);
        assert!(doc.is_element(children[0], "h1"));
        assert_eq!(
            doc.element(children[1]).unwrap().attr("id"),
            Some(TOC_ID)
        );
        assert!(doc.is_element(children[2], "p"));
    }

    #[test]
    fn test_out_of_order_headings_flatten() {
        let doc = build("<h4>X</h4><h1>Title</h1><h1>Y</h1>", 6);
        assert_eq!(
            toc_html(&doc),
            concat!(
                r#"<ol id="table_of_contents">Table of contents"#,
                r##"<li><a href="#x">X</a></li>"##,
                r##"<li><a href="#y">Y</a></li>"##,
                "</ol>"
            )
        );
    }

    #[test]
    fn test_climb_back_to_root_level() {
        let doc = build("<h1>T</h1><h2>a</h2><h3>b</h3><h4>c</h4><h2>d</h2>", 6);
        assert_eq!(
            toc_html(&doc),
            concat!(
                r#"<ol id="table_of_contents">Table of contents"#,
                r##"<li><a href="#a">a</a><ol><li><a href="#b">b</a><ol>"##,
                r##"<li><a href="#c">c</a></li></ol></li></ol></li>"##,
                r##"<li><a href="#d">d</a></li>"##,
                "</ol>"
            )
        );
    }

    #[test]
    fn test_reset_after_deep_start() {
        let doc = build("<h1>T</h1><h3>a</h3><h4>b</h4><h2>c</h2><h3>d</h3>", 6);
        assert_eq!(
            toc_html(&doc),
            concat!(
                r#"<ol id="table_of_contents">Table of contents"#,
                r##"<li><a href="#a">a</a><ol><li><a href="#b">b</a></li></ol></li>"##,
                r##"<li><a href="#c">c</a><ol><li><a href="#d">d</a></li></ol></li>"##,
                "</ol>"
            )
        );
    }

    #[test]
    fn test_coverage_counts_every_qualifying_heading() {
        let html = "<h1>T</h1><h3>a</h3><h2>b</h2><h6>c</h6><h1>d</h1><h5>e</h5><h2>f</h2><h2>f</h2>";
        let doc = build(html, 6);
        assert_eq!(count_items(&doc), 7);
    }

    #[test]
    fn test_max_level_filters() {
        let doc = build("<h1>T</h1><h2>a</h2><h3>b</h3><h2>c</h2>", 2);
        assert_eq!(count_items(&doc), 2);
        assert!(!toc_html(&doc).contains("#b"));
    }

    #[test]
    fn test_max_level_above_six_clamps() {
        let doc = build("<h1>T</h1><h6>a</h6>", 200);
        assert_eq!(count_items(&doc), 1);
    }

    #[test]
    fn test_zero_max_level_rejected_before_mutation() {
        let mut doc = parse_html("<h1>T</h1><h2>a</h2>").unwrap();
        let records = add_header_anchors(&mut doc, &mut SlugRegistry::new());
        let before = doc.to_html();
        let err = add_toc(&mut doc, &records, 0).unwrap_err();
        assert!(matches!(err, TreeError::InvalidTocLevel(0)));
        assert_eq!(doc.to_html(), before);
    }

    #[test]
    fn test_no_h1_skips() {
        let html = "<h2>a</h2><h3>b</h3>";
        let doc = build(html, 6);
        assert_eq!(count_items(&doc), 0);
    }

    #[test]
    fn test_link_text_excludes_anchor_glyph() {
        let doc = build("<h1>T</h1><h2>Setup &amp; use</h2>", 6);
        assert_eq!(
            toc_html(&doc),
            r##"<ol id="table_of_contents">Table of contents<li><a href="#setup__use">Setup &amp; use</a></li></ol>"##
        );
    }
}
