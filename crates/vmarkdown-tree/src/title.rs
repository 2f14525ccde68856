//! Page title from the first top-level heading.

use crate::document::Document;

/// Append a `<title>` to `<head>` holding the text of the first `h1`.
///
/// Skipped when the document has no `h1` or no `<head>`. Run this before
/// [`add_header_anchors`](crate::add_header_anchors) so the anchor glyph does
/// not end up in the title.
pub fn add_head_title(doc: &mut Document) {
    let Some(h1) = doc.first_element("h1") else {
        return;
    };
    let Some(head) = doc.first_element("head") else {
        tracing::debug!("document has no <head>, skipping title");
        return;
    };

    let text = doc.text_content(h1);
    let title = doc.create_element("title");
    let content = doc.create_text(text);
    doc.append(title, content);
    doc.append(head, title);
}
