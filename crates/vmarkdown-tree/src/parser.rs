//! HTML parsing into a [`Document`].
//!
//! Built on the XML pull reader with HTML leniency layered on top: void
//! elements never open a scope, mismatched end tags close up to the nearest
//! matching open element (or are dropped), bare ampersands are escaped, and
//! the contents of `<style>`/`<script>` are taken as raw text.

use std::borrow::Cow;
use std::sync::LazyLock;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use regex::{Captures, Regex};

use crate::document::Document;
use crate::entities::{decode_entities, decode_entity, escape_bare_ampersands};
use crate::error::TreeError;
use crate::node::{ElementData, NodeData, NodeId};

/// Elements that never have content or an end tag.
pub(crate) const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose content is raw text.
pub(crate) const RAW_TEXT_ELEMENTS: &[&str] = &["style", "script"];

static STYLE_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(<style\b[^>]*>)(.*?)(</style\s*>)").expect("invalid style regex")
});

static SCRIPT_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(<script\b[^>]*>)(.*?)(</script\s*>)").expect("invalid script regex")
});

/// Parse an HTML document or fragment.
///
/// Markup the reader cannot tokenize, such as an unterminated comment or
/// tag, is kept as text from its `<` and parsing resumes right after it.
///
/// # Errors
///
/// Returns [`TreeError`] when text or attribute bytes cannot be decoded.
pub fn parse_html(html: &str) -> Result<Document, TreeError> {
    let html = escape_raw_text(html);
    let html = escape_bare_ampersands(&html);

    let mut builder = TreeBuilder::default();
    let mut rest: &str = &html;
    while let Some(offset) = builder.feed(rest)? {
        let Some(markup) = rest.get(offset..).filter(|markup| markup.starts_with('<')) else {
            builder.text(rest.get(offset..).unwrap_or_default());
            break;
        };
        builder.text("<");
        rest = &markup[1..];
    }

    if !builder.stack.is_empty() {
        tracing::debug!(
            open = builder.stack.len(),
            "closing unterminated elements at end of input"
        );
    }

    Ok(builder.doc)
}

/// Document under construction and its open elements.
#[derive(Default)]
struct TreeBuilder {
    doc: Document,
    stack: Vec<(NodeId, String)>,
}

impl TreeBuilder {
    fn parent(&self) -> NodeId {
        self.stack.last().map_or(self.doc.root(), |(id, _)| *id)
    }

    fn text(&mut self, text: &str) {
        let parent = self.parent();
        append_text(&mut self.doc, parent, text);
    }

    /// Read `html` to the end. Returns the byte offset of the markup that
    /// stopped the reader, if any.
    fn feed(&mut self, html: &str) -> Result<Option<usize>, TreeError> {
        let mut reader = Reader::from_str(html);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = false;
        config.allow_unmatched_ends = true;

        let mut buf = Vec::new();
        loop {
            let parent = self.parent();
            let event = match reader.read_event_into(&mut buf) {
                Ok(event) => event,
                Err(quick_xml::Error::Syntax(err)) => {
                    let offset = usize::try_from(reader.error_position()).unwrap_or(html.len());
                    tracing::debug!(error = %err, offset, "keeping malformed markup as text");
                    return Ok(Some(offset));
                }
                Err(err) => return Err(err.into()),
            };

            match event {
                Event::Start(e) => {
                    let element = decode_element(&reader, &e)?;
                    let name = element.name.clone();
                    let id = self.doc.create(NodeData::Element(element));
                    self.doc.append(parent, id);
                    if !is_void(&name) {
                        self.stack.push((id, name));
                    }
                }
                Event::Empty(e) => {
                    let element = decode_element(&reader, &e)?;
                    let id = self.doc.create(NodeData::Element(element));
                    self.doc.append(parent, id);
                }
                Event::End(e) => {
                    let name = decode_name(&reader, e.name().as_ref())?;
                    if is_void(&name) {
                        // `</br>` and friends
                    } else if let Some(index) =
                        self.stack.iter().rposition(|(_, open)| *open == name)
                    {
                        self.stack.truncate(index);
                    } else {
                        tracing::debug!(tag = %name, "dropping unmatched end tag");
                    }
                }
                Event::Text(e) => {
                    let text = reader.decoder().decode(&e)?;
                    append_text(&mut self.doc, parent, &text);
                }
                Event::GeneralRef(e) => {
                    let entity = reader.decoder().decode(&e)?;
                    append_text(&mut self.doc, parent, &decode_entity(&entity));
                }
                Event::CData(e) => {
                    append_text(&mut self.doc, parent, &String::from_utf8_lossy(&e));
                }
                Event::Comment(e) => {
                    let text = reader.decoder().decode(&e)?.into_owned();
                    let id = self.doc.create(NodeData::Comment(text));
                    self.doc.append(parent, id);
                }
                Event::Eof => return Ok(None),
                Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            }
            buf.clear();
        }
    }
}

/// Whether the tag name is an HTML void element.
pub(crate) fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Append text, merging with a preceding text node.
fn append_text(doc: &mut Document, parent: NodeId, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(&last) = doc.children(parent).last()
        && let Some(existing) = doc.text_mut(last)
    {
        existing.push_str(text);
        return;
    }
    let id = doc.create_text(text);
    doc.append(parent, id);
}

fn decode_element<R>(reader: &Reader<R>, e: &BytesStart<'_>) -> Result<ElementData, TreeError> {
    let mut element = ElementData::new(decode_name(reader, e.name().as_ref())?);
    for attr in e.html_attributes().flatten() {
        let key = decode_name(reader, attr.key.as_ref())?;
        let raw = reader.decoder().decode(&attr.value)?;
        element.attrs.push((key, decode_entities(&raw).into_owned()));
    }
    Ok(element)
}

fn decode_name<R>(reader: &Reader<R>, name: &[u8]) -> Result<String, TreeError> {
    Ok(reader.decoder().decode(name)?.to_ascii_lowercase())
}

/// Escape markup characters inside raw text elements so the XML reader sees
/// plain text. The serializer writes these elements back unescaped.
fn escape_raw_text(html: &str) -> Cow<'_, str> {
    let escape = |caps: &Captures<'_>| {
        let content = caps[2]
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        format!("{}{content}{}", &caps[1], &caps[3])
    };
    match STYLE_CONTENT.replace_all(html, escape) {
        Cow::Borrowed(html) => SCRIPT_CONTENT.replace_all(html, escape),
        Cow::Owned(html) => Cow::Owned(SCRIPT_CONTENT.replace_all(&html, escape).into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn only_child(doc: &Document, id: NodeId) -> NodeId {
        assert_eq!(doc.children(id).len(), 1);
        doc.children(id)[0]
    }

    #[test]
    fn test_unterminated_comment_kept_as_text() {
        let doc = parse_html("<p>a</p><!-- open\n<p>b</p>").unwrap();
        assert_eq!(doc.to_html(), "<p>a</p>&lt;!-- open\n<p>b</p>");
    }

    #[test]
    fn test_unterminated_tag_kept_as_text() {
        let doc = parse_html("<p>a <b").unwrap();
        assert_eq!(doc.to_html(), "<p>a &lt;b</p>");
    }

    #[test]
    fn test_malformed_markup_inside_body() {
        let doc = parse_html("<body><h1>T</h1><!-- note\n\ntext\n</body>").unwrap();
        let body = doc.first_element("body").unwrap();
        assert_eq!(doc.text_content(body), "T<!-- note\n\ntext\n");
        assert_eq!(
            doc.to_html(),
            "<body><h1>T</h1>&lt;!-- note\n\ntext\n</body>"
        );
    }

    #[test]
    fn test_parse_simple_element() {
        let doc = parse_html("<p>Hello</p>").unwrap();
        let p = only_child(&doc, doc.root());
        assert!(doc.is_element(p, "p"));
        assert_eq!(doc.text_content(p), "Hello");
    }

    #[test]
    fn test_parse_nested_elements() {
        let doc = parse_html("<p><strong>Bold</strong> text</p>").unwrap();
        let p = only_child(&doc, doc.root());
        let children = doc.children(p);
        assert_eq!(children.len(), 2);
        assert!(doc.is_element(children[0], "strong"));
        assert_eq!(doc.data(children[1]), &NodeData::Text(" text".to_owned()));
    }

    #[test]
    fn test_attributes() {
        let doc = parse_html(r#"<span class="n" data-x='1'>x</span>"#).unwrap();
        let span = only_child(&doc, doc.root());
        let el = doc.element(span).unwrap();
        assert_eq!(el.attr("class"), Some("n"));
        assert_eq!(el.attr("data-x"), Some("1"));
    }

    #[test]
    fn test_void_elements_do_not_nest() {
        let doc = parse_html(r#"<head><meta charset="UTF-8"><title>t</title></head>"#).unwrap();
        let head = only_child(&doc, doc.root());
        let children = doc.children(head);
        assert_eq!(children.len(), 2);
        assert!(doc.is_element(children[0], "meta"));
        assert!(doc.is_element(children[1], "title"));
    }

    #[test]
    fn test_valueless_attribute() {
        let doc = parse_html(r#"<input type="checkbox" checked disabled>"#).unwrap();
        let input = only_child(&doc, doc.root());
        let el = doc.element(input).unwrap();
        assert_eq!(el.attr("checked"), Some(""));
        assert_eq!(el.attr("type"), Some("checkbox"));
    }

    #[test]
    fn test_entities_are_decoded() {
        let doc = parse_html("<p>a &rarr; b &amp; c &#182; &lt;d&gt;</p>").unwrap();
        assert_eq!(doc.text_content(doc.root()), "a \u{2192} b & c \u{00b6} <d>");
    }

    #[test]
    fn test_bare_ampersand() {
        let doc = parse_html("<p>fish & chips</p>").unwrap();
        assert_eq!(doc.text_content(doc.root()), "fish & chips");
    }

    #[test]
    fn test_style_content_is_raw() {
        let doc = parse_html("<style>a > b { content: \"&\"; }</style>").unwrap();
        assert_eq!(doc.text_content(doc.root()), "a > b { content: \"&\"; }");
    }

    #[test]
    fn test_mismatched_end_tag_closes_to_match() {
        let doc = parse_html("<div><p>one</div><p>two</p>").unwrap();
        let top = doc.children(doc.root());
        assert_eq!(top.len(), 2);
        assert!(doc.is_element(top[0], "div"));
        assert!(doc.is_element(top[1], "p"));
    }

    #[test]
    fn test_comment_kept() {
        let doc = parse_html("<p><!-- note -->x</p>").unwrap();
        let p = only_child(&doc, doc.root());
        assert_eq!(doc.data(doc.children(p)[0]), &NodeData::Comment(" note ".to_owned()));
        assert_eq!(doc.text_content(p), "x");
    }
}
