//! HTML serialization of a [`Document`].

use std::fmt::{self, Write};

use crate::document::Document;
use crate::node::{NodeData, NodeId};
use crate::parser::{RAW_TEXT_ELEMENTS, is_void};

impl Document {
    /// Serialize the whole document to HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(4096);
        for &child in self.children(self.root()) {
            self.serialize_node(child, false, &mut out);
        }
        out
    }

    /// Serialize one node and its subtree.
    #[must_use]
    pub fn node_to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.serialize_node(id, false, &mut out);
        out
    }

    fn serialize_node(&self, id: NodeId, raw_text: bool, out: &mut String) {
        match self.data(id) {
            NodeData::Document => {
                for &child in self.children(id) {
                    self.serialize_node(child, false, out);
                }
            }
            NodeData::Text(text) => {
                if raw_text {
                    out.push_str(text);
                } else {
                    escape_text(text, out);
                }
            }
            NodeData::Comment(text) => {
                write!(out, "<!--{text}-->").unwrap();
            }
            NodeData::Element(el) => {
                out.push('<');
                out.push_str(&el.name);
                for (key, value) in &el.attrs {
                    write!(out, r#" {key}=""#).unwrap();
                    escape_attr(value, out);
                    out.push('"');
                }

                if is_void(&el.name) {
                    out.push_str("/>");
                    return;
                }

                out.push('>');
                let raw_children = RAW_TEXT_ELEMENTS.contains(&el.name.as_str());
                for &child in self.children(id) {
                    self.serialize_node(child, raw_children, out);
                }
                write!(out, "</{}>", el.name).unwrap();
            }
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

fn escape_attr(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_html;
    use pretty_assertions::assert_eq;

    fn roundtrip(html: &str) -> String {
        parse_html(html).unwrap().to_html()
    }

    #[test]
    fn test_serialize_simple() {
        assert_eq!(roundtrip("<p>Hello</p>\n"), "<p>Hello</p>\n");
    }

    #[test]
    fn test_serialize_attributes_in_order() {
        assert_eq!(
            roundtrip(r##"<a href="#x" class="header_anchor_link"> (¶)</a>"##),
            r##"<a href="#x" class="header_anchor_link"> (¶)</a>"##
        );
    }

    #[test]
    fn test_serialize_void_elements() {
        assert_eq!(
            roundtrip(r#"<head><meta charset="UTF-8"><meta name="viewport" content="x"/></head>"#),
            r#"<head><meta charset="UTF-8"/><meta name="viewport" content="x"/></head>"#
        );
    }

    #[test]
    fn test_serialize_escapes_text() {
        assert_eq!(
            roundtrip("<p>a &lt; b &amp; c &gt; d &quot;e&quot;</p>"),
            "<p>a &lt; b &amp; c &gt; d \"e\"</p>"
        );
    }

    #[test]
    fn test_serialize_named_entities_as_characters() {
        assert_eq!(roundtrip("<p>a &rarr; b</p>"), "<p>a \u{2192} b</p>");
    }

    #[test]
    fn test_serialize_style_raw() {
        let html = "<style>\nul > li { color: red; }\n</style>";
        assert_eq!(roundtrip(html), html);
    }

    #[test]
    fn test_serialize_attribute_escaping() {
        let mut doc = Document::new();
        let a = doc.create_element("a");
        doc.element_mut(a)
            .unwrap()
            .set_attr("title", "say \"hi\" & bye");
        doc.append(doc.root(), a);
        assert_eq!(
            doc.to_html(),
            r#"<a title="say &quot;hi&quot; &amp; bye"></a>"#
        );
    }
}
