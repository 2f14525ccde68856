//! Argument name coloring in definitions and calls.

use super::{ARGUMENT_NAME, BUILTIN_PSEUDO, NAME, OPERATOR, has_class, is_structural, set_class};
use crate::document::Document;
use crate::node::NodeId;

/// Mark parameter names in the signature that follows a `def` keyword.
///
/// Scans the element siblings after `keyword` until the `:` that closes the
/// signature at parenthesis depth zero. Names (and `None`-like builtins) are
/// marked as arguments unless they follow an `=` in the same parameter or sit
/// after the parameter list, as in a return annotation; a `*` or `**` marker
/// in front of a parameter is demoted from operator to name.
pub(super) fn fix_definition_arguments(doc: &mut Document, keyword: NodeId) {
    let mut color = true;
    let mut depth: i32 = 0;

    for span in doc.following_elements(keyword) {
        let text = doc.text_content(span);
        match text.as_str() {
            ":" if depth <= 0 => break,
            "(" => depth += 1,
            ")" => {
                depth -= 1;
                if depth <= 0 {
                    color = false;
                }
            }
            "=" => color = false,
            "," if depth == 1 => color = true,
            _ if !color || is_structural(&text) => {}
            _ if has_class(doc, span, NAME) || has_class(doc, span, BUILTIN_PSEUDO) => {
                set_class(doc, span, ARGUMENT_NAME);
            }
            "*" | "**" if has_class(doc, span, OPERATOR) => set_class(doc, span, NAME),
            _ => {}
        }
    }
}

/// Mark keyword argument names in the call that follows `callee`.
///
/// Tracks parenthesis depth from the opening `(`; each `=` operator at the
/// call's own depth marks the most recent name as an argument. Stops when the
/// call's parentheses close.
pub(super) fn fix_call_arguments(doc: &mut Document, callee: NodeId) {
    let mut depth: i32 = 0;
    let mut candidate: Option<NodeId> = None;

    for span in doc.following_elements(callee) {
        let text = doc.text_content(span);
        match text.as_str() {
            "(" => depth += 1,
            ")" => depth -= 1,
            "=" if depth == 1 && has_class(doc, span, OPERATOR) => {
                if let Some(name) = candidate.take() {
                    set_class(doc, name, ARGUMENT_NAME);
                }
            }
            _ if has_class(doc, span, NAME) && !is_structural(&text) => candidate = Some(span),
            _ => {}
        }

        if depth <= 0 {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::fix_classes;
    use crate::parser::parse_html;
    use pretty_assertions::assert_eq;

    /// Spans as the tokenizer emits them, before class fixes.
    fn span(class: &str, text: &str) -> String {
        format!(r#"<span class="{class}">{text}</span>"#)
    }

    fn fixed(spans: &[(&str, &str)]) -> Vec<(String, String)> {
        let html: String = spans.iter().map(|(c, t)| span(c, t)).collect();
        let mut doc = parse_html(&format!("<pre>{html}</pre>")).unwrap();
        fix_classes(&mut doc);
        let pre = doc.first_element("pre").unwrap();
        doc.children(pre)
            .iter()
            .map(|&id| {
                let class = doc.element(id).unwrap().attr("class").unwrap_or_default();
                (class.to_owned(), doc.text_content(id))
            })
            .collect()
    }

    fn classes_of<'a>(result: &'a [(String, String)], text: &str) -> Vec<&'a str> {
        result
            .iter()
            .filter(|(_, t)| t == text)
            .map(|(c, _)| c.as_str())
            .collect()
    }

    #[test]
    fn test_definition_arguments() {
        // def f(x, y=1, *args):
        let result = fixed(&[
            ("k", "def"),
            ("nf", "f"),
            ("p", "("),
            ("n", "x"),
            ("p", ","),
            ("n", "y"),
            ("o", "="),
            ("mi", "1"),
            ("p", ","),
            ("o", "*"),
            ("n", "args"),
            ("p", ")"),
            ("p", ":"),
            ("n", "after"),
        ]);
        assert_eq!(classes_of(&result, "def"), vec!["kd"]);
        assert_eq!(classes_of(&result, "f"), vec!["nf"]);
        assert_eq!(classes_of(&result, "x"), vec!["narg"]);
        assert_eq!(classes_of(&result, "y"), vec!["narg"]);
        assert_eq!(classes_of(&result, "1"), vec!["mi"]);
        assert_eq!(classes_of(&result, "*"), vec!["n"]);
        assert_eq!(classes_of(&result, "args"), vec!["narg"]);
        assert_eq!(classes_of(&result, "("), vec!["n"]);
        assert_eq!(classes_of(&result, ")"), vec!["n"]);
        assert_eq!(classes_of(&result, "after"), vec!["n"]);
    }

    #[test]
    fn test_definition_default_name_not_argument() {
        // def f(a=b, c=None):
        let result = fixed(&[
            ("k", "def"),
            ("nf", "f"),
            ("p", "("),
            ("n", "a"),
            ("o", "="),
            ("n", "b"),
            ("p", ","),
            ("n", "c"),
            ("o", "="),
            ("bp", "None"),
            ("p", ")"),
            ("p", ":"),
        ]);
        assert_eq!(classes_of(&result, "a"), vec!["narg"]);
        assert_eq!(classes_of(&result, "b"), vec!["n"]);
        assert_eq!(classes_of(&result, "c"), vec!["narg"]);
        assert_eq!(classes_of(&result, "None"), vec!["m"]);
    }

    #[test]
    fn test_definition_with_return_annotation() {
        // def f(x) -> int: y
        let result = fixed(&[
            ("k", "def"),
            ("nf", "f"),
            ("p", "("),
            ("n", "x"),
            ("p", ")"),
            ("o", "->"),
            ("nb", "int"),
            ("p", ":"),
            ("n", "y"),
        ]);
        assert_eq!(classes_of(&result, "x"), vec!["narg"]);
        assert_eq!(classes_of(&result, "y"), vec!["n"]);
    }

    #[test]
    fn test_return_annotation_name_not_argument() {
        // def f(x) -> Path:
        let result = fixed(&[
            ("k", "def"),
            ("nf", "f"),
            ("p", "("),
            ("n", "x"),
            ("p", ")"),
            ("o", "->"),
            ("n", "Path"),
            ("p", ":"),
        ]);
        assert_eq!(classes_of(&result, "x"), vec!["narg"]);
        assert_eq!(classes_of(&result, "Path"), vec!["n"]);
    }

    #[test]
    fn test_tuple_default_names_not_arguments() {
        // def f(x=(a, b), y=1):
        let result = fixed(&[
            ("k", "def"),
            ("nf", "f"),
            ("p", "("),
            ("n", "x"),
            ("o", "="),
            ("p", "("),
            ("n", "a"),
            ("p", ","),
            ("n", "b"),
            ("p", ")"),
            ("p", ","),
            ("n", "y"),
            ("o", "="),
            ("mi", "1"),
            ("p", ")"),
            ("p", ":"),
        ]);
        assert_eq!(classes_of(&result, "x"), vec!["narg"]);
        assert_eq!(classes_of(&result, "a"), vec!["n"]);
        assert_eq!(classes_of(&result, "b"), vec!["n"]);
        assert_eq!(classes_of(&result, "y"), vec!["narg"]);
    }

    #[test]
    fn test_class_keyword_not_scanned() {
        let result = fixed(&[("k", "class"), ("nc", "A"), ("p", "("), ("n", "B"), ("p", ")"), ("p", ":")]);
        assert_eq!(classes_of(&result, "class"), vec!["kd"]);
        assert_eq!(classes_of(&result, "B"), vec!["n"]);
    }

    #[test]
    fn test_call_keyword_arguments() {
        // print(x, sep=g(a=1), end=z)
        let result = fixed(&[
            ("nb", "print"),
            ("n", "call"),
            ("p", "("),
            ("n", "x"),
            ("p", ","),
            ("n", "sep"),
            ("o", "="),
            ("n", "g"),
            ("p", "("),
            ("n", "a"),
            ("o", "="),
            ("mi", "1"),
            ("p", ")"),
            ("p", ","),
            ("n", "end"),
            ("o", "="),
            ("n", "z"),
            ("p", ")"),
            ("n", "q"),
            ("o", "="),
            ("mi", "2"),
        ]);
        assert_eq!(classes_of(&result, "call"), vec!["n"]);
        assert_eq!(classes_of(&result, "x"), vec!["n"]);
        assert_eq!(classes_of(&result, "sep"), vec!["narg"]);
        assert_eq!(classes_of(&result, "g"), vec!["n"]);
        assert_eq!(classes_of(&result, "a"), vec!["narg"]);
        assert_eq!(classes_of(&result, "end"), vec!["narg"]);
        assert_eq!(classes_of(&result, "z"), vec!["n"]);
        assert_eq!(classes_of(&result, "q"), vec!["n"]);
    }

    #[test]
    fn test_call_comparison_not_argument() {
        // f(a == b)
        let result = fixed(&[
            ("n", "f"),
            ("p", "("),
            ("n", "a"),
            ("o", "=="),
            ("n", "b"),
            ("p", ")"),
        ]);
        assert_eq!(classes_of(&result, "a"), vec!["n"]);
    }

    #[test]
    fn test_name_not_followed_by_paren() {
        let result = fixed(&[("n", "x"), ("o", "="), ("n", "y")]);
        assert_eq!(classes_of(&result, "x"), vec!["n"]);
    }
}
