//! Context-sensitive fixes to highlighted code spans.
//!
//! The tokenizer classifies each token in isolation. These passes look at
//! neighbouring spans and adjust classes:
//!
//! 1. `def`/`class` keywords become declaration keywords (`kd`).
//! 2. `None`/`True`/`False` become plain literals (`m`).
//! 3. Structural punctuation spans become names (`n`).
//! 4. REPL transcripts lose highlighting on output lines.
//! 5. Parameter names in `def` signatures become argument names (`narg`).
//! 6. Keyword argument names in calls become argument names (`narg`).

mod arguments;
mod repl;

use crate::document::Document;
use crate::node::NodeId;

pub use repl::{CONTINUATION_PROMPT, PRIMARY_PROMPT};

/// Class of a declaration keyword such as `def`.
pub const DECLARATION_KEYWORD: &str = "kd";

/// Class of a parameter or keyword argument name.
pub const ARGUMENT_NAME: &str = "narg";

/// Class of a plain name.
pub const NAME: &str = "n";

const KEYWORD: &str = "k";
const BUILTIN_PSEUDO: &str = "bp";
const LITERAL: &str = "m";
const OPERATOR: &str = "o";
const PUNCTUATION: &str = "p";

const DECLARATION_WORDS: &[&str] = &["def", "class"];
const LITERAL_WORDS: &[&str] = &["None", "True", "False"];
const STRUCTURAL_PUNCTUATION: &[&str] = &[".", "(", ")", "[", "]", "{", "}", ";", ","];

/// Apply every class fix to the code in a document.
pub fn fix_classes(doc: &mut Document) {
    reclass_spans(doc, KEYWORD, DECLARATION_WORDS, DECLARATION_KEYWORD);
    reclass_spans(doc, BUILTIN_PSEUDO, LITERAL_WORDS, LITERAL);
    reclass_spans(doc, OPERATOR, STRUCTURAL_PUNCTUATION, NAME);
    reclass_spans(doc, PUNCTUATION, STRUCTURAL_PUNCTUATION, NAME);

    for pre in doc.find_elements(|el| el.name == "pre") {
        repl::fix_repl_classes(doc, pre);
    }

    for keyword in spans_with_class(doc, DECLARATION_KEYWORD) {
        if doc.text_content(keyword) == "def" {
            arguments::fix_definition_arguments(doc, keyword);
        }
    }

    for name in spans_with_class(doc, NAME) {
        if is_structural(&doc.text_content(name)) {
            continue;
        }
        if doc
            .next_sibling(name)
            .is_some_and(|next| doc.text_content(next) == "(")
        {
            arguments::fix_call_arguments(doc, name);
        }
    }
}

/// Reclassify `span.{class}` elements whose text is one of `words`.
fn reclass_spans(doc: &mut Document, class: &str, words: &[&str], new_class: &str) {
    let mut changed = 0;
    for span in spans_with_class(doc, class) {
        if words.contains(&doc.text_content(span).as_str()) {
            set_class(doc, span, new_class);
            changed += 1;
        }
    }
    tracing::debug!(class, new_class, changed, "reclassified spans");
}

fn spans_with_class(doc: &Document, class: &str) -> Vec<NodeId> {
    doc.find_elements(|el| el.name == "span" && el.has_class(class))
}

pub(crate) fn has_class(doc: &Document, id: NodeId, class: &str) -> bool {
    doc.element(id).is_some_and(|el| el.has_class(class))
}

pub(crate) fn set_class(doc: &mut Document, id: NodeId, class: &str) {
    if let Some(el) = doc.element_mut(id) {
        el.set_class(class);
    }
}

pub(crate) fn is_structural(text: &str) -> bool {
    STRUCTURAL_PUNCTUATION.contains(&text)
}
