//! REPL transcript detection.

use crate::document::Document;
use crate::node::NodeId;

/// Input prompt that marks a code block as a REPL transcript.
pub const PRIMARY_PROMPT: &str = ">>>";

/// Prompt of a continued input line.
pub const CONTINUATION_PROMPT: &str = "...";

/// Strip highlighting from the output lines of a REPL transcript.
///
/// A block is a transcript when its first non-empty child reads `>>>`. Each
/// line is then an input line if it starts with a prompt, and an output line
/// otherwise; spans on output lines lose their `class`.
pub(crate) fn fix_repl_classes(doc: &mut Document, pre: NodeId) {
    remove_leading_empty_nodes(doc, pre);

    let children = doc.children(pre).to_vec();
    let Some(&first) = children.first() else {
        return;
    };
    if doc.text_content(first) != PRIMARY_PROMPT {
        return;
    }

    let mut stripped = 0;
    // None until the first content of the current line is seen.
    let mut strip: Option<bool> = None;
    for child in children {
        let text = doc.text_content(child);
        let mut lines = text.split('\n');
        let first_line = lines.next().unwrap_or_default();

        if strip.is_none() {
            strip = line_start_decision(first_line);
        }

        if strip == Some(true)
            && let Some(el) = doc.element_mut(child)
            && el.remove_attr("class").is_some()
        {
            stripped += 1;
        }

        if let Some(last_line) = lines.last() {
            strip = line_start_decision(last_line);
        }
    }

    tracing::debug!(stripped, "stripped REPL output highlighting");
}

/// Whether a line beginning with `content` is output. `None` for blank
/// content, which leaves the decision to the next node.
fn line_start_decision(content: &str) -> Option<bool> {
    let content = content.trim();
    if content.is_empty() {
        None
    } else {
        Some(!is_prompt(content))
    }
}

fn is_prompt(content: &str) -> bool {
    content == PRIMARY_PROMPT || content == CONTINUATION_PROMPT
}

fn remove_leading_empty_nodes(doc: &mut Document, id: NodeId) {
    while let Some(&first) = doc.children(id).first() {
        if !doc.text_content(first).is_empty() {
            break;
        }
        doc.detach(first);
    }
}
