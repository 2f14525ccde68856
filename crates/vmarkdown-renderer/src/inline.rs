//! Inline grammar extensions.
//!
//! Text runs are scanned left to right against an ordered rule table. At each
//! position the first rule whose pattern matches wins and writes its output;
//! the last rule consumes plain text up to the next character that could start
//! a special sequence.
//!
//! | Input             | Output                                                     |
//! |-------------------|------------------------------------------------------------|
//! | `[tag:a.b.name]`  | `<a class="tag_link" data-qualname="a.b.name">[name]</a>`  |
//! | `-->`             | `&rarr;`                                                   |
//! | `<--`             | `&larr;`                                                   |
//! | `--`              | `&mdash;`                                                  |
//!
//! Arrows precede the dash rule so `-->` is never read as `--` then `>`.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use vmarkdown_highlight::escape_html;

type Handler = fn(&Captures<'_>, &mut String);

struct InlineRule {
    name: &'static str,
    pattern: Regex,
    handler: Handler,
}

impl InlineRule {
    fn new(name: &'static str, pattern: &str, handler: Handler) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("invalid inline rule pattern"),
            handler,
        }
    }
}

static RULES: LazyLock<Vec<InlineRule>> = LazyLock::new(|| {
    vec![
        InlineRule::new("category_tag", r"^\[tag:([\w.]+)\]", category_tag),
        InlineRule::new("rarr", r"^-->", |_, out| out.push_str("&rarr;")),
        InlineRule::new("larr", r"^<--", |_, out| out.push_str("&larr;")),
        InlineRule::new("mdash", r"^--", |_, out| out.push_str("&mdash;")),
        InlineRule::new("text", r"(?s)^(?:[^<\[\-]+|.)", |caps, out| {
            out.push_str(&escape_html(&caps[0]));
        }),
    ]
});

/// Render a run of inline text, applying the extension rules.
///
/// Text not claimed by an extension rule is HTML-escaped.
pub fn render_inline(text: &str, out: &mut String) {
    let mut pos = 0;
    while pos < text.len() {
        let rest = &text[pos..];
        let matched = RULES
            .iter()
            .find_map(|rule| rule.pattern.captures(rest).map(|caps| (rule, caps)));

        let Some((rule, caps)) = matched else {
            out.push_str(&escape_html(rest));
            return;
        };

        let len = caps.get(0).map_or(0, |m| m.end());
        if len == 0 {
            tracing::debug!(rule = rule.name, "inline rule matched empty text");
            out.push_str(&escape_html(rest));
            return;
        }

        (rule.handler)(&caps, out);
        pos += len;
    }
}

fn category_tag(caps: &Captures<'_>, out: &mut String) {
    let qualname = &caps[1];
    let tagname = qualname.rsplit('.').next().unwrap_or(qualname);
    write!(
        out,
        r#"<a class="tag_link" data-qualname="{}">[{}]</a>"#,
        escape_html(qualname),
        escape_html(tagname)
    )
    .unwrap();
}
