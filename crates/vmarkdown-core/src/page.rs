//! Page assembly: templates, style sheets, skeleton and textual cleanups.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::RenderError;

/// Placeholder each template replaces with the document body.
pub const BODY_PLACEHOLDER: &str = "{body}";

static EMPTY_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<style>\s*</style>").expect("invalid empty style regex"));

/// Highlighter renderings of the `>>>` prompt, folded into one unstyled span.
const PRIMARY_PROMPT_SPLITS: &[&str] = &[
    r#"<span class="o">&gt;</span><span class="o">&gt;</span><span class="o">&gt;</span>"#,
    r#"<span class="o">&gt;&gt;</span><span class="o">&gt;</span>"#,
];

/// Highlighter renderings of the `...` prompt, folded into one unstyled span.
const CONTINUATION_PROMPT_SPLITS: &[&str] = &[
    r#"<span class="o">.</span><span class="o">.</span><span class="o">.</span>"#,
    r#"<span class="bp">...</span>"#,
];

/// Wrap a compiled body and style sheet text in the page skeleton.
#[must_use]
pub fn page_html(css: &str, body: &str) -> String {
    format!(
        "<html>\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\"/>\n\
         \n\
         <style>\n\
         {css}\n\
         </style>\n\
         </head>\n\
         \n\
         <body>\n\
         {body}\n\
         </body>\n\
         </html>"
    )
}

/// Textual fixes applied to the page before it is parsed.
///
/// Drops an empty `<style>` block and folds REPL prompts that the highlighter
/// split into operator spans, or styled as a constant, into one unclassified
/// span.
#[must_use]
pub fn html_replacements(html: &str) -> String {
    let mut html = EMPTY_STYLE.replace_all(html, "").into_owned();
    for split in PRIMARY_PROMPT_SPLITS {
        html = html.replace(split, "<span>&gt;&gt;&gt;</span>");
    }
    for split in CONTINUATION_PROMPT_SPLITS {
        html = html.replace(split, "<span>...</span>");
    }
    html
}

/// Apply templates in order; each one's `{body}` receives the previous
/// result.
#[must_use]
pub fn apply_templates(body: &str, templates: &[String]) -> String {
    templates
        .iter()
        .fold(body.to_owned(), |body, template| {
            template.replace(BODY_PLACEHOLDER, &body)
        })
}

/// Join style sheets with blank lines between them.
#[must_use]
pub fn concat_css(sheets: &[String]) -> String {
    sheets.join("\n\n")
}

/// Read a UTF-8 text file.
pub(crate) fn read_text(path: &Path) -> Result<String, RenderError> {
    std::fs::read_to_string(path).map_err(|source| RenderError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Read several UTF-8 text files, in order.
pub(crate) fn read_all(paths: &[PathBuf]) -> Result<Vec<String>, RenderError> {
    paths.iter().map(|path| read_text(path)).collect()
}
