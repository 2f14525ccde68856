//! Token-to-markup rendering with plain-text fallback.

use std::fmt::Write;

use crate::escape::{escape_code, escape_html};
use crate::token::Token;
use crate::tokenizer::{SyntectTokenizer, Tokenize};

/// Renders fenced code blocks to HTML.
///
/// - No language: `<pre><code>` with minimal escaping.
/// - Known language: `<div class="highlight {lang}"><pre>` with one span per
///   non-whitespace token.
/// - Unknown language or tokenizer error: logged, then `<pre class="{lang}">`
///   with the same minimal escaping as the no-language case.
pub struct CodeHighlighter {
    tokenizer: Box<dyn Tokenize>,
}

impl CodeHighlighter {
    /// Create a highlighter backed by [`SyntectTokenizer`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_tokenizer(SyntectTokenizer::new())
    }

    /// Create a highlighter with a custom tokenizer.
    #[must_use]
    pub fn with_tokenizer<T: Tokenize + 'static>(tokenizer: T) -> Self {
        Self {
            tokenizer: Box::new(tokenizer),
        }
    }

    /// Render a code block. Never fails.
    #[must_use]
    pub fn render(&self, code: &str, language: Option<&str>) -> String {
        let Some(language) = language.filter(|lang| !lang.is_empty()) else {
            return plain_block(code);
        };

        let mut source = code.trim().to_owned();
        source.push('\n');

        match self.tokenizer.tokenize(&source, language) {
            Ok(tokens) => highlighted_block(&tokens, language),
            Err(err) => {
                tracing::warn!(language, error = %err, "code block highlighting failed, rendering as plain text");
                fallback_block(code, language)
            }
        }
    }
}

impl Default for CodeHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render tokens as markup spans. Whitespace tokens are emitted verbatim.
#[must_use]
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        if token.is_whitespace() {
            out.push_str(&token.text);
        } else {
            write!(
                out,
                r#"<span class="{}">{}</span>"#,
                token.kind.css_class(),
                escape_html(&token.text)
            )
            .unwrap();
        }
    }
    out
}

fn highlighted_block(tokens: &[Token], language: &str) -> String {
    format!(
        r#"<div class="highlight {}"><pre>{}</pre></div>"#,
        escape_html(&language.to_lowercase()),
        render_tokens(tokens)
    )
}

fn plain_block(code: &str) -> String {
    format!("<pre><code>{}</code></pre>\n", escape_code(code.trim()))
}

fn fallback_block(code: &str, language: &str) -> String {
    format!(
        "<pre class=\"{}\"><code>{}</code></pre>\n",
        escape_html(language),
        escape_code(code.trim())
    )
}
