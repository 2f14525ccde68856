//! Token-stream syntax highlighting for fenced code blocks.
//!
//! Code is split into classified [`Token`]s by a [`Tokenize`] implementation
//! and rendered as a flat run of `<span class="...">` elements, one per token.
//! Whitespace tokens are emitted verbatim so the code layout is untouched.
//!
//! Highlighting never fails from the caller's point of view: an unknown
//! language or a tokenizer error is logged and the block is rendered as
//! escaped plain text instead.
//!
//! # Example
//!
//! ```
//! use vmarkdown_highlight::CodeHighlighter;
//!
//! let highlighter = CodeHighlighter::new();
//! let html = highlighter.render("x = 1", Some("python"));
//! assert!(html.starts_with(r#"<div class="highlight python"><pre>"#));
//!
//! let plain = highlighter.render("a < b", None);
//! assert_eq!(plain, "<pre><code>a &lt; b</code></pre>\n");
//! ```

mod error;
mod escape;
mod render;
mod scope;
mod token;
mod tokenizer;

pub use error::HighlightError;
pub use escape::{escape_code, escape_html};
pub use render::{CodeHighlighter, render_tokens};
pub use token::{Token, TokenKind};
pub use tokenizer::{SyntectTokenizer, Tokenize};
