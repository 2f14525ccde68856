//! Markdown to HTML fragment compiler.
//!
//! [`MarkdownRenderer`] turns markdown into an HTML fragment with two
//! additions over standard markdown:
//!
//! - inline grammar extensions for arrows, em dashes and `[tag:...]`
//!   category links (see [`render_inline`]);
//! - fenced code blocks rendered through
//!   [`vmarkdown_highlight::CodeHighlighter`].
//!
//! Headings carry no identifiers here. Anchors, the table of contents and
//! code class fixes operate on the parsed document afterwards.
//!
//! # Example
//!
//! ```
//! use vmarkdown_renderer::MarkdownRenderer;
//!
//! let html = MarkdownRenderer::new().render_markdown("# Hello\n\nA --> B");
//! assert_eq!(html, "<h1>Hello</h1>\n<p>A &rarr; B</p>\n");
//! ```

mod inline;
mod renderer;
mod state;
mod util;

pub use inline::render_inline;
pub use renderer::MarkdownRenderer;
