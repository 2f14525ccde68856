//! Render pipeline turning a markdown file into a standalone HTML page.
//!
//! A render runs these steps:
//!
//! 1. Wrap the markdown in each template's `{body}` placeholder, in order.
//! 2. Compile the result with [`vmarkdown_renderer::MarkdownRenderer`].
//! 3. Place it in the page skeleton with the concatenated style sheets.
//! 4. Apply textual cleanups, then parse the page into a
//!    [`vmarkdown_tree::Document`].
//! 5. Run the tree passes: title, header anchors, table of contents, class
//!    fixes and, if enabled, image embedding.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use vmarkdown_core::{RenderOptions, Renderer};
//!
//! let renderer = Renderer::new(RenderOptions::new()).unwrap();
//! let html = renderer.render_string("# Notes\n\n## Day one\n", Path::new(".")).unwrap();
//! assert!(html.contains("<title>Notes</title>"));
//! assert!(html.contains(r##"<li><a href="#day_one">Day one</a></li>"##));
//! ```

mod error;
mod images;
mod options;
mod page;
mod pipeline;

pub use error::RenderError;
pub use images::{
    DEFAULT_FETCH_TIMEOUT, ImageCache, ImageLoader, MemoryImageCache, NullImageCache,
    create_agent, embed_images,
};
pub use options::RenderOptions;
pub use page::{BODY_PLACEHOLDER, apply_templates, concat_css, html_replacements, page_html};
pub use pipeline::Renderer;
pub use vmarkdown_tree::Document;
