//! Mutable HTML document tree and the post-processing passes run on it.
//!
//! A compiled page is parsed into a [`Document`] once and then rewritten in
//! place, in this order:
//!
//! 1. [`add_head_title`]: `<title>` from the first `h1`.
//! 2. [`add_header_anchors`]: unique `id` and self-link per heading.
//! 3. [`add_toc`]: nested table of contents after the first `h1`.
//! 4. [`fix_classes`]: context-sensitive highlighting class fixes.
//!
//! Node handles ([`NodeId`]) are stable across passes, so the heading records
//! produced by the anchor pass drive the TOC pass directly.
//!
//! # Example
//!
//! ```
//! use vmarkdown_tree::{SlugRegistry, add_header_anchors, add_toc, parse_html};
//!
//! let mut doc = parse_html("<h1>Guide</h1><h2>Install</h2>").unwrap();
//! let headings = add_header_anchors(&mut doc, &mut SlugRegistry::new());
//! add_toc(&mut doc, &headings, 6).unwrap();
//! assert!(doc.to_html().contains(r##"<li><a href="#install">Install</a></li>"##));
//! ```

mod anchors;
mod classes;
mod document;
mod entities;
mod error;
mod node;
mod parser;
mod serializer;
mod title;
mod toc;

pub use anchors::{
    ANCHOR_LINK_CLASS, ANCHOR_LINK_TEXT, HeadingRecord, SlugRegistry, add_header_anchors, slugify,
};
pub use classes::{
    ARGUMENT_NAME, CONTINUATION_PROMPT, DECLARATION_KEYWORD, NAME, PRIMARY_PROMPT, fix_classes,
};
pub use document::Document;
pub use error::TreeError;
pub use node::{ElementData, NodeData, NodeId};
pub use parser::parse_html;
pub use title::add_head_title;
pub use toc::{MAX_HEADING_LEVEL, TOC_CAPTION, TOC_ID, add_toc};
