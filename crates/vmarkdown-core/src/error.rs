//! Error types for the render pipeline.

use std::path::PathBuf;

use vmarkdown_tree::TreeError;

/// Error that aborts rendering a document.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// A markdown, template or style sheet file could not be read.
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Render options are out of range.
    #[error("invalid render options: {0}")]
    InvalidOptions(String),

    /// Document tree could not be built or transformed.
    #[error("document tree error")]
    Tree(#[from] TreeError),

    /// Remote image request failed (network error, timeout, etc).
    #[error("failed to fetch image {src}")]
    ImageFetch {
        src: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// Remote image server returned an error status.
    #[error("failed to fetch image {src}: HTTP {status}")]
    ImageStatus { src: String, status: u16 },

    /// Local image file could not be read.
    #[error("failed to read image {src}")]
    ImageRead {
        src: String,
        #[source]
        source: std::io::Error,
    },
}
