//! Error types for document tree operations.

/// Error while parsing or transforming a document tree.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TreeError {
    /// Markup could not be parsed.
    #[error("HTML parse error")]
    Parse(#[from] quick_xml::Error),

    /// Encoding error while decoding names or text.
    #[error("encoding error")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Table of contents depth limit is out of range.
    #[error("invalid table of contents max level {0}: must be at least 1")]
    InvalidTocLevel(u8),
}
