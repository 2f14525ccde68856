//! Error types for syntax highlighting.

/// Error raised while tokenizing a code block.
///
/// These never escape [`CodeHighlighter::render`](crate::CodeHighlighter::render);
/// they are logged and turned into the plain-text fallback.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum HighlightError {
    /// No grammar is registered for the requested language.
    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    /// The grammar failed while parsing a line.
    #[error("tokenizer error")]
    Parse(#[from] syntect::parsing::ParsingError),

    /// The grammar produced an inconsistent scope stack.
    #[error("scope stack error")]
    Scope(#[from] syntect::parsing::ScopeError),
}
