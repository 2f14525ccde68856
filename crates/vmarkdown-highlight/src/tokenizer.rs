//! Source tokenizers.

use std::sync::LazyLock;

use syntect::easy::ScopeRangeIterator;
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::error::HighlightError;
use crate::scope::classify;
use crate::token::{Token, TokenKind};

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// Splits source code into classified tokens.
///
/// Implementations must be lossless: the concatenated token texts equal
/// `code` for every input they accept.
pub trait Tokenize: Send + Sync {
    /// Tokenize `code` written in `language`.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError::UnknownLanguage`] when `language` is not
    /// supported, or a grammar error if tokenizing fails part way.
    fn tokenize(&self, code: &str, language: &str) -> Result<Vec<Token>, HighlightError>;
}

/// Tokenizer backed by the bundled Sublime Text grammars.
#[derive(Clone, Copy)]
pub struct SyntectTokenizer {
    syntaxes: &'static SyntaxSet,
}

impl SyntectTokenizer {
    /// Create a tokenizer using the default grammar set.
    ///
    /// The grammar set is loaded once per process on first use.
    #[must_use]
    pub fn new() -> Self {
        Self {
            syntaxes: &SYNTAX_SET,
        }
    }

    /// Whether a grammar exists for `language` (name or file extension,
    /// case-insensitive).
    #[must_use]
    pub fn supports(&self, language: &str) -> bool {
        self.find_syntax(language).is_some()
    }

    fn find_syntax(&self, language: &str) -> Option<&'static SyntaxReference> {
        self.syntaxes
            .find_syntax_by_token(&language.to_lowercase())
    }
}

impl Default for SyntectTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenize for SyntectTokenizer {
    fn tokenize(&self, code: &str, language: &str) -> Result<Vec<Token>, HighlightError> {
        let syntax = self
            .find_syntax(language)
            .ok_or_else(|| HighlightError::UnknownLanguage(language.to_owned()))?;

        let mut state = ParseState::new(syntax);
        let mut stack = ScopeStack::new();
        let mut tokens = Vec::new();

        for line in LinesWithEndings::from(code) {
            let ops = state.parse_line(line, self.syntaxes)?;
            for (range, op) in ScopeRangeIterator::new(&ops, line) {
                stack.apply(op)?;
                if range.is_empty() {
                    continue;
                }
                push_region(&mut tokens, &line[range], classify(stack.as_slice()));
            }
        }

        Ok(tokens)
    }
}

/// Append the tokens for one scope region.
///
/// Surrounding whitespace always becomes separate whitespace tokens. A
/// classified region keeps its core as a single token; an unclassified one is
/// split into names, numbers, whitespace and other runs.
fn push_region(tokens: &mut Vec<Token>, text: &str, kind: Option<TokenKind>) {
    let core = text.trim();
    if core.is_empty() {
        tokens.push(Token::new(TokenKind::Whitespace, text));
        return;
    }

    let start = text.len() - text.trim_start().len();
    let end = start + core.len();
    if start > 0 {
        tokens.push(Token::new(TokenKind::Whitespace, &text[..start]));
    }

    match kind {
        Some(kind) => tokens.push(Token::new(kind, core)),
        None => push_unclassified(tokens, core),
    }

    if end < text.len() {
        tokens.push(Token::new(TokenKind::Whitespace, &text[end..]));
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum RunClass {
    Word,
    Space,
    Other,
}

fn run_class(c: char) -> RunClass {
    if c.is_alphanumeric() || c == '_' {
        RunClass::Word
    } else if c.is_whitespace() {
        RunClass::Space
    } else {
        RunClass::Other
    }
}

fn push_unclassified(tokens: &mut Vec<Token>, text: &str) {
    let mut run_start = 0;
    let mut current: Option<RunClass> = None;

    for (i, c) in text.char_indices() {
        let class = run_class(c);
        if current.is_some_and(|cur| cur != class) {
            tokens.push(unclassified_token(&text[run_start..i]));
            run_start = i;
        }
        current = Some(class);
    }
    if run_start < text.len() {
        tokens.push(unclassified_token(&text[run_start..]));
    }
}

fn unclassified_token(run: &str) -> Token {
    let kind = match run.chars().next().map(run_class) {
        Some(RunClass::Space) => TokenKind::Whitespace,
        Some(RunClass::Word) if run.chars().all(|c| c.is_ascii_digit()) => TokenKind::Number,
        Some(RunClass::Word) => TokenKind::Name,
        _ => TokenKind::Text,
    };
    Token::new(kind, run)
}
