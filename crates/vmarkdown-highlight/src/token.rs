//! Classified source tokens.

/// Syntactic role of a token.
///
/// Each kind maps to a short CSS class via [`TokenKind::css_class`]. The class
/// names follow the conventional highlighter vocabulary so existing
/// stylesheets apply unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Unclassified text.
    Text,
    /// Pure whitespace, emitted without markup.
    Whitespace,
    Keyword,
    KeywordDeclaration,
    KeywordNamespace,
    KeywordType,
    Name,
    NameFunction,
    NameClass,
    NameBuiltin,
    /// Builtin pseudo names and language constants (`self`, `None`, `True`).
    NameBuiltinPseudo,
    NameDecorator,
    NameTag,
    NameAttribute,
    NameConstant,
    String,
    StringDoc,
    StringEscape,
    Number,
    Operator,
    OperatorWord,
    Punctuation,
    Comment,
    CommentSingle,
    Error,
}

impl TokenKind {
    /// CSS class emitted for spans of this kind.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Text | Self::Whitespace => "",
            Self::Keyword => "k",
            Self::KeywordDeclaration => "kd",
            Self::KeywordNamespace => "kn",
            Self::KeywordType => "kt",
            Self::Name => "n",
            Self::NameFunction => "nf",
            Self::NameClass => "nc",
            Self::NameBuiltin => "nb",
            Self::NameBuiltinPseudo => "bp",
            Self::NameDecorator => "nd",
            Self::NameTag => "nt",
            Self::NameAttribute => "na",
            Self::NameConstant => "no",
            Self::String => "s",
            Self::StringDoc => "sd",
            Self::StringEscape => "se",
            Self::Number => "m",
            Self::Operator => "o",
            Self::OperatorWord => "ow",
            Self::Punctuation => "p",
            Self::Comment => "c",
            Self::CommentSingle => "c1",
            Self::Error => "err",
        }
    }
}

/// A classified slice of source code.
///
/// Tokens produced for one input are contiguous: concatenating their `text`
/// reproduces the input exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Whether the token consists only of whitespace.
    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_whitespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_whitespace() {
        assert!(Token::new(TokenKind::Text, " \n\t").is_whitespace());
        assert!(!Token::new(TokenKind::Text, "").is_whitespace());
        assert!(!Token::new(TokenKind::Name, " x ").is_whitespace());
    }

    #[test]
    fn test_css_classes() {
        assert_eq!(TokenKind::Keyword.css_class(), "k");
        assert_eq!(TokenKind::NameBuiltinPseudo.css_class(), "bp");
        assert_eq!(TokenKind::Operator.css_class(), "o");
        assert_eq!(TokenKind::Text.css_class(), "");
    }
}
