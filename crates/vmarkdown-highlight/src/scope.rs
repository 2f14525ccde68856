//! Mapping from grammar scopes to token kinds.

use syntect::parsing::Scope;

use crate::token::TokenKind;

/// Ordered scope prefix rules. The first prefix that matches wins, so more
/// specific prefixes come before their parents.
const SCOPE_RULES: &[(&str, TokenKind)] = &[
    ("punctuation.definition.string", TokenKind::String),
    ("punctuation.definition.comment", TokenKind::Comment),
    ("comment.block.documentation", TokenKind::StringDoc),
    ("comment.line", TokenKind::CommentSingle),
    ("comment", TokenKind::Comment),
    ("string.quoted.docstring", TokenKind::StringDoc),
    ("constant.character.escape", TokenKind::StringEscape),
    ("string", TokenKind::String),
    ("constant.numeric", TokenKind::Number),
    ("constant.language", TokenKind::NameBuiltinPseudo),
    ("variable.language", TokenKind::NameBuiltinPseudo),
    ("constant.other", TokenKind::NameConstant),
    ("storage.type.function", TokenKind::Keyword),
    ("storage.type.class", TokenKind::Keyword),
    ("storage.type", TokenKind::KeywordType),
    ("storage.modifier", TokenKind::Keyword),
    ("keyword.declaration", TokenKind::Keyword),
    ("keyword.control.import", TokenKind::KeywordNamespace),
    ("keyword.operator.word", TokenKind::OperatorWord),
    ("keyword.operator.logical", TokenKind::OperatorWord),
    ("keyword.operator", TokenKind::Operator),
    ("keyword", TokenKind::Keyword),
    ("entity.name.function.decorator", TokenKind::NameDecorator),
    ("meta.annotation", TokenKind::NameDecorator),
    ("entity.name.function", TokenKind::NameFunction),
    ("entity.name.class", TokenKind::NameClass),
    ("entity.name.type", TokenKind::NameClass),
    ("entity.name.tag", TokenKind::NameTag),
    ("entity.other.attribute-name", TokenKind::NameAttribute),
    ("entity.name", TokenKind::Name),
    ("support.function", TokenKind::NameBuiltin),
    ("support.type", TokenKind::NameBuiltin),
    ("support.class", TokenKind::NameBuiltin),
    ("variable", TokenKind::Name),
    ("punctuation.accessor", TokenKind::Operator),
    ("punctuation", TokenKind::Punctuation),
    ("invalid", TokenKind::Error),
];

/// Classify a scope stack, innermost scope first.
///
/// Returns `None` when no scope carries a meaningful classification (only
/// `source.*` and `meta.*` scopes), leaving the caller to classify by lexeme.
pub(crate) fn classify(scopes: &[Scope]) -> Option<TokenKind> {
    scopes.iter().rev().find_map(|scope| {
        let name = scope.build_string();
        SCOPE_RULES
            .iter()
            .find(|(prefix, _)| has_scope_prefix(&name, prefix))
            .map(|&(_, kind)| kind)
    })
}

/// Scope prefix match on whole dotted atoms (`string` matches
/// `string.quoted` but not `stringify`).
fn has_scope_prefix(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}
