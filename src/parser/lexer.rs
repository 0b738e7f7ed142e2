//! Template scanner using logos
//!
//! Splits a template into literal text and `{...}` tag expressions. An
//! expression runs from a `{` to the nearest following `}` on the same line.
//! Nesting is not supported: `{{a}}` yields the single expression `{{a}`.

use logos::Logos;

pub use super::ast::Span;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `{` ... `}` with no `}` or newline in between
    #[regex(r"\{[^}\n]*\}")]
    Expression,

    /// A `{` that is never closed on its line
    #[token("{")]
    StrayOpen,

    /// Everything else
    #[regex(r"[^{]+")]
    Text,
}

/// Lex input string into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}

/// Spans of every tag expression, braces included, in template order
pub fn expression_spans(input: &str) -> impl Iterator<Item = Span> + '_ {
    lex(input).filter_map(|(tok, span)| (tok == Token::Expression).then_some(span))
}
