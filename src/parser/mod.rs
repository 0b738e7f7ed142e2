//! Parser for tag expressions embedded in template text
//!
//! A tag expression has the shape `{ TAG | pipe : param : param | pipe }`.
//! Whitespace around every token is insignificant.

pub mod ast;
pub mod lexer;

pub use ast::*;

use crate::primitives::split_and_trim;

/// Extract and parse every tag expression in `template`, in template order
pub fn parse(template: &str) -> Vec<MatchExpression> {
    lexer::expression_spans(template)
        .map(|span| {
            let raw = &template[span.clone()];
            parse_expression(&raw[1..raw.len() - 1], span)
        })
        .collect()
}

/// Raw tag-expression bodies (braces excluded), duplicates preserved
pub fn extract(template: &str) -> Vec<&str> {
    lexer::expression_spans(template)
        .map(|span| &template[span.start + 1..span.end - 1])
        .collect()
}

/// Parse the text between one pair of braces.
///
/// `span` is the location of the full `{...}` occurrence in the template.
pub fn parse_expression(body: &str, span: Span) -> MatchExpression {
    let mut segments = split_and_trim(body, '|').into_iter();
    let tag = segments.next().unwrap_or_default();
    let pipes = segments.map(parse_pipe).collect();

    MatchExpression {
        raw: format!("{{{}}}", body),
        span,
        reference: TagReference::classify(tag),
        pipes,
    }
}

fn parse_pipe(segment: &str) -> PipeCall {
    let mut pieces = split_and_trim(segment, ':').into_iter();
    let name = pieces.next().unwrap_or_default();
    PipeCall::new(name, pieces.map(str::to_string).collect())
}
