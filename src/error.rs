//! Error types for template validation

use ariadne::{Color, Label, Report, ReportKind, Source};
use serde::Serialize;
use thiserror::Error;

use crate::parser::Span;
use crate::schema::SchemaIssue;

/// Why a pipe was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipeErrorReason {
    PipeNotFound,
    NotAllowedForTagType,
    InvalidParams,
}

impl PipeErrorReason {
    fn describe(self) -> &'static str {
        match self {
            PipeErrorReason::PipeNotFound => "pipe not found",
            PipeErrorReason::NotAllowedForTagType => "pipe not allowed for tag type",
            PipeErrorReason::InvalidParams => "invalid pipe parameters",
        }
    }
}

/// A problem found while validating a template.
///
/// These are collected, never thrown: a template with several problems
/// reports all of them together.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateError {
    /// Tag name is not in the tag registry
    #[error("invalid tag '{tag}' in {matched}")]
    InvalidTag {
        tag: String,
        #[serde(rename = "match")]
        matched: String,
        #[serde(skip)]
        span: Span,
    },

    /// A pipe in the chain is unknown, inapplicable or badly parameterised
    #[error("invalid pipe '{pipe}' on tag '{tag}' ({}) in {matched}", .reason.describe())]
    InvalidPipe {
        reason: PipeErrorReason,
        tag: String,
        pipe: String,
        #[serde(rename = "match")]
        matched: String,
        #[serde(skip)]
        span: Span,
    },

    /// Supplied data does not match its schema
    #[error("invalid supplied data: {}", format_issues(.issues))]
    InvalidSuppliedData { issues: Vec<SchemaIssue> },
}

fn format_issues(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl TemplateError {
    /// Location of the offending `{...}` occurrence, if any
    pub fn span(&self) -> Option<&Span> {
        match self {
            TemplateError::InvalidTag { span, .. } | TemplateError::InvalidPipe { span, .. } => {
                Some(span)
            }
            TemplateError::InvalidSuppliedData { .. } => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        let report = match self {
            TemplateError::InvalidTag { tag, span, .. } => {
                Report::build(ReportKind::Error, filename, span.start)
                    .with_message(format!("Unknown tag '{}'", tag))
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message("not a built-in tag or SUPPLIED_DATA reference")
                            .with_color(Color::Red),
                    )
                    .finish()
            }
            TemplateError::InvalidPipe {
                reason,
                tag,
                pipe,
                span,
                ..
            } => Report::build(ReportKind::Error, filename, span.start)
                .with_message(format!("Invalid pipe '{}' on tag '{}'", pipe, tag))
                .with_label(
                    Label::new((filename, span.clone()))
                        .with_message(reason.describe())
                        .with_color(Color::Red),
                )
                .finish(),
            TemplateError::InvalidSuppliedData { issues } => {
                let note = issues
                    .iter()
                    .map(|i| i.to_string())
                    .collect::<Vec<_>>()
                    .join("\n");
                Report::build(ReportKind::Error, filename, 0)
                    .with_message("Supplied data does not match its schema")
                    .with_note(note)
                    .finish()
            }
        };

        if report
            .write((filename, Source::from(source)), &mut buf)
            .is_err()
        {
            return self.to_string();
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Render every error against `source`, one report after another
pub fn format_errors(errors: &[TemplateError], source: &str, filename: &str) -> String {
    errors
        .iter()
        .map(|e| e.format(source, filename))
        .collect::<Vec<_>>()
        .join("\n")
}
