//! Validation of parsed tag expressions and supplied data

use tracing::debug;

use crate::config::UnknownKeys;
use crate::error::{PipeErrorReason, TemplateError};
use crate::parser::{MatchExpression, PipeCall, TagReference};
use crate::primitives::push_unique;
use crate::registry::{lookup_pipe, lookup_tag, TagDefinition};
use crate::schema::{validate_supplied_data, SuppliedData, SuppliedDataFieldSchema};

/// Outcome of validating every tag expression in a template
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// False as soon as any error has been recorded
    pub is_valid: bool,
    /// Built-in tags referenced, unique, in first-seen order
    pub tags: Vec<String>,
    /// Supplied-data keys referenced, in template order (duplicates kept)
    pub supplied_data: Vec<String>,
    pub errors: Vec<TemplateError>,
    /// Expressions whose whole pipe chain passed, in template order
    pub matches: Vec<MatchExpression>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            tags: Vec::new(),
            supplied_data: Vec::new(),
            errors: Vec::new(),
            matches: Vec::new(),
        }
    }

    fn push_error(&mut self, error: TemplateError) {
        self.is_valid = false;
        self.errors.push(error);
    }
}

/// Validate parsed expressions against the registries, then the supplied
/// data against its schema.
///
/// Every problem is recorded; nothing stops at the first error. The
/// supplied-data check always runs and its error, if any, comes last.
pub fn validate_matches(
    expressions: Vec<MatchExpression>,
    supplied_data: &SuppliedData,
    schema: &[SuppliedDataFieldSchema],
    unknown_keys: UnknownKeys,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    for expression in expressions {
        match &expression.reference {
            TagReference::SuppliedData(key) => {
                debug!(key = %key, "accepted supplied-data reference");
                result.supplied_data.push(key.clone());
                result.matches.push(expression);
            }
            TagReference::Named(name) => match lookup_tag(name) {
                None => {
                    debug!(tag = %name, "unknown tag");
                    result.push_error(TemplateError::InvalidTag {
                        tag: name.clone(),
                        matched: expression.raw.clone(),
                        span: expression.span.clone(),
                    });
                }
                Some(tag) => {
                    push_unique(&mut result.tags, tag.name.to_string());

                    let errors: Vec<TemplateError> = expression
                        .pipes
                        .iter()
                        .filter_map(|pipe| check_pipe(tag, pipe, &expression))
                        .collect();

                    if errors.is_empty() {
                        result.matches.push(expression);
                    } else {
                        for error in errors {
                            result.push_error(error);
                        }
                    }
                }
            },
        }
    }

    if let Err(issues) = validate_supplied_data(schema, supplied_data, unknown_keys) {
        debug!(count = issues.len(), "supplied data failed schema validation");
        result.push_error(TemplateError::InvalidSuppliedData { issues });
    }

    result
}

/// Check one pipe of a built-in tag's chain
fn check_pipe(
    tag: &TagDefinition,
    pipe: &PipeCall,
    expression: &MatchExpression,
) -> Option<TemplateError> {
    let reason = match lookup_pipe(&pipe.name) {
        None => PipeErrorReason::PipeNotFound,
        Some(def) if !def.allows(tag.value_type) => PipeErrorReason::NotAllowedForTagType,
        Some(def) if !def.validate_params(&pipe.params) => PipeErrorReason::InvalidParams,
        Some(_) => return None,
    };

    debug!(tag = tag.name, pipe = %pipe.name, ?reason, "rejected pipe");
    Some(TemplateError::InvalidPipe {
        reason,
        tag: tag.name.to_string(),
        pipe: pipe.name.clone(),
        matched: expression.raw.clone(),
        span: expression.span.clone(),
    })
}
