//! Tag Template - resolves `{ TAG | pipe:param }` expressions in text
//!
//! A template is arbitrary text with embedded tag expressions. Each
//! expression names a built-in tag (or a `SUPPLIED_DATA.<key>` value) and an
//! optional chain of pipes that transform it. Every expression and the
//! supplied data are validated first; a template is only resolved when
//! nothing is wrong, otherwise all problems are reported together.
//!
//! # Example
//!
//! ```rust
//! use tag_template::resolve_template;
//!
//! let resolution = resolve_template("Hello { FIRST_NAME | uppercase }!", None, &[]);
//! assert!(resolution.is_valid);
//! assert_eq!(resolution.resolved_template.as_deref(), Some("Hello JOHN!"));
//! ```

pub mod config;
pub mod error;
pub mod parser;
pub mod primitives;
pub mod registry;
pub mod resolver;
pub mod schema;
pub mod validate;

pub use config::{ResolveConfig, UnknownKeys};
pub use error::{format_errors, PipeErrorReason, TemplateError};
pub use parser::{parse, MatchExpression, PipeCall, TagReference};
pub use registry::{lookup_pipe, lookup_tag, PipeDefinition, TagDefinition, ValueType};
pub use resolver::ResolutionContext;
pub use schema::{SchemaIssue, SuppliedData, SuppliedDataFieldSchema};
pub use validate::ValidationResult;

use serde::Serialize;
use tracing::debug;

/// Result of resolving a template
///
/// `resolved_template` is present only when `is_valid` is true, and `errors`
/// is non-empty only when it is false.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateResolution {
    pub unresolved_template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_template: Option<String>,
    /// Built-in tags referenced, unique, in first-seen order
    pub tags: Vec<String>,
    /// Supplied-data keys referenced, in template order
    pub supplied_data: Vec<String>,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<TemplateError>,
}

impl TemplateResolution {
    /// The resolved text, or every error found
    pub fn into_result(self) -> Result<String, Vec<TemplateError>> {
        match self.resolved_template {
            Some(text) if self.is_valid => Ok(text),
            _ => Err(self.errors),
        }
    }
}

/// Validate a template and its supplied data without resolving anything
pub fn validate_template(
    unresolved_template: &str,
    supplied_data: Option<&SuppliedData>,
    supplied_data_schema: &[SuppliedDataFieldSchema],
    config: &ResolveConfig,
) -> ValidationResult {
    let empty = SuppliedData::new();
    let data = supplied_data.unwrap_or(&empty);
    validate::validate_matches(
        parse(unresolved_template),
        data,
        supplied_data_schema,
        config.unknown_keys,
    )
}

/// Resolve a template with default configuration
///
/// Date-valued tags read the local clock once for the whole pass.
pub fn resolve_template(
    unresolved_template: &str,
    supplied_data: Option<&SuppliedData>,
    supplied_data_schema: &[SuppliedDataFieldSchema],
) -> TemplateResolution {
    resolve_template_with_config(
        unresolved_template,
        supplied_data,
        supplied_data_schema,
        &ResolveConfig::default(),
    )
}

/// Resolve a template with custom configuration
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use tag_template::{resolve_template_with_config, ResolveConfig};
///
/// let config = ResolveConfig::new().with_today(NaiveDate::from_ymd_opt(2023, 5, 2).unwrap());
/// let resolution = resolve_template_with_config("{ CURRENT_DATE | addDays:1 }", None, &[], &config);
/// assert_eq!(resolution.resolved_template.as_deref(), Some("03/05/2023"));
/// ```
pub fn resolve_template_with_config(
    unresolved_template: &str,
    supplied_data: Option<&SuppliedData>,
    supplied_data_schema: &[SuppliedDataFieldSchema],
    config: &ResolveConfig,
) -> TemplateResolution {
    let validation = validate_template(
        unresolved_template,
        supplied_data,
        supplied_data_schema,
        config,
    );

    if !validation.is_valid {
        debug!(errors = validation.errors.len(), "template is invalid");
        return TemplateResolution {
            unresolved_template: unresolved_template.to_string(),
            resolved_template: None,
            tags: validation.tags,
            supplied_data: validation.supplied_data,
            is_valid: false,
            errors: validation.errors,
        };
    }

    let empty = SuppliedData::new();
    let ctx = ResolutionContext::from_config(config);
    let resolved = resolver::resolve_matches(
        unresolved_template,
        &validation,
        supplied_data.unwrap_or(&empty),
        &ctx,
    );

    TemplateResolution {
        unresolved_template: unresolved_template.to_string(),
        resolved_template: Some(resolved),
        tags: validation.tags,
        supplied_data: validation.supplied_data,
        is_valid: true,
        errors: Vec::new(),
    }
}
