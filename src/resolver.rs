//! Template resolution - substitutes validated tag expressions with values

use std::collections::HashMap;

use chrono::{Local, NaiveDate};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ResolveConfig;
use crate::parser::{PipeCall, SUPPLIED_DATA_PREFIX};
use crate::registry::{lookup_pipe, lookup_tag};
use crate::schema::SuppliedData;
use crate::validate::ValidationResult;

/// Ambient values fixed for the duration of one resolution pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionContext {
    today: NaiveDate,
}

impl ResolutionContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Capture the local date once
    pub fn now() -> Self {
        Self::new(Local::now().date_naive())
    }

    /// Use the configured date, or capture the local date if none is set
    pub fn from_config(config: &ResolveConfig) -> Self {
        config.today.map(Self::new).unwrap_or_else(Self::now)
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }
}

/// Resolve each built-in tag to its current value
pub fn resolve_tags(tags: &[String], ctx: &ResolutionContext) -> HashMap<String, String> {
    tags.iter()
        .filter_map(|name| lookup_tag(name).map(|tag| (name.clone(), tag.resolve(ctx))))
        .collect()
}

/// Render a supplied value as template text
pub fn render_supplied_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Fold a pipe chain over a starting value, left to right
pub fn apply_pipes(value: String, pipes: &[PipeCall]) -> String {
    pipes.iter().fold(value, |text, pipe| match lookup_pipe(&pipe.name) {
        Some(def) => def.apply(&text, &pipe.params),
        None => {
            warn!(pipe = %pipe.name, "unknown pipe skipped during resolution");
            text
        }
    })
}

/// Substitute every accepted match of `validation` into `template`.
///
/// Replacement is positional: each match's own `{...}` span is replaced, so
/// identical expressions and values that contain tag-like text cannot be
/// confused with one another.
pub fn resolve_matches(
    template: &str,
    validation: &ValidationResult,
    supplied_data: &SuppliedData,
    ctx: &ResolutionContext,
) -> String {
    let mut values = resolve_tags(&validation.tags, ctx);
    values.extend(supplied_data.iter().map(|(key, value)| {
        (
            format!("{}{}", SUPPLIED_DATA_PREFIX, key),
            render_supplied_value(value),
        )
    }));

    let mut output = String::with_capacity(template.len());
    let mut cursor = 0;

    for m in &validation.matches {
        let Some(before) = template.get(cursor..m.span.start) else {
            warn!(raw = %m.raw, "match does not belong to this template, skipped");
            continue;
        };
        output.push_str(before);

        let key = m.reference.lookup_key();
        let start = match values.get(&key) {
            Some(value) => value.clone(),
            None => {
                warn!(reference = %key, "no value supplied, substituting empty text");
                String::new()
            }
        };
        let resolved = apply_pipes(start, &m.pipes);
        debug!(raw = %m.raw, resolved = %resolved, "resolved match");

        output.push_str(&resolved);
        cursor = m.span.end;
    }

    output.push_str(template.get(cursor..).unwrap_or_default());
    output
}
