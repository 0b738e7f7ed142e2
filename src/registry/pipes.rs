//! Built-in pipes
//!
//! A pipe transforms the text produced by the previous step of a chain. Each
//! definition declares which tag value types it applies to and the exact
//! shape of its parameters; both are checked before resolution, so the
//! transform functions only have to stay total, not report errors.

use chrono::{Duration, NaiveDate};
use tracing::warn;

use super::tags::{ValueType, DATE_FORMAT};
use crate::primitives::{coerce_int, is_sequence_of, ParamKind};

/// Transform function: current text and parameters to new text
pub type PipeFn = fn(&str, &[String]) -> String;

/// A built-in pipe
#[derive(Debug, Clone, Copy)]
pub struct PipeDefinition {
    pub name: &'static str,
    /// Tag value types this pipe may be applied to
    pub allowed_types: &'static [ValueType],
    /// Exact parameter shape
    pub params: &'static [ParamKind],
    resolve: PipeFn,
}

impl PipeDefinition {
    pub fn allows(&self, value_type: ValueType) -> bool {
        self.allowed_types.contains(&value_type)
    }

    pub fn validate_params(&self, params: &[String]) -> bool {
        is_sequence_of(self.params, params)
    }

    /// Apply the transform to `text`
    pub fn apply(&self, text: &str, params: &[String]) -> String {
        (self.resolve)(text, params)
    }
}

/// The pipe catalog
///
/// `lowercase` and `uppercase` are registered for `string` only, so a case
/// pipe on `CURRENT_DATE` is rejected as `NOT_ALLOWED_FOR_TAG_TYPE`.
pub static PIPES: &[PipeDefinition] = &[
    PipeDefinition {
        name: "lowercase",
        allowed_types: &[ValueType::String],
        params: &[],
        resolve: lowercase,
    },
    PipeDefinition {
        name: "uppercase",
        allowed_types: &[ValueType::String],
        params: &[],
        resolve: uppercase,
    },
    PipeDefinition {
        name: "append",
        allowed_types: &[ValueType::String, ValueType::Date],
        params: &[ParamKind::String],
        resolve: append,
    },
    PipeDefinition {
        name: "maxLength",
        allowed_types: &[ValueType::String, ValueType::Date],
        params: &[ParamKind::Int],
        resolve: max_length,
    },
    PipeDefinition {
        name: "substring",
        allowed_types: &[ValueType::String, ValueType::Date],
        params: &[ParamKind::Int, ParamKind::Int],
        resolve: substring,
    },
    PipeDefinition {
        name: "addDays",
        allowed_types: &[ValueType::Date],
        params: &[ParamKind::Int],
        resolve: add_days,
    },
];

/// Look up a pipe by its exact name
pub fn lookup_pipe(name: &str) -> Option<&'static PipeDefinition> {
    PIPES.iter().find(|pipe| pipe.name == name)
}

fn lowercase(text: &str, _: &[String]) -> String {
    text.to_lowercase()
}

fn uppercase(text: &str, _: &[String]) -> String {
    text.to_uppercase()
}

fn append(text: &str, params: &[String]) -> String {
    match params.first() {
        Some(suffix) => format!("{}{}", text, suffix),
        None => text.to_string(),
    }
}

fn max_length(text: &str, params: &[String]) -> String {
    let limit = params
        .first()
        .filter(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
        .and_then(|p| p.parse::<usize>().ok());

    match limit {
        Some(n) => text.chars().take(n).collect(),
        // not a non-negative integer literal: leave the text alone
        None => text.to_string(),
    }
}

fn substring(text: &str, params: &[String]) -> String {
    let len = text.chars().count();
    let clamp = |p: Option<&String>| {
        p.and_then(|p| coerce_int(p))
            .map(|n| n.clamp(0.0, len as f64) as usize)
            .unwrap_or(0)
    };
    let a = clamp(params.first());
    let b = match params.get(1) {
        Some(_) => clamp(params.get(1)),
        None => len,
    };
    let (start, end) = if a <= b { (a, b) } else { (b, a) };

    text.chars().skip(start).take(end - start).collect()
}

fn add_days(text: &str, params: &[String]) -> String {
    let Some(days) = params
        .first()
        .and_then(|p| coerce_int(p))
        .filter(|n| (i64::MIN as f64..i64::MAX as f64).contains(n))
        .map(|n| n as i64)
    else {
        return text.to_string();
    };

    let shifted = NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .and_then(|date| Duration::try_days(days).and_then(|d| date.checked_add_signed(d)));

    match shifted {
        Some(date) => date.format(DATE_FORMAT).to_string(),
        None => {
            warn!(value = text, days, "addDays could not shift value, leaving it unchanged");
            text.to_string()
        }
    }
}
