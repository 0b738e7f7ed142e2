//! Validators compiled from a supplied-data schema
//!
//! Compilation mirrors the schema tree: scalar leaves become base-type
//! checks, object fields become nested object validators, and nullable fields
//! wrap their inner validator.

use chrono::DateTime;
use serde_json::{Map, Value};

use super::issue::{SchemaIssue, ValueKind};
use super::{FieldKind, SuppliedDataFieldSchema};
use crate::config::UnknownKeys;

/// Validator for a single field value
#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    Boolean,
    Number,
    String,
    /// ISO-8601 UTC datetime carried as a string
    Datetime,
    Object(ObjectValidator),
    /// Accepts `null`, otherwise defers to the inner validator
    Nullable(Box<Validator>),
}

/// Validator for an object with a fixed, ordered set of fields
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectValidator {
    fields: Vec<(String, Validator)>,
    unknown_keys: UnknownKeys,
}

impl ObjectValidator {
    /// Compile a validator from an ordered list of field schemas
    pub fn compile(schema: &[SuppliedDataFieldSchema], unknown_keys: UnknownKeys) -> Self {
        let fields = schema
            .iter()
            .map(|field| (field.key.clone(), Validator::compile(field, unknown_keys)))
            .collect();
        Self {
            fields,
            unknown_keys,
        }
    }

    /// Validate a data object, collecting every issue found
    pub fn validate(&self, data: &Map<String, Value>) -> Result<(), Vec<SchemaIssue>> {
        let mut issues = Vec::new();
        self.check_map(data, &mut Vec::new(), &mut issues);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }

    fn check_map(&self, data: &Map<String, Value>, path: &mut Vec<String>, issues: &mut Vec<SchemaIssue>) {
        for (key, validator) in &self.fields {
            path.push(key.clone());
            validator.check(data.get(key), path, issues);
            path.pop();
        }

        if self.unknown_keys == UnknownKeys::Reject {
            let extra: Vec<String> = data
                .keys()
                .filter(|key| !self.fields.iter().any(|(known, _)| known == *key))
                .cloned()
                .collect();
            if !extra.is_empty() {
                issues.push(SchemaIssue::unrecognized_keys(path.clone(), extra));
            }
        }
    }
}

impl Validator {
    fn compile(field: &SuppliedDataFieldSchema, unknown_keys: UnknownKeys) -> Self {
        let base = match &field.kind {
            FieldKind::Boolean => Validator::Boolean,
            FieldKind::Number => Validator::Number,
            FieldKind::String => Validator::String,
            FieldKind::Date => Validator::Datetime,
            FieldKind::Object { schema } => {
                Validator::Object(ObjectValidator::compile(schema, unknown_keys))
            }
        };

        if field.nullable {
            Validator::Nullable(Box::new(base))
        } else {
            base
        }
    }

    /// The type reported as `expected` when a value has the wrong type
    fn expected(&self) -> ValueKind {
        match self {
            Validator::Boolean => ValueKind::Boolean,
            Validator::Number => ValueKind::Number,
            Validator::String | Validator::Datetime => ValueKind::String,
            Validator::Object(_) => ValueKind::Object,
            Validator::Nullable(inner) => inner.expected(),
        }
    }

    fn check(&self, value: Option<&Value>, path: &mut Vec<String>, issues: &mut Vec<SchemaIssue>) {
        match (self, value) {
            (Validator::Nullable(_), Some(Value::Null)) => {}
            (Validator::Nullable(inner), _) => inner.check(value, path, issues),
            (Validator::Boolean, Some(Value::Bool(_))) => {}
            (Validator::Number, Some(Value::Number(_))) => {}
            (Validator::String, Some(Value::String(_))) => {}
            (Validator::Datetime, Some(Value::String(s))) => {
                if !is_utc_datetime(s) {
                    issues.push(SchemaIssue::invalid_datetime(path.clone()));
                }
            }
            (Validator::Object(object), Some(Value::Object(map))) => {
                object.check_map(map, path, issues)
            }
            _ => issues.push(SchemaIssue::invalid_type(
                path.clone(),
                self.expected(),
                ValueKind::of(value),
            )),
        }
    }
}

/// `YYYY-MM-DDTHH:MM:SS[.fff]Z`, no offsets other than `Z`
fn is_utc_datetime(s: &str) -> bool {
    s.len() >= 20
        && s.as_bytes()[10] == b'T'
        && s.ends_with('Z')
        && DateTime::parse_from_rfc3339(s).is_ok()
}
