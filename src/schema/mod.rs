//! Declarative schema for caller-supplied data
//!
//! A schema is an ordered list of fields. Each field is either a scalar leaf
//! (`boolean`, `date`, `number`, `string`) or an `object` with its own nested
//! schema, and any field may be nullable. Schemas load from TOML or JSON:
//!
//! ```toml
//! [[fields]]
//! key = "title"
//! type = "string"
//!
//! [[fields]]
//! key = "address"
//! type = "object"
//! nullable = true
//!
//! [[fields.schema]]
//! key = "city"
//! type = "string"
//! ```

mod issue;
mod validator;

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub use issue::{IssueKind, SchemaIssue, StringValidation, ValueKind};
pub use validator::{ObjectValidator, Validator};

use crate::config::UnknownKeys;

/// Caller-supplied values, keyed by field name
pub type SuppliedData = Map<String, Value>;

/// Errors that can occur when loading a schema file
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse schema TOML: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("Failed to parse schema JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Type of a schema field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Boolean,
    Date,
    Number,
    String,
    Object { schema: Vec<SuppliedDataFieldSchema> },
}

/// One field of a supplied-data schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuppliedDataFieldSchema {
    pub key: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default)]
    pub nullable: bool,
}

/// TOML layout: a top-level `fields` array of tables
#[derive(Deserialize)]
struct TomlSchema {
    #[serde(default)]
    fields: Vec<SuppliedDataFieldSchema>,
}

impl SuppliedDataFieldSchema {
    pub fn new(key: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            kind,
            nullable: false,
        }
    }

    pub fn boolean(key: impl Into<String>) -> Self {
        Self::new(key, FieldKind::Boolean)
    }

    pub fn date(key: impl Into<String>) -> Self {
        Self::new(key, FieldKind::Date)
    }

    pub fn number(key: impl Into<String>) -> Self {
        Self::new(key, FieldKind::Number)
    }

    pub fn string(key: impl Into<String>) -> Self {
        Self::new(key, FieldKind::String)
    }

    pub fn object(key: impl Into<String>, schema: Vec<SuppliedDataFieldSchema>) -> Self {
        Self::new(key, FieldKind::Object { schema })
    }

    /// Mark this field as accepting `null`
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Load a schema from a `.json` file (bare array) or any other file as TOML
    pub fn load(path: &Path) -> Result<Vec<Self>, SchemaError> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        }
    }

    /// Parse a schema from TOML (`[[fields]]` tables)
    pub fn from_toml(content: &str) -> Result<Vec<Self>, SchemaError> {
        let parsed: TomlSchema = toml::from_str(content)?;
        Ok(parsed.fields)
    }

    /// Parse a schema from a JSON array of fields
    pub fn from_json(content: &str) -> Result<Vec<Self>, SchemaError> {
        Ok(serde_json::from_str(content)?)
    }
}

/// Validate `data` against `schema`, returning every field-level issue
pub fn validate_supplied_data(
    schema: &[SuppliedDataFieldSchema],
    data: &SuppliedData,
    unknown_keys: UnknownKeys,
) -> Result<(), Vec<SchemaIssue>> {
    ObjectValidator::compile(schema, unknown_keys).validate(data)
}
