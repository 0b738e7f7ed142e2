//! Field-level schema violations

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Type names used in issue reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Null,
    Undefined,
}

impl ValueKind {
    /// Kind of a present (`Some`) or missing (`None`) JSON value
    pub fn of(value: Option<&Value>) -> Self {
        match value {
            None => ValueKind::Undefined,
            Some(Value::Null) => ValueKind::Null,
            Some(Value::Bool(_)) => ValueKind::Boolean,
            Some(Value::Number(_)) => ValueKind::Number,
            Some(Value::String(_)) => ValueKind::String,
            Some(Value::Array(_)) => ValueKind::Array,
            Some(Value::Object(_)) => ValueKind::Object,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Object => "object",
            ValueKind::Array => "array",
            ValueKind::Null => "null",
            ValueKind::Undefined => "undefined",
        };
        f.write_str(name)
    }
}

/// Format check applied to a string field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StringValidation {
    Datetime,
}

/// What went wrong with one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum IssueKind {
    InvalidType {
        expected: ValueKind,
        received: ValueKind,
    },
    InvalidString {
        validation: StringValidation,
    },
    UnrecognizedKeys {
        keys: Vec<String>,
    },
}

/// One schema violation, located by its field path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaIssue {
    #[serde(flatten)]
    pub kind: IssueKind,
    pub path: Vec<String>,
    pub message: String,
}

impl SchemaIssue {
    pub fn invalid_type(path: Vec<String>, expected: ValueKind, received: ValueKind) -> Self {
        let message = if received == ValueKind::Undefined {
            "Required".to_string()
        } else {
            format!("Expected {}, received {}", expected, received)
        };
        Self {
            kind: IssueKind::InvalidType { expected, received },
            path,
            message,
        }
    }

    pub fn invalid_datetime(path: Vec<String>) -> Self {
        Self {
            kind: IssueKind::InvalidString {
                validation: StringValidation::Datetime,
            },
            path,
            message: "Invalid datetime".to_string(),
        }
    }

    pub fn unrecognized_keys(path: Vec<String>, keys: Vec<String>) -> Self {
        let listed = keys
            .iter()
            .map(|k| format!("'{}'", k))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            kind: IssueKind::UnrecognizedKeys { keys },
            path,
            message: format!("Unrecognized key(s) in object: {}", listed),
        }
    }

    /// Dotted field path, or `<root>` for the top-level object
    pub fn path_string(&self) -> String {
        if self.path.is_empty() {
            "<root>".to_string()
        } else {
            self.path.join(".")
        }
    }
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path_string(), self.message)
    }
}
