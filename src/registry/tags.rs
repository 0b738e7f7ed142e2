//! Built-in tags

use std::fmt;

use serde::Serialize;

use crate::resolver::ResolutionContext;

/// chrono format for date-typed values (`dd/MM/yyyy`)
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Type of the value a tag produces, used to decide which pipes apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Date,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::String => write!(f, "string"),
            ValueType::Date => write!(f, "date"),
        }
    }
}

/// A built-in tag
#[derive(Debug, Clone, Copy)]
pub struct TagDefinition {
    pub name: &'static str,
    pub value_type: ValueType,
    resolve: fn(&ResolutionContext) -> String,
}

impl TagDefinition {
    /// Produce the tag's current value
    pub fn resolve(&self, ctx: &ResolutionContext) -> String {
        (self.resolve)(ctx)
    }
}

/// The tag catalog
pub static TAGS: &[TagDefinition] = &[
    TagDefinition {
        name: "FIRST_NAME",
        value_type: ValueType::String,
        resolve: first_name,
    },
    TagDefinition {
        name: "LAST_NAME",
        value_type: ValueType::String,
        resolve: last_name,
    },
    TagDefinition {
        name: "CURRENT_DATE",
        value_type: ValueType::Date,
        resolve: current_date,
    },
];

fn first_name(_: &ResolutionContext) -> String {
    "John".to_string()
}

fn last_name(_: &ResolutionContext) -> String {
    "Smith".to_string()
}

fn current_date(ctx: &ResolutionContext) -> String {
    ctx.today().format(DATE_FORMAT).to_string()
}

/// Look up a tag by its exact name
pub fn lookup_tag(name: &str) -> Option<&'static TagDefinition> {
    TAGS.iter().find(|tag| tag.name == name)
}
