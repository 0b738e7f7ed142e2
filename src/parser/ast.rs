//! Parsed representation of tag expressions

use std::fmt;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Reserved namespace for caller-supplied values
pub const SUPPLIED_DATA_PREFIX: &str = "SUPPLIED_DATA.";

/// What a tag expression refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagReference {
    /// A name to look up in the tag registry (may turn out to be unknown)
    Named(String),
    /// `SUPPLIED_DATA.<key>`, holding the key only
    SuppliedData(String),
}

impl TagReference {
    /// Classify a trimmed tag token.
    ///
    /// `SUPPLIED_DATA.` followed by one or more ASCII alphanumerics is a
    /// supplied-data reference; anything else is a registry name.
    pub fn classify(token: &str) -> Self {
        match token.strip_prefix(SUPPLIED_DATA_PREFIX) {
            Some(key) if !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric()) => {
                TagReference::SuppliedData(key.to_string())
            }
            _ => TagReference::Named(token.to_string()),
        }
    }

    /// Key under which the starting value is stored during resolution
    pub fn lookup_key(&self) -> String {
        match self {
            TagReference::Named(name) => name.clone(),
            TagReference::SuppliedData(key) => format!("{}{}", SUPPLIED_DATA_PREFIX, key),
        }
    }

    pub fn is_supplied_data(&self) -> bool {
        matches!(self, TagReference::SuppliedData(_))
    }
}

impl fmt::Display for TagReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lookup_key())
    }
}

/// One pipe in a chain, e.g. `substring:0:3`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipeCall {
    pub name: String,
    pub params: Vec<String>,
}

impl PipeCall {
    pub fn new(name: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

/// A single `{...}` occurrence in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchExpression {
    /// The full source text including braces, exactly as written
    pub raw: String,
    /// Location of `raw` in the template
    pub span: Span,
    /// The trimmed tag token
    pub reference: TagReference,
    /// Pipes in application order
    pub pipes: Vec<PipeCall>,
}

impl MatchExpression {
    /// The tag token as the template author wrote it (trimmed)
    pub fn tag_token(&self) -> String {
        self.reference.lookup_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_supplied_data() {
        assert_eq!(
            TagReference::classify("SUPPLIED_DATA.middleName"),
            TagReference::SuppliedData("middleName".to_string())
        );
        assert_eq!(
            TagReference::classify("SUPPLIED_DATA.title2"),
            TagReference::SuppliedData("title2".to_string())
        );
    }

    #[test]
    fn test_classify_rejects_malformed_supplied_data() {
        for token in ["SUPPLIED_DATA.", "SUPPLIED_DATA.first_name", "SUPPLIED_DATA.a.b", "supplied_data.x"] {
            assert_eq!(
                TagReference::classify(token),
                TagReference::Named(token.to_string()),
                "{token} should not be a supplied-data reference"
            );
        }
    }

    #[test]
    fn test_lookup_key_uses_namespace() {
        assert_eq!(TagReference::classify("FIRST_NAME").lookup_key(), "FIRST_NAME");
        assert_eq!(
            TagReference::classify("SUPPLIED_DATA.title").lookup_key(),
            "SUPPLIED_DATA.title"
        );
    }
}
