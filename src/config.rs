//! Configuration for template resolution

use chrono::NaiveDate;

/// How keys in supplied data that the schema does not declare are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownKeys {
    /// The schema is exact: undeclared keys are reported as issues
    #[default]
    Reject,
    /// Undeclared keys are accepted and left alone
    Ignore,
}

/// Configuration options for a resolution pass
#[derive(Debug, Clone)]
pub struct ResolveConfig {
    /// Date used by date-valued tags; `None` reads the local clock once per pass
    pub today: Option<NaiveDate>,

    /// Treatment of supplied-data keys missing from the schema
    pub unknown_keys: UnknownKeys,

    /// Name shown in rendered diagnostics
    pub filename: String,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            today: None,
            unknown_keys: UnknownKeys::Reject,
            filename: "<template>".to_string(),
        }
    }
}

impl ResolveConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Freeze the date seen by date-valued tags
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Set how undeclared supplied-data keys are treated
    pub fn with_unknown_keys(mut self, unknown_keys: UnknownKeys) -> Self {
        self.unknown_keys = unknown_keys;
        self
    }

    /// Set the name shown in rendered diagnostics
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }
}
