//! Configuration handling for fileeq

use serde::{Deserialize, Serialize};

/// Output format for the CLI verdict
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Whether two different tabular formats (e.g. CSV and Parquet) may be compared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossFormat {
    /// Load both sides through their own parser and compare the tables
    #[default]
    Enabled,
    /// Files with different extensions are never equal
    Disabled,
}

/// What to do when a tabular format is recognized but its parser is not built in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingCapability {
    /// Fail with `CapabilityUnavailable`
    #[default]
    Fail,
    /// Compare the raw bytes instead
    BinaryFallback,
}

/// Options for a single comparison
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Discard column names and compare values positionally
    pub ignore_headers: bool,
    /// Cross-format comparison policy
    pub cross_format: CrossFormat,
    /// Behavior when a parser is unavailable
    pub missing_capability: MissingCapability,
    /// Treat `.tsv` files as tab-delimited tables
    pub recognize_tsv: bool,
}

impl CompareOptions {
    /// Create options with every setting at its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore header names and compare columns by position
    pub fn with_ignore_headers(mut self, ignore: bool) -> Self {
        self.ignore_headers = ignore;
        self
    }

    /// Set the cross-format policy
    pub fn with_cross_format(mut self, policy: CrossFormat) -> Self {
        self.cross_format = policy;
        self
    }

    /// Set the missing-capability policy
    pub fn with_missing_capability(mut self, policy: MissingCapability) -> Self {
        self.missing_capability = policy;
        self
    }

    /// Recognize `.tsv` as a tabular format
    pub fn with_recognize_tsv(mut self, recognize: bool) -> Self {
        self.recognize_tsv = recognize;
        self
    }
}
