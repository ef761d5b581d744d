use serde::{Deserialize, Serialize};

/// One semantic HR field the analyzer understands, independent of any
/// particular file's column naming.
///
/// Patterns are regex fragments matched case-insensitively against column
/// names; keywords are plain substrings. Both lists may mix languages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    /// Unique field key, e.g. `salary`.
    pub key: String,
    /// Regex-style match patterns. An unusable pattern is skipped by the
    /// mapper, never fatal.
    pub patterns: Vec<String>,
    /// Plain keyword hints matched as substrings.
    pub keywords: Vec<String>,
}

impl FieldDef {
    pub fn new(key: &str, patterns: &[&str], keywords: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            patterns: patterns.iter().map(ToString::to_string).collect(),
            keywords: keywords.iter().map(ToString::to_string).collect(),
        }
    }
}
