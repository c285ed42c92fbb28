//! JSON rendering for outline results.

use crate::error::Result;
use crate::model::DocumentResult;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a result to JSON. Non-ASCII text is written as-is.
pub fn to_json(result: &DocumentResult, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(result)?,
        JsonFormat::Compact => serde_json::to_string(result)?,
    };
    Ok(json)
}

/// Parse a result back from JSON.
pub fn from_json(json: &str) -> Result<DocumentResult> {
    Ok(serde_json::from_str(json)?)
}
