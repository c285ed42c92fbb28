//! Result types written to disk.

use serde::{Deserialize, Serialize};

/// A detected heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading text
    pub text: String,
    /// Nesting level (1 = most prominent)
    pub level: u8,
    /// Page index (0-based)
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new outline entry.
    pub fn new(text: impl Into<String>, level: u8, page: u32) -> Self {
        Self {
            text: text.into(),
            level,
            page,
        }
    }
}

/// Title, outline and language of one PDF.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Document title (empty when no text was found)
    pub title: String,
    /// Headings in reading order
    pub outline: Vec<OutlineEntry>,
    /// Language code of the document text
    pub language: String,
}

impl DocumentResult {
    /// An empty result tagged with a language code.
    pub fn empty(language: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            outline: Vec::new(),
            language: language.into(),
        }
    }

    /// Check if neither a title nor any heading was found.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.outline.is_empty()
    }

    /// Deepest level present in the outline (0 when empty).
    pub fn depth(&self) -> u8 {
        self.outline.iter().map(|e| e.level).max().unwrap_or(0)
    }
}
