//! Extraction options and configuration.

/// Options for extracting spans from PDF documents.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Stop after this many pages (None = all pages)
    pub max_pages: Option<u32>,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip pages whose content cannot be read).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Only read the first `pages` pages.
    pub fn with_max_pages(mut self, pages: u32) -> Self {
        self.max_pages = Some(pages);
        self
    }

    /// Whether the 1-based page number is within the page limit.
    pub fn includes(&self, page_num: u32) -> bool {
        self.max_pages.map_or(true, |max| page_num <= max)
    }
}

/// Error handling mode during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any page error
    #[default]
    Strict,
    /// Skip unreadable pages and continue
    Lenient,
}
