//! Classifier thresholds.

/// Thresholds that steer heading classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifyOptions {
    /// Number of font-size ranks that may carry headings
    pub max_heading_levels: u8,
    /// Sizes closer than this (points) count as the same size
    pub size_tolerance: f32,
    /// Maximum words in a heading
    pub max_words: usize,
    /// Maximum characters in a heading
    pub max_chars: usize,
    /// Baseline tolerance for line grouping, as a fraction of font size
    pub baseline_tolerance: f32,
    /// Horizontal gap, in ems, that starts a new line on the same baseline
    pub column_gap: f32,
    /// Uppercase share above which a line reads as a label
    pub uppercase_ratio: f32,
    /// Require label-like casing, numbering or bold type
    pub require_label_casing: bool,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            max_heading_levels: 3,
            size_tolerance: 0.5,
            max_words: 14,
            max_chars: 80,
            baseline_tolerance: 0.3,
            column_gap: 3.0,
            uppercase_ratio: 0.5,
            require_label_casing: true,
        }
    }
}

impl ClassifyOptions {
    /// Create classify options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of heading levels (at least 1).
    pub fn with_max_levels(mut self, levels: u8) -> Self {
        self.max_heading_levels = levels.max(1);
        self
    }

    /// Set the font-size tolerance.
    pub fn with_size_tolerance(mut self, tolerance: f32) -> Self {
        self.size_tolerance = tolerance.max(0.0);
        self
    }

    /// Set the gap (in ems) that separates columns sharing a baseline.
    pub fn with_column_gap(mut self, ems: f32) -> Self {
        self.column_gap = ems.max(0.0);
        self
    }

    /// Set heading length limits.
    pub fn with_length_limits(mut self, max_words: usize, max_chars: usize) -> Self {
        self.max_words = max_words;
        self.max_chars = max_chars;
        self
    }

    /// Accept any short non-sentence line of a heading size.
    pub fn without_label_casing(mut self) -> Self {
        self.require_label_casing = false;
        self
    }
}
