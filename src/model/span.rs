//! Positioned text spans produced by the extractor.

use serde::{Deserialize, Serialize};

/// Axis-aligned box in top-down page coordinates (points).
///
/// `y0` is the top edge, measured from the top of the page.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BoundingBox {
    /// Create a bounding box from its corners.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        (self.x1 - self.x0).max(0.0)
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        (self.y1 - self.y0).max(0.0)
    }
}

/// A run of same-style text on one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// Page index (0-based)
    pub page: u32,
    /// Bounding box in top-down coordinates
    pub bbox: BoundingBox,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Effective font size in points
    pub font_size: f32,
    /// Whether the font appears to be bold
    pub is_bold: bool,
    /// Whether the font appears to be italic
    pub is_italic: bool,
}

impl TextSpan {
    /// Create a span, deriving style flags from the font name.
    pub fn new(
        text: impl Into<String>,
        page: u32,
        bbox: BoundingBox,
        font_size: f32,
        font_name: impl Into<String>,
    ) -> Self {
        let font_name = font_name.into();
        let lower = font_name.to_lowercase();
        let is_bold = ["bold", "black", "heavy", "semibold", "demi"]
            .iter()
            .any(|k| lower.contains(k));
        let is_italic = lower.contains("italic") || lower.contains("oblique");

        Self {
            text: text.into(),
            page,
            bbox,
            font_size,
            font_name,
            is_bold,
            is_italic,
        }
    }

    /// Top edge (distance from the top of the page).
    pub fn top(&self) -> f32 {
        self.bbox.y0
    }

    /// Approximate baseline: the box bottom minus the descender.
    pub fn baseline(&self) -> f32 {
        self.bbox.y1 - self.font_size * DESCENT
    }

    /// Whether the span carries any visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Approximate ascender height as a fraction of the font size.
pub const ASCENT: f32 = 0.8;
/// Approximate descender depth as a fraction of the font size.
pub const DESCENT: f32 = 0.2;
