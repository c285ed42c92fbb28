//! Data model shared by extraction, classification and rendering.
//!
//! Spans are what the extractor produces from a PDF; results are what the
//! classifier produces from spans and what the pipeline writes to disk.

mod result;
mod span;

pub use result::{DocumentResult, OutlineEntry};
pub use span::{BoundingBox, TextSpan, ASCENT, DESCENT};
