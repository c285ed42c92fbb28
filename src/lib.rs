//! # pdfoutline
//!
//! Title and outline extraction for PDF documents.
//!
//! This library reads the text of a PDF with its positions and font sizes,
//! detects the document language, and classifies lines into a title and a
//! hierarchical outline of headings. Results serialize to JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_file, render};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let result = extract_file("document.pdf")?;
//!
//!     println!("{}", result.title);
//!     for entry in &result.outline {
//!         println!("{}{} (page {})", "  ".repeat(entry.level as usize - 1), entry.text, entry.page);
//!     }
//!
//!     let json = render::to_json(&result, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! ## Batch processing
//!
//! ```no_run
//! use std::path::Path;
//! use pdfoutline::{Pipeline, PipelineOptions};
//!
//! let pipeline = Pipeline::new(PipelineOptions::default());
//! let summary = pipeline.run(Path::new("input"), Path::new("output"))?;
//! println!("{} processed, {} failed", summary.processed(), summary.failed());
//! # Ok::<(), pdfoutline::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Font-size ranking**: heading levels follow relative type size
//! - **Language aware**: English, Spanish and Japanese text profiles
//! - **Prose filtering**: sentence segmentation rejects body text set large
//! - **Batch friendly**: one malformed PDF never aborts a run

pub mod classify;
pub mod detect;
pub mod error;
pub mod lang;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use classify::{ClassifyOptions, HeadingClassifier};
pub use detect::{has_pdf_extension, sniff_bytes, sniff_path, PdfHeader};
pub use error::{Error, Result};
pub use lang::{LanguageDetector, LanguageModel, ModelRegistry, WhatlangDetector};
pub use model::{BoundingBox, DocumentResult, OutlineEntry, TextSpan};
pub use parser::{ErrorMode, ExtractOptions, LopdfBackend, PdfBackend, SpanExtractor};
pub use pipeline::{Pipeline, PipelineEvent, PipelineOptions, RunSummary};
pub use render::JsonFormat;

use std::path::Path;

/// Extract the title, outline and language of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_file;
///
/// let result = extract_file("document.pdf").unwrap();
/// println!("{} headings", result.outline.len());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<DocumentResult> {
    Pipeline::default().process_file(path.as_ref())
}

/// Extract the title, outline and language of a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{extract_file_with_options, ClassifyOptions, PipelineOptions};
///
/// let options = PipelineOptions::new()
///     .with_classify(ClassifyOptions::new().with_max_levels(4))
///     .with_fallback_language("es");
/// let result = extract_file_with_options("documento.pdf", options).unwrap();
/// ```
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: PipelineOptions,
) -> Result<DocumentResult> {
    Pipeline::new(options).process_file(path.as_ref())
}

/// Extract the title, outline and language of an in-memory PDF.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_bytes;
///
/// let data = std::fs::read("document.pdf").unwrap();
/// let result = extract_bytes(&data).unwrap();
/// ```
pub fn extract_bytes(data: &[u8]) -> Result<DocumentResult> {
    Pipeline::default().process_bytes(data)
}

/// Extract the positioned text spans of a PDF file.
///
/// Pages whose content cannot be decoded are skipped.
pub fn extract_spans<P: AsRef<Path>>(path: P) -> Result<Vec<TextSpan>> {
    sniff_path(path.as_ref())?;
    let backend = LopdfBackend::load_file(path)?;
    SpanExtractor::new(&backend, ExtractOptions::new().lenient()).extract()
}

/// Process every PDF in `input_dir`, writing `<stem>.json` files to `output_dir`.
pub fn process_directory<P: AsRef<Path>, Q: AsRef<Path>>(
    input_dir: P,
    output_dir: Q,
) -> Result<RunSummary> {
    Pipeline::default().run(input_dir.as_ref(), output_dir.as_ref())
}
