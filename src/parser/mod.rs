//! PDF parsing module.

mod backend;
mod extractor;
mod options;

pub use backend::{
    decode_text_simple, ContentOp, LopdfBackend, PageId, PageInfo, PdfBackend, PdfValue,
    DEFAULT_PAGE_SIZE,
};
pub use extractor::SpanExtractor;
pub use options::{ErrorMode, ExtractOptions};
