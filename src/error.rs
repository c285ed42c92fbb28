//! Error types for pdfoutline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdfoutline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting outlines.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading PDFs or writing results.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting text spans from a page.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// The language of the sampled text could not be identified.
    #[error("Language detection failed: {0}")]
    Detection(String),

    /// Error serializing or parsing a result document.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The input directory does not exist or is not a directory.
    #[error("Input directory not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The output directory could not be created.
    #[error("Cannot create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Whether this error aborts a whole run rather than a single file.
    pub fn is_setup(&self) -> bool {
        matches!(self, Error::InputNotFound(_) | Error::OutputDir { .. })
    }

    /// Whether this error came from reading the PDF itself.
    pub fn is_extraction(&self) -> bool {
        matches!(
            self,
            Error::UnknownFormat
                | Error::UnsupportedVersion(_)
                | Error::PdfParse(_)
                | Error::Encrypted
                | Error::TextExtract(_)
        )
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
