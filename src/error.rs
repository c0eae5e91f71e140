//! Error types for pdf-sections.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdf-sections operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building outlines and ranking sections.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input directory is missing or cannot be listed.
    #[error("Cannot read input directory {path}: {source}")]
    InputDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

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

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// A single document in the batch failed to load.
    #[error("Failed to process {path}: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    /// The embedding model could not be loaded or failed to encode.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Ranking could not be computed.
    #[error("Ranking error: {0}")]
    Ranking(String),

    /// Error serializing the output record.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Wrap an error with the path of the document that produced it.
    pub fn in_document(self, path: impl Into<PathBuf>) -> Self {
        Error::Document {
            path: path.into(),
            source: Box::new(self),
        }
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
