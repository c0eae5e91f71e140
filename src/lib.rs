//! # pdf-sections
//!
//! Outline reconstruction and persona-driven section ranking for PDF
//! collections.
//!
//! Each PDF in a folder is reduced to a title and a heading outline (H1 to
//! H3) recovered from text layout alone. A reader persona is inferred from
//! the document titles, and every heading is ranked against that persona's
//! task with sentence embeddings. The top sections are written as JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use pdf_sections::{process_folder, PipelineConfig, RunOutcome};
//!
//! fn main() -> pdf_sections::Result<()> {
//!     let config = PipelineConfig::new().with_top_k(5);
//!     match process_folder(Path::new("input"), Path::new("result.json"), config)? {
//!         RunOutcome::Written { path, sections } => {
//!             println!("{} sections written to {}", sections, path.display());
//!         }
//!         RunOutcome::NoSections => println!("No sections found."),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Layout-only outlines**: numbering patterns and font-size ranking
//! - **Deterministic ranking**: stable ties, reproducible hashing embedder
//! - **Sentence embeddings**: ONNX models through the `fastembed` feature
//! - **Parallel processing**: documents are parsed with Rayon

pub mod detect;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod persona;
pub mod pipeline;
pub mod rank;
pub mod render;

// Re-export commonly used types
pub use detect::{has_pdf_extension, pdf_version_from_bytes, pdf_version_from_path};
pub use error::{Error, Result};
pub use model::{
    Character, Document, FontSize, Heading, HeadingLevel, Line, OutputRecord, RankedSection,
    RunMetadata, Section, SubsectionAnalysis,
};
pub use outline::{build_outline, load_document, load_document_file, Outline};
pub use parser::{ErrorMode, LopdfBackend, ParseOptions, PdfBackend};
pub use persona::{infer_persona, Persona};
pub use pipeline::{process_folder, Pipeline, PipelineConfig, RunOutcome};
pub use rank::{load_embedder, Embedder, EmbeddingRanker, HashingEmbedder};
pub use render::JsonFormat;

use std::path::Path;

/// Build the outline of a single PDF file.
///
/// # Example
///
/// ```no_run
/// use pdf_sections::outline_file;
///
/// let doc = outline_file("report.pdf").unwrap();
/// for heading in &doc.outline {
///     println!("{} {} (p. {})", heading.level, heading.text, heading.page);
/// }
/// ```
pub fn outline_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    load_document_file(path)
}

/// Build the outline of a PDF held in memory, tagged with `source`.
pub fn outline_bytes(data: &[u8], source: &str) -> Result<Document> {
    let backend = LopdfBackend::load_bytes(data)?;
    load_document(&backend, source)
}
