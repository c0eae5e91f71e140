//! PDF reading: glyph extraction, font metrics and line reconstruction.

pub mod backend;
mod fonts;
mod glyphs;
mod lines;
mod options;

pub use backend::{LopdfBackend, PdfBackend};
pub use fonts::FontWidths;
pub use glyphs::extract_page_chars;
pub use lines::{group_chars_into_lines, LINE_BUCKET_HEIGHT};
pub use options::{ErrorMode, ParseOptions};
