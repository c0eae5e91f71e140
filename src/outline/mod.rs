//! Outline reconstruction: text cleaning, heading classification and
//! per-document assembly.

mod builder;
mod classify;
mod clean;

pub use builder::{build_outline, load_document, load_document_file, read_lines, Outline};
pub use classify::{
    classify, is_heading_length, numbering_level, FontRole, FontTable, MAX_HEADING_WORDS,
};
pub use clean::clean_text;
