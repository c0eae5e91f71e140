//! Data model shared by the outline and ranking stages.
//!
//! Layout types (`Character`, `Line`) live only while a document is being
//! read; `Document` and its outline are what the rest of the pipeline sees.

mod document;
mod page;
mod report;

pub use document::{flatten_sections, Document, Heading, HeadingLevel, Section};
pub use page::{Character, FontSize, Line};
pub use report::{
    format_timestamp, round_score, OutputRecord, RankedSection, RunMetadata, SubsectionAnalysis,
};
