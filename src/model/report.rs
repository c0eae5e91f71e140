//! Output record types serialized to the result JSON.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// A section selected by the ranker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSection {
    pub document: String,
    pub page: u32,
    pub section_title: String,
    /// Cosine similarity to the query, written with four decimals
    #[serde(serialize_with = "serialize_score")]
    pub importance_score: f64,
    /// Dense 1-based rank
    pub rank: usize,
}

/// Per-section refinement entry, paired 1:1 with `extracted_sections`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub page: u32,
    pub refined_text: String,
}

impl From<&RankedSection> for SubsectionAnalysis {
    fn from(section: &RankedSection) -> Self {
        Self {
            document: section.document.clone(),
            page: section.page,
            refined_text: section.section_title.clone(),
        }
    }
}

/// Batch-level metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub persona: String,
    pub job: String,
    /// Source identifiers of the processed documents, in listing order
    pub documents: Vec<String>,
    /// ISO-8601 UTC timestamp ending in "Z"
    pub timestamp: String,
}

/// The complete result of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub metadata: RunMetadata,
    pub extracted_sections: Vec<RankedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

impl OutputRecord {
    /// Assemble a record; `subsection_analysis` mirrors `sections`.
    pub fn new(metadata: RunMetadata, sections: Vec<RankedSection>) -> Self {
        let subsection_analysis = sections.iter().map(SubsectionAnalysis::from).collect();
        Self {
            metadata,
            extracted_sections: sections,
            subsection_analysis,
        }
    }
}

/// Format a UTC instant as `YYYY-MM-DDTHH:MM:SS.ffffffZ`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Round a score to four decimals.
pub fn round_score(score: f64) -> f64 {
    (score * 10_000.0).round() / 10_000.0
}

fn serialize_score<S: Serializer>(score: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_score(*score))
}
