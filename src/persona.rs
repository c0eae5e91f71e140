//! Batch-level persona inference from document titles.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Document;

/// Who is reading a batch of documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Persona {
    TravelPlanner,
    FinancialAnalyst,
    AcademicResearcher,
    GeneralAnalyst,
}

impl Persona {
    /// Display name written to the output metadata.
    pub fn name(self) -> &'static str {
        match self {
            Persona::TravelPlanner => "Travel Planner",
            Persona::FinancialAnalyst => "Financial Analyst",
            Persona::AcademicResearcher => "Academic Researcher",
            Persona::GeneralAnalyst => "General Analyst",
        }
    }

    /// The task this persona performs on the batch.
    pub fn job(self) -> &'static str {
        match self {
            Persona::TravelPlanner => "Create a travel itinerary",
            Persona::FinancialAnalyst => "Summarize financial report",
            Persona::AcademicResearcher => "Prepare literature review",
            Persona::GeneralAnalyst => "Summarize key points",
        }
    }

    /// Relevance query synthesized for the embedding ranker.
    pub fn query(self) -> String {
        format!("Persona: {}. Task: {}.", self.name(), self.job())
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Keyword rules, evaluated in order; the first match wins.
const RULES: &[(&[&str], Persona)] = &[
    (&["travel", "destination"], Persona::TravelPlanner),
    (&["finance", "investment"], Persona::FinancialAnalyst),
    (&["research"], Persona::AcademicResearcher),
];

/// Infer a single persona for the whole batch from its titles.
pub fn infer_persona<'a, I>(titles: I) -> Persona
where
    I: IntoIterator<Item = &'a str>,
{
    let combined = titles.into_iter().collect::<Vec<_>>().join(" ").to_lowercase();

    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| combined.contains(k)))
        .map(|(_, persona)| *persona)
        .unwrap_or(Persona::GeneralAnalyst)
}

/// Infer the persona for a batch of documents.
pub fn infer_for_documents(documents: &[Document]) -> Persona {
    infer_persona(documents.iter().map(|d| d.title.as_str()))
}
