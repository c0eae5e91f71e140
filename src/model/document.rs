//! Document-level types: headings, outlines and ranking inputs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading nesting depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Level for a numbering prefix with `groups` dot-separated integers.
    ///
    /// Returns `None` for zero groups; four or more groups clamp to H3.
    pub fn from_depth(groups: usize) -> Option<Self> {
        match groups {
            0 => None,
            1 => Some(HeadingLevel::H1),
            2 => Some(HeadingLevel::H2),
            _ => Some(HeadingLevel::H3),
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        };
        f.write_str(s)
    }
}

/// One entry of a document outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: HeadingLevel,
    /// Cleaned heading text
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

impl Heading {
    /// Create a new heading.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// A PDF reduced to its title and heading outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Source identifier (the file name for documents loaded from disk)
    pub source: String,

    /// Text of every line set in the document's largest font
    pub title: String,

    /// Headings in page order, then discovery order
    pub outline: Vec<Heading>,

    /// Number of pages read
    pub page_count: u32,
}

impl Document {
    /// Create a new document with an empty outline.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            title: String::new(),
            outline: Vec::new(),
            page_count: 0,
        }
    }

    /// Flatten the outline into ranking inputs.
    pub fn sections(&self) -> impl Iterator<Item = Section> + '_ {
        self.outline.iter().map(move |h| Section {
            document: self.source.clone(),
            page: h.page,
            text: h.text.clone(),
        })
    }
}

/// A flattened heading used as ranking input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Source identifier of the owning document
    pub document: String,
    pub page: u32,
    pub text: String,
}

/// Flatten a batch of documents into sections, document order then outline order.
pub fn flatten_sections(documents: &[Document]) -> Vec<Section> {
    documents.iter().flat_map(Document::sections).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_depth() {
        assert_eq!(HeadingLevel::from_depth(0), None);
        assert_eq!(HeadingLevel::from_depth(1), Some(HeadingLevel::H1));
        assert_eq!(HeadingLevel::from_depth(2), Some(HeadingLevel::H2));
        assert_eq!(HeadingLevel::from_depth(3), Some(HeadingLevel::H3));
        assert_eq!(HeadingLevel::from_depth(7), Some(HeadingLevel::H3));
    }

    #[test]
    fn test_flatten_preserves_batch_order() {
        let mut a = Document::new("a.pdf");
        a.outline.push(Heading::new(HeadingLevel::H1, "Intro", 1));
        a.outline.push(Heading::new(HeadingLevel::H2, "Scope", 2));
        let mut b = Document::new("b.pdf");
        b.outline.push(Heading::new(HeadingLevel::H1, "Intro", 1));

        let sections = flatten_sections(&[a, b]);
        let keys: Vec<_> = sections
            .iter()
            .map(|s| (s.document.as_str(), s.text.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![("a.pdf", "Intro"), ("a.pdf", "Scope"), ("b.pdf", "Intro")]
        );
    }
}
