//! Heading classification from numbering patterns and font-size ranking.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use crate::model::{FontSize, HeadingLevel};

/// Lines with more whitespace-separated tokens than this are body text.
pub const MAX_HEADING_WORDS: usize = 15;

/// Role a font size plays in a document's typographic hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontRole {
    Title,
    Heading(HeadingLevel),
}

impl FontRole {
    /// The heading level, or `None` for the title role.
    pub fn heading_level(self) -> Option<HeadingLevel> {
        match self {
            FontRole::Title => None,
            FontRole::Heading(level) => Some(level),
        }
    }
}

/// Roles assigned to the largest sizes, in descending size order.
const RANKED_ROLES: [FontRole; 4] = [
    FontRole::Title,
    FontRole::Heading(HeadingLevel::H1),
    FontRole::Heading(HeadingLevel::H2),
    FontRole::Heading(HeadingLevel::H3),
];

/// Per-document mapping from the four largest distinct font sizes to roles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontTable {
    /// Distinct sizes, largest first, at most one per role
    ranked: Vec<FontSize>,
}

impl FontTable {
    /// Build the table from every size observed in a document.
    pub fn from_sizes<I>(sizes: I) -> Self
    where
        I: IntoIterator<Item = FontSize>,
    {
        let distinct: BTreeSet<FontSize> = sizes.into_iter().collect();
        let ranked = distinct
            .into_iter()
            .rev()
            .take(RANKED_ROLES.len())
            .collect();
        Self { ranked }
    }

    /// The document's largest font size.
    pub fn largest(&self) -> Option<FontSize> {
        self.ranked.first().copied()
    }

    /// Role of a font size, if it is one of the ranked sizes.
    pub fn role_of(&self, size: FontSize) -> Option<FontRole> {
        self.ranked
            .iter()
            .position(|s| *s == size)
            .map(|i| RANKED_ROLES[i])
    }

    /// Number of sizes that received a role.
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

/// Heading level implied by a leading `N`, `N.N`, `N.N.N`... prefix.
///
/// The level counts the dot-separated integer groups of the prefix only, so
/// "3. Methodology" is H1 and "2.3.1.4 Detail" is H3.
pub fn numbering_level(text: &str) -> Option<HeadingLevel> {
    static RE_NUMBERING: OnceLock<Regex> = OnceLock::new();
    let re_numbering = RE_NUMBERING.get_or_init(|| Regex::new(r"^\d+(?:\.\d+)*").unwrap());

    let prefix = re_numbering.find(text)?;
    HeadingLevel::from_depth(prefix.as_str().split('.').count())
}

/// Classify cleaned line text set in `size`.
///
/// The numbering pattern wins; the font table is consulted only when the
/// text carries no numbering prefix.
pub fn classify(text: &str, size: FontSize, table: &FontTable) -> Option<FontRole> {
    match numbering_level(text) {
        Some(level) => Some(FontRole::Heading(level)),
        None => table.role_of(size),
    }
}

/// Whether cleaned text is short enough to be a heading.
pub fn is_heading_length(text: &str) -> bool {
    text.split_whitespace().count() <= MAX_HEADING_WORDS
}

#[cfg(test)]
mod tests {
    use super::*;
    use HeadingLevel::{H1, H2, H3};

    fn pt(points: f64) -> FontSize {
        FontSize::from_points(points)
    }

    #[test]
    fn test_numbering_depth() {
        assert_eq!(numbering_level("2"), Some(H1));
        assert_eq!(numbering_level("2.3"), Some(H2));
        assert_eq!(numbering_level("2.3.1"), Some(H3));
        assert_eq!(numbering_level("2.3.1.4"), Some(H3));
        assert_eq!(numbering_level("3. Methodology"), Some(H1));
        assert_eq!(numbering_level("Methodology 3"), None);
        assert_eq!(numbering_level(""), None);
    }

    #[test]
    fn test_font_table_ranks_distinct_sizes() {
        let table = FontTable::from_sizes([
            pt(12.0),
            pt(24.0),
            pt(12.0),
            pt(18.0),
            pt(14.0),
            pt(10.0),
        ]);
        assert_eq!(table.len(), 4);
        assert_eq!(table.largest(), Some(pt(24.0)));
        assert_eq!(table.role_of(pt(24.0)), Some(FontRole::Title));
        assert_eq!(table.role_of(pt(18.0)), Some(FontRole::Heading(H1)));
        assert_eq!(table.role_of(pt(14.0)), Some(FontRole::Heading(H2)));
        assert_eq!(table.role_of(pt(12.0)), Some(FontRole::Heading(H3)));
        assert_eq!(table.role_of(pt(10.0)), None);
    }

    #[test]
    fn test_short_table_leaves_tail_unmapped() {
        let table = FontTable::from_sizes([pt(20.0), pt(11.0)]);
        assert_eq!(table.role_of(pt(20.0)), Some(FontRole::Title));
        assert_eq!(table.role_of(pt(11.0)), Some(FontRole::Heading(H1)));
        assert_eq!(table.role_of(pt(9.0)), None);
        assert!(FontTable::from_sizes(std::iter::empty()).is_empty());
    }

    #[test]
    fn test_numbering_takes_priority_over_font() {
        let table = FontTable::from_sizes([pt(24.0), pt(16.0), pt(12.0)]);
        // 16pt alone would map to H1
        assert_eq!(
            classify("1.1.1 Background", pt(16.0), &table),
            Some(FontRole::Heading(H3))
        );
        // 24pt alone would be the title
        assert_eq!(
            classify("3. Methodology", pt(24.0), &table),
            Some(FontRole::Heading(H1))
        );
        assert_eq!(classify("Overview", pt(24.0), &table), Some(FontRole::Title));
        assert_eq!(classify("Overview", pt(8.0), &table), None);
    }

    #[test]
    fn test_heading_length_limit() {
        let fifteen = vec!["word"; 15].join(" ");
        let sixteen = vec!["word"; 16].join(" ");
        assert!(is_heading_length(&fifteen));
        assert!(!is_heading_length(&sixteen));
    }
}
