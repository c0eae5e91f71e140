//! Page-level layout types: positioned characters and visual lines.

use std::fmt;

/// A single glyph with position and font information.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    /// Decoded glyph text (usually one char, ligatures may carry more)
    pub text: String,
    /// X position of the glyph's left edge
    pub x: f32,
    /// Distance from the top edge of the page to the glyph's top
    pub top: f32,
    /// Effective font size in points
    pub size: f32,
    /// Page number (1-indexed)
    pub page: u32,
}

impl Character {
    /// Create a new character.
    pub fn new(text: impl Into<String>, x: f32, top: f32, size: f32, page: u32) -> Self {
        Self {
            text: text.into(),
            x,
            top,
            size,
            page,
        }
    }
}

/// A font size rounded to two decimals.
///
/// Stored as hundredths of a point so that equality, ordering and hashing
/// are exact; two lines "have the same size" iff their `FontSize`s are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FontSize(i64);

impl FontSize {
    /// Round a size in points to two decimals.
    pub fn from_points(points: f64) -> Self {
        FontSize((points * 100.0).round() as i64)
    }

    /// Arithmetic mean of a set of sizes, rounded to two decimals.
    ///
    /// Returns `None` for an empty input.
    pub fn mean<I>(sizes: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let (sum, count) = sizes
            .into_iter()
            .fold((0.0f64, 0usize), |(sum, count), s| (sum + s as f64, count + 1));
        (count > 0).then(|| Self::from_points(sum / count as f64))
    }

    /// Size in points.
    pub fn points(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl From<f64> for FontSize {
    fn from(points: f64) -> Self {
        Self::from_points(points)
    }
}

impl From<FontSize> for f64 {
    fn from(size: FontSize) -> Self {
        size.points()
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}pt", self.points())
    }
}

/// A visual line of text reconstructed from characters sharing a bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Concatenated, trimmed text
    pub text: String,
    /// Top of the line's vertical bucket
    pub top: f32,
    /// Average font size of the line's characters
    pub font_size: FontSize,
    /// Page number (1-indexed)
    pub page: u32,
}

impl Line {
    /// Create a new line.
    pub fn new(text: impl Into<String>, top: f32, font_size: FontSize, page: u32) -> Self {
        Self {
            text: text.into(),
            top,
            font_size,
            page,
        }
    }
}
