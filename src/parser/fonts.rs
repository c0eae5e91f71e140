//! Glyph advance widths for simple fonts.
//!
//! A font's own `/Widths` array wins. Standard fonts usually omit it, so
//! the Helvetica and Courier families fall back to their built-in AFM
//! metrics. Anything else is left to the caller's estimate.

/// Advance widths of a simple font, in thousandths of an em.
#[derive(Debug, Clone, PartialEq)]
pub struct FontWidths {
    first_char: u32,
    widths: Vec<f32>,
    missing_width: Option<f32>,
}

impl FontWidths {
    /// Widths for codes `first_char..first_char + widths.len()`.
    pub fn new(first_char: u32, widths: Vec<f32>) -> Self {
        Self {
            first_char,
            widths,
            missing_width: None,
        }
    }

    /// Width used for codes outside the table.
    pub fn with_missing_width(mut self, width: f32) -> Self {
        self.missing_width = Some(width);
        self
    }

    /// Width of a character code, if the font defines one.
    pub fn width(&self, code: u32) -> Option<f32> {
        code.checked_sub(self.first_char)
            .and_then(|i| self.widths.get(i as usize).copied())
            .or(self.missing_width)
    }

    /// Built-in metrics for a standard font, by `/BaseFont` name.
    ///
    /// Subset prefixes (`ABCDEF+`) are ignored.
    pub fn standard(base_font: &str) -> Option<Self> {
        let name = match base_font.split_once('+') {
            Some((tag, rest)) if tag.len() == 6 => rest,
            _ => base_font,
        };

        match name {
            "Helvetica" | "Helvetica-Oblique" | "Arial" | "ArialMT" | "Arial-ItalicMT" => Some(
                Self::new(FIRST_PRINTABLE, HELVETICA_WIDTHS.iter().map(|w| *w as f32).collect()),
            ),
            n if n.starts_with("Courier") => {
                Some(Self::new(0, Vec::new()).with_missing_width(COURIER_WIDTH))
            }
            _ => None,
        }
    }
}

const FIRST_PRINTABLE: u32 = 32;

const COURIER_WIDTH: f32 = 600.0;

/// Helvetica AFM widths for codes 32..=126 (StandardEncoding).
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 222, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 222,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];
