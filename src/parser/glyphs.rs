//! Glyph extraction: interprets page content streams into positioned characters.
//!
//! Text-object operators drive the text matrix; `cm`, `q` and `Q` maintain
//! the current transformation matrix, so positions land in default user
//! space even when a producer flips or scales the page.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::Character;

use super::backend::{get_number_from_value, ContentOp, PageId, PdfBackend, PdfValue};
use super::fonts::FontWidths;

/// Glyph advance, as a fraction of the font size, for fonts without metrics.
const GLYPH_ADVANCE_EM: f32 = 0.5;

/// Approximate ascender height as a fraction of the font size.
const ASCENT_EM: f32 = 0.8;

/// Affine matrix `[a b c d e f]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32, // X translation
    f: f32, // Y translation
}

impl Default for Matrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl Matrix {
    /// Read six numeric operands, as given to `cm` and `Tm`.
    fn from_operands(operands: &[PdfValue]) -> Option<Self> {
        let n: Vec<f32> = operands
            .iter()
            .take(6)
            .map(get_number_from_value)
            .collect::<Option<_>>()?;
        if n.len() < 6 {
            return None;
        }
        Some(Self {
            a: n[0],
            b: n[1],
            c: n[2],
            d: n[3],
            e: n[4],
            f: n[5],
        })
    }

    /// `self × other`, applying `self` first.
    fn multiply(self, other: Matrix) -> Self {
        Self {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Pre-multiply by a translation: `[1 0 0 1 tx ty] × self`.
    fn translated(self, tx: f32, ty: f32) -> Self {
        Self {
            e: self.e + tx * self.a + ty * self.c,
            f: self.f + tx * self.b + ty * self.d,
            ..self
        }
    }

    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Text state carried across operators within one content stream.
#[derive(Debug, Clone)]
struct TextState {
    matrix: Matrix,
    line_matrix: Matrix,
    font_name: Vec<u8>,
    font_size: f32,
    char_spacing: f32,
    word_spacing: f32,
    /// Horizontal scaling as a fraction (Tz / 100)
    horizontal_scale: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            matrix: Matrix::default(),
            line_matrix: Matrix::default(),
            font_name: Vec::new(),
            font_size: 12.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            horizontal_scale: 1.0,
            leading: 0.0,
        }
    }
}

impl TextState {
    fn begin_text(&mut self) {
        self.matrix = Matrix::default();
        self.line_matrix = Matrix::default();
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = self.line_matrix.translated(tx, ty);
        self.matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }

    /// Advance the pen horizontally by `tx` unscaled text-space units.
    fn advance(&mut self, tx: f32) {
        self.matrix = self.matrix.translated(tx, 0.0);
    }

    /// Horizontal displacement of one glyph; `width` is in ems.
    fn glyph_advance(&self, glyph: char, width: Option<f32>) -> f32 {
        let em = width.unwrap_or(GLYPH_ADVANCE_EM);
        let mut advance = em * self.font_size + self.char_spacing;
        if glyph == ' ' {
            advance += self.word_spacing;
        }
        advance * self.horizontal_scale
    }
}

/// Interprets content stream operators into characters for one page.
struct GlyphCollector<'a, B: PdfBackend + ?Sized> {
    backend: &'a B,
    page_id: PageId,
    page_number: u32,
    page_height: f32,
    state: TextState,
    /// Current transformation matrix
    ctm: Matrix,
    /// Graphics states saved by `q`
    saved: Vec<(Matrix, TextState)>,
    font_widths: HashMap<Vec<u8>, Option<FontWidths>>,
    in_text_block: bool,
    chars: Vec<Character>,
}

impl<'a, B: PdfBackend + ?Sized> GlyphCollector<'a, B> {
    fn new(backend: &'a B, page_id: PageId, page_number: u32) -> Self {
        Self {
            backend,
            page_id,
            page_number,
            page_height: backend.page_height(page_id),
            state: TextState::default(),
            ctm: Matrix::default(),
            saved: Vec::new(),
            font_widths: HashMap::new(),
            in_text_block: false,
            chars: Vec::new(),
        }
    }

    fn apply(&mut self, op: &ContentOp) {
        let num = |i: usize| op.operands.get(i).and_then(get_number_from_value);

        match op.operator.as_str() {
            "q" => self.saved.push((self.ctm, self.state.clone())),
            "Q" => {
                if let Some((ctm, state)) = self.saved.pop() {
                    self.ctm = ctm;
                    // The text matrix is not part of the graphics state
                    self.state = TextState {
                        matrix: self.state.matrix,
                        line_matrix: self.state.line_matrix,
                        ..state
                    };
                }
            }
            "cm" => {
                if let Some(m) = Matrix::from_operands(&op.operands) {
                    self.ctm = m.multiply(self.ctm);
                }
            }
            "BT" => {
                self.in_text_block = true;
                self.state.begin_text();
            }
            "ET" => self.in_text_block = false,
            "Tf" => {
                if let Some(PdfValue::Name(name)) = op.operands.first() {
                    self.state.font_name = name.clone();
                }
                if let Some(size) = num(1) {
                    self.state.font_size = size;
                }
            }
            "Tc" => self.state.char_spacing = num(0).unwrap_or(0.0),
            "Tw" => self.state.word_spacing = num(0).unwrap_or(0.0),
            "Tz" => self.state.horizontal_scale = num(0).unwrap_or(100.0) / 100.0,
            "TL" => self.state.leading = num(0).unwrap_or(0.0),
            "Td" => self
                .state
                .move_line(num(0).unwrap_or(0.0), num(1).unwrap_or(0.0)),
            "TD" => {
                let ty = num(1).unwrap_or(0.0);
                self.state.leading = -ty;
                self.state.move_line(num(0).unwrap_or(0.0), ty);
            }
            "Tm" => {
                if let Some(m) = Matrix::from_operands(&op.operands) {
                    self.state.matrix = m;
                    self.state.line_matrix = m;
                }
            }
            "T*" => self.state.next_line(),
            "Tj" => {
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    self.show(bytes);
                }
            }
            "TJ" => {
                if let Some(PdfValue::Array(items)) = op.operands.first() {
                    for item in items {
                        match item {
                            PdfValue::Str(bytes) => self.show(bytes),
                            other => {
                                if let Some(n) = get_number_from_value(other) {
                                    let tx = -n / 1000.0
                                        * self.state.font_size
                                        * self.state.horizontal_scale;
                                    self.state.advance(tx);
                                }
                            }
                        }
                    }
                }
            }
            "'" => {
                self.state.next_line();
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    self.show(bytes);
                }
            }
            "\"" => {
                self.state.word_spacing = num(0).unwrap_or(self.state.word_spacing);
                self.state.char_spacing = num(1).unwrap_or(self.state.char_spacing);
                self.state.next_line();
                if let Some(PdfValue::Str(bytes)) = op.operands.get(2) {
                    self.show(bytes);
                }
            }
            _ => {}
        }
    }

    /// Widths of the current font, looked up once per font name.
    fn current_widths(&mut self) -> Option<&FontWidths> {
        let (backend, page_id) = (self.backend, self.page_id);
        self.font_widths
            .entry(self.state.font_name.clone())
            .or_insert_with_key(|name| backend.font_widths(page_id, name))
            .as_ref()
    }

    /// Emit one character per decoded glyph and advance the pen.
    fn show(&mut self, bytes: &[u8]) {
        if !self.in_text_block {
            return;
        }

        let text = self
            .backend
            .decode_text(self.page_id, &self.state.font_name, bytes);
        let glyphs: Vec<char> = text.chars().collect();

        // Widths are indexed by byte code, so they apply only to one-byte glyphs
        let widths: Vec<Option<f32>> = match self.current_widths() {
            Some(table) if glyphs.len() == bytes.len() => bytes
                .iter()
                .map(|b| table.width(*b as u32).map(|w| w / 1000.0))
                .collect(),
            _ => vec![None; glyphs.len()],
        };

        for (glyph, width) in glyphs.into_iter().zip(widths) {
            let rendering = self.state.matrix.multiply(self.ctm);
            let size = self.state.font_size * rendering.vertical_scale();
            self.chars.push(Character {
                text: glyph.to_string(),
                x: rendering.e,
                top: self.page_height - (rendering.f + ASCENT_EM * size),
                size,
                page: self.page_number,
            });
            let advance = self.state.glyph_advance(glyph, width);
            self.state.advance(advance);
        }
    }
}

/// Extract positioned characters from a single page (1-indexed).
pub fn extract_page_chars<B: PdfBackend + ?Sized>(
    backend: &B,
    page_number: u32,
) -> Result<Vec<Character>> {
    let pages = backend.pages();
    let page_id = *pages
        .get(&page_number)
        .ok_or(Error::PageOutOfRange(page_number, pages.len() as u32))?;

    let content = backend.page_content(page_id)?;
    let ops = backend.decode_content(&content)?;

    let mut collector = GlyphCollector::new(backend, page_id, page_number);
    for op in &ops {
        collector.apply(op);
    }

    log::debug!(
        "page {}: {} operators, {} characters",
        page_number,
        ops.len(),
        collector.chars.len()
    );
    Ok(collector.chars)
}
