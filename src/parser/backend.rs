//! PDF backend abstraction layer.
//!
//! Provides a trait-based interface for the few PDF operations the glyph
//! interpreter needs, isolating the concrete PDF library (lopdf) from the
//! layout logic.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object};

use crate::error::{Error, Result};

use super::fonts::FontWidths;

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// US Letter height, used when a page declares no usable MediaBox.
pub const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

/// A value from a PDF content stream operand.
#[derive(Debug, Clone)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

/// A single operation from a PDF content stream.
#[derive(Debug, Clone)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

/// Abstract interface for PDF document access.
pub trait PdfBackend {
    /// Return all pages as (page_number → PageId).
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Return the height of a page in user-space units.
    fn page_height(&self, page: PageId) -> f32;

    /// Return the raw (decompressed) content stream bytes for a page.
    fn page_content(&self, page: PageId) -> Result<Vec<u8>>;

    /// Parse raw content stream bytes into a sequence of operations.
    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>>;

    /// Decode a text byte sequence using the font's encoding on the given page.
    fn decode_text(&self, page: PageId, font_name: &[u8], bytes: &[u8]) -> String;

    /// Advance widths of a page font, when they are known.
    fn font_widths(&self, _page: PageId, _font_name: &[u8]) -> Option<FontWidths> {
        None
    }
}

/// Simple text decoding fallback when no encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        return decode_utf16be(&bytes[2..]);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

fn decode_utf16be(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

// ---------------------------------------------------------------------------
// LopdfBackend: implementation backed by lopdf
// ---------------------------------------------------------------------------

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from a file path.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::checked(LopdfDocument::load(path)?)
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        Self::checked(LopdfDocument::load_mem(data)?)
    }

    fn checked(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc })
    }

    /// Name of the `/Encoding` entry of a page font, if it is a name.
    fn font_encoding_name(&self, page: PageId, font_name: &[u8]) -> Option<String> {
        let fonts = self.doc.get_page_fonts(page).ok()?;
        let font = fonts.get(font_name)?;
        match font.get(b"Encoding").ok()? {
            Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
            _ => None,
        }
    }

    /// Resolve an indirect object; direct objects are returned as-is.
    fn resolve<'a>(&'a self, obj: &'a Object) -> Option<&'a Object> {
        self.doc.dereference(obj).ok().map(|(_, obj)| obj)
    }

    fn number(&self, obj: &Object) -> Option<f32> {
        self.resolve(obj)?.as_float().ok()
    }

    /// Widths declared by the font dictionary itself.
    fn explicit_widths(&self, font: &lopdf::Dictionary) -> Option<FontWidths> {
        let first_char = self.number(font.get(b"FirstChar").ok()?)?;
        let widths = self
            .resolve(font.get(b"Widths").ok()?)?
            .as_array()
            .ok()?
            .iter()
            .map(|w| self.number(w).unwrap_or(0.0))
            .collect();
        let table = FontWidths::new(first_char as u32, widths);

        let missing_width = font
            .get(b"FontDescriptor")
            .ok()
            .and_then(|d| self.resolve(d))
            .and_then(|d| d.as_dict().ok())
            .and_then(|d| d.get(b"MissingWidth").ok())
            .and_then(|w| self.number(w));
        Some(match missing_width {
            Some(width) => table.with_missing_width(width),
            None => table,
        })
    }

    /// Walk up the page tree to find the MediaBox.
    fn media_box(&self, dict: &lopdf::Dictionary) -> Option<Vec<f32>> {
        if let Ok(obj) = dict.get(b"MediaBox") {
            let array = match obj {
                Object::Reference(id) => self.doc.get_object(*id).ok()?.as_array().ok()?,
                other => other.as_array().ok()?,
            };
            return array.iter().map(|o| o.as_float().ok()).collect();
        }

        let parent = dict.get(b"Parent").ok()?.as_reference().ok()?;
        self.media_box(self.doc.get_dictionary(parent).ok()?)
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_height(&self, page: PageId) -> f32 {
        self.doc
            .get_dictionary(page)
            .ok()
            .and_then(|dict| self.media_box(dict))
            .filter(|b| b.len() >= 4)
            .map(|b| b[3] - b[1])
            .unwrap_or(DEFAULT_PAGE_HEIGHT)
    }

    fn page_content(&self, page: PageId) -> Result<Vec<u8>> {
        self.doc
            .get_page_content(page)
            .map_err(|e| Error::PdfParse(format!("cannot get page content: {}", e)))
    }

    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>> {
        let content =
            lopdf::content::Content::decode(data).map_err(|e| Error::PdfParse(e.to_string()))?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operator: op.operator,
                operands: op.operands.iter().map(convert_object).collect(),
            })
            .collect())
    }

    fn decode_text(&self, page: PageId, font_name: &[u8], bytes: &[u8]) -> String {
        if let Some(encoding) = self.font_encoding_name(page, font_name) {
            // Identity-H/V fonts carry 2-byte codes
            if encoding.starts_with("Identity") && bytes.len() % 2 == 0 {
                let decoded = decode_utf16be(bytes);
                if !decoded.chars().all(|c| c == '\u{FFFD}' || c == '\0') {
                    return decoded;
                }
            }
        }
        decode_text_simple(bytes)
    }

    fn font_widths(&self, page: PageId, font_name: &[u8]) -> Option<FontWidths> {
        let fonts = self.doc.get_page_fonts(page).ok()?;
        let font = fonts.get(font_name)?;

        self.explicit_widths(font).or_else(|| {
            let base_font = font.get(b"BaseFont").ok()?.as_name().ok()?;
            FontWidths::standard(&String::from_utf8_lossy(base_font))
        })
    }
}

/// Convert a `lopdf::Object` to [`PdfValue`].
fn convert_object(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(b, _) => PdfValue::Str(b.clone()),
        Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        _ => PdfValue::Other,
    }
}

/// Helper: extract a number from a [`PdfValue`].
pub fn get_number_from_value(val: &PdfValue) -> Option<f32> {
    match val {
        PdfValue::Integer(i) => Some(*i as f32),
        PdfValue::Real(r) => Some(*r),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_simple_utf8() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
    }

    #[test]
    fn test_decode_text_simple_latin1() {
        // 0xE9 = 'é' in Latin-1
        let bytes = vec![0x48, 0x65, 0x6C, 0x6C, 0xE9];
        assert_eq!(decode_text_simple(&bytes), "Hellé");
    }

    #[test]
    fn test_decode_text_simple_utf16be() {
        let bytes = vec![0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_text_simple(&bytes), "Hi");
    }

    #[test]
    fn test_get_number_from_value() {
        assert_eq!(get_number_from_value(&PdfValue::Integer(42)), Some(42.0));
        assert_eq!(get_number_from_value(&PdfValue::Real(2.5)), Some(2.5));
        assert_eq!(get_number_from_value(&PdfValue::Other), None);
    }

    #[test]
    fn test_load_bytes_rejects_garbage() {
        assert!(LopdfBackend::load_bytes(b"definitely not a pdf").is_err());
    }

    fn single_font_pdf(font: lopdf::Dictionary) -> Vec<u8> {
        use lopdf::dictionary;

        let mut doc = LopdfDocument::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(font);
        let content_id = doc.add_object(lopdf::Stream::new(dictionary! {}, Vec::new()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => 1,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_font_widths_from_dictionary() {
        use lopdf::dictionary;

        let data = single_font_pdf(dictionary! {
            "Type" => "Font",
            "Subtype" => "TrueType",
            "BaseFont" => "Helvetica",
            "FirstChar" => 65,
            "Widths" => vec![700.into(), 650.into()],
        });
        let backend = LopdfBackend::load_bytes(&data).unwrap();
        let page = backend.pages()[&1];

        let widths = backend.font_widths(page, b"F1").unwrap();
        // Declared widths override the built-in Helvetica metrics
        assert_eq!(widths.width('A' as u32), Some(700.0));
        assert_eq!(widths.width('B' as u32), Some(650.0));
        assert_eq!(widths.width('C' as u32), None);
        assert!((backend.page_height(page) - 792.0).abs() < 1e-3);
    }

    #[test]
    fn test_standard_font_widths_without_dictionary_entries() {
        use lopdf::dictionary;

        let data = single_font_pdf(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let backend = LopdfBackend::load_bytes(&data).unwrap();
        let page = backend.pages()[&1];

        let widths = backend.font_widths(page, b"F1").unwrap();
        assert_eq!(widths.width('m' as u32), Some(833.0));
        assert!(backend.font_widths(page, b"F9").is_none());
    }
}
