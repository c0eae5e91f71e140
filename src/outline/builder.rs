//! Document outline assembly: title selection and deduplicated headings.

use std::collections::HashSet;
use std::path::Path;

use crate::detect::pdf_version_from_path;
use crate::error::Result;
use crate::model::{Document, Heading, Line};
use crate::parser::{extract_page_chars, group_chars_into_lines, LopdfBackend, PdfBackend};

use super::classify::{classify, is_heading_length, FontTable};
use super::clean::clean_text;

/// Title and outline derived from a document's lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    pub title: String,
    pub headings: Vec<Heading>,
}

/// Build the title and outline of one document from its lines in page order.
///
/// The font table is computed over every line of the document, so heading
/// levels are consistent across pages but independent of other documents.
pub fn build_outline(lines: &[Line]) -> Outline {
    let table = FontTable::from_sizes(lines.iter().map(|l| l.font_size));

    let title = match table.largest() {
        Some(largest) => lines
            .iter()
            .filter(|l| l.font_size == largest)
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string(),
        None => String::new(),
    };

    let mut seen = HashSet::new();
    let mut headings = Vec::new();
    for line in lines {
        let text = clean_text(&line.text);
        if text.is_empty() || !is_heading_length(&text) {
            continue;
        }

        let Some(level) = classify(&text, line.font_size, &table).and_then(|r| r.heading_level())
        else {
            continue;
        };

        if seen.insert(text.clone()) {
            headings.push(Heading::new(level, text, line.page));
        }
    }

    Outline { title, headings }
}

/// Read every page of a backend into lines, in page order.
pub fn read_lines<B: PdfBackend + ?Sized>(backend: &B) -> Result<Vec<Line>> {
    let mut lines = Vec::new();
    for page_number in backend.pages().into_keys() {
        let chars = extract_page_chars(backend, page_number)?;
        lines.extend(group_chars_into_lines(&chars, page_number));
    }
    Ok(lines)
}

/// Build a [`Document`] from any backend, tagged with `source`.
pub fn load_document<B: PdfBackend + ?Sized>(backend: &B, source: &str) -> Result<Document> {
    let lines = read_lines(backend)?;
    let outline = build_outline(&lines);

    log::debug!(
        "{}: {} lines, {} headings, title {:?}",
        source,
        lines.len(),
        outline.headings.len(),
        outline.title
    );

    Ok(Document {
        source: source.to_string(),
        title: outline.title,
        outline: outline.headings,
        page_count: backend.pages().len() as u32,
    })
}

/// Load a PDF file and build its [`Document`], tagged with the file name.
pub fn load_document_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    let version = pdf_version_from_path(path)?;
    log::info!("Processing: {} (PDF {})", path.display(), version);

    let backend = LopdfBackend::load_file(path)?;
    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    load_document(&backend, &source)
}
