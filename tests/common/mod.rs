//! Helpers for writing small text-only PDFs.

#![allow(dead_code)]

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// One line of text: font size in points and text.
pub type TextLine<'a> = (f32, &'a str);

/// Body text long enough never to qualify as a heading.
pub const BODY: &str = "This paragraph is ordinary body text that runs on for well over \
                        fifteen words so it is never mistaken for a heading";

/// Build a Letter-sized PDF; each inner slice is one page, lines top to bottom.
pub fn build_pdf(pages: &[&[TextLine<'_>]]) -> Document {
    let pages: Vec<Vec<Operation>> = pages
        .iter()
        .map(|lines| {
            let mut operations = Vec::new();
            let mut y: f32 = 720.0;
            for (size, text) in lines.iter() {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec!["F1".into(), (*size).into()]));
                operations.push(Operation::new("Td", vec![72.into(), y.into()]));
                operations.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
                operations.push(Operation::new("ET", vec![]));
                y -= 40.0;
            }
            operations
        })
        .collect();
    build_pdf_from_ops(pages)
}

/// Build a Letter-sized PDF from raw content operations, one list per page.
///
/// Every page can select Helvetica as `/F1`.
pub fn build_pdf_from_ops(pages: Vec<Vec<Operation>>) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids = Vec::new();
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Write a PDF built by [`build_pdf`] to `path`.
pub fn write_pdf(path: &Path, pages: &[&[TextLine<'_>]]) {
    let mut doc = build_pdf(pages);
    doc.save(path).unwrap();
}
