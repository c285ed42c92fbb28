//! Helpers for building small PDFs in tests.

#![allow(dead_code)]

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// One line of text placed on a page.
#[derive(Debug, Clone)]
pub struct Line {
    pub text: &'static str,
    pub size: f32,
    /// Baseline, in PDF user space (bottom-up)
    pub y: f32,
    pub bold: bool,
}

/// A regular-weight line.
pub fn line(text: &'static str, size: f32, y: f32) -> Line {
    Line {
        text,
        size,
        y,
        bold: false,
    }
}

/// A bold line.
pub fn bold(text: &'static str, size: f32, y: f32) -> Line {
    Line {
        text,
        size,
        y,
        bold: true,
    }
}

/// Body text lines starting at `y`, 14pt apart.
pub fn body(y: f32, count: usize) -> Vec<Line> {
    const SENTENCES: [&str; 4] = [
        "The committee reviewed the proposal and agreed on the next steps.",
        "Each team will report its progress at the end of the month.",
        "Funding for the second phase depends on the results of this review.",
        "Questions about the process should be sent to the project office.",
    ];
    (0..count)
        .map(|i| line(SENTENCES[i % SENTENCES.len()], 12.0, y - 14.0 * i as f32))
        .collect()
}

/// Build a PDF with one page per entry of `pages`.
pub fn build_pdf(pages: &[Vec<Line>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for l in lines {
            let font = if l.bold { "F2" } else { "F1" };
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![font.into(), Object::Real(l.size)],
            ));
            operations.push(Operation::new(
                "Td",
                vec![Object::Real(72.0), Object::Real(l.y)],
            ));
            operations.push(Operation::new("Tj", vec![Object::string_literal(l.text)]));
            operations.push(Operation::new("ET", vec![]));
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("save pdf");
    bytes
}

/// Build a PDF and write it to `path`.
pub fn write_pdf(path: &Path, pages: &[Vec<Line>]) {
    std::fs::write(path, build_pdf(pages)).expect("write pdf");
}

/// The one-page form: a 24pt title over 12pt body text.
pub fn application_form() -> Vec<Vec<Line>> {
    let mut page = vec![line("Application Form", 24.0, 720.0)];
    page.extend(body(680.0, 6));
    vec![page]
}

/// Three pages with numbered 18pt and 14pt headings.
pub fn numbered_report() -> Vec<Vec<Line>> {
    let mut p0 = vec![line("1. Overview", 18.0, 720.0)];
    p0.extend(body(690.0, 4));
    p0.push(line("1.1 Background", 14.0, 600.0));
    p0.extend(body(570.0, 4));

    let mut p1 = vec![line("2. Methods", 18.0, 720.0)];
    p1.extend(body(690.0, 6));

    let p2 = body(720.0, 8);

    vec![p0, p1, p2]
}
