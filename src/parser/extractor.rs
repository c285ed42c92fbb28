//! Span extraction from page content streams.
//!
//! Interprets the text-showing subset of the PDF content stream language and
//! emits one [`TextSpan`] per shown string, positioned in top-down page
//! coordinates. Glyph widths are estimated from the font size because the
//! classifier only needs approximate horizontal extents.

use crate::error::Result;
use crate::lang::is_spaceless_script_char;
use crate::model::{BoundingBox, TextSpan, ASCENT, DESCENT};

use super::backend::{ContentOp, PageId, PageInfo, PdfBackend, PdfValue};
use super::options::{ErrorMode, ExtractOptions};

/// Average glyph advance as a fraction of the font size.
const APPROX_CHAR_WIDTH: f32 = 0.5;

/// TJ adjustments (thousandths of an em) larger than this read as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Extracts positioned spans from every page of a document.
pub struct SpanExtractor<'a, B: PdfBackend + ?Sized> {
    backend: &'a B,
    options: ExtractOptions,
}

impl<'a, B: PdfBackend + ?Sized> SpanExtractor<'a, B> {
    /// Create a new extractor over a backend.
    pub fn new(backend: &'a B, options: ExtractOptions) -> Self {
        Self { backend, options }
    }

    /// Extract spans from all selected pages, in page order.
    pub fn extract(&self) -> Result<Vec<TextSpan>> {
        let mut spans = Vec::new();

        for (page_num, page_id) in self.backend.pages() {
            if !self.options.includes(page_num) {
                break;
            }
            let page_index = page_num.saturating_sub(1);

            match self.extract_page(page_index, page_id) {
                Ok(page_spans) => {
                    log::debug!("Page {}: {} spans", page_index, page_spans.len());
                    spans.extend(page_spans);
                }
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    log::warn!("Skipping page {}: {}", page_index, e);
                }
            }
        }

        Ok(spans)
    }

    /// Extract spans from a single page.
    pub fn extract_page(&self, page_index: u32, page_id: PageId) -> Result<Vec<TextSpan>> {
        let content = self.backend.page_content(page_id)?;
        if content.is_empty() {
            return Ok(Vec::new());
        }
        let info = self.backend.page_info(page_id)?;
        let ops = self.backend.decode_content(&content)?;

        let mut interp = Interpreter {
            backend: self.backend,
            page_id,
            page_index,
            page: &info,
            state: TextState::default(),
            ctm: Matrix::IDENTITY,
            ctm_stack: Vec::new(),
            in_text: false,
            spans: Vec::new(),
        };
        for op in &ops {
            interp.apply(op);
        }

        Ok(interp.spans)
    }
}

/// A 2D affine transform `[a b c d e f]` in PDF row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn translation(tx: f32, ty: f32) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    fn from_operands(op: &ContentOp) -> Option<Self> {
        Some(Self {
            a: op.number(0)?,
            b: op.number(1)?,
            c: op.number(2)?,
            d: op.number(3)?,
            e: op.number(4)?,
            f: op.number(5)?,
        })
    }

    /// `self × other`: apply `self` first, then `other`.
    fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn horizontal_scale(&self) -> f32 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

#[derive(Debug, Clone)]
struct TextState {
    tm: Matrix,
    tlm: Matrix,
    font_key: Vec<u8>,
    font_name: String,
    font_size: f32,
    leading: f32,
    char_spacing: f32,
    word_spacing: f32,
    horiz_scale: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            tm: Matrix::IDENTITY,
            tlm: Matrix::IDENTITY,
            font_key: Vec::new(),
            font_name: String::new(),
            font_size: 12.0,
            leading: 0.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            horiz_scale: 1.0,
        }
    }
}

impl TextState {
    fn move_line(&mut self, tx: f32, ty: f32) {
        self.tlm = Matrix::translation(tx, ty).then(&self.tlm);
        self.tm = self.tlm;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }

    /// Advance the text matrix by `dx` unscaled text-space units.
    fn advance(&mut self, dx: f32) {
        self.tm = Matrix::translation(dx * self.horiz_scale, 0.0).then(&self.tm);
    }

    /// Estimated advance of `text` in unscaled text-space units.
    fn text_advance(&self, text: &str) -> f32 {
        text.chars()
            .map(|ch| {
                let mut w = self.font_size * APPROX_CHAR_WIDTH + self.char_spacing;
                if ch == ' ' {
                    w += self.word_spacing;
                }
                w
            })
            .sum()
    }
}

struct Interpreter<'a, B: PdfBackend + ?Sized> {
    backend: &'a B,
    page_id: PageId,
    page_index: u32,
    page: &'a PageInfo,
    state: TextState,
    ctm: Matrix,
    ctm_stack: Vec<Matrix>,
    in_text: bool,
    spans: Vec<TextSpan>,
}

impl<B: PdfBackend + ?Sized> Interpreter<'_, B> {
    fn apply(&mut self, op: &ContentOp) {
        match op.operator.as_str() {
            "q" => self.ctm_stack.push(self.ctm),
            "Q" => {
                if let Some(ctm) = self.ctm_stack.pop() {
                    self.ctm = ctm;
                }
            }
            "cm" => {
                if let Some(m) = Matrix::from_operands(op) {
                    self.ctm = m.then(&self.ctm);
                }
            }
            "BT" => {
                self.in_text = true;
                self.state.tm = Matrix::IDENTITY;
                self.state.tlm = Matrix::IDENTITY;
            }
            "ET" => self.in_text = false,
            "Tf" => {
                if let Some(PdfValue::Name(key)) = op.operands.first() {
                    self.state.font_name = self.page.font_name(key);
                    self.state.font_key = key.clone();
                }
                if let Some(size) = op.number(1) {
                    self.state.font_size = size;
                }
            }
            "TL" => {
                if let Some(leading) = op.number(0) {
                    self.state.leading = leading;
                }
            }
            "Tc" => self.state.char_spacing = op.number(0).unwrap_or(0.0),
            "Tw" => self.state.word_spacing = op.number(0).unwrap_or(0.0),
            "Tz" => self.state.horiz_scale = op.number(0).unwrap_or(100.0) / 100.0,
            "Td" | "TD" => {
                let tx = op.number(0).unwrap_or(0.0);
                let ty = op.number(1).unwrap_or(0.0);
                if op.operator == "TD" {
                    self.state.leading = -ty;
                }
                self.state.move_line(tx, ty);
            }
            "Tm" => {
                if let Some(m) = Matrix::from_operands(op) {
                    self.state.tm = m;
                    self.state.tlm = m;
                }
            }
            "T*" => self.state.next_line(),
            "Tj" => {
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    self.show_string(bytes);
                }
            }
            "'" => {
                self.state.next_line();
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    self.show_string(bytes);
                }
            }
            "\"" => {
                self.state.word_spacing = op.number(0).unwrap_or(self.state.word_spacing);
                self.state.char_spacing = op.number(1).unwrap_or(self.state.char_spacing);
                self.state.next_line();
                if let Some(PdfValue::Str(bytes)) = op.operands.get(2) {
                    self.show_string(bytes);
                }
            }
            "TJ" => {
                if let Some(PdfValue::Array(items)) = op.operands.first() {
                    self.show_array(items);
                }
            }
            _ => {}
        }
    }

    fn decode(&self, bytes: &[u8]) -> String {
        self.backend
            .decode_text(self.page_id, &self.state.font_key, bytes)
    }

    fn show_string(&mut self, bytes: &[u8]) {
        if !self.in_text {
            return;
        }
        let text = self.decode(bytes);
        let start = self.state.tm;
        let advance = self.state.text_advance(&text);
        self.state.advance(advance);
        self.emit(text, start, advance);
    }

    fn show_array(&mut self, items: &[PdfValue]) {
        if !self.in_text {
            return;
        }
        let start = self.state.tm;
        let mut combined = String::new();
        let mut total = 0.0;

        for item in items {
            match item {
                PdfValue::Str(bytes) => {
                    let text = self.decode(bytes);
                    let advance = self.state.text_advance(&text);
                    self.state.advance(advance);
                    total += advance;
                    combined.push_str(&text);
                }
                other => {
                    let Some(n) = other.as_number() else {
                        continue;
                    };
                    // Negative adjustments move right.
                    let adjustment = -n;
                    let advance = adjustment / 1000.0 * self.state.font_size;
                    self.state.advance(advance);
                    total += advance;

                    if adjustment > TJ_SPACE_THRESHOLD
                        && !combined.ends_with(' ')
                        && !combined.ends_with('\u{00A0}')
                        && combined
                            .chars()
                            .last()
                            .is_some_and(|c| !is_spaceless_script_char(c))
                    {
                        combined.push(' ');
                    }
                }
            }
        }

        self.emit(combined, start, total);
    }

    fn emit(&mut self, text: String, tm: Matrix, advance: f32) {
        if text.trim().is_empty() {
            return;
        }

        let trm = tm.then(&self.ctm);
        let size = (self.state.font_size * trm.vertical_scale()).abs();
        if size <= f32::EPSILON {
            return;
        }
        let width = (advance * self.state.horiz_scale * trm.horizontal_scale()).abs();

        let x0 = trm.e;
        let baseline = self.page.height - trm.f;
        let bbox = BoundingBox::new(
            x0,
            baseline - size * ASCENT,
            x0 + width,
            baseline + size * DESCENT,
        );

        self.spans.push(TextSpan::new(
            text,
            self.page_index,
            bbox,
            size,
            self.state.font_name.clone(),
        ));
    }
}
