//! Document access behind a trait.
//!
//! The span extractor only needs the page list, a little page metadata, the
//! decoded content-stream operations, and string decoding. [`PdfBackend`]
//! exposes exactly that so the interpreter can be tested without real files;
//! [`LopdfBackend`] is the production implementation.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// US Letter, used when a page carries no usable MediaBox.
pub const DEFAULT_PAGE_SIZE: (f32, f32) = (612.0, 792.0);

/// Bound on Parent hops when resolving inherited page attributes.
const MAX_PARENT_DEPTH: usize = 32;

/// Page metadata needed to place text.
#[derive(Debug, Clone, PartialEq)]
pub struct PageInfo {
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Font resource name (e.g. `F1`) to base font name (e.g. `Helvetica-Bold`)
    pub fonts: HashMap<Vec<u8>, String>,
}

impl Default for PageInfo {
    fn default() -> Self {
        Self {
            width: DEFAULT_PAGE_SIZE.0,
            height: DEFAULT_PAGE_SIZE.1,
            fonts: HashMap::new(),
        }
    }
}

impl PageInfo {
    /// Base font name for a resource name, or the resource name itself.
    pub fn font_name(&self, resource: &[u8]) -> String {
        self.fonts
            .get(resource)
            .cloned()
            .unwrap_or_else(|| String::from_utf8_lossy(resource).into_owned())
    }
}

/// A content-stream operand.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

impl PdfValue {
    /// Numeric value of an integer or real operand.
    pub fn as_number(&self) -> Option<f32> {
        match *self {
            PdfValue::Integer(i) => Some(i as f32),
            PdfValue::Real(r) => Some(r),
            _ => None,
        }
    }
}

/// One operator with its operands.
#[derive(Debug, Clone)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

impl ContentOp {
    /// Build an operation.
    pub fn new(operator: &str, operands: Vec<PdfValue>) -> Self {
        Self {
            operator: operator.to_string(),
            operands,
        }
    }

    /// The numeric operand at `idx`, if any.
    pub fn number(&self, idx: usize) -> Option<f32> {
        self.operands.get(idx).and_then(PdfValue::as_number)
    }
}

/// Read access to a parsed PDF.
pub trait PdfBackend {
    /// All pages keyed by 1-based page number.
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Size and fonts of a page.
    fn page_info(&self, page: PageId) -> Result<PageInfo>;

    /// Concatenated, decompressed content stream of a page (empty if none).
    fn page_content(&self, page: PageId) -> Result<Vec<u8>>;

    /// Tokenize content-stream bytes into operations.
    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>>;

    /// Decode a shown string with the encoding of `font` on `page`.
    fn decode_text(&self, page: PageId, font: &[u8], bytes: &[u8]) -> String;
}

/// Decode string bytes without font information.
///
/// Tries UTF-16BE (with BOM), then UTF-8, then Latin-1.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if let [0xFE, 0xFF, rest @ ..] = bytes {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().copied().map(char::from).collect(),
    }
}

/// [`PdfBackend`] over an owned `lopdf::Document`.
///
/// Dropping the backend releases the document.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Parse a PDF file.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            doc: LopdfDocument::load(path)?,
        })
    }

    /// Parse an in-memory PDF.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        Ok(Self {
            doc: LopdfDocument::load_mem(data)?,
        })
    }

    /// Whether the trailer carries an Encrypt dictionary.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// Version from the file header.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn deref<'a>(&'a self, obj: &'a Object) -> Option<&'a Object> {
        match obj {
            Object::Reference(id) => self.doc.get_object(*id).ok(),
            other => Some(other),
        }
    }

    /// Walk up the page tree until `key` is found.
    fn inherited<'a>(&'a self, page: ObjectId, key: &[u8]) -> Option<&'a Object> {
        let mut node: &Dictionary = self.doc.get_dictionary(page).ok()?;
        for _ in 0..MAX_PARENT_DEPTH {
            if let Ok(value) = node.get(key) {
                return self.deref(value);
            }
            let parent = node.get(b"Parent").ok()?.as_reference().ok()?;
            node = self.doc.get_dictionary(parent).ok()?;
        }
        None
    }

    fn media_box(&self, page: PageId) -> Option<(f32, f32)> {
        let corners = self
            .inherited(page, b"MediaBox")?
            .as_array()
            .ok()?
            .iter()
            .take(4)
            .map(|v| self.deref(v).and_then(|v| v.as_float().ok()))
            .collect::<Option<Vec<f32>>>()?;

        match corners[..] {
            [llx, lly, urx, ury] if urx > llx && ury > lly => Some((urx - llx, ury - lly)),
            _ => None,
        }
    }

    fn stream_parts(&self, parts: &[Object]) -> Vec<u8> {
        let mut content = Vec::new();
        for part in parts {
            if let Some(Object::Stream(stream)) = self.deref(part) {
                content.extend(stream_bytes(stream));
                content.push(b'\n');
            }
        }
        content
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_info(&self, page: PageId) -> Result<PageInfo> {
        let (width, height) = self.media_box(page).unwrap_or(DEFAULT_PAGE_SIZE);

        let fonts = self
            .doc
            .get_page_fonts(page)
            .map_err(|e| Error::PdfParse(e.to_string()))?
            .into_iter()
            .map(|(resource, dict)| {
                let base = dict
                    .get(b"BaseFont")
                    .and_then(Object::as_name)
                    .map(|n| String::from_utf8_lossy(n).into_owned())
                    .unwrap_or_else(|_| String::from_utf8_lossy(&resource).into_owned());
                (resource, base)
            })
            .collect();

        Ok(PageInfo {
            width,
            height,
            fonts,
        })
    }

    fn page_content(&self, page: PageId) -> Result<Vec<u8>> {
        let dict = self
            .doc
            .get_dictionary(page)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        // No Contents entry means a blank page.
        let Ok(contents) = dict.get(b"Contents") else {
            return Ok(Vec::new());
        };

        match self.deref(contents) {
            Some(Object::Stream(stream)) => Ok(stream_bytes(stream)),
            Some(Object::Array(parts)) => Ok(self.stream_parts(parts)),
            _ => Err(Error::PdfParse(format!(
                "page {} {} has no readable content stream",
                page.0, page.1
            ))),
        }
    }

    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>> {
        let content = lopdf::content::Content::decode(data)
            .map_err(|e| Error::TextExtract(e.to_string()))?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operands: op.operands.iter().map(to_value).collect(),
                operator: op.operator,
            })
            .collect())
    }

    fn decode_text(&self, page: PageId, font: &[u8], bytes: &[u8]) -> String {
        let decoded = self.doc.get_page_fonts(page).ok().and_then(|fonts| {
            let encoding = fonts.get(font)?.get_font_encoding(&self.doc).ok()?;
            LopdfDocument::decode_text(&encoding, bytes).ok()
        });
        decoded.unwrap_or_else(|| decode_text_simple(bytes))
    }
}

/// Stream payload, decoded when it carries a filter and raw otherwise.
fn stream_bytes(stream: &lopdf::Stream) -> Vec<u8> {
    stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone())
}

fn to_value(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(s, _) => PdfValue::Str(s.clone()),
        Object::Array(items) => PdfValue::Array(items.iter().map(to_value).collect()),
        _ => PdfValue::Other,
    }
}
