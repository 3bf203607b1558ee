//! Positioned text runs from a PDF's content streams.
//!
//! Only the text-positioning and text-showing operators are interpreted,
//! plus `Do` for form XObjects. Each shown string becomes one fragment placed
//! at the translation of the text matrix when it is shown. Glyph advances are
//! not tracked, so runs shown back to back without repositioning share a
//! position.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Encoding, Object, ObjectId};
use tracing::{debug, info};

use super::error::IndexError;
use super::extract::{LINE_BREAK, PositionedFragment};

/// `TJ` adjustment (thousandths of an em, negative moves right) treated as a word gap.
const WORD_GAP: f64 = -250.0;

/// Form XObjects nested deeper than this are not entered.
const MAX_FORM_DEPTH: usize = 8;

/// Page tree levels searched for inherited resources.
const MAX_TREE_DEPTH: usize = 32;

/// Affine text matrix `[a b c d e f]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix([f64; 6]);

impl Matrix {
    const IDENTITY: Matrix = Matrix([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    /// Pre-multiply by a translation, as `Td` does.
    fn translate(self, tx: f64, ty: f64) -> Matrix {
        let [a, b, c, d, e, f] = self.0;
        Matrix([a, b, c, d, tx * a + ty * c + e, tx * b + ty * d + f])
    }

    fn position(&self) -> (f64, f64) {
        (self.0[4], self.0[5])
    }
}

/// Turns the bytes of a shown string into text.
trait TextDecoder {
    /// `font` is the resource name selected by the last `Tf`, if any.
    fn decode(&self, font: Option<&[u8]>, bytes: &[u8]) -> String;
}

/// Decoder for content with no font information.
struct RawDecoder;

impl TextDecoder for RawDecoder {
    fn decode(&self, _font: Option<&[u8]>, bytes: &[u8]) -> String {
        decode_raw(bytes)
    }
}

/// Font encodings of one resource dictionary, keyed by resource name.
struct FontDecoder<'a> {
    encodings: BTreeMap<Vec<u8>, Encoding<'a>>,
}

impl<'a> FontDecoder<'a> {
    fn new(doc: &'a Document, resources: Option<&'a Dictionary>) -> Self {
        let mut encodings = BTreeMap::new();

        let fonts = resources
            .and_then(|r| r.get(b"Font").ok())
            .and_then(|fonts| resolve_dict(doc, fonts));

        for (name, font) in fonts.into_iter().flat_map(Dictionary::iter) {
            let Some(font) = resolve_dict(doc, font) else {
                continue;
            };
            match font.get_font_encoding(doc) {
                Ok(encoding) => {
                    encodings.insert(name.clone(), encoding);
                }
                Err(e) => {
                    debug!(font = %String::from_utf8_lossy(name), error = %e, "unusable font encoding");
                }
            }
        }

        Self { encodings }
    }
}

impl TextDecoder for FontDecoder<'_> {
    fn decode(&self, font: Option<&[u8]>, bytes: &[u8]) -> String {
        font.and_then(|name| self.encodings.get(name))
            .and_then(|encoding| Document::decode_text(encoding, bytes).ok())
            .unwrap_or_else(|| decode_raw(bytes))
    }
}

/// Text state carried across operators within one page.
struct TextWalker {
    /// Text matrix
    tm: Matrix,
    /// Text line matrix, start of the current line
    tlm: Matrix,
    leading: f64,
    /// Resource name of the current font
    font: Option<Vec<u8>>,
    last_y: Option<f64>,
    fragments: Vec<PositionedFragment>,
}

impl TextWalker {
    fn new() -> Self {
        Self {
            tm: Matrix::IDENTITY,
            tlm: Matrix::IDENTITY,
            leading: 0.0,
            font: None,
            last_y: None,
            fragments: Vec::new(),
        }
    }

    fn move_line(&mut self, tx: f64, ty: f64) {
        self.tlm = self.tlm.translate(tx, ty);
        self.tm = self.tlm;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }

    fn show(&mut self, text: String) {
        let (x, y) = self.tm.position();

        if let Some(last_y) = self.last_y
            && last_y != y
        {
            self.fragments.push(PositionedFragment::new(LINE_BREAK, x, y));
        }
        self.last_y = Some(y);

        self.fragments.push(PositionedFragment::new(text, x, y));
    }

    fn show_string(&mut self, operand: Option<&Object>, decoder: &dyn TextDecoder) {
        if let Some(Object::String(bytes, _)) = operand {
            let text = decoder.decode(self.font.as_deref(), bytes);
            self.show(text);
        }
    }

    fn apply(&mut self, op: &Operation, decoder: &dyn TextDecoder) {
        let operands = &op.operands;
        match op.operator.as_str() {
            "BT" => {
                self.tm = Matrix::IDENTITY;
                self.tlm = Matrix::IDENTITY;
            }
            "Tf" => {
                if let Some(Ok(name)) = operands.first().map(Object::as_name) {
                    self.font = Some(name.to_vec());
                }
            }
            "TL" => {
                if let Some(leading) = number_at(operands, 0) {
                    self.leading = leading;
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) = (number_at(operands, 0), number_at(operands, 1)) {
                    self.move_line(tx, ty);
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (number_at(operands, 0), number_at(operands, 1)) {
                    self.leading = -ty;
                    self.move_line(tx, ty);
                }
            }
            "Tm" => {
                let values: Option<Vec<f64>> = (0..6).map(|i| number_at(operands, i)).collect();
                if let Some(values) = values {
                    let m = Matrix([
                        values[0], values[1], values[2], values[3], values[4], values[5],
                    ]);
                    self.tm = m;
                    self.tlm = m;
                }
            }
            "T*" => self.next_line(),
            "Tj" => self.show_string(operands.first(), decoder),
            "'" => {
                self.next_line();
                self.show_string(operands.first(), decoder);
            }
            "\"" => {
                self.next_line();
                self.show_string(operands.get(2), decoder);
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    let text = decode_array(items, self.font.as_deref(), decoder);
                    self.show(text);
                }
            }
            _ => {}
        }
    }

    /// Run a content stream, entering form XObjects drawn with `Do`.
    fn walk(
        &mut self,
        doc: &Document,
        operations: &[Operation],
        resources: Option<&Dictionary>,
        depth: usize,
    ) {
        let decoder = FontDecoder::new(doc, resources);

        for op in operations {
            if op.operator != "Do" {
                self.apply(op, &decoder);
                continue;
            }

            let Some(Ok(name)) = op.operands.first().map(Object::as_name) else {
                continue;
            };
            if depth >= MAX_FORM_DEPTH {
                debug!(depth, "form XObject nesting too deep");
                continue;
            }
            if let Some(form) = form_xobject(doc, resources, name) {
                // `Do` saves and restores the graphics state, font included
                let font = self.font.clone();
                self.walk(
                    doc,
                    &form.operations,
                    form.resources.or(resources),
                    depth + 1,
                );
                self.font = font;
            }
        }
    }
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

fn number_at(operands: &[Object], index: usize) -> Option<f64> {
    operands.get(index).and_then(number)
}

/// Decode a PDF string without font information: UTF-16BE when it carries
/// a byte-order mark, otherwise one byte per character.
fn decode_raw(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        _ => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Join the strings of a `TJ` array, turning wide negative adjustments into spaces.
fn decode_array(items: &[Object], font: Option<&[u8]>, decoder: &dyn TextDecoder) -> String {
    let mut text = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => text.push_str(&decoder.decode(font, bytes)),
            other => {
                if let Some(adjust) = number(other)
                    && adjust <= WORD_GAP
                    && !text.is_empty()
                    && !text.ends_with(' ')
                {
                    text.push(' ');
                }
            }
        }
    }
    text
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

fn resolve_dict<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    resolve(doc, obj)?.as_dict().ok()
}

/// The page's resource dictionary, inherited from the page tree if needed.
fn page_resources(doc: &Document, page_id: ObjectId) -> Option<&Dictionary> {
    let mut node = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(resources) = node.get(b"Resources") {
            return resolve_dict(doc, resources);
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }
    None
}

/// A form XObject's content, ready to walk.
struct Form<'a> {
    operations: Vec<Operation>,
    resources: Option<&'a Dictionary>,
}

fn form_xobject<'a>(
    doc: &'a Document,
    resources: Option<&'a Dictionary>,
    name: &[u8],
) -> Option<Form<'a>> {
    let xobjects = resolve_dict(doc, resources?.get(b"XObject").ok()?)?;
    let stream = resolve(doc, xobjects.get(name).ok()?)?.as_stream().ok()?;

    let subtype = stream.dict.get(b"Subtype").and_then(Object::as_name).ok()?;
    if subtype != b"Form" {
        return None;
    }

    let bytes = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());
    let content = match Content::decode(&bytes) {
        Ok(content) => content,
        Err(e) => {
            debug!(xobject = %String::from_utf8_lossy(name), error = %e, "unreadable form XObject");
            return None;
        }
    };

    Some(Form {
        operations: content.operations,
        resources: stream
            .dict
            .get(b"Resources")
            .ok()
            .and_then(|r| resolve_dict(doc, r)),
    })
}

/// Positioned fragments for bare content operators, in emission order.
///
/// With no resources available, strings are decoded without font
/// information and `Do` is ignored.
pub fn fragments_from_operations(operations: &[Operation]) -> Vec<PositionedFragment> {
    let mut walker = TextWalker::new();
    for op in operations {
        walker.apply(op, &RawDecoder);
    }
    walker.fragments
}

/// Positioned fragments for every page of a loaded document, in page order.
///
/// Strings are decoded through the encoding of the font selected for them,
/// including ToUnicode maps, and text inside form XObjects is included.
pub fn document_pages(doc: &Document) -> Result<Vec<Vec<PositionedFragment>>, IndexError> {
    let mut pages = Vec::new();

    for (page_number, page_id) in doc.get_pages() {
        let content = doc
            .get_page_content(page_id)
            .and_then(|bytes| Content::decode(&bytes))
            .map_err(|source| IndexError::Page {
                page: page_number,
                source,
            })?;

        let mut walker = TextWalker::new();
        walker.walk(doc, &content.operations, page_resources(doc, page_id), 0);

        debug!(
            page = page_number,
            fragments = walker.fragments.len(),
            "read page"
        );
        pages.push(walker.fragments);
    }

    Ok(pages)
}

/// Load a PDF and return the positioned fragments of every page.
pub fn read_pages(path: impl AsRef<Path>) -> Result<Vec<Vec<PositionedFragment>>, IndexError> {
    let path = path.as_ref();
    info!(path = %path.display(), "Reading station index");

    let doc = Document::load(path).map_err(|source| IndexError::Load {
        path: path.to_path_buf(),
        source,
    })?;

    document_pages(&doc)
}
