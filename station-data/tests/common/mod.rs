//! Station index PDFs built in memory for the integration tests.

#![allow(dead_code)]

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};

/// ToUnicode map sending every 2-byte code in the printable ASCII range to
/// the same code point.
const IDENTITY_TO_UNICODE: &str = "/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
1 beginbfrange
<0020> <007E> <0020>
endbfrange
endcmap
CMapName currentdict /CMap defineresource pop
end
end
";

pub fn op(operator: &str, operands: Vec<Object>) -> Operation {
    Operation::new(operator, operands)
}

/// A string operand holding `text` as 2-byte glyph codes, as Identity-H
/// fonts store it.
pub fn two_byte(text: &str) -> Object {
    let bytes = text
        .encode_utf16()
        .flat_map(|unit| unit.to_be_bytes())
        .collect();
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Operators for a table page: a header shown before any positioning, then
/// one line per row with the code at x=50 and the name at x=90.
pub fn table_page(font: &str, rows: &[(&str, &str)]) -> Vec<Operation> {
    let mut ops = vec![
        op("BT", vec![]),
        op("Tf", vec![font.into(), 9.into()]),
        op("Tj", vec![Object::string_literal("Station index")]),
        op("Td", vec![50.into(), 760.into()]),
        op("Tj", vec![Object::string_literal("Code")]),
        op("Td", vec![40.into(), 0.into()]),
        op("Tj", vec![Object::string_literal("Station")]),
        op("Td", vec![Object::Integer(-40), 0.into()]),
        op("TL", vec![12.into()]),
    ];
    for (code, name) in rows {
        ops.push(op("T*", vec![]));
        ops.push(op("Tj", vec![Object::string_literal(*code)]));
        ops.push(op("Td", vec![40.into(), 0.into()]));
        ops.push(op("Tj", vec![Object::string_literal(*name)]));
        ops.push(op("Td", vec![Object::Integer(-40), 0.into()]));
    }
    ops.push(op("ET", vec![]));
    ops
}

/// Builds a document whose pages share one inherited resource dictionary.
pub struct PdfBuilder {
    doc: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    fonts: Dictionary,
    xobjects: Dictionary,
}

impl PdfBuilder {
    /// A document with `F1`, a Type1 Helvetica font with no explicit encoding.
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let helvetica = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        Self {
            doc,
            pages_id,
            kids: Vec::new(),
            fonts: dictionary! { "F1" => helvetica },
            xobjects: Dictionary::new(),
        }
    }

    /// Add a Type1 font using WinAnsiEncoding.
    pub fn win_ansi_font(mut self, name: &str) -> Self {
        let font = self.doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        self.fonts.set(name, font);
        self
    }

    /// Add an embedded-subset style Type0 font: Identity-H with a ToUnicode map.
    pub fn identity_h_font(mut self, name: &str) -> Self {
        let to_unicode = self.doc.add_object(Stream::new(
            dictionary! {},
            IDENTITY_TO_UNICODE.as_bytes().to_vec(),
        ));
        let descendant = self.doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "BaseFont" => "ABCDEF+Frutiger",
            "CIDSystemInfo" => dictionary! {
                "Registry" => Object::string_literal("Adobe"),
                "Ordering" => Object::string_literal("Identity"),
                "Supplement" => 0,
            },
        });
        let font = self.doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => "ABCDEF+Frutiger",
            "Encoding" => "Identity-H",
            "DescendantFonts" => vec![descendant.into()],
            "ToUnicode" => to_unicode,
        });
        self.fonts.set(name, font);
        self
    }

    /// Add a form XObject; it inherits the page resources.
    pub fn form(mut self, name: &str, operations: Vec<Operation>) -> Self {
        let content = Content { operations }.encode().unwrap();
        let form = self.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Form",
                "BBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            },
            content,
        ));
        self.xobjects.set(name, form);
        self
    }

    pub fn page(mut self, operations: Vec<Operation>) -> Self {
        let content = Content { operations }.encode().unwrap();
        let content_id = self.doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "Contents" => content_id,
        });
        self.kids.push(page_id.into());
        self
    }

    pub fn build(mut self) -> Document {
        let resources_id = self.doc.add_object(dictionary! {
            "Font" => self.fonts,
            "XObject" => self.xobjects,
        });

        let count = self.kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => self.kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc
    }

    pub fn save(self, path: &Path) {
        self.build().save(path).unwrap();
    }
}
