//! PDF document assembly.
//!
//! Maps page plans onto a lopdf document: one page per plan, one content
//! stream per page, two built-in Type1 fonts shared by all pages. Nothing in
//! here is calendar-aware.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat, dictionary};

use crate::error::{CalGridError, CalGridResult};
use crate::layout::{DrawOp, PagePlan, TextStyle};

const FONT_REGULAR: &[u8] = b"F1";
const FONT_BOLD: &[u8] = b"F2";

/// Render page plans into the bytes of a complete PDF document.
///
/// The output carries no timestamps and no generated identifiers, so the same
/// plans always produce the same bytes.
pub fn render_document(plans: &[PagePlan]) -> CalGridResult<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => Object::Reference(regular_id),
            "F2" => Object::Reference(bold_id),
        },
    });

    let mut page_ids = Vec::with_capacity(plans.len());
    for plan in plans {
        let encoded = page_content(plan)
            .encode()
            .map_err(|e| CalGridError::Render(format!("Could not encode page content: {e}")))?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(plan.width as f32),
                Object::Real(plan.height as f32),
            ],
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Reference(resources_id),
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_ids.len() as i64,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| CalGridError::Render(format!("Could not serialize PDF: {e}")))?;

    Ok(bytes)
}

/// Translate one page plan into a PDF content stream.
fn page_content(plan: &PagePlan) -> Content {
    let mut operations = Vec::new();

    for op in &plan.ops {
        match op {
            DrawOp::Rect { x, y, w, h } => {
                operations.push(Operation::new(
                    "re",
                    vec![real(*x), real(*y), real(*w), real(*h)],
                ));
                operations.push(Operation::new("S", vec![]));
            }
            DrawOp::Text { x, y, size, style, content } => {
                let font = match style {
                    TextStyle::Regular => FONT_REGULAR,
                    TextStyle::Bold => FONT_BOLD,
                };
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![Object::Name(font.to_vec()), real(*size)],
                ));
                operations.push(Operation::new("Td", vec![real(*x), real(*y)]));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(
                        encode_win_ansi(content),
                        StringFormat::Literal,
                    )],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
        }
    }

    Content { operations }
}

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

/// Encode text for the WinAnsi-encoded built-in fonts. Characters outside the
/// encoding are replaced with `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        // The Latin-1 block maps straight through.
        '\u{00A0}'..='\u{00FF}' => c as u8,
        // WinAnsi fills 0x80-0x9F with typographic characters.
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => b'?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan(text: &str) -> PagePlan {
        PagePlan {
            width: 612.0,
            height: 792.0,
            ops: vec![
                DrawOp::Rect { x: 10.0, y: 10.0, w: 100.0, h: 50.0 },
                DrawOp::Text {
                    x: 20.0,
                    y: 700.0,
                    size: 12.0,
                    style: TextStyle::Bold,
                    content: text.to_string(),
                },
            ],
        }
    }

    #[test]
    fn renders_a_loadable_document() {
        let plans = vec![sample_plan("page one"), sample_plan("page two")];
        let bytes = render_document(&plans).unwrap();

        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn both_fonts_are_embedded_as_resources() {
        let bytes = render_document(&[sample_plan("hello")]).unwrap();
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.contains("/Helvetica"));
        assert!(text.contains("/Helvetica-Bold"));
        assert!(text.contains("/WinAnsiEncoding"));
    }

    #[test]
    fn text_survives_into_the_content_stream() {
        let bytes = render_document(&[sample_plan("Hello")]).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();

        let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
        let data = doc.get_page_content(page_id).unwrap();
        let content = Content::decode(&data).unwrap();

        let shown: Vec<&[u8]> = content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(bytes.as_slice()),
                _ => None,
            })
            .collect();

        assert_eq!(shown, vec![b"Hello".as_slice()]);
    }

    #[test]
    fn same_plans_render_identical_bytes() {
        let plans = vec![sample_plan("deterministic")];
        assert_eq!(render_document(&plans).unwrap(), render_document(&plans).unwrap());
    }

    #[test]
    fn win_ansi_passes_ascii_through() {
        assert_eq!(encode_win_ansi("Meeting at 9"), b"Meeting at 9");
    }

    #[test]
    fn win_ansi_maps_latin1_and_typographic_characters() {
        assert_eq!(encode_win_ansi("Café"), vec![b'C', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("\u{2019}"), vec![0x92]);
        assert_eq!(encode_win_ansi("\u{20AC}5"), vec![0x80, b'5']);
    }

    #[test]
    fn win_ansi_replaces_unmappable_characters() {
        assert_eq!(encode_win_ansi("\u{2192}ok\u{4E16}"), b"?ok?");
    }
}
