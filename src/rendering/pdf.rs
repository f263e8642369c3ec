//! PDF serialization of a laid-out print document using lopdf

use super::metrics::{glyph_advance, glyph_for, win_ansi, FontMetrics, PdfFont};
use super::paint::{PaintCommand, Rgba};
use super::PrintDocument;
use crate::typography::FontWeight;
use crate::Result;
use log::warn;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::collections::{BTreeMap, BTreeSet};

/// Entries per `beginbfchar` block
const BFCHAR_CHUNK: usize = 100;

/// Serialize `doc` into PDF bytes.
///
/// Registered faces with file data are embedded as Type0 fonts addressed by
/// glyph id (Identity-H), with their real advances in the W array and a
/// ToUnicode map so text stays extractable. Every other font reference maps
/// to a standard-14 font encoded with WinAnsiEncoding.
pub fn write_pdf(doc: &PrintDocument) -> Result<Vec<u8>> {
    let metrics = FontMetrics::new(&doc.fallback_family, doc.faces.as_deref());
    let mut pdf = Document::with_version("1.7");
    let pages_id = pdf.new_object_id();

    let mut fonts: BTreeMap<PdfFont, (String, ObjectId)> = BTreeMap::new();
    for (font, chars) in used_fonts(doc, &metrics) {
        let name = format!("F{}", fonts.len() + 1);
        let font_id = add_font(&mut pdf, doc, &metrics, font, &chars);
        fonts.insert(font, (name, font_id));
    }

    let mut font_resources = Dictionary::new();
    for (name, id) in fonts.values() {
        font_resources.set(name.as_bytes().to_vec(), Object::Reference(*id));
    }
    let resources_id = pdf.add_object(dictionary! { "Font" => font_resources });

    let mut dropped: BTreeMap<PdfFont, BTreeSet<char>> = BTreeMap::new();
    let mut page_ids = Vec::with_capacity(doc.pages.len());
    for page in &doc.pages {
        let mut ops = Vec::new();
        let mut annots = Vec::new();
        for command in &page.commands {
            match command {
                PaintCommand::SolidRect { x, y, width, height, rgba } => {
                    ops.push(fill_color(*rgba));
                    ops.push(Operation::new(
                        "re",
                        vec![(*x).into(), (doc.page_height - y - height).into(), (*width).into(), (*height).into()],
                    ));
                    ops.push(Operation::new("f", vec![]));
                }
                PaintCommand::Text { x, y, size, font, rgba, text, .. } => {
                    if text.trim().is_empty() {
                        continue;
                    }
                    let pdf_font = metrics.pdf_font(*font);
                    let Some((name, _)) = fonts.get(&pdf_font) else { continue };
                    let encoded = encode_text(&metrics, pdf_font, text, dropped.entry(pdf_font).or_default());
                    ops.push(Operation::new("BT", vec![]));
                    ops.push(Operation::new("Tf", vec![Object::Name(name.as_bytes().to_vec()), (*size).into()]));
                    ops.push(fill_color(*rgba));
                    ops.push(Operation::new("Td", vec![(*x).into(), (doc.page_height - y).into()]));
                    ops.push(Operation::new("Tj", vec![encoded]));
                    ops.push(Operation::new("ET", vec![]));
                }
                PaintCommand::Link { x, y, width, height, href } => {
                    let rect = vec![
                        (*x).into(),
                        (doc.page_height - y - height).into(),
                        (x + width).into(),
                        (doc.page_height - y).into(),
                    ];
                    let annot = dictionary! {
                        "Type" => "Annot",
                        "Subtype" => "Link",
                        "Rect" => rect,
                        "Border" => vec![0.into(), 0.into(), 0.into()],
                        "A" => dictionary! {
                            "S" => "URI",
                            "URI" => Object::string_literal(href.clone()),
                        },
                    };
                    annots.push(Object::Reference(pdf.add_object(annot)));
                }
            }
        }

        let content = Content { operations: ops };
        let content_id = pdf.add_object(Stream::new(dictionary! {}, content.encode()?));
        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), doc.page_width.into(), doc.page_height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        };
        if !annots.is_empty() {
            page_dict.set("Annots", annots);
        }
        page_ids.push(pdf.add_object(page_dict));
    }

    for (font, chars) in dropped.iter().filter(|(_, chars)| !chars.is_empty()) {
        let shown: String = chars.iter().collect();
        match font {
            PdfFont::Standard(standard) => {
                warn!("{} cannot encode {:?}; drawn as '?'", standard.base_font(), shown)
            }
            PdfFont::Embedded(weight) => {
                warn!("{} {} has no glyph for {:?}; drawn as .notdef", doc.font_family, weight.numeric(), shown)
            }
        }
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_ids.len() as i64,
    };
    pdf.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = pdf.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    pdf.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    pdf.save_to(&mut bytes)?;
    Ok(bytes)
}

/// Fonts drawn by the document, each with the characters set in it
fn used_fonts(doc: &PrintDocument, metrics: &FontMetrics<'_>) -> BTreeMap<PdfFont, BTreeSet<char>> {
    let mut used: BTreeMap<PdfFont, BTreeSet<char>> = BTreeMap::new();
    for command in doc.pages.iter().flat_map(|p| p.commands.iter()) {
        if let PaintCommand::Text { font, text, .. } = command {
            if text.trim().is_empty() {
                continue;
            }
            used.entry(metrics.pdf_font(*font)).or_default().extend(text.chars());
        }
    }
    used
}

fn add_font(
    pdf: &mut Document,
    doc: &PrintDocument,
    metrics: &FontMetrics<'_>,
    font: PdfFont,
    chars: &BTreeSet<char>,
) -> ObjectId {
    if let PdfFont::Embedded(weight) = font {
        let data = doc
            .faces
            .as_ref()
            .and_then(|set| set.faces.iter().find(|f| f.weight == weight))
            .and_then(|f| f.data.as_ref());
        if let (Some(face), Some(data)) = (metrics.face(weight), data) {
            return add_embedded_font(pdf, &doc.font_family, weight, face, data, chars);
        }
    }

    let base = match font {
        PdfFont::Standard(standard) => standard.base_font(),
        PdfFont::Embedded(_) => "Helvetica",
    };
    pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    })
}

fn add_embedded_font(
    pdf: &mut Document,
    family: &str,
    weight: FontWeight,
    face: &ttf_parser::Face<'_>,
    data: &[u8],
    chars: &BTreeSet<char>,
) -> ObjectId {
    let suffix = match weight {
        FontWeight::Regular => "Regular",
        FontWeight::Bold => "Bold",
        FontWeight::Black => "Black",
    };
    let base_font = format!("{}-{}", family.replace(' ', ""), suffix);
    let scale = |v: i16| (v as f32 * 1000.0 / face.units_per_em().max(1) as f32).round() as i64;
    let bbox = face.global_bounding_box();

    let file_id = pdf.add_object(Stream::new(dictionary! { "Length1" => data.len() as i64 }, data.to_vec()));
    let descriptor_id = pdf.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => Object::Name(base_font.as_bytes().to_vec()),
        "Flags" => 32,
        "FontBBox" => vec![
            scale(bbox.x_min).into(),
            scale(bbox.y_min).into(),
            scale(bbox.x_max).into(),
            scale(bbox.y_max).into(),
        ],
        "ItalicAngle" => face.italic_angle(),
        "Ascent" => scale(face.ascender()),
        "Descent" => scale(face.descender()),
        "CapHeight" => scale(face.capital_height().unwrap_or_else(|| face.ascender())),
        "StemV" => if weight == FontWeight::Regular { 80 } else { 140 },
        "FontFile2" => file_id,
    });

    // first character seen for each glyph, in glyph order
    let mut glyphs: BTreeMap<u16, char> = BTreeMap::new();
    for c in chars {
        glyphs.entry(glyph_for(face, *c).0).or_insert(*c);
    }

    let mut widths = Vec::with_capacity(glyphs.len() * 2);
    for gid in glyphs.keys() {
        let advance = glyph_advance(face, ttf_parser::GlyphId(*gid)).round() as i64;
        widths.push(Object::Integer(*gid as i64));
        widths.push(Object::Array(vec![Object::Integer(advance)]));
    }

    let descendant_id = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => Object::Name(base_font.as_bytes().to_vec()),
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("Identity"),
            "Supplement" => 0,
        },
        "FontDescriptor" => descriptor_id,
        "DW" => glyph_advance(face, ttf_parser::GlyphId(0)).round() as i64,
        "W" => widths,
        "CIDToGIDMap" => "Identity",
    });

    let to_unicode_id = pdf.add_object(Stream::new(dictionary! {}, to_unicode_cmap(&glyphs).into_bytes()));

    pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => Object::Name(base_font.as_bytes().to_vec()),
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![Object::Reference(descendant_id)],
        "ToUnicode" => to_unicode_id,
    })
}

/// CMap from glyph ids back to the characters they were drawn for
fn to_unicode_cmap(glyphs: &BTreeMap<u16, char>) -> String {
    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n12 dict begin\nbegincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n/CMapType 2 def\n\
         1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n",
    );
    let entries: Vec<(u16, char)> = glyphs.iter().filter(|(gid, _)| **gid != 0).map(|(g, c)| (*g, *c)).collect();
    for chunk in entries.chunks(BFCHAR_CHUNK) {
        cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
        for (gid, c) in chunk {
            let mut units = [0u16; 2];
            let utf16: String = c.encode_utf16(&mut units).iter().map(|u| format!("{:04X}", u)).collect();
            cmap.push_str(&format!("<{:04X}> <{}>\n", gid, utf16));
        }
        cmap.push_str("endbfchar\n");
    }
    cmap.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");
    cmap
}

/// String operand for `text` drawn in `font`; characters it cannot draw land in `dropped`
fn encode_text(metrics: &FontMetrics<'_>, font: PdfFont, text: &str, dropped: &mut BTreeSet<char>) -> Object {
    if let PdfFont::Embedded(weight) = font {
        if let Some(face) = metrics.face(weight) {
            let mut bytes = Vec::with_capacity(text.len() * 2);
            for c in text.chars() {
                let gid = glyph_for(face, c).0;
                if gid == 0 {
                    dropped.insert(c);
                }
                bytes.extend_from_slice(&gid.to_be_bytes());
            }
            return Object::String(bytes, StringFormat::Hexadecimal);
        }
    }
    Object::String(to_win_ansi(text, dropped), StringFormat::Literal)
}

fn fill_color(rgba: Rgba) -> Operation {
    Operation::new(
        "rg",
        vec![
            (rgba.0 as f32 / 255.0).into(),
            (rgba.1 as f32 / 255.0).into(),
            (rgba.2 as f32 / 255.0).into(),
        ],
    )
}

/// Encode text for WinAnsiEncoding; unmappable characters become '?'
fn to_win_ansi(s: &str, dropped: &mut BTreeSet<char>) -> Vec<u8> {
    s.chars()
        .map(|c| {
            win_ansi(c).unwrap_or_else(|| {
                dropped.insert(c);
                b'?'
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::layout::PrintPage;
    use crate::rendering::metrics::Standard14;
    use crate::rendering::paint::{Face, FontRef, BLACK};
    use crate::typography::{FontFace, FontFaceSet};
    use std::sync::Arc;

    const MONTSERRAT: &[u8] = include_bytes!("../../tests/fixtures/fonts/Montserrat-Regular.ttf");

    fn body(weight: FontWeight) -> FontRef {
        FontRef { face: Face::Body, weight }
    }

    fn text(t: &str, weight: FontWeight) -> PaintCommand {
        PaintCommand::Text { x: 40.0, y: 60.0, size: 12.0, font: body(weight), rgba: BLACK, text: t.to_string(), heading: false }
    }

    fn single_page(commands: Vec<PaintCommand>, faces: Option<Arc<FontFaceSet>>) -> PrintDocument {
        PrintDocument {
            page_width: 595.0,
            page_height: 842.0,
            pages: vec![PrintPage { commands }],
            font_family: faces.as_ref().map(|f| f.family.clone()).unwrap_or_else(|| "Helvetica".into()),
            fallback_family: "Helvetica".into(),
            faces,
            degraded: false,
        }
    }

    fn sample(faces: Option<Arc<FontFaceSet>>) -> PrintDocument {
        let mut doc = single_page(
            vec![
                text("Ada Lovelace", FontWeight::Black),
                PaintCommand::Link { x: 40.0, y: 70.0, width: 30.0, height: 10.0, href: "https://github.com/ada".into() },
            ],
            faces,
        );
        doc.pages.push(PrintPage { commands: vec![text("2019 \u{2013} Present", FontWeight::Regular)] });
        doc
    }

    fn montserrat(family: &str, weight: FontWeight) -> Arc<FontFaceSet> {
        Arc::new(FontFaceSet {
            family: family.into(),
            faces: vec![FontFace { weight, src: "https://f/face.ttf".into(), data: Some(Arc::new(MONTSERRAT.to_vec())) }],
        })
    }

    fn object_with_subtype<'a>(pdf: &'a Document, subtype: &[u8]) -> &'a Dictionary {
        pdf.objects
            .values()
            .filter_map(|o| o.as_dict().ok())
            .find(|d| d.get(b"Subtype").and_then(|s| s.as_name()).map(|s| s == subtype).unwrap_or(false))
            .expect("font object")
    }

    /// Hex string operands of every `Tj` on the first page
    fn shown_strings(pdf: &Document) -> Vec<Vec<u8>> {
        let page_id = *pdf.get_pages().values().next().expect("a page");
        let content = pdf.get_and_decode_page_content(page_id).expect("content");
        content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| op.operands.first().and_then(|o| o.as_str().ok()).map(|s| s.to_vec()))
            .collect()
    }

    #[test]
    fn writes_one_pdf_page_per_print_page() {
        let bytes = write_pdf(&sample(None)).expect("pdf");
        assert!(bytes.starts_with(b"%PDF-1.7"));
        let parsed = Document::load_mem(&bytes).expect("parse back");
        assert_eq!(parsed.get_pages().len(), 2);
    }

    #[test]
    fn embeds_registered_faces() {
        let bytes = write_pdf(&sample(Some(montserrat("Open Sans", FontWeight::Black)))).expect("pdf");
        let haystack = String::from_utf8_lossy(&bytes);
        assert!(haystack.contains("/FontFile2"));
        assert!(haystack.contains("OpenSans-Black"));
        assert!(haystack.contains("/Identity-H"));
        assert!(haystack.contains("/ToUnicode"));
        assert!(haystack.contains("/URI"));
    }

    #[test]
    fn embedded_widths_come_from_the_face() {
        let doc = single_page(vec![text("iW", FontWeight::Regular)], Some(montserrat("Montserrat", FontWeight::Regular)));
        let parsed = Document::load_mem(&write_pdf(&doc).expect("pdf")).expect("parse back");
        let cid_font = object_with_subtype(&parsed, b"CIDFontType2");
        let w = cid_font.get(b"W").and_then(|w| w.as_array()).expect("W array");

        let face = ttf_parser::Face::parse(MONTSERRAT, 0).expect("fixture parses");
        let declared = |c: char| -> i64 {
            let gid = glyph_for(&face, c).0 as i64;
            let at = w.iter().position(|o| o.as_i64().ok() == Some(gid)).expect("glyph listed");
            w[at + 1].as_array().expect("width list")[0].as_i64().expect("width")
        };
        let hmtx = |c: char| face.glyph_hor_advance(glyph_for(&face, c)).expect("advance") as i64 * 1000 / face.units_per_em() as i64;
        assert_eq!(declared('i'), hmtx('i'));
        assert_eq!(declared('W'), hmtx('W'));
        assert_ne!(declared('i'), declared('W'));
    }

    #[test]
    fn embedded_faces_draw_characters_outside_latin1() {
        let doc = single_page(vec![text("Łukasz Nowak", FontWeight::Regular)], Some(montserrat("Montserrat", FontWeight::Regular)));
        let bytes = write_pdf(&doc).expect("pdf");
        let parsed = Document::load_mem(&bytes).expect("parse back");

        let face = ttf_parser::Face::parse(MONTSERRAT, 0).expect("fixture parses");
        let l_stroke = glyph_for(&face, 'Ł').0;
        assert_ne!(l_stroke, 0);
        let shown = shown_strings(&parsed);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].len(), "Łukasz Nowak".chars().count() * 2);
        assert_eq!(&shown[0][..2], &l_stroke.to_be_bytes());
        assert!(!String::from_utf8_lossy(&bytes).contains("?ukasz"));

        let to_unicode = parsed
            .objects
            .values()
            .filter_map(|o| o.as_stream().ok())
            .map(|s| String::from_utf8_lossy(&s.content).to_string())
            .find(|s| s.contains("beginbfchar"))
            .expect("ToUnicode stream");
        assert!(to_unicode.contains(&format!("<{:04X}> <0141>", l_stroke)));
    }

    #[test]
    fn fallback_uses_standard_fonts() {
        let metrics = FontMetrics::standard("Times-Roman");
        assert_eq!(metrics.pdf_font(body(FontWeight::Black)), PdfFont::Standard(Standard14::TimesBold));
        let helvetica = FontMetrics::standard("Helvetica");
        let mono = FontRef { face: Face::Mono, weight: FontWeight::Bold };
        assert_eq!(helvetica.pdf_font(mono), PdfFont::Standard(Standard14::CourierBold));

        let bytes = write_pdf(&single_page(vec![text("Łukasz", FontWeight::Bold)], None)).expect("pdf");
        let parsed = Document::load_mem(&bytes).expect("parse back");
        assert_eq!(shown_strings(&parsed), vec![b"?ukasz".to_vec()]);
        let font = object_with_subtype(&parsed, b"Type1");
        assert_eq!(font.get(b"BaseFont").and_then(|b| b.as_name()).expect("name"), b"Helvetica-Bold");
    }

    #[test]
    fn win_ansi_maps_typographic_punctuation() {
        let mut dropped = BTreeSet::new();
        assert_eq!(to_win_ansi("a\u{2013}b\u{2022}\u{4e2d}", &mut dropped), vec![b'a', 0x96, b'b', 0x95, b'?']);
        assert_eq!(dropped.into_iter().collect::<Vec<_>>(), vec!['\u{4e2d}']);
    }
}
