//! Text measurement for the print backend.
//!
//! Body text set in a registered face is measured with that face's own
//! horizontal advances, read with `ttf-parser`. Everything else is measured
//! with the AFM widths of the standard-14 font the PDF writer draws it with.
//! Layout and the PDF writer share one [`FontMetrics`], so the widths used
//! for line breaking are the widths declared in the file.

use super::paint::{Face, FontRef};
use crate::typography::{FontFaceSet, FontWeight};
use log::warn;

/// A built-in PDF font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Standard14 {
    Helvetica,
    HelveticaBold,
    TimesRoman,
    TimesBold,
    Courier,
    CourierBold,
}

/// How one font reference is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PdfFont {
    /// The registered face of this weight, embedded from its file
    Embedded(FontWeight),
    Standard(Standard14),
}

impl Standard14 {
    pub fn base_font(self) -> &'static str {
        match self {
            Standard14::Helvetica => "Helvetica",
            Standard14::HelveticaBold => "Helvetica-Bold",
            Standard14::TimesRoman => "Times-Roman",
            Standard14::TimesBold => "Times-Bold",
            Standard14::Courier => "Courier",
            Standard14::CourierBold => "Courier-Bold",
        }
    }

    /// Standard font for `font` on top of a fallback body family
    pub fn for_ref(fallback_family: &str, font: FontRef) -> Self {
        let bold = font.weight != FontWeight::Regular;
        match (font.face, fallback_family == "Times-Roman", bold) {
            (Face::Mono, _, false) => Standard14::Courier,
            (Face::Mono, _, true) => Standard14::CourierBold,
            (Face::Body, true, false) => Standard14::TimesRoman,
            (Face::Body, true, true) => Standard14::TimesBold,
            (Face::Body, false, false) => Standard14::Helvetica,
            (Face::Body, false, true) => Standard14::HelveticaBold,
        }
    }

    /// Advance of `c` in thousandths of an em, as drawn through WinAnsiEncoding
    pub fn advance(self, c: char) -> u16 {
        if matches!(self, Standard14::Courier | Standard14::CourierBold) {
            return 600;
        }
        let c = if win_ansi(c).is_some() { c } else { '?' };
        let ascii = |c: char| -> u16 {
            let table = match self {
                Standard14::Helvetica => &HELVETICA,
                Standard14::HelveticaBold => &HELVETICA_BOLD,
                Standard14::TimesRoman => &TIMES_ROMAN,
                _ => &TIMES_BOLD,
            };
            table[(c as usize) - 32]
        };
        match c {
            ' '..='~' => ascii(c),
            '\u{a0}' => ascii(' '),
            '\u{2013}' | '\u{20ac}' => ascii('0'),
            '\u{2014}' => 1000,
            '\u{2022}' => 350,
            '\u{2019}' => ascii('\''),
            '\u{201c}' | '\u{201d}' => ascii('"'),
            '\u{203a}' => 333,
            '\u{b7}' => ascii('.'),
            // Latin-1 letters share the width of their unaccented base letter
            c => ascii(latin1_base(c).unwrap_or('o')),
        }
    }
}

/// WinAnsiEncoding byte for `c`, if it has one
pub fn win_ansi(c: char) -> Option<u8> {
    match c {
        '\u{20ac}' => Some(0x80),
        '\u{2022}' => Some(0x95),
        '\u{2013}' => Some(0x96),
        '\u{2014}' => Some(0x97),
        '\u{2019}' => Some(0x92),
        '\u{201c}' => Some(0x93),
        '\u{201d}' => Some(0x94),
        '\u{203a}' => Some(0x9b),
        ' '..='~' | '\u{a0}'..='\u{ff}' => Some(c as u8),
        _ => None,
    }
}

fn latin1_base(c: char) -> Option<char> {
    let base = match c {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    };
    Some(base)
}

/// Metrics for one print document: its registered faces plus the fallback family
pub struct FontMetrics<'a> {
    fallback_family: String,
    set: Option<&'a FontFaceSet>,
    faces: Vec<(FontWeight, ttf_parser::Face<'a>)>,
}

impl<'a> FontMetrics<'a> {
    /// Parse every registered face that carries file data
    pub fn new(fallback_family: &str, set: Option<&'a FontFaceSet>) -> Self {
        let mut faces = Vec::new();
        for face in set.map(|s| s.faces.as_slice()).unwrap_or_default() {
            let Some(data) = face.data.as_deref() else { continue };
            match ttf_parser::Face::parse(data, 0) {
                Ok(parsed) => faces.push((face.weight, parsed)),
                Err(e) => warn!("font file {} is not a usable TrueType face: {}", face.src, e),
            }
        }
        Self { fallback_family: fallback_family.to_string(), set, faces }
    }

    /// Metrics with only the built-in families
    pub fn standard(fallback_family: &str) -> Self {
        Self::new(fallback_family, None)
    }

    pub fn pdf_font(&self, font: FontRef) -> PdfFont {
        if font.face == Face::Body {
            let chosen = self.set.and_then(|s| s.face_for(font.weight)).map(|f| f.weight);
            if let Some(weight) = chosen.filter(|w| self.face(*w).is_some()) {
                return PdfFont::Embedded(weight);
            }
        }
        PdfFont::Standard(Standard14::for_ref(&self.fallback_family, font))
    }

    /// Parsed face registered for exactly `weight`
    pub fn face(&self, weight: FontWeight) -> Option<&ttf_parser::Face<'a>> {
        self.faces.iter().find(|(w, _)| *w == weight).map(|(_, f)| f)
    }

    /// Advance of `c` in thousandths of an em
    pub fn advance(&self, c: char, font: FontRef) -> f32 {
        match self.pdf_font(font) {
            PdfFont::Standard(standard) => standard.advance(c) as f32,
            PdfFont::Embedded(weight) => match self.face(weight) {
                Some(face) => embedded_advance(face, c),
                None => Standard14::for_ref(&self.fallback_family, font).advance(c) as f32,
            },
        }
    }

    pub fn text_width(&self, text: &str, size: f32, font: FontRef) -> f32 {
        text.chars().map(|c| self.advance(c, font)).sum::<f32>() * size / 1000.0
    }
}

/// Glyph drawn for `c`; characters missing from the face use `.notdef`
pub fn glyph_for(face: &ttf_parser::Face<'_>, c: char) -> ttf_parser::GlyphId {
    face.glyph_index(c).unwrap_or(ttf_parser::GlyphId(0))
}

/// Advance of a glyph in thousandths of an em
pub fn glyph_advance(face: &ttf_parser::Face<'_>, glyph: ttf_parser::GlyphId) -> f32 {
    let units = face.glyph_hor_advance(glyph).unwrap_or(0) as f32;
    units * 1000.0 / face.units_per_em().max(1) as f32
}

fn embedded_advance(face: &ttf_parser::Face<'_>, c: char) -> f32 {
    glyph_advance(face, glyph_for(face, c))
}

// AFM advance widths for U+0020..=U+007E.

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typography::FontFace;
    use std::sync::Arc;

    const MONTSERRAT: &[u8] = include_bytes!("../../tests/fixtures/fonts/Montserrat-Regular.ttf");

    fn body(weight: FontWeight) -> FontRef {
        FontRef { face: Face::Body, weight }
    }

    fn montserrat(data: Vec<u8>) -> FontFaceSet {
        FontFaceSet {
            family: "Montserrat".into(),
            faces: vec![FontFace { weight: FontWeight::Regular, src: "https://f/r.ttf".into(), data: Some(Arc::new(data)) }],
        }
    }

    #[test]
    fn standard_widths_follow_afm() {
        let metrics = FontMetrics::standard("Helvetica");
        assert_eq!(metrics.advance('W', body(FontWeight::Bold)), 944.0);
        assert_eq!(metrics.advance('i', body(FontWeight::Regular)), 222.0);
        assert_eq!(metrics.advance('é', body(FontWeight::Regular)), 556.0);

        let serif = FontMetrics::standard("Times-Roman");
        assert_eq!(serif.pdf_font(body(FontWeight::Black)), PdfFont::Standard(Standard14::TimesBold));
        assert_eq!(serif.advance('W', body(FontWeight::Black)), 1000.0);
        assert_eq!(serif.text_width("WW", 12.0, body(FontWeight::Bold)), 24.0);
        let mono = FontRef { face: Face::Mono, weight: FontWeight::Regular };
        assert_eq!(serif.advance('i', mono), 600.0);
    }

    #[test]
    fn unencodable_characters_measure_as_question_mark() {
        let metrics = FontMetrics::standard("Helvetica");
        assert_eq!(metrics.advance('Ł', body(FontWeight::Regular)), metrics.advance('?', body(FontWeight::Regular)));
        assert_eq!(win_ansi('Ł'), None);
        assert_eq!(win_ansi('\u{2013}'), Some(0x96));
        assert_eq!(win_ansi('é'), Some(0xe9));
    }

    #[test]
    fn registered_faces_measure_with_their_own_advances() {
        let set = montserrat(MONTSERRAT.to_vec());
        let metrics = FontMetrics::new("Helvetica", Some(&set));
        let regular = body(FontWeight::Regular);
        assert_eq!(metrics.pdf_font(regular), PdfFont::Embedded(FontWeight::Regular));
        // bold and black fall back to the only registered face
        assert_eq!(metrics.pdf_font(body(FontWeight::Black)), PdfFont::Embedded(FontWeight::Regular));

        let face = ttf_parser::Face::parse(MONTSERRAT, 0).expect("fixture parses");
        let expected = glyph_advance(&face, glyph_for(&face, 'W'));
        assert_eq!(metrics.advance('W', regular), expected);
        assert!(metrics.advance('W', regular) > metrics.advance('i', regular));
        assert!(metrics.advance('Ł', regular) > 0.0);
    }

    #[test]
    fn unparseable_files_use_the_fallback_family() {
        let set = montserrat(vec![0, 1, 0, 0, 0, 4, 0, 128]);
        let metrics = FontMetrics::new("Times-Roman", Some(&set));
        assert_eq!(metrics.pdf_font(body(FontWeight::Regular)), PdfFont::Standard(Standard14::TimesRoman));
        assert_eq!(metrics.advance('a', body(FontWeight::Regular)), 444.0);
    }
}
