//! Typography: the closed font catalog and resolved typography contexts.
//!
//! The screen backend only needs a stylesheet URL and a CSS `font-family`
//! value, both pure lookups. The print backend needs concrete font files,
//! which come from the [`FontCache`] and degrade to a built-in family when
//! resolution fails.

pub mod cache;
pub mod parse;
pub mod source;

pub use cache::{FontCache, FontResolution};
pub use source::FontSource;
#[cfg(feature = "http")]
pub use source::GoogleFontsSource;

use std::fmt;
use std::sync::Arc;

/// Weights requested for PDF output: regular, bold and black
pub const PDF_WEIGHTS: [FontWeight; 3] = [FontWeight::Regular, FontWeight::Bold, FontWeight::Black];

/// Style category of a font family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontCategory {
    Serif,
    SansSerif,
}

impl FontCategory {
    pub fn css(self) -> &'static str {
        match self {
            FontCategory::Serif => "serif",
            FontCategory::SansSerif => "sans-serif",
        }
    }

    /// Built-in PDF family used when a font cannot be resolved
    pub fn pdf_fallback(self) -> &'static str {
        match self {
            FontCategory::Serif => "Times-Roman",
            FontCategory::SansSerif => "Helvetica",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontWeight {
    Regular,
    Bold,
    Black,
}

impl FontWeight {
    pub fn numeric(self) -> u16 {
        match self {
            FontWeight::Regular => 400,
            FontWeight::Bold => 700,
            FontWeight::Black => 900,
        }
    }

    pub fn from_numeric(value: u16) -> Option<Self> {
        match value {
            400 => Some(FontWeight::Regular),
            700 => Some(FontWeight::Bold),
            900 => Some(FontWeight::Black),
            _ => None,
        }
    }
}

/// Closed set of selectable fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontId {
    Archivo,
    #[default]
    Inter,
    Roboto,
    Lato,
    OpenSans,
    Merriweather,
    Montserrat,
    PlayfairDisplay,
    Raleway,
    SourceSans3,
}

impl FontId {
    pub const ALL: [FontId; 10] = [
        FontId::Archivo,
        FontId::Inter,
        FontId::Roboto,
        FontId::Lato,
        FontId::OpenSans,
        FontId::Merriweather,
        FontId::Montserrat,
        FontId::PlayfairDisplay,
        FontId::Raleway,
        FontId::SourceSans3,
    ];

    pub fn id(self) -> &'static str {
        match self {
            FontId::Archivo => "archivo",
            FontId::Inter => "inter",
            FontId::Roboto => "roboto",
            FontId::Lato => "lato",
            FontId::OpenSans => "open-sans",
            FontId::Merriweather => "merriweather",
            FontId::Montserrat => "montserrat",
            FontId::PlayfairDisplay => "playfair-display",
            FontId::Raleway => "raleway",
            FontId::SourceSans3 => "source-sans-3",
        }
    }

    /// Human family name, also the name the font service knows it by
    pub fn family(self) -> &'static str {
        match self {
            FontId::Archivo => "Archivo",
            FontId::Inter => "Inter",
            FontId::Roboto => "Roboto",
            FontId::Lato => "Lato",
            FontId::OpenSans => "Open Sans",
            FontId::Merriweather => "Merriweather",
            FontId::Montserrat => "Montserrat",
            FontId::PlayfairDisplay => "Playfair Display",
            FontId::Raleway => "Raleway",
            FontId::SourceSans3 => "Source Sans 3",
        }
    }

    pub fn category(self) -> FontCategory {
        match self {
            FontId::Merriweather | FontId::PlayfairDisplay => FontCategory::Serif,
            _ => FontCategory::SansSerif,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FontId::Archivo => "Sharp modern grotesque",
            FontId::Inter => "Clean UI typeface",
            FontId::Roboto => "Google signature font",
            FontId::Lato => "Warm humanist sans",
            FontId::OpenSans => "Neutral and friendly",
            FontId::Merriweather => "Highly readable serif",
            FontId::Montserrat => "Urban geometric sans",
            FontId::PlayfairDisplay => "Elegant high contrast",
            FontId::Raleway => "Thin elegant sans",
            FontId::SourceSans3 => "Adobe workhorse font",
        }
    }

    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.id() == id)
    }

    /// Look up `id`, substituting `default` for anything outside the catalog
    pub fn from_id_or(id: &str, default: FontId) -> Self {
        Self::parse(id).unwrap_or(default)
    }

    /// CSS `font-family` value for the screen backend, e.g. `"Open Sans", sans-serif`
    pub fn css_family(self) -> String {
        format!("\"{}\", {}", self.family(), self.category().css())
    }

    /// Stylesheet URL loading weights 400/700/900 for the screen backend
    pub fn stylesheet_url(self, endpoint: &str) -> String {
        let family: String = url::form_urlencoded::byte_serialize(self.family().as_bytes()).collect();
        // byte_serialize encodes spaces as '+', which the css2 endpoint accepts
        format!("{}?family={}:wght@400;700;900&display=swap", endpoint, family)
    }
}

impl fmt::Display for FontId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One downloadable (and possibly downloaded) font file
#[derive(Debug, Clone, PartialEq)]
pub struct FontFace {
    pub weight: FontWeight,
    /// Asset URL as referenced by the font description
    pub src: String,
    /// File bytes, present when files are embedded
    pub data: Option<Arc<Vec<u8>>>,
}

/// The registered faces of one family, ordered by weight
#[derive(Debug, Clone, PartialEq)]
pub struct FontFaceSet {
    pub family: String,
    pub faces: Vec<FontFace>,
}

impl FontFaceSet {
    /// Exact weight if registered, else the nearest lighter one, else the lightest
    pub fn face_for(&self, weight: FontWeight) -> Option<&FontFace> {
        self.faces
            .iter()
            .find(|f| f.weight == weight)
            .or_else(|| self.faces.iter().rev().find(|f| f.weight < weight))
            .or_else(|| self.faces.first())
    }
}

/// Resolved typography handed to a template.
///
/// `pdf_family` is the registered family when resolution succeeded and the
/// built-in fallback otherwise; `degraded` records which one it is.
#[derive(Debug, Clone, PartialEq)]
pub struct Typography {
    pub font: FontId,
    pub css_family: String,
    pub stylesheet_url: String,
    pub pdf_family: String,
    pub faces: Option<Arc<FontFaceSet>>,
    pub degraded: bool,
}

impl Typography {
    /// Typography for the screen backend (no resolution involved)
    pub fn screen(font: FontId, stylesheet_endpoint: &str) -> Self {
        Self {
            font,
            css_family: font.css_family(),
            stylesheet_url: font.stylesheet_url(stylesheet_endpoint),
            pdf_family: font.category().pdf_fallback().to_string(),
            faces: None,
            degraded: false,
        }
    }

    /// Typography for the print backend from a cache resolution
    pub fn print(font: FontId, resolution: &FontResolution, stylesheet_endpoint: &str) -> Self {
        let mut typography = Self::screen(font, stylesheet_endpoint);
        match &resolution.faces {
            Some(faces) if resolution.registered => {
                typography.pdf_family = faces.family.clone();
                typography.faces = Some(faces.clone());
            }
            _ => typography.degraded = true,
        }
        typography
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_round_trips_ids() {
        for font in FontId::ALL {
            assert_eq!(FontId::parse(font.id()), Some(font));
        }
        assert_eq!(FontId::parse("comic-sans"), None);
        assert_eq!(FontId::from_id_or("comic-sans", FontId::Inter), FontId::Inter);
    }

    #[test]
    fn css_family_names_category() {
        assert_eq!(FontId::OpenSans.css_family(), "\"Open Sans\", sans-serif");
        assert_eq!(FontId::Merriweather.css_family(), "\"Merriweather\", serif");
    }

    #[test]
    fn stylesheet_url_encodes_family() {
        let url = FontId::PlayfairDisplay.stylesheet_url("https://fonts.googleapis.com/css2");
        assert_eq!(
            url,
            "https://fonts.googleapis.com/css2?family=Playfair+Display:wght@400;700;900&display=swap"
        );
    }

    #[test]
    fn face_for_prefers_exact_then_lighter() {
        let set = FontFaceSet {
            family: "Inter".into(),
            faces: vec![
                FontFace { weight: FontWeight::Regular, src: "r".into(), data: None },
                FontFace { weight: FontWeight::Bold, src: "b".into(), data: None },
            ],
        };
        assert_eq!(set.face_for(FontWeight::Bold).map(|f| f.src.as_str()), Some("b"));
        assert_eq!(set.face_for(FontWeight::Black).map(|f| f.src.as_str()), Some("b"));

        let only_black = FontFaceSet {
            family: "Inter".into(),
            faces: vec![FontFace { weight: FontWeight::Black, src: "k".into(), data: None }],
        };
        assert_eq!(only_black.face_for(FontWeight::Regular).map(|f| f.src.as_str()), Some("k"));
    }

    #[test]
    fn print_typography_falls_back_by_category() {
        let failed = FontResolution { font: FontId::Merriweather, registered: false, faces: None };
        let t = Typography::print(FontId::Merriweather, &failed, "https://x");
        assert!(t.degraded);
        assert_eq!(t.pdf_family, "Times-Roman");
    }
}
