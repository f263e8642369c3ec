//! Backend primitives and the artifacts a render produces.
//!
//! The screen backend builds an element tree ([`screen`]); the print backend
//! builds flow blocks ([`layout`]) that are measured ([`metrics`]) and paginated into paint commands
//! ([`paint`]) and serialized to PDF ([`pdf`]).

pub mod layout;
pub mod metrics;
pub mod paint;
pub mod pdf;
pub mod screen;

use crate::templates::TemplateId;
use crate::typography::FontFaceSet;
use crate::Result;
use layout::PrintPage;
use paint::PaintCommand;
use screen::ScreenNode;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Output of the screen backend
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenArtifact {
    pub template: TemplateId,
    pub root: ScreenNode,
    /// CSS `font-family` value applied to the root
    pub font_family: String,
    pub stylesheet_url: String,
}

impl ScreenArtifact {
    /// Standalone HTML page: stylesheet link plus the rendered tree
    pub fn to_html_page(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><link rel=\"stylesheet\" href=\"{}\"></head><body style=\"margin:0;background:#e5e7eb\">{}</body></html>\n",
            self.stylesheet_url.replace('"', "&quot;"),
            self.root.to_html()
        )
    }

    pub fn text(&self) -> String {
        self.root.text_content()
    }

    pub fn fingerprint(&self) -> String {
        self.root.fingerprint()
    }
}

/// A paginated print document, ready for PDF serialization
#[derive(Debug, Clone, PartialEq)]
pub struct PrintDocument {
    pub page_width: f32,
    pub page_height: f32,
    pub pages: Vec<PrintPage>,
    /// Registered family, or the built-in fallback when degraded
    pub font_family: String,
    pub fallback_family: String,
    pub faces: Option<Arc<FontFaceSet>>,
    pub degraded: bool,
}

impl PrintDocument {
    /// Text runs of every page in paint order
    pub fn text_runs(&self) -> Vec<&str> {
        self.pages
            .iter()
            .flat_map(|p| p.commands.iter())
            .filter_map(|c| match c {
                PaintCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Text runs joined by newlines
    pub fn text(&self) -> String {
        self.text_runs().join("\n")
    }

    /// Text of runs marked as section headings
    pub fn headings(&self) -> Vec<&str> {
        self.pages
            .iter()
            .flat_map(|p| p.commands.iter())
            .filter_map(|c| match c {
                PaintCommand::Text { text, heading: true, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn links(&self) -> Vec<&str> {
        self.pages
            .iter()
            .flat_map(|p| p.commands.iter())
            .filter_map(|c| match c {
                PaintCommand::Link { href, .. } => Some(href.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Line-per-command dump of all pages
    pub fn dump(&self) -> String {
        let mut out = format!("page {}x{} font {}\n", self.page_width, self.page_height, self.font_family);
        for (i, page) in self.pages.iter().enumerate() {
            out.push_str(&format!("-- page {}\n", i + 1));
            for command in &page.commands {
                out.push_str(&command.describe());
                out.push('\n');
            }
        }
        out
    }

    pub fn fingerprint(&self) -> String {
        hex::encode(Sha256::digest(self.dump().as_bytes()))
    }

    pub fn to_pdf(&self) -> Result<Vec<u8>> {
        pdf::write_pdf(self)
    }
}

/// Output of the print backend
#[derive(Debug, Clone, PartialEq)]
pub struct PrintArtifact {
    pub template: TemplateId,
    pub document: PrintDocument,
}

/// Backend-specific render output
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedArtifact {
    Screen(ScreenArtifact),
    Print(PrintArtifact),
}

impl RenderedArtifact {
    pub fn template(&self) -> TemplateId {
        match self {
            RenderedArtifact::Screen(a) => a.template,
            RenderedArtifact::Print(a) => a.template,
        }
    }

    pub fn as_screen(&self) -> Option<&ScreenArtifact> {
        match self {
            RenderedArtifact::Screen(a) => Some(a),
            RenderedArtifact::Print(_) => None,
        }
    }

    pub fn as_print(&self) -> Option<&PrintArtifact> {
        match self {
            RenderedArtifact::Print(a) => Some(a),
            RenderedArtifact::Screen(_) => None,
        }
    }

    /// Visible text in document order
    pub fn text(&self) -> String {
        match self {
            RenderedArtifact::Screen(a) => a.text(),
            RenderedArtifact::Print(a) => a.document.text(),
        }
    }

    pub fn fingerprint(&self) -> String {
        match self {
            RenderedArtifact::Screen(a) => a.fingerprint(),
            RenderedArtifact::Print(a) => a.document.fingerprint(),
        }
    }
}
