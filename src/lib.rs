//! resumekit
//!
//! Renders one structured résumé document through a family of visual
//! templates, each with a screen backend (an HTML element tree) and a print
//! backend (paginated A4 pages serialized to PDF).
//!
//! # Features
//!
//! - **Six templates**: every template consumes the same [`Document`]
//! - **Dual backends**: [`Backend::Screen`] and [`Backend::Print`]
//! - **Font resolution cache**: print fonts are resolved once per process,
//!   concurrent requests share one lookup, and failures degrade to a
//!   built-in family instead of failing the render
//!
//! # Example
//!
//! ```no_run
//! use resumekit::{Backend, Document, Renderer, RendererConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let renderer = Renderer::new(RendererConfig::default())?;
//! let document = Document::from_json(r#"{"personalInfo": {"fullName": "Ada Lovelace"}}"#)?;
//!
//! let artifact = renderer
//!     .render_document(&document, "the-executive", "merriweather", Backend::Print)
//!     .await?;
//! let pdf = artifact.as_print().expect("print artifact").document.to_pdf()?;
//! std::fs::write("resume.pdf", pdf)?;
//! # Ok(())
//! # }
//! ```

use serde::Deserialize;
use std::path::Path;

pub mod document;
pub mod error;
pub mod renderer;
pub mod rendering;
pub mod templates;
pub mod typography;

pub use document::{Document, ResumeRecord};
pub use error::{Error, Result};
pub use renderer::Renderer;
pub use rendering::RenderedArtifact;
pub use templates::TemplateId;
pub use typography::{FontCache, FontId};

/// Output backend of a render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    /// Interactive element tree for display and live preview
    #[default]
    Screen,
    /// Fixed-size A4 pages for PDF export
    Print,
}

impl Backend {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "screen" | "html" => Some(Backend::Screen),
            "print" | "pdf" => Some(Backend::Print),
            _ => None,
        }
    }
}

/// Configuration for the renderer
///
/// The defaults talk to the public Google Fonts CSS API and embed font files
/// in PDF output. Any field can be omitted from a JSON config file.
///
/// # Examples
///
/// ```
/// let cfg = resumekit::RendererConfig::default();
/// assert_eq!(cfg.default_template, "lab-protocol");
/// assert!(cfg.embed_font_files);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererConfig {
    /// Font description endpoint used by the print backend (CSS API v1)
    pub font_css_endpoint: String,
    /// Stylesheet endpoint referenced by screen output (CSS API v2)
    pub screen_css_endpoint: String,
    /// User agent sent to the description endpoint; an old agent gets TrueType URLs
    pub font_user_agent: String,
    /// Timeout for each font request in milliseconds
    pub timeout_ms: u64,
    /// Whether to download font files for embedding (otherwise URLs only)
    pub embed_font_files: bool,
    /// Template used when a selector is unknown
    pub default_template: String,
    /// Font used when a selector is unknown
    pub default_font: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            font_css_endpoint: "https://fonts.googleapis.com/css".to_string(),
            screen_css_endpoint: "https://fonts.googleapis.com/css2".to_string(),
            font_user_agent: "Mozilla/5.0 (Windows NT 6.3; Trident/7.0; rv:11.0) like Gecko".to_string(),
            timeout_ms: 15000,
            embed_font_files: true,
            default_template: TemplateId::default().id().to_string(),
            default_font: FontId::default().id().to_string(),
        }
    }
}

impl RendererConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))?;
        config.defaults()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::ConfigError(format!("Failed to read config {}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// The configured default selectors, which must name catalog entries
    pub fn defaults(&self) -> Result<(TemplateId, FontId)> {
        let template = TemplateId::parse(&self.default_template)
            .ok_or_else(|| Error::ConfigError(format!("Unknown default template '{}'", self.default_template)))?;
        let font = FontId::parse(&self.default_font)
            .ok_or_else(|| Error::ConfigError(format!("Unknown default font '{}'", self.default_font)))?;
        Ok((template, font))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RendererConfig::default();
        assert_eq!(config.timeout_ms, 15000);
        assert_eq!(config.default_font, "inter");
        assert!(config.font_css_endpoint.ends_with("/css"));
        assert_eq!(config.defaults().unwrap(), (TemplateId::LabProtocol, FontId::Inter));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = RendererConfig::from_json_str(r#"{"timeout_ms": 500, "default_template": "compact-pro"}"#).unwrap();
        assert_eq!(config.timeout_ms, 500);
        assert_eq!(config.default_template, "compact-pro");
        assert!(config.embed_font_files);
    }

    #[test]
    fn test_config_rejects_unknown_defaults() {
        let err = RendererConfig::from_json_str(r#"{"default_font": "papyrus"}"#).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
        let err = RendererConfig::from_json_str(r#"{"fonts": []}"#).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!(Backend::parse("PDF"), Some(Backend::Print));
        assert_eq!(Backend::parse("screen"), Some(Backend::Screen));
        assert_eq!(Backend::parse("svg"), None);
        assert_eq!(Backend::default(), Backend::Screen);
    }
}
