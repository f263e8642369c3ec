//! The dual renderer: one entry point for both backends

use crate::document::{Document, ResumeRecord};
use crate::rendering::RenderedArtifact;
use crate::templates::{self, TemplateId};
use crate::typography::{FontCache, FontId, Typography};
use crate::{Backend, RendererConfig, Result};
use log::{debug, info, warn};
use std::sync::Arc;

/// Renders documents with any template for either backend.
///
/// Holds the process-wide [`FontCache`]; clone the `Arc` into every renderer
/// that should share resolved fonts.
pub struct Renderer {
    config: RendererConfig,
    fonts: Arc<FontCache>,
    default_template: TemplateId,
    default_font: FontId,
}

impl Renderer {
    /// Renderer backed by the Google Fonts CSS API
    #[cfg(feature = "http")]
    pub fn new(config: RendererConfig) -> Result<Self> {
        let source = crate::typography::GoogleFontsSource::new(&config)?;
        let fonts = Arc::new(FontCache::with_embedding(Arc::new(source), config.embed_font_files));
        Self::with_font_cache(config, fonts)
    }

    /// Renderer sharing an existing font cache
    pub fn with_font_cache(config: RendererConfig, fonts: Arc<FontCache>) -> Result<Self> {
        let (default_template, default_font) = config.defaults()?;
        Ok(Self { config, fonts, default_template, default_font })
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn font_cache(&self) -> &Arc<FontCache> {
        &self.fonts
    }

    /// Render `document` with the selected template and font.
    ///
    /// Unknown selectors fall back to the configured defaults. For
    /// [`Backend::Print`] the font is resolved first and a failed resolution
    /// degrades to the built-in family; the only error is a document that
    /// fails [`Document::validate`].
    pub async fn render_document(
        &self,
        document: &Document,
        template_id: &str,
        font_id: &str,
        backend: Backend,
    ) -> Result<RenderedArtifact> {
        document.validate()?;

        let template = TemplateId::parse(template_id).unwrap_or_else(|| {
            debug!("unknown template '{}', using '{}'", template_id, self.default_template);
            self.default_template
        });
        let font = FontId::parse(font_id).unwrap_or_else(|| {
            debug!("unknown font '{}', using '{}'", font_id, self.default_font);
            self.default_font
        });

        let typography = match backend {
            Backend::Screen => Typography::screen(font, &self.config.screen_css_endpoint),
            Backend::Print => {
                let resolution = self.fonts.resolve(font).await;
                let typography = Typography::print(font, &resolution, &self.config.screen_css_endpoint);
                if typography.degraded {
                    warn!("rendering '{}' with fallback family {}", font, typography.pdf_family);
                }
                typography
            }
        };

        let artifact = templates::render(template, document, &typography, backend);
        info!("rendered {:?} with template '{}' and font '{}'", backend, template, font);
        Ok(artifact)
    }

    /// Render a stored record with its own template and font selection
    pub async fn render_record(&self, record: &ResumeRecord, backend: Backend) -> Result<RenderedArtifact> {
        self.render_document(&record.data, &record.template_id, &record.font_id, backend).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typography::{FontSource, FontWeight};
    use crate::Error;
    use futures::future::{BoxFuture, FutureExt};

    struct Offline;

    impl FontSource for Offline {
        fn describe<'a>(&'a self, _family: &'a str, _weights: &'a [FontWeight]) -> BoxFuture<'a, Result<String>> {
            async { Err(Error::FontLookup("offline".into())) }.boxed()
        }

        fn fetch_file<'a>(&'a self, _url: &'a str) -> BoxFuture<'a, Result<Vec<u8>>> {
            async { Err(Error::FontLookup("offline".into())) }.boxed()
        }
    }

    fn renderer() -> Renderer {
        Renderer::with_font_cache(RendererConfig::default(), Arc::new(FontCache::new(Arc::new(Offline)))).expect("renderer")
    }

    #[tokio::test]
    async fn unknown_selectors_use_defaults() {
        let artifact = renderer()
            .render_document(&Document::empty(), "no-such-template", "wingdings", Backend::Screen)
            .await
            .expect("render");
        assert_eq!(artifact.template(), TemplateId::LabProtocol);
        assert_eq!(artifact.as_screen().map(|s| s.font_family.as_str()), Some("\"Inter\", sans-serif"));
    }

    #[tokio::test]
    async fn offline_print_degrades_to_fallback() {
        let artifact = renderer()
            .render_document(&Document::empty(), "clean-slate", "merriweather", Backend::Print)
            .await
            .expect("render");
        let print = artifact.as_print().expect("print");
        assert!(print.document.degraded);
        assert_eq!(print.document.font_family, "Times-Roman");
    }

    #[tokio::test]
    async fn invalid_document_is_a_structural_error() {
        let mut doc = Document::empty();
        doc.certifications.push(crate::document::Certification {
            id: "c1".into(),
            date: "last spring".into(),
            ..Default::default()
        });
        let err = renderer().render_document(&doc, "mono-stack", "inter", Backend::Screen).await.unwrap_err();
        assert!(matches!(err, Error::InvalidDocument(_)));
    }

    #[test]
    fn bad_configured_default_is_rejected() {
        let config = RendererConfig { default_template: "fancy".into(), ..Default::default() };
        let result = Renderer::with_font_cache(config, Arc::new(FontCache::new(Arc::new(Offline))));
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }
}
