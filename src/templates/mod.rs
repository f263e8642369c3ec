//! The closed template registry.
//!
//! Every template implements both [`ScreenTemplate`] and [`PrintTemplate`]
//! over the same [`ResumeView`]. Dispatch is a match on [`TemplateId`], so
//! adding a template means adding a variant and both implementations.

pub mod format;
pub mod parts;
pub mod view;

mod bold_impact;
mod clean_slate;
mod compact_pro;
mod executive;
mod lab_protocol;
mod mono_stack;

use crate::document::Document;
use crate::rendering::layout::{layout_document, Block, PageSpec};
use crate::rendering::metrics::FontMetrics;
use crate::rendering::screen::{Element, ScreenNode};
use crate::rendering::{PrintArtifact, PrintDocument, RenderedArtifact, ScreenArtifact};
use crate::typography::Typography;
use crate::Backend;
use format::MonthStyle;
use std::fmt;
pub use view::ResumeView;

/// Closed set of layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemplateId {
    #[default]
    LabProtocol,
    Executive,
    MonoStack,
    CleanSlate,
    BoldImpact,
    CompactPro,
}

impl TemplateId {
    pub const ALL: [TemplateId; 6] = [
        TemplateId::LabProtocol,
        TemplateId::Executive,
        TemplateId::MonoStack,
        TemplateId::CleanSlate,
        TemplateId::BoldImpact,
        TemplateId::CompactPro,
    ];

    pub fn id(self) -> &'static str {
        match self {
            TemplateId::LabProtocol => "lab-protocol",
            TemplateId::Executive => "the-executive",
            TemplateId::MonoStack => "mono-stack",
            TemplateId::CleanSlate => "clean-slate",
            TemplateId::BoldImpact => "bold-impact",
            TemplateId::CompactPro => "compact-pro",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TemplateId::LabProtocol => "Lab Protocol",
            TemplateId::Executive => "The Executive",
            TemplateId::MonoStack => "Mono Stack",
            TemplateId::CleanSlate => "Clean Slate",
            TemplateId::BoldImpact => "Bold Impact",
            TemplateId::CompactPro => "Compact Pro",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TemplateId::LabProtocol => "Technical sidebar layout with monospace section headers",
            TemplateId::Executive => "Top-down classic with high-contrast rules",
            TemplateId::MonoStack => "Two-column grid, tight and structured",
            TemplateId::CleanSlate => "Airy single column with a date column on the left",
            TemplateId::BoldImpact => "Dark header block with an accent bar",
            TemplateId::CompactPro => "Dense single column that fits more on a page",
        }
    }

    pub fn category(self) -> &'static str {
        match self {
            TemplateId::LabProtocol | TemplateId::MonoStack => "technical",
            TemplateId::Executive | TemplateId::CompactPro => "professional",
            TemplateId::CleanSlate => "minimal",
            TemplateId::BoldImpact => "creative",
        }
    }

    /// How month names are written in this template's dates
    pub fn month_style(self) -> MonthStyle {
        match self {
            TemplateId::CleanSlate => MonthStyle::Long,
            _ => MonthStyle::Short,
        }
    }

    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.id() == id)
    }

    /// Look up `id`, substituting `default` for anything outside the set
    pub fn from_id_or(id: &str, default: TemplateId) -> Self {
        Self::parse(id).unwrap_or(default)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Screen rendering of one template
pub trait ScreenTemplate {
    fn render_screen(&self, view: &ResumeView, typography: &Typography) -> Element;
}

/// Print rendering of one template
pub trait PrintTemplate {
    fn page(&self) -> PageSpec;
    fn render_print(&self, view: &ResumeView) -> Vec<Block>;
}

/// Render `document` with `template` for `backend`.
///
/// Pure: the same inputs always produce the same artifact.
pub fn render(template: TemplateId, document: &Document, typography: &Typography, backend: Backend) -> RenderedArtifact {
    let view = ResumeView::new(document, template.month_style());
    match backend {
        Backend::Screen => RenderedArtifact::Screen(render_screen(template, &view, typography)),
        Backend::Print => RenderedArtifact::Print(render_print(template, &view, typography)),
    }
}

fn render_screen(template: TemplateId, view: &ResumeView, typography: &Typography) -> ScreenArtifact {
    let root = match template {
        TemplateId::LabProtocol => lab_protocol::LabProtocol.render_screen(view, typography),
        TemplateId::Executive => executive::Executive.render_screen(view, typography),
        TemplateId::MonoStack => mono_stack::MonoStack.render_screen(view, typography),
        TemplateId::CleanSlate => clean_slate::CleanSlate.render_screen(view, typography),
        TemplateId::BoldImpact => bold_impact::BoldImpact.render_screen(view, typography),
        TemplateId::CompactPro => compact_pro::CompactPro.render_screen(view, typography),
    };
    ScreenArtifact {
        template,
        root: ScreenNode::Element(root.attr("data-template", template.id())),
        font_family: typography.css_family.clone(),
        stylesheet_url: typography.stylesheet_url.clone(),
    }
}

fn render_print(template: TemplateId, view: &ResumeView, typography: &Typography) -> PrintArtifact {
    let (page, blocks) = match template {
        TemplateId::LabProtocol => print_with(&lab_protocol::LabProtocol, view),
        TemplateId::Executive => print_with(&executive::Executive, view),
        TemplateId::MonoStack => print_with(&mono_stack::MonoStack, view),
        TemplateId::CleanSlate => print_with(&clean_slate::CleanSlate, view),
        TemplateId::BoldImpact => print_with(&bold_impact::BoldImpact, view),
        TemplateId::CompactPro => print_with(&compact_pro::CompactPro, view),
    };
    let fallback_family = typography.font.category().pdf_fallback().to_string();
    let metrics = FontMetrics::new(&fallback_family, typography.faces.as_deref());
    let pages = layout_document(&blocks, &page, &metrics);
    PrintArtifact {
        template,
        document: PrintDocument {
            page_width: page.width,
            page_height: page.height,
            pages,
            font_family: typography.pdf_family.clone(),
            fallback_family,
            faces: typography.faces.clone(),
            degraded: typography.degraded,
        },
    }
}

fn print_with<T: PrintTemplate>(template: &T, view: &ResumeView) -> (PageSpec, Vec<Block>) {
    (template.page(), template.render_print(view))
}

/// Root style shared by screen templates: page box plus the font family
fn page_css(typography: &Typography, extra: &str) -> String {
    format!(
        "font-family:{};width:210mm;min-height:297mm;box-sizing:border-box;background:#ffffff;color:#000000;{}",
        typography.css_family, extra
    )
}
