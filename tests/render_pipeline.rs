use futures::future::{BoxFuture, FutureExt};
use resumekit::document::{Experience, Language, Proficiency, SkillGroup};
use resumekit::typography::{FontSource, FontWeight};
use resumekit::{Backend, Document, Error, FontCache, Renderer, RendererConfig, ResumeRecord, Result, TemplateId};
use std::sync::Arc;

/// Source that always fails, so print renders use the built-in family
struct Unreachable;

impl FontSource for Unreachable {
    fn describe<'a>(&'a self, family: &'a str, _weights: &'a [FontWeight]) -> BoxFuture<'a, Result<String>> {
        async move { Err(Error::FontLookup(format!("{} unreachable", family))) }.boxed()
    }

    fn fetch_file<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>>> {
        async move { Err(Error::FontLookup(format!("{} unreachable", url))) }.boxed()
    }
}

fn renderer() -> Renderer {
    let cache = Arc::new(FontCache::new(Arc::new(Unreachable)));
    Renderer::with_font_cache(RendererConfig::default(), cache).expect("renderer")
}

fn scenario() -> Document {
    let mut doc = Document::empty();
    doc.personal_info.full_name = "Jane Doe".into();
    doc.personal_info.email = "jane@example.com".into();
    doc.personal_info.linkedin = "linkedin.com/in/jane".into();
    doc.experience.push(Experience {
        id: "1".into(),
        company: "Acme".into(),
        position: "Engineer".into(),
        start_date: "2020-01".into(),
        current: true,
        highlights: vec!["Built X".into(), "Shipped Y".into()],
        ..Default::default()
    });
    doc.skills.push(SkillGroup { id: "s".into(), category: "Languages".into(), items: vec!["Rust".into(), "Go".into()] });
    doc.languages.push(Language { id: "l".into(), language: "French".into(), proficiency: Proficiency::Fluent });
    doc
}

#[tokio::test]
async fn every_template_renders_the_scenario_on_both_backends() {
    let renderer = renderer();
    let doc = scenario();

    for template in TemplateId::ALL {
        for backend in [Backend::Screen, Backend::Print] {
            let artifact = renderer
                .render_document(&doc, template.id(), "inter", backend)
                .await
                .expect("render");
            assert_eq!(artifact.template(), template);

            let text = artifact.text();
            for needle in ["Jane Doe", "Engineer", "Acme", "Present", "Built X", "Shipped Y", "Rust", "French", "Fluent"] {
                assert!(text.contains(needle), "{} {:?} missing '{}'", template, backend, needle);
            }
            let engineer = text.find("Engineer").unwrap_or(usize::MAX);
            let acme = text.find("Acme").unwrap_or(0);
            let present = text.find("Present").unwrap_or(0);
            let built = text.find("Built X").unwrap_or(0);
            let shipped = text.find("Shipped Y").unwrap_or(0);
            assert!(
                engineer < acme && acme < present && present < built && built < shipped,
                "{} {:?}",
                template,
                backend
            );

            match backend {
                Backend::Screen => {
                    let screen = artifact.as_screen().expect("screen");
                    let hrefs: Vec<&str> = screen.root.find_tag("a").iter().filter_map(|a| a.get_attr("href")).collect();
                    assert!(hrefs.contains(&"https://linkedin.com/in/jane"), "{}: {:?}", template, hrefs);
                }
                Backend::Print => {
                    let print = artifact.as_print().expect("print");
                    assert!(print.document.degraded);
                    assert!(print.document.links().contains(&"https://linkedin.com/in/jane"));
                    let pdf = print.document.to_pdf().expect("pdf");
                    assert!(pdf.starts_with(b"%PDF-1.7"));
                }
            }
        }
    }
}

#[tokio::test]
async fn unknown_selectors_fall_back_to_defaults() {
    let renderer = renderer();
    let artifact = renderer
        .render_document(&scenario(), "nonexistent", "unknown-font", Backend::Screen)
        .await
        .expect("render");
    assert_eq!(artifact.template(), TemplateId::LabProtocol);
    let screen = artifact.as_screen().expect("screen");
    assert_eq!(screen.font_family, "\"Inter\", sans-serif");
}

#[tokio::test]
async fn configured_defaults_apply_to_unknown_selectors() {
    let config = RendererConfig::from_json_str(r#"{"default_template": "bold-impact", "default_font": "merriweather"}"#)
        .expect("config");
    let renderer = Renderer::with_font_cache(config, Arc::new(FontCache::new(Arc::new(Unreachable)))).expect("renderer");
    let artifact = renderer
        .render_document(&scenario(), "", "", Backend::Print)
        .await
        .expect("render");
    assert_eq!(artifact.template(), TemplateId::BoldImpact);
    assert_eq!(artifact.as_print().expect("print").document.font_family, "Times-Roman");
}

#[tokio::test]
async fn structurally_invalid_documents_are_rejected() {
    let renderer = renderer();

    let mut duplicate = scenario();
    duplicate.experience.push(duplicate.experience[0].clone());
    let err = renderer.render_document(&duplicate, "lab-protocol", "inter", Backend::Screen).await.unwrap_err();
    assert!(matches!(err, Error::InvalidDocument(_)), "{}", err);

    let mut bad_date = scenario();
    bad_date.experience[0].start_date = "2020/01".into();
    let err = renderer.render_document(&bad_date, "lab-protocol", "inter", Backend::Print).await.unwrap_err();
    assert!(matches!(err, Error::InvalidDocument(_)), "{}", err);

    // the end date of a current entry is void and never inspected
    let mut void_end = scenario();
    void_end.experience[0].end_date = Some("whenever".into());
    assert!(renderer.render_document(&void_end, "lab-protocol", "inter", Backend::Screen).await.is_ok());
}

#[tokio::test]
async fn stored_records_carry_their_selections() {
    let json = r#"{
        "title": "Backend roles",
        "templateId": "compact-pro",
        "fontId": "playfair-display",
        "data": { "personalInfo": { "fullName": "Jane Doe" } }
    }"#;
    let record: ResumeRecord = serde_json::from_str(json).expect("record");
    let artifact = renderer().render_record(&record, Backend::Screen).await.expect("render");
    assert_eq!(artifact.template(), TemplateId::CompactPro);
    assert_eq!(artifact.as_screen().expect("screen").font_family, "\"Playfair Display\", serif");
}

#[tokio::test]
async fn long_documents_paginate_without_losing_entries() {
    let mut doc = scenario();
    for i in 0..40 {
        doc.experience.push(Experience {
            id: format!("x{}", i),
            company: format!("Company {}", i),
            position: "Contractor".into(),
            start_date: "2010-01".into(),
            end_date: Some("2011-01".into()),
            description: "Shipped several things that mattered to several people.".into(),
            highlights: vec!["One".into(), "Two".into()],
            ..Default::default()
        });
    }

    for template in TemplateId::ALL {
        let artifact = renderer()
            .render_document(&doc, template.id(), "inter", Backend::Print)
            .await
            .expect("render");
        let print = artifact.as_print().expect("print");
        assert!(print.document.pages.len() > 1, "{} fit 40 entries on one page", template);
        let text = print.document.text();
        assert!(text.contains("Company 0"), "{}", template);
        assert!(text.contains("Company 39"), "{}", template);
    }
}
