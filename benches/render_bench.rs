use criterion::{criterion_group, criterion_main, Criterion};

use resumekit::templates::{self, TemplateId};
use resumekit::typography::{FontId, Typography};
use resumekit::{Backend, Document};

fn fixture() -> Document {
    let json = std::fs::read_to_string("tests/fixtures/resume.json").expect("read fixture");
    Document::from_json(&json).expect("parse fixture")
}

fn bench_screen(c: &mut Criterion) {
    let doc = fixture();
    let typography = Typography::screen(FontId::Inter, "https://fonts.googleapis.com/css2");

    for template in TemplateId::ALL {
        c.bench_function(&format!("screen_{}", template.id()), |b| {
            b.iter(|| templates::render(template, &doc, &typography, Backend::Screen))
        });
    }
}

fn bench_print(c: &mut Criterion) {
    let doc = fixture();
    let typography = Typography::screen(FontId::Inter, "https://fonts.googleapis.com/css2");

    c.bench_function("print_layout_lab_protocol", |b| {
        b.iter(|| templates::render(TemplateId::LabProtocol, &doc, &typography, Backend::Print))
    });

    let artifact = templates::render(TemplateId::Executive, &doc, &typography, Backend::Print);
    let document = artifact.as_print().expect("print").document.clone();
    c.bench_function("pdf_serialize_executive", |b| {
        b.iter(|| document.to_pdf().unwrap())
    });
}

fn bench_document_json(c: &mut Criterion) {
    let json = std::fs::read_to_string("tests/fixtures/resume.json").expect("read fixture");
    c.bench_function("document_from_json", |b| {
        b.iter(|| {
            let doc = Document::from_json(&json).unwrap();
            doc.validate().unwrap();
        })
    });
}

criterion_group!(benches, bench_screen, bench_print, bench_document_json);
criterion_main!(benches);
