use std::fs;
use std::path::PathBuf;

use resumekit::templates::{self, TemplateId};
use resumekit::typography::{FontId, Typography};
use resumekit::{Backend, Document};

const GOLDEN_DIR: &str = "tests/goldens/expected";

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from(GOLDEN_DIR);
    p.push(name);
    p
}

fn fixture() -> Document {
    let json = fs::read_to_string("tests/fixtures/resume.json").expect("read fixture");
    Document::from_json(&json).expect("parse fixture")
}

/// Compare `render()` against the stored golden.
///
/// With `UPDATE_GOLDENS` set, or when no golden is stored yet, the first
/// render is written out and a second, independent render must match the
/// file read back. Otherwise the stored golden is authoritative.
fn check_golden(name: &str, render: impl Fn() -> String) {
    let path = golden_path(name);
    if std::env::var("UPDATE_GOLDENS").is_ok() || !path.exists() {
        fs::create_dir_all(GOLDEN_DIR).expect("create golden dir");
        fs::write(&path, render()).expect("write golden");
        println!("Wrote golden {:?}", path);
    }
    let expected = fs::read_to_string(&path).expect("unable to read golden");
    assert!(!expected.is_empty(), "golden {:?} is empty", path);
    assert_eq!(render(), expected, "output differs from {:?}", path);
}

#[test]
fn golden_fingerprints_match_fixture() {
    let doc = fixture();
    doc.validate().expect("fixture is valid");
    let typography = Typography::screen(FontId::SourceSans3, "https://fonts.googleapis.com/css2");

    check_golden("fingerprints.txt", || {
        let mut lines = Vec::new();
        for template in TemplateId::ALL {
            for (label, backend) in [("screen", Backend::Screen), ("print", Backend::Print)] {
                let artifact = templates::render(template, &doc, &typography, backend);
                lines.push(format!("{} {} {}", template.id(), label, artifact.fingerprint()));
            }
        }
        lines.join("\n") + "\n"
    });
}

#[test]
fn golden_print_dump_matches_fixture() {
    let doc = fixture();
    let typography = Typography::screen(FontId::Merriweather, "https://fonts.googleapis.com/css2");

    check_golden("executive-print.txt", || {
        let artifact = templates::render(TemplateId::Executive, &doc, &typography, Backend::Print);
        let dump = artifact.as_print().expect("print").document.dump();
        assert!(dump.contains("-- page 1"));
        dump
    });
}
