use resumekit::{Backend, Document, Renderer, RendererConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tiny_http::{Response, Server};

const MONTSERRAT: &[u8] = include_bytes!("fixtures/fonts/Montserrat-Regular.ttf");

struct FontServer {
    base: String,
    describes: Arc<AtomicUsize>,
    files: Arc<AtomicUsize>,
}

/// Serve a CSS description and a real TrueType file for every weight; `status` applies to the description
fn spawn_font_server(status: u16) -> FontServer {
    let server = Server::http("127.0.0.1:0").unwrap();
    let base = format!("http://{}", server.server_addr());
    let describes = Arc::new(AtomicUsize::new(0));
    let files = Arc::new(AtomicUsize::new(0));

    let (d, f, host) = (describes.clone(), files.clone(), base.clone());
    std::thread::spawn(move || {
        for req in server.incoming_requests() {
            let (d, f, host) = (d.clone(), f.clone(), host.clone());
            std::thread::spawn(move || {
                let path = req.url().to_string();
                if path.starts_with("/css") {
                    d.fetch_add(1, Ordering::SeqCst);
                    // emulate latency so concurrent renders overlap
                    std::thread::sleep(Duration::from_millis(80));
                    let css = [400, 700, 900]
                        .iter()
                        .map(|w| {
                            format!(
                                "@font-face {{ font-family: 'Open Sans'; font-style: normal; font-weight: {w}; src: url({host}/files/{w}.ttf) format('truetype'); }}\n"
                            )
                        })
                        .collect::<String>();
                    let _ = req.respond(Response::from_string(css).with_status_code(status));
                } else if path.starts_with("/files/") {
                    f.fetch_add(1, Ordering::SeqCst);
                    let _ = req.respond(Response::from_data(MONTSERRAT.to_vec()));
                } else {
                    let _ = req.respond(Response::from_string("").with_status_code(404));
                }
            });
        }
    });

    FontServer { base, describes, files }
}

fn config_for(server: &FontServer) -> RendererConfig {
    RendererConfig {
        font_css_endpoint: format!("{}/css", server.base),
        timeout_ms: 5000,
        ..Default::default()
    }
}

fn named(name: &str) -> Document {
    let mut doc = Document::empty();
    doc.personal_info.full_name = name.to_string();
    doc
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_print_renders_share_one_lookup() {
    let server = spawn_font_server(200);
    let renderer = Renderer::new(config_for(&server)).expect("renderer");
    let doc = named("Ada Lovelace");

    let renders = (0..8).map(|_| renderer.render_document(&doc, "the-executive", "open-sans", Backend::Print));
    let artifacts = futures::future::join_all(renders).await;

    assert_eq!(server.describes.load(Ordering::SeqCst), 1);
    assert_eq!(server.files.load(Ordering::SeqCst), 3);
    for artifact in artifacts {
        let artifact = artifact.expect("render");
        let print = artifact.as_print().expect("print");
        assert!(!print.document.degraded);
        assert_eq!(print.document.font_family, "Open Sans");
    }
    assert!(renderer.font_cache().is_registered(resumekit::FontId::OpenSans));

    // registered fonts are never looked up again
    let again = renderer
        .render_document(&doc, "compact-pro", "open-sans", Backend::Print)
        .await
        .expect("render");
    assert_eq!(server.describes.load(Ordering::SeqCst), 1);

    let pdf = again.as_print().expect("print").document.to_pdf().expect("pdf");
    let haystack = String::from_utf8_lossy(&pdf);
    assert!(haystack.contains("FontFile2"));
    assert!(haystack.contains("OpenSans"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failed_lookup_degrades_and_is_retried() {
    let server = spawn_font_server(500);
    let renderer = Renderer::new(config_for(&server)).expect("renderer");
    let doc = named("Ada Lovelace");

    let first = renderer
        .render_document(&doc, "lab-protocol", "inter", Backend::Print)
        .await
        .expect("render degrades instead of failing");
    let print = first.as_print().expect("print");
    assert!(print.document.degraded);
    assert_eq!(print.document.font_family, "Helvetica");
    assert!(print.document.text().contains("Ada Lovelace"));

    let pdf = print.document.to_pdf().expect("pdf");
    let haystack = String::from_utf8_lossy(&pdf);
    assert!(haystack.contains("Helvetica"));
    assert!(!haystack.contains("FontFile2"));

    renderer
        .render_document(&doc, "lab-protocol", "inter", Backend::Print)
        .await
        .expect("render");
    assert_eq!(server.describes.load(Ordering::SeqCst), 2);
    assert!(!renderer.font_cache().is_registered(resumekit::FontId::Inter));
}

#[tokio::test]
async fn screen_renders_never_touch_the_network() {
    let server = spawn_font_server(200);
    let renderer = Renderer::new(config_for(&server)).expect("renderer");

    let artifact = renderer
        .render_document(&named("Ada"), "mono-stack", "open-sans", Backend::Screen)
        .await
        .expect("render");
    let screen = artifact.as_screen().expect("screen");
    assert_eq!(screen.font_family, "\"Open Sans\", sans-serif");
    assert!(screen.stylesheet_url.contains("Open+Sans"));
    assert_eq!(server.describes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn url_only_mode_skips_file_downloads() {
    let server = spawn_font_server(200);
    let config = RendererConfig { embed_font_files: false, ..config_for(&server) };
    let renderer = Renderer::new(config).expect("renderer");

    let artifact = renderer
        .render_document(&named("Ada"), "bold-impact", "open-sans", Backend::Print)
        .await
        .expect("render");
    let print = artifact.as_print().expect("print");
    assert!(!print.document.degraded);
    assert_eq!(server.files.load(Ordering::SeqCst), 0);

    // nothing to embed, so the PDF falls back to the built-in family
    let pdf = print.document.to_pdf().expect("pdf");
    assert!(!String::from_utf8_lossy(&pdf).contains("FontFile2"));
}

#[tokio::test]
async fn embedded_faces_keep_names_outside_latin1() {
    let server = spawn_font_server(200);
    let renderer = Renderer::new(config_for(&server)).expect("renderer");

    let artifact = renderer
        .render_document(&named("Łukasz Nowak"), "compact-pro", "open-sans", Backend::Print)
        .await
        .expect("render");
    let print = artifact.as_print().expect("print");
    assert!(print.document.text().contains("Łukasz Nowak"));

    let pdf = print.document.to_pdf().expect("pdf");
    assert!(!String::from_utf8_lossy(&pdf).contains("?ukasz"));

    let face = ttf_parser::Face::parse(MONTSERRAT, 0).expect("fixture parses");
    let l_stroke = face.glyph_index('Ł').expect("glyph").0.to_be_bytes();
    let parsed = lopdf::Document::load_mem(&pdf).expect("parse back");
    let shown: Vec<Vec<u8>> = parsed
        .get_pages()
        .values()
        .flat_map(|id| parsed.get_and_decode_page_content(*id).expect("content").operations)
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| op.operands.first().and_then(|o| o.as_str().ok()).map(|s| s.to_vec()))
        .collect();
    assert!(shown.iter().any(|s| s.len() >= 2 && s[..2] == l_stroke));
}
