use anyhow::{bail, Context};
use clap::Parser;
use resumekit::rendering::RenderedArtifact;
use resumekit::typography::FontId;
use resumekit::{Backend, Document, Renderer, RendererConfig, ResumeRecord, TemplateId};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Render a résumé document to HTML or PDF", long_about = None)]
struct Args {
    /// Document JSON (or a stored record with --record)
    input: Option<PathBuf>,

    /// Template id, e.g. the-executive
    #[arg(short, long)]
    template: Option<String>,

    /// Font id, e.g. merriweather
    #[arg(short, long)]
    font: Option<String>,

    /// Output backend: screen (html) or print (pdf)
    #[arg(short, long, default_value = "screen")]
    backend: String,

    /// Output path; defaults to resume.html or resume.pdf
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// JSON renderer configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Treat the input as a stored record carrying its own selections
    #[arg(long, default_value_t = false)]
    record: bool,

    /// Write the paginated paint commands next to the PDF
    #[arg(long, default_value_t = false)]
    dump: bool,

    /// List templates and fonts and exit
    #[arg(long, default_value_t = false)]
    list: bool,
}

fn list_catalog() {
    println!("Templates:");
    for t in TemplateId::ALL {
        println!("  {:<14} {} ({}): {}", t.id(), t.name(), t.category(), t.description());
    }
    println!("Fonts:");
    for f in FontId::ALL {
        println!("  {:<18} {}: {}", f.id(), f.family(), f.description());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "resumekit=info");
    }
    env_logger::init();

    let args = Args::parse();
    if args.list {
        list_catalog();
        return Ok(());
    }

    let Some(input) = &args.input else {
        bail!("no input document given (see --help)");
    };
    let Some(backend) = Backend::parse(&args.backend) else {
        bail!("unknown backend '{}', expected screen or print", args.backend);
    };

    let config = match &args.config {
        Some(path) => RendererConfig::from_json_file(path)?,
        None => RendererConfig::default(),
    };
    let renderer = Renderer::new(config)?;

    let json = fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let record = if args.record {
        serde_json::from_str::<ResumeRecord>(&json).with_context(|| format!("parsing record {}", input.display()))?
    } else {
        ResumeRecord { data: Document::from_json(&json)?, ..Default::default() }
    };
    let template = args.template.as_deref().unwrap_or(&record.template_id);
    let font = args.font.as_deref().unwrap_or(&record.font_id);

    let artifact = renderer.render_document(&record.data, template, font, backend).await?;

    match &artifact {
        RenderedArtifact::Screen(screen) => {
            let out = args.out.clone().unwrap_or_else(|| PathBuf::from("resume.html"));
            fs::write(&out, screen.to_html_page()).with_context(|| format!("writing {}", out.display()))?;
            println!("✓ Wrote {} ({})", out.display(), screen.template);
        }
        RenderedArtifact::Print(print) => {
            let out = args.out.clone().unwrap_or_else(|| PathBuf::from("resume.pdf"));
            let bytes = print.document.to_pdf()?;
            fs::write(&out, &bytes).with_context(|| format!("writing {}", out.display()))?;
            if args.dump {
                let dump = out.with_extension("txt");
                fs::write(&dump, print.document.dump()).with_context(|| format!("writing {}", dump.display()))?;
            }
            println!(
                "✓ Wrote {} ({}, {} pages, font {}{})",
                out.display(),
                print.template,
                print.document.pages.len(),
                print.document.font_family,
                if print.document.degraded { ", fallback" } else { "" }
            );
        }
    }
    Ok(())
}
