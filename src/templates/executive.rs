//! `the-executive`: top-down classic with heavy rules under each heading

use super::parts::{bullet_list, bullets, contact_items, contact_spans, link, link_span};
use super::view::{EntryView, ResumeView};
use super::{page_css, PrintTemplate, ScreenTemplate};
use crate::rendering::layout::{Align, Block, Column, PageSpec, Paragraph, Span, TextStyle};
use crate::rendering::paint::{rgb, Rgba, BLACK};
use crate::rendering::screen::{el, Element};
use crate::typography::Typography;

pub struct Executive;

const MUTED: Rgba = rgb(0x4b5563);
const DATE_COLUMN: f32 = 120.0;

const H2_CSS: &str = "font-size:13px;font-weight:900;text-transform:uppercase;letter-spacing:0.2em;border-bottom:1px solid #000;padding-bottom:4px;margin:0 0 12px";
const BULLETS_CSS: &str = "list-style:none;padding:0;margin:6px 0 0;font-size:14px";

fn screen_section(title: &str, body: Vec<Element>) -> Element {
    el("section").style("margin-bottom:32px").child(el("h2").style(H2_CSS).text(title)).children(body)
}

fn screen_entry(entry: &EntryView, title_css: &str) -> Element {
    let mut heading = el("div").child(el("h3").style(title_css).text(entry.title.as_str()));
    if let Some(subtitle) = &entry.subtitle {
        heading = heading.child(el("div").style("font-size:15px;font-weight:500").text(subtitle.as_str()));
    }
    let mut side = el("div").style("font-size:12px;font-family:monospace;text-align:right;white-space:nowrap");
    if !entry.dates.is_empty() {
        side = side.child(el("div").text(entry.dates.as_str()));
    }
    if let Some(gpa) = &entry.gpa {
        side = side.child(el("div").style("margin-top:4px").text(format!("GPA: {}", gpa)));
    }

    el("div")
        .style("margin-bottom:20px")
        .child(
            el("div")
                .style("display:flex;justify-content:space-between;align-items:baseline;gap:16px")
                .child(heading)
                .child(side),
        )
        .child_opt(entry.location.as_ref().map(|l| el("div").style("font-size:12px;color:#4b5563").text(l.as_str())))
        .child_opt(
            entry
                .description
                .as_ref()
                .map(|d| el("p").style("font-size:14px;line-height:1.6;margin:6px 0").text(d.as_str())),
        )
        .child_opt((!entry.technologies.is_empty()).then(|| {
            el("div")
                .style("font-size:12px;font-family:monospace;color:#4b5563")
                .text(format!("Technologies: {}", entry.technologies.join(", ")))
        }))
        .child_opt(entry.link.as_ref().map(|l| link(l, "font-size:12px;color:#4b5563")))
        .child_opt(bullet_list(&entry.highlights, "\u{2022}", BULLETS_CSS, "font-weight:700"))
}

impl ScreenTemplate for Executive {
    fn render_screen(&self, view: &ResumeView, typography: &Typography) -> Element {
        let header = el("header")
            .style("margin-bottom:40px;padding-bottom:24px;border-bottom:2px solid #000")
            .child(
                el("h1")
                    .style("font-size:48px;font-weight:900;letter-spacing:-0.02em;line-height:1;margin:0 0 12px")
                    .text(view.name.as_str()),
            )
            .child(
                el("div")
                    .style("display:flex;flex-wrap:wrap;gap:4px 24px;font-size:12px")
                    .children(contact_items(&view.contact, "white-space:nowrap", "color:inherit")),
            );

        let mut root = el("div").style(&page_css(typography, "padding:48px")).child(header);

        if let Some(summary) = &view.summary {
            root = root.child(screen_section(
                "Professional Summary",
                vec![el("p").style("font-size:14px;line-height:1.6;margin:0").text(summary.as_str())],
            ));
        }
        if !view.experience.is_empty() {
            let title_css = "font-size:18px;font-weight:700;margin:0";
            root = root.child(screen_section(
                "Professional Experience",
                view.experience.iter().map(|e| screen_entry(e, title_css)).collect(),
            ));
        }
        if !view.education.is_empty() {
            let title_css = "font-size:16px;font-weight:700;margin:0";
            root = root.child(screen_section("Education", view.education.iter().map(|e| screen_entry(e, title_css)).collect()));
        }
        if !view.skills.is_empty() {
            root = root.child(screen_section(
                "Technical Skills",
                view.skills
                    .iter()
                    .map(|s| {
                        el("div")
                            .style("display:flex;font-size:14px;margin-bottom:6px")
                            .child(el("span").style("font-weight:700;min-width:120px").text(format!("{}:", s.category)))
                            .child(el("span").text(s.items.join(", ")))
                    })
                    .collect(),
            ));
        }
        if !view.projects.is_empty() {
            let title_css = "font-size:16px;font-weight:700;margin:0";
            root = root.child(screen_section("Notable Projects", view.projects.iter().map(|p| screen_entry(p, title_css)).collect()));
        }
        if !view.certifications.is_empty() {
            root = root.child(screen_section(
                "Certifications",
                view.certifications
                    .iter()
                    .map(|c| {
                        el("div")
                            .style("display:flex;justify-content:space-between;font-size:14px;margin-bottom:6px")
                            .child(
                                el("div")
                                    .child(el("span").style("font-weight:700").text(c.name.as_str()))
                                    .child_opt(c.issuer.as_ref().map(|i| el("span").text(format!(", {}", i))))
                                    .child_opt(c.link.as_ref().map(|l| link(l, "margin-left:8px;font-size:12px;color:#4b5563"))),
                            )
                            .child_opt((!c.date.is_empty()).then(|| el("span").style("font-size:12px;font-family:monospace").text(c.date.as_str())))
                    })
                    .collect(),
            ));
        }
        if !view.languages.is_empty() {
            root = root.child(screen_section(
                "Languages",
                vec![el("div").style("display:flex;flex-wrap:wrap;gap:6px 24px;font-size:14px").children(view.languages.iter().map(|l| {
                    el("span")
                        .child(el("span").style("font-weight:700").text(l.language.as_str()))
                        .child(el("span").text(format!(" ({})", l.proficiency)))
                }))],
            ));
        }
        root
    }
}

struct Styles {
    heading: TextStyle,
    title: TextStyle,
    subtitle: TextStyle,
    meta: TextStyle,
    mono: TextStyle,
    body: TextStyle,
    marker: TextStyle,
}

impl Styles {
    fn new() -> Self {
        Self {
            heading: TextStyle::new(10.0).black().upper(),
            title: TextStyle::new(12.0).bold().leading(1.25),
            subtitle: TextStyle::new(10.5),
            meta: TextStyle::new(8.0).color(MUTED),
            mono: TextStyle::new(8.0).mono(),
            body: TextStyle::new(9.5).leading(1.45),
            marker: TextStyle::new(9.5).bold(),
        }
    }
}

fn print_section(title: &str, s: &Styles, body: Vec<Block>) -> Vec<Block> {
    let mut blocks = vec![
        Block::Heading(Paragraph::text(title, &s.heading).after(2.0)),
        Block::rule(0.75, BLACK),
        Block::Spacer(8.0),
    ];
    blocks.extend(body);
    blocks.push(Block::Spacer(12.0));
    blocks
}

fn print_entry(entry: &EntryView, s: &Styles) -> Vec<Block> {
    let mut left = vec![Block::Paragraph(Paragraph::text(entry.title.as_str(), &s.title))];
    if let Some(subtitle) = &entry.subtitle {
        left.push(Block::Paragraph(Paragraph::text(subtitle.as_str(), &s.subtitle)));
    }
    let mut right = Vec::new();
    if !entry.dates.is_empty() {
        right.push(Block::Paragraph(Paragraph::text(entry.dates.as_str(), &s.mono).align(Align::Right)));
    }
    if let Some(gpa) = &entry.gpa {
        right.push(Block::Paragraph(Paragraph::text(format!("GPA: {}", gpa), &s.mono).align(Align::Right)));
    }

    let mut blocks = vec![Block::row(12.0, vec![Column::flex(1.0, left), Column::fixed(DATE_COLUMN, right)])];
    if let Some(location) = &entry.location {
        blocks.push(Block::Paragraph(Paragraph::text(location.as_str(), &s.meta).after(2.0)));
    }
    if let Some(description) = &entry.description {
        blocks.push(Block::Paragraph(Paragraph::text(description.as_str(), &s.body).after(3.0)));
    }
    if !entry.technologies.is_empty() {
        let text = format!("Technologies: {}", entry.technologies.join(", "));
        blocks.push(Block::Paragraph(Paragraph::text(text, &s.mono.clone().color(MUTED)).after(3.0)));
    }
    if let Some(l) = &entry.link {
        blocks.push(Block::Paragraph(Paragraph::new(vec![link_span(l, &s.meta)]).after(2.0)));
    }
    blocks.extend(bullets(&entry.highlights, "\u{2022}", &s.marker, &s.body, 12.0, 2.0));
    blocks.push(Block::Spacer(10.0));
    blocks
}

impl PrintTemplate for Executive {
    fn page(&self) -> PageSpec {
        PageSpec::a4(48.0)
    }

    fn render_print(&self, view: &ResumeView) -> Vec<Block> {
        let s = Styles::new();
        let contact = TextStyle::new(8.5);
        let mut blocks = vec![
            Block::Paragraph(Paragraph::text(view.name.as_str(), &TextStyle::new(30.0).black().leading(1.1)).after(6.0)),
        ];
        if !view.contact.is_empty() {
            let spans = contact_spans(&view.contact, "   ", &contact, &contact);
            blocks.push(Block::Paragraph(Paragraph::new(spans).after(8.0)));
        }
        blocks.push(Block::rule(2.0, BLACK));
        blocks.push(Block::Spacer(20.0));

        if let Some(summary) = &view.summary {
            blocks.extend(print_section(
                "Professional Summary",
                &s,
                vec![Block::Paragraph(Paragraph::text(summary.as_str(), &s.body))],
            ));
        }
        if !view.experience.is_empty() {
            let body = view.experience.iter().flat_map(|e| print_entry(e, &s)).collect();
            blocks.extend(print_section("Professional Experience", &s, body));
        }
        if !view.education.is_empty() {
            let body = view.education.iter().flat_map(|e| print_entry(e, &s)).collect();
            blocks.extend(print_section("Education", &s, body));
        }
        if !view.skills.is_empty() {
            let label = s.body.clone().bold();
            let body = view
                .skills
                .iter()
                .map(|g| {
                    Block::row(
                        8.0,
                        vec![
                            Column::fixed(110.0, vec![Block::Paragraph(Paragraph::text(format!("{}:", g.category), &label))]),
                            Column::flex(1.0, vec![Block::Paragraph(Paragraph::text(g.items.join(", "), &s.body).after(3.0))]),
                        ],
                    )
                })
                .collect();
            blocks.extend(print_section("Technical Skills", &s, body));
        }
        if !view.projects.is_empty() {
            let body = view.projects.iter().flat_map(|p| print_entry(p, &s)).collect();
            blocks.extend(print_section("Notable Projects", &s, body));
        }
        if !view.certifications.is_empty() {
            let body = view
                .certifications
                .iter()
                .map(|c| {
                    let mut spans = vec![Span::new(c.name.as_str(), &s.body.clone().bold())];
                    if let Some(issuer) = &c.issuer {
                        spans.push(Span::new(format!(", {}", issuer), &s.body));
                    }
                    if let Some(l) = &c.link {
                        spans.push(Span::new("  ", &s.meta));
                        spans.push(link_span(l, &s.meta));
                    }
                    let date = (!c.date.is_empty())
                        .then(|| Block::Paragraph(Paragraph::text(c.date.as_str(), &s.mono).align(Align::Right)));
                    Block::row(
                        12.0,
                        vec![
                            Column::flex(1.0, vec![Block::Paragraph(Paragraph::new(spans).after(3.0))]),
                            Column::fixed(DATE_COLUMN, date.into_iter().collect()),
                        ],
                    )
                })
                .collect();
            blocks.extend(print_section("Certifications", &s, body));
        }
        if !view.languages.is_empty() {
            let mut spans = Vec::new();
            for (i, l) in view.languages.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::new("   ", &s.body));
                }
                spans.push(Span::new(l.language.as_str(), &s.body.clone().bold()));
                spans.push(Span::new(format!(" ({})", l.proficiency), &s.body));
            }
            blocks.extend(print_section("Languages", &s, vec![Block::Paragraph(Paragraph::new(spans))]));
        }
        blocks
    }
}
