//! `clean-slate`: airy single column with the dates hung in a left column

use super::parts::{bullet_list, bullets, contact_spans, link, link_span};
use super::view::{EntryView, ResumeView};
use super::{page_css, PrintTemplate, ScreenTemplate};
use crate::rendering::layout::{Block, Column, PageSpec, Paragraph, Span, TextStyle};
use crate::rendering::paint::{rgb, Rgba};
use crate::rendering::screen::{el, Element};
use crate::typography::Typography;

pub struct CleanSlate;

const INK: Rgba = rgb(0x1f2937);
const SOFT: Rgba = rgb(0x9ca3af);
const MUTED: Rgba = rgb(0x6b7280);
const DATE_COLUMN: f32 = 110.0;
const GAP: f32 = 18.0;

const H2_CSS: &str = "font-size:12px;font-weight:400;text-transform:uppercase;letter-spacing:0.25em;color:#9ca3af;margin:0 0 18px";
/// Entry grid: dates in the first column, everything else in the second
const GRID_CSS: &str = "display:grid;grid-template-columns:140px 1fr;column-gap:24px;margin-bottom:24px";
const CONTENT: &str = "grid-column:2";

fn screen_section(title: &str, body: Vec<Element>) -> Element {
    el("section").style("margin-bottom:40px").child(el("h2").style(H2_CSS).text(title)).children(body)
}

fn screen_entry(entry: &EntryView) -> Element {
    el("div")
        .style(GRID_CSS)
        .child(el("h3").style("grid-column:2;grid-row:1;font-size:17px;font-weight:700;margin:0;color:#1f2937").text(entry.title.as_str()))
        .child_opt(entry.subtitle.as_ref().map(|s| el("div").style("grid-column:2;font-size:14px;color:#6b7280").text(s.as_str())))
        .child_opt((!entry.dates.is_empty()).then(|| {
            el("div").style("grid-column:1;grid-row:1 / span 2;font-size:12px;color:#9ca3af;padding-top:3px").text(entry.dates.as_str())
        }))
        .child_opt(entry.location.as_ref().map(|l| el("div").style("grid-column:2;font-size:12px;color:#9ca3af").text(l.as_str())))
        .child_opt(entry.gpa.as_ref().map(|g| el("div").style("grid-column:2;font-size:12px;color:#6b7280").text(format!("GPA {}", g))))
        .child_opt(entry.description.as_ref().map(|d| {
            el("p").style("grid-column:2;font-size:14px;line-height:1.7;color:#1f2937;margin:8px 0 0").text(d.as_str())
        }))
        .child_opt((!entry.technologies.is_empty()).then(|| {
            el("div").style("grid-column:2;font-size:12px;color:#6b7280;margin-top:6px").text(entry.technologies.join(", "))
        }))
        .child_opt(entry.link.as_ref().map(|l| {
            el("div").style(CONTENT).child(link(l, "font-size:12px;color:#6b7280"))
        }))
        .child_opt(bullet_list(
            &entry.highlights,
            "\u{2013}",
            "grid-column:2;list-style:none;padding:0;margin:8px 0 0;font-size:14px;line-height:1.7;color:#1f2937",
            "color:#9ca3af",
        ))
}

impl ScreenTemplate for CleanSlate {
    fn render_screen(&self, view: &ResumeView, typography: &Typography) -> Element {
        let mut contact = el("div").style("display:flex;flex-wrap:wrap;gap:4px 20px;font-size:13px;color:#6b7280");
        for item in view.contact.plain() {
            contact = contact.child(el("span").text(item));
        }
        for l in &view.contact.links {
            contact = contact.child(link(l, "color:#6b7280;text-decoration:none"));
        }

        let mut root = el("div")
            .style(&page_css(typography, "padding:64px 56px;color:#1f2937"))
            .child(
                el("header")
                    .style("margin-bottom:48px")
                    .child(el("h1").style("font-size:40px;font-weight:300;letter-spacing:-0.01em;margin:0 0 12px").text(view.name.as_str()))
                    .child_opt((!view.contact.is_empty()).then_some(contact)),
            );

        if let Some(summary) = &view.summary {
            root = root.child(screen_section(
                "Profile",
                vec![el("p").style("font-size:15px;line-height:1.8;margin:0;max-width:560px").text(summary.as_str())],
            ));
        }
        for (title, entries) in [("Experience", &view.experience), ("Education", &view.education), ("Projects", &view.projects)] {
            if !entries.is_empty() {
                root = root.child(screen_section(title, entries.iter().map(screen_entry).collect()));
            }
        }
        if !view.skills.is_empty() {
            root = root.child(screen_section(
                "Skills",
                view.skills
                    .iter()
                    .map(|s| {
                        el("div")
                            .style(GRID_CSS)
                            .child(el("div").style("grid-column:1;font-size:12px;color:#9ca3af").text(s.category.as_str()))
                            .child(el("div").style("grid-column:2;font-size:14px").text(s.items.join(", ")))
                    })
                    .collect(),
            ));
        }
        if !view.certifications.is_empty() {
            root = root.child(screen_section(
                "Certifications",
                view.certifications
                    .iter()
                    .map(|c| {
                        el("div")
                            .style(GRID_CSS)
                            .child(el("div").style("grid-column:2;grid-row:1;font-size:15px;font-weight:700").text(c.name.as_str()))
                            .child_opt(c.issuer.as_ref().map(|i| el("div").style("grid-column:2;font-size:13px;color:#6b7280").text(i.as_str())))
                            .child_opt((!c.date.is_empty()).then(|| el("div").style("grid-column:1;grid-row:1;font-size:12px;color:#9ca3af").text(c.date.as_str())))
                            .child_opt(c.link.as_ref().map(|l| el("div").style(CONTENT).child(link(l, "font-size:12px;color:#6b7280"))))
                    })
                    .collect(),
            ));
        }
        if !view.languages.is_empty() {
            root = root.child(screen_section(
                "Languages",
                view.languages
                    .iter()
                    .map(|l| {
                        el("div")
                            .style("display:grid;grid-template-columns:140px 1fr;column-gap:24px;margin-bottom:6px;font-size:14px")
                            .child(el("div").style("grid-column:2;grid-row:1").text(l.language.as_str()))
                            .child(el("div").style("grid-column:1;grid-row:1;font-size:12px;color:#9ca3af").text(l.proficiency))
                    })
                    .collect(),
            ));
        }
        root
    }
}

struct Styles {
    heading: TextStyle,
    title: TextStyle,
    subtitle: TextStyle,
    date: TextStyle,
    body: TextStyle,
    meta: TextStyle,
}

impl Styles {
    fn new() -> Self {
        Self {
            heading: TextStyle::new(8.5).upper().color(SOFT),
            title: TextStyle::new(12.0).bold().color(INK),
            subtitle: TextStyle::new(10.0).color(MUTED),
            date: TextStyle::new(8.5).color(SOFT).leading(1.6),
            body: TextStyle::new(9.5).color(INK).leading(1.6),
            meta: TextStyle::new(8.5).color(MUTED),
        }
    }
}

/// Two-column row with the first column hung on the right of a left gutter
fn hung(gutter: Vec<Block>, content: Vec<Block>) -> Block {
    Block::Row {
        gap: GAP,
        reverse: true,
        columns: vec![Column::flex(1.0, content), Column::fixed(DATE_COLUMN, gutter)],
    }
}

fn print_section(title: &str, s: &Styles, body: Vec<Block>) -> Vec<Block> {
    let mut blocks = vec![Block::Heading(Paragraph::text(title, &s.heading).after(12.0))];
    blocks.extend(body);
    blocks.push(Block::Spacer(20.0));
    blocks
}

fn print_entry(entry: &EntryView, s: &Styles) -> Vec<Block> {
    let mut head = vec![Block::Paragraph(Paragraph::text(entry.title.as_str(), &s.title))];
    if let Some(subtitle) = &entry.subtitle {
        head.push(Block::Paragraph(Paragraph::text(subtitle.as_str(), &s.subtitle)));
    }
    let dates = (!entry.dates.is_empty())
        .then(|| Block::Paragraph(Paragraph::text(entry.dates.as_str(), &s.date)))
        .into_iter()
        .collect();

    let mut body = Vec::new();
    if let Some(location) = &entry.location {
        body.push(Block::Paragraph(Paragraph::text(location.as_str(), &s.date)));
    }
    if let Some(gpa) = &entry.gpa {
        body.push(Block::Paragraph(Paragraph::text(format!("GPA {}", gpa), &s.meta)));
    }
    if let Some(description) = &entry.description {
        body.push(Block::Spacer(3.0));
        body.push(Block::Paragraph(Paragraph::text(description.as_str(), &s.body)));
    }
    if !entry.technologies.is_empty() {
        body.push(Block::Paragraph(Paragraph::text(entry.technologies.join(", "), &s.meta).after(2.0)));
    }
    if let Some(l) = &entry.link {
        body.push(Block::Paragraph(Paragraph::new(vec![link_span(l, &s.meta)])));
    }
    if !entry.highlights.is_empty() {
        body.push(Block::Spacer(3.0));
        body.extend(bullets(&entry.highlights, "\u{2013}", &s.date, &s.body, 12.0, 1.0));
    }

    let mut blocks = vec![hung(dates, head)];
    if !body.is_empty() {
        blocks.push(hung(Vec::new(), body));
    }
    blocks.push(Block::Spacer(14.0));
    blocks
}

impl PrintTemplate for CleanSlate {
    fn page(&self) -> PageSpec {
        PageSpec::a4(54.0)
    }

    fn render_print(&self, view: &ResumeView) -> Vec<Block> {
        let s = Styles::new();
        let mut blocks = vec![Block::Paragraph(
            Paragraph::text(view.name.as_str(), &TextStyle::new(28.0).color(INK).leading(1.2)).after(6.0),
        )];
        if !view.contact.is_empty() {
            blocks.push(Block::Paragraph(Paragraph::new(contact_spans(&view.contact, "    ", &s.meta, &s.meta))));
        }
        blocks.push(Block::Spacer(30.0));

        if let Some(summary) = &view.summary {
            blocks.extend(print_section("Profile", &s, vec![Block::Paragraph(Paragraph::text(summary.as_str(), &s.body))]));
        }
        for (title, entries) in [("Experience", &view.experience), ("Education", &view.education), ("Projects", &view.projects)] {
            if !entries.is_empty() {
                let body = entries.iter().flat_map(|e| print_entry(e, &s)).collect();
                blocks.extend(print_section(title, &s, body));
            }
        }
        if !view.skills.is_empty() {
            let body = view
                .skills
                .iter()
                .map(|g| {
                    hung(
                        vec![Block::Paragraph(Paragraph::text(g.category.as_str(), &s.date))],
                        vec![Block::Paragraph(Paragraph::text(g.items.join(", "), &s.body).after(4.0))],
                    )
                })
                .collect();
            blocks.extend(print_section("Skills", &s, body));
        }
        if !view.certifications.is_empty() {
            let body = view
                .certifications
                .iter()
                .map(|c| {
                    let mut content = vec![Block::Paragraph(Paragraph::text(c.name.as_str(), &s.title.clone().leading(1.3)))];
                    if let Some(issuer) = &c.issuer {
                        content.push(Block::Paragraph(Paragraph::text(issuer.as_str(), &s.subtitle)));
                    }
                    if let Some(l) = &c.link {
                        content.push(Block::Paragraph(Paragraph::new(vec![link_span(l, &s.meta)])));
                    }
                    content.push(Block::Spacer(8.0));
                    let date = (!c.date.is_empty())
                        .then(|| Block::Paragraph(Paragraph::text(c.date.as_str(), &s.date)))
                        .into_iter()
                        .collect();
                    hung(date, content)
                })
                .collect();
            blocks.extend(print_section("Certifications", &s, body));
        }
        if !view.languages.is_empty() {
            let body = view
                .languages
                .iter()
                .map(|l| {
                    hung(
                        vec![Block::Paragraph(Paragraph::text(l.proficiency, &s.date))],
                        vec![Block::Paragraph(Paragraph::new(vec![Span::new(l.language.as_str(), &s.body)]))],
                    )
                })
                .collect();
            blocks.extend(print_section("Languages", &s, body));
        }
        blocks
    }
}
