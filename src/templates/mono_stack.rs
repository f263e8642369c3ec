//! `mono-stack`: tight two-column grid set largely in monospace

use super::parts::{bullet_list, bullets, link, link_span};
use super::view::{EntryView, ResumeView};
use super::{page_css, PrintTemplate, ScreenTemplate};
use crate::rendering::layout::{Align, Block, Column, PageSpec, Paragraph, Span, TextStyle};
use crate::rendering::paint::{rgb, Rgba, BLACK};
use crate::rendering::screen::{el, Element};
use crate::typography::Typography;

pub struct MonoStack;

const GREY: Rgba = rgb(0x6b7280);
const RULE: Rgba = rgb(0xd1d5db);
const LEFT_WIDTH: f32 = 150.0;

const H2_CSS: &str = "font-family:monospace;font-size:11px;font-weight:700;text-transform:uppercase;letter-spacing:0.05em;border-bottom:1px solid #d1d5db;padding-bottom:3px;margin:0 0 8px";

fn screen_section(title: &str, body: Vec<Element>) -> Element {
    el("section").style("margin-bottom:18px").child(el("h2").style(H2_CSS).text(title)).children(body)
}

fn screen_entry(entry: &EntryView) -> Element {
    el("div")
        .style("margin-bottom:12px")
        .child(el("h3").style("font-size:14px;font-weight:700;margin:0").text(entry.title.as_str()))
        .child(
            el("div")
                .style("display:flex;justify-content:space-between;gap:12px;font-family:monospace;font-size:11px;color:#6b7280")
                .child_opt(entry.subtitle.as_ref().map(|s| el("span").text(s.as_str())))
                .child_opt((!entry.dates.is_empty()).then(|| el("span").style("white-space:nowrap").text(entry.dates.as_str()))),
        )
        .child_opt(entry.location.as_ref().map(|l| el("div").style("font-family:monospace;font-size:11px;color:#6b7280").text(l.as_str())))
        .child_opt(entry.gpa.as_ref().map(|g| el("div").style("font-family:monospace;font-size:11px").text(format!("gpa {}", g))))
        .child_opt(entry.description.as_ref().map(|d| el("p").style("font-size:12px;line-height:1.5;margin:4px 0").text(d.as_str())))
        .child_opt((!entry.technologies.is_empty()).then(|| {
            el("div").style("font-family:monospace;font-size:10px").text(entry.technologies.join(" \u{00b7} "))
        }))
        .child_opt(entry.link.as_ref().map(|l| link(l, "font-family:monospace;font-size:10px;color:inherit")))
        .child_opt(bullet_list(
            &entry.highlights,
            "-",
            "list-style:none;padding:0;margin:4px 0 0;font-size:12px;line-height:1.45",
            "font-family:monospace",
        ))
}

impl ScreenTemplate for MonoStack {
    fn render_screen(&self, view: &ResumeView, typography: &Typography) -> Element {
        let mut left = el("div").child(el("h1").style("font-size:26px;font-weight:900;line-height:1.1;margin:0 0 16px").text(view.name.as_str()));
        if !view.contact.is_empty() {
            let mut lines: Vec<Element> = view
                .contact
                .plain()
                .into_iter()
                .map(|t| el("div").text(t))
                .collect();
            lines.extend(view.contact.links.iter().map(|l| el("div").child(link(l, "color:inherit"))));
            left = left.child(screen_section(
                "Contact",
                vec![el("div").style("font-family:monospace;font-size:11px;line-height:1.6;word-break:break-all").children(lines)],
            ));
        }
        if !view.skills.is_empty() {
            left = left.child(screen_section(
                "Skills",
                view.skills
                    .iter()
                    .map(|s| {
                        el("div")
                            .style("margin-bottom:8px;font-size:11px")
                            .child(el("div").style("font-family:monospace;font-weight:700").text(s.category.as_str()))
                            .child(el("ul").style("list-style:none;padding:0;margin:2px 0 0").children(s.items.iter().map(|i| el("li").text(i.as_str()))))
                    })
                    .collect(),
            ));
        }
        if !view.languages.is_empty() {
            left = left.child(screen_section(
                "Languages",
                view.languages
                    .iter()
                    .map(|l| el("div").style("font-family:monospace;font-size:11px").text(format!("{}: {}", l.language, l.proficiency)))
                    .collect(),
            ));
        }
        if !view.certifications.is_empty() {
            left = left.child(screen_section(
                "Certifications",
                view.certifications
                    .iter()
                    .map(|c| {
                        el("div")
                            .style("font-size:11px;margin-bottom:6px")
                            .child(el("div").style("font-weight:700").text(c.name.as_str()))
                            .child_opt(c.issuer.as_ref().map(|i| el("div").text(i.as_str())))
                            .child_opt((!c.date.is_empty()).then(|| el("div").style("font-family:monospace;color:#6b7280").text(c.date.as_str())))
                            .child_opt(c.link.as_ref().map(|l| link(l, "font-family:monospace;color:inherit")))
                    })
                    .collect(),
            ));
        }

        let mut right = el("div");
        if let Some(summary) = &view.summary {
            right = right.child(screen_section("Summary", vec![el("p").style("font-size:12px;line-height:1.55;margin:0").text(summary.as_str())]));
        }
        for (title, entries) in [("Experience", &view.experience), ("Education", &view.education), ("Projects", &view.projects)] {
            if !entries.is_empty() {
                right = right.child(screen_section(title, entries.iter().map(screen_entry).collect()));
            }
        }

        el("div")
            .style(&page_css(typography, "display:grid;grid-template-columns:1fr 2.4fr;gap:28px;padding:36px"))
            .child(left)
            .child(right)
    }
}

struct Styles {
    heading: TextStyle,
    title: TextStyle,
    mono: TextStyle,
    body: TextStyle,
    small: TextStyle,
}

impl Styles {
    fn new() -> Self {
        Self {
            heading: TextStyle::new(8.5).mono().bold().upper(),
            title: TextStyle::new(10.5).bold().leading(1.25),
            mono: TextStyle::new(7.5).mono().color(GREY).leading(1.3),
            body: TextStyle::new(8.5).leading(1.4),
            small: TextStyle::new(8.0).leading(1.35),
        }
    }
}

fn print_section(title: &str, s: &Styles, body: Vec<Block>) -> Vec<Block> {
    let mut blocks = vec![
        Block::Heading(Paragraph::text(title, &s.heading).after(2.0)),
        Block::rule(0.5, RULE),
        Block::Spacer(5.0),
    ];
    blocks.extend(body);
    blocks.push(Block::Spacer(10.0));
    blocks
}

fn print_entry(entry: &EntryView, s: &Styles) -> Vec<Block> {
    let mut blocks = vec![Block::Paragraph(Paragraph::text(entry.title.as_str(), &s.title))];
    let subtitle: Vec<Block> = entry
        .subtitle
        .iter()
        .map(|t| Block::Paragraph(Paragraph::text(t.as_str(), &s.mono)))
        .collect();
    let dates: Vec<Block> = (!entry.dates.is_empty())
        .then(|| Block::Paragraph(Paragraph::text(entry.dates.as_str(), &s.mono).align(Align::Right)))
        .into_iter()
        .collect();
    if !subtitle.is_empty() || !dates.is_empty() {
        blocks.push(Block::row(8.0, vec![Column::flex(1.0, subtitle), Column::fixed(105.0, dates)]));
    }
    if let Some(location) = &entry.location {
        blocks.push(Block::Paragraph(Paragraph::text(location.as_str(), &s.mono)));
    }
    if let Some(gpa) = &entry.gpa {
        blocks.push(Block::Paragraph(Paragraph::text(format!("gpa {}", gpa), &s.mono.clone().color(BLACK))));
    }
    if let Some(description) = &entry.description {
        blocks.push(Block::Paragraph(Paragraph::text(description.as_str(), &s.body).after(2.0)));
    }
    if !entry.technologies.is_empty() {
        blocks.push(Block::Paragraph(Paragraph::text(entry.technologies.join(" \u{00b7} "), &s.mono.clone().color(BLACK))));
    }
    if let Some(l) = &entry.link {
        blocks.push(Block::Paragraph(Paragraph::new(vec![link_span(l, &s.mono)])));
    }
    blocks.extend(bullets(&entry.highlights, "-", &s.mono.clone().color(BLACK), &s.body, 9.0, 1.0));
    blocks.push(Block::Spacer(7.0));
    blocks
}

impl PrintTemplate for MonoStack {
    fn page(&self) -> PageSpec {
        PageSpec::a4(30.0)
    }

    fn render_print(&self, view: &ResumeView) -> Vec<Block> {
        let s = Styles::new();

        let mut left = vec![Block::Paragraph(
            Paragraph::text(view.name.as_str(), &TextStyle::new(18.0).black().leading(1.15)).after(12.0),
        )];
        if !view.contact.is_empty() {
            let mono = s.mono.clone().color(BLACK);
            let mut items: Vec<Block> = view.contact.plain().into_iter().map(|t| Block::Paragraph(Paragraph::text(t, &mono))).collect();
            items.extend(view.contact.links.iter().map(|l| Block::Paragraph(Paragraph::new(vec![link_span(l, &mono)]))));
            left.extend(print_section("Contact", &s, items));
        }
        if !view.skills.is_empty() {
            let items = view
                .skills
                .iter()
                .flat_map(|g| {
                    let mut blocks = vec![Block::Paragraph(Paragraph::text(g.category.as_str(), &s.mono.clone().bold().color(BLACK)))];
                    blocks.extend(g.items.iter().map(|i| Block::Paragraph(Paragraph::text(i.as_str(), &s.small))));
                    blocks.push(Block::Spacer(5.0));
                    blocks
                })
                .collect();
            left.extend(print_section("Skills", &s, items));
        }
        if !view.languages.is_empty() {
            let items = view
                .languages
                .iter()
                .map(|l| Block::Paragraph(Paragraph::new(vec![Span::new(format!("{}: {}", l.language, l.proficiency), &s.mono.clone().color(BLACK))])))
                .collect();
            left.extend(print_section("Languages", &s, items));
        }
        if !view.certifications.is_empty() {
            let items = view
                .certifications
                .iter()
                .flat_map(|c| {
                    let mut blocks = vec![Block::Paragraph(Paragraph::text(c.name.as_str(), &s.small.clone().bold()))];
                    if let Some(issuer) = &c.issuer {
                        blocks.push(Block::Paragraph(Paragraph::text(issuer.as_str(), &s.small)));
                    }
                    if !c.date.is_empty() {
                        blocks.push(Block::Paragraph(Paragraph::text(c.date.as_str(), &s.mono)));
                    }
                    if let Some(l) = &c.link {
                        blocks.push(Block::Paragraph(Paragraph::new(vec![link_span(l, &s.mono.clone().color(BLACK))])));
                    }
                    blocks.push(Block::Spacer(5.0));
                    blocks
                })
                .collect();
            left.extend(print_section("Certifications", &s, items));
        }

        let mut right = Vec::new();
        if let Some(summary) = &view.summary {
            right.extend(print_section("Summary", &s, vec![Block::Paragraph(Paragraph::text(summary.as_str(), &s.body))]));
        }
        for (title, entries) in [("Experience", &view.experience), ("Education", &view.education), ("Projects", &view.projects)] {
            if !entries.is_empty() {
                let body = entries.iter().flat_map(|e| print_entry(e, &s)).collect();
                right.extend(print_section(title, &s, body));
            }
        }

        vec![Block::row(20.0, vec![Column::fixed(LEFT_WIDTH, left), Column::flex(1.0, right)])]
    }
}
