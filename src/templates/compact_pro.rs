//! `compact-pro`: dense single column, one header line per entry

use super::parts::{bullet_list, bullets, link, link_span};
use super::view::{EntryView, ResumeView};
use super::{page_css, PrintTemplate, ScreenTemplate};
use crate::rendering::layout::{Align, Block, Column, PageSpec, Paragraph, Span, TextStyle};
use crate::rendering::paint::{rgb, Rgba};
use crate::rendering::screen::{el, Element};
use crate::typography::Typography;

pub struct CompactPro;

const GREY: Rgba = rgb(0x4b5563);
const LIGHT: Rgba = rgb(0x9ca3af);
const RULE: Rgba = rgb(0xd1d5db);
const SEP: &str = " \u{00b7} ";

const H2_CSS: &str = "font-size:12px;font-weight:700;text-transform:uppercase;margin:0 0 4px";

fn screen_section(title: &str, body: Vec<Element>) -> Element {
    el("section").style("margin-bottom:14px").child(el("h2").style(H2_CSS).text(title)).children(body)
}

fn screen_entry(entry: &EntryView) -> Element {
    let line = el("div")
        .child(el("span").style("font-size:12px;font-weight:700").text(entry.title.as_str()))
        .child_opt(entry.subtitle.as_ref().map(|s| el("span").style("font-size:11px;color:#4b5563").text(format!(" | {}", s))))
        .child_opt(entry.location.as_ref().map(|l| el("span").style("font-size:11px;color:#9ca3af").text(format!(" | {}", l))))
        .child_opt(entry.link.as_ref().map(|l| link(l, "font-size:11px;color:#4b5563;margin-left:6px")));

    el("div")
        .style("margin-bottom:8px")
        .child(
            el("div")
                .style("display:flex;justify-content:space-between;align-items:baseline;gap:8px")
                .child(line)
                .child_opt((!entry.dates.is_empty()).then(|| el("span").style("font-size:11px;color:#4b5563;white-space:nowrap").text(entry.dates.as_str()))),
        )
        .child_opt(entry.gpa.as_ref().map(|g| el("div").style("font-size:11px;color:#4b5563").text(format!("GPA: {}", g))))
        .child_opt(entry.description.as_ref().map(|d| el("p").style("font-size:11px;line-height:1.35;margin:2px 0").text(d.as_str())))
        .child_opt((!entry.technologies.is_empty()).then(|| {
            el("div").style("font-size:10px;color:#4b5563").text(format!("Tech: {}", entry.technologies.join(", ")))
        }))
        .child_opt(bullet_list(
            &entry.highlights,
            "\u{2022}",
            "list-style:none;padding:0;margin:2px 0 0;font-size:11px;line-height:1.35",
            "color:#4b5563",
        ))
}

impl ScreenTemplate for CompactPro {
    fn render_screen(&self, view: &ResumeView, typography: &Typography) -> Element {
        let mut contact = el("div").style("display:flex;flex-wrap:wrap;gap:0 8px;font-size:11px;color:#4b5563");
        let mut first = true;
        let plain = view.contact.plain().into_iter().map(|t| el("span").text(t));
        let links = view.contact.links.iter().map(|l| link(l, "color:inherit"));
        for item in plain.chain(links) {
            if !first {
                contact = contact.child(el("span").attr("aria-hidden", "true").text("\u{00b7}"));
            }
            contact = contact.child(item);
            first = false;
        }

        let mut root = el("div")
            .style(&page_css(typography, "padding:32px;line-height:1.25"))
            .child(
                el("header")
                    .style("margin-bottom:12px")
                    .child(el("h1").style("font-size:24px;font-weight:700;margin:0 0 4px").text(view.name.as_str()))
                    .child_opt((!view.contact.is_empty()).then_some(contact)),
            )
            .child(el("hr").style("border:0;border-top:1px solid #d1d5db;margin:0 0 10px"));

        if let Some(summary) = &view.summary {
            root = root.child(screen_section(
                "Summary",
                vec![el("p").style("font-size:11px;line-height:1.35;color:#374151;margin:0").text(summary.as_str())],
            ));
        }
        if !view.skills.is_empty() {
            root = root.child(screen_section(
                "Technical Skills",
                view.skills
                    .iter()
                    .map(|s| {
                        el("div")
                            .style("font-size:11px")
                            .child(el("span").style("font-weight:700").text(format!("{}: ", s.category)))
                            .child(el("span").style("color:#374151").text(s.items.join(", ")))
                    })
                    .collect(),
            ));
        }
        for (title, entries) in [
            ("Professional Experience", &view.experience),
            ("Education", &view.education),
            ("Projects", &view.projects),
        ] {
            if !entries.is_empty() {
                root = root.child(screen_section(title, entries.iter().map(screen_entry).collect()));
            }
        }
        if !view.certifications.is_empty() {
            root = root.child(screen_section(
                "Certifications",
                view.certifications
                    .iter()
                    .map(|c| {
                        el("div")
                            .style("display:flex;justify-content:space-between;font-size:11px")
                            .child(
                                el("div")
                                    .child(el("span").style("font-weight:700").text(c.name.as_str()))
                                    .child_opt(c.issuer.as_ref().map(|i| el("span").style("color:#4b5563").text(format!(" | {}", i))))
                                    .child_opt(c.link.as_ref().map(|l| link(l, "color:#4b5563;margin-left:6px"))),
                            )
                            .child_opt((!c.date.is_empty()).then(|| el("span").style("color:#4b5563").text(c.date.as_str())))
                    })
                    .collect(),
            ));
        }
        if !view.languages.is_empty() {
            let text = view
                .languages
                .iter()
                .map(|l| format!("{} ({})", l.language, l.proficiency))
                .collect::<Vec<_>>()
                .join(SEP);
            root = root.child(screen_section("Languages", vec![el("div").style("font-size:11px").text(text)]));
        }
        root
    }
}

struct Styles {
    heading: TextStyle,
    title: TextStyle,
    meta: TextStyle,
    faint: TextStyle,
    body: TextStyle,
}

impl Styles {
    fn new() -> Self {
        Self {
            heading: TextStyle::new(8.5).bold().upper().leading(1.2),
            title: TextStyle::new(9.0).bold().leading(1.25),
            meta: TextStyle::new(8.0).color(GREY).leading(1.25),
            faint: TextStyle::new(8.0).color(LIGHT).leading(1.25),
            body: TextStyle::new(8.0).leading(1.3),
        }
    }
}

fn print_section(title: &str, s: &Styles, body: Vec<Block>) -> Vec<Block> {
    let mut blocks = vec![Block::Heading(Paragraph::text(title, &s.heading).after(3.0))];
    blocks.extend(body);
    blocks.push(Block::Spacer(8.0));
    blocks
}

fn print_entry(entry: &EntryView, s: &Styles) -> Vec<Block> {
    let mut line = vec![Span::new(entry.title.as_str(), &s.title)];
    if let Some(subtitle) = &entry.subtitle {
        line.push(Span::new(format!(" | {}", subtitle), &s.meta));
    }
    if let Some(location) = &entry.location {
        line.push(Span::new(format!(" | {}", location), &s.faint));
    }
    if let Some(l) = &entry.link {
        line.push(Span::new(" ", &s.meta));
        line.push(link_span(l, &s.meta));
    }
    let dates = (!entry.dates.is_empty())
        .then(|| Block::Paragraph(Paragraph::text(entry.dates.as_str(), &s.meta).align(Align::Right)))
        .into_iter()
        .collect();

    let mut blocks = vec![Block::row(8.0, vec![Column::flex(1.0, vec![Block::Paragraph(Paragraph::new(line))]), Column::fixed(95.0, dates)])];
    if let Some(gpa) = &entry.gpa {
        blocks.push(Block::Paragraph(Paragraph::text(format!("GPA: {}", gpa), &s.meta)));
    }
    if let Some(description) = &entry.description {
        blocks.push(Block::Paragraph(Paragraph::text(description.as_str(), &s.body).after(1.0)));
    }
    if !entry.technologies.is_empty() {
        blocks.push(Block::Paragraph(Paragraph::text(format!("Tech: {}", entry.technologies.join(", ")), &s.meta)));
    }
    blocks.extend(bullets(&entry.highlights, "\u{2022}", &s.meta, &s.body, 8.0, 0.5));
    blocks.push(Block::Spacer(5.0));
    blocks
}

impl PrintTemplate for CompactPro {
    fn page(&self) -> PageSpec {
        PageSpec::a4(28.0)
    }

    fn render_print(&self, view: &ResumeView) -> Vec<Block> {
        let s = Styles::new();
        let mut blocks = vec![Block::Paragraph(Paragraph::text(view.name.as_str(), &TextStyle::new(18.0).bold().leading(1.2)).after(2.0))];
        if !view.contact.is_empty() {
            let mut spans = Vec::new();
            let plain = view.contact.plain().into_iter().map(|t| Span::new(t, &s.meta));
            let links = view.contact.links.iter().map(|l| link_span(l, &s.meta));
            for span in plain.chain(links) {
                if !spans.is_empty() {
                    spans.push(Span::new(SEP, &s.meta));
                }
                spans.push(span);
            }
            blocks.push(Block::Paragraph(Paragraph::new(spans).after(4.0)));
        }
        blocks.push(Block::rule(0.5, RULE));
        blocks.push(Block::Spacer(6.0));

        if let Some(summary) = &view.summary {
            blocks.extend(print_section("Summary", &s, vec![Block::Paragraph(Paragraph::text(summary.as_str(), &s.body))]));
        }
        if !view.skills.is_empty() {
            let body = view
                .skills
                .iter()
                .map(|g| {
                    Block::Paragraph(Paragraph::new(vec![
                        Span::new(format!("{}: ", g.category), &s.body.clone().bold()),
                        Span::new(g.items.join(", "), &s.body),
                    ]))
                })
                .collect();
            blocks.extend(print_section("Technical Skills", &s, body));
        }
        for (title, entries) in [
            ("Professional Experience", &view.experience),
            ("Education", &view.education),
            ("Projects", &view.projects),
        ] {
            if !entries.is_empty() {
                let body = entries.iter().flat_map(|e| print_entry(e, &s)).collect();
                blocks.extend(print_section(title, &s, body));
            }
        }
        if !view.certifications.is_empty() {
            let body = view
                .certifications
                .iter()
                .map(|c| {
                    let mut spans = vec![Span::new(c.name.as_str(), &s.body.clone().bold())];
                    if let Some(issuer) = &c.issuer {
                        spans.push(Span::new(format!(" | {}", issuer), &s.meta));
                    }
                    if let Some(l) = &c.link {
                        spans.push(Span::new(" ", &s.meta));
                        spans.push(link_span(l, &s.meta));
                    }
                    let date = (!c.date.is_empty())
                        .then(|| Block::Paragraph(Paragraph::text(c.date.as_str(), &s.meta).align(Align::Right)))
                        .into_iter()
                        .collect();
                    Block::row(8.0, vec![Column::flex(1.0, vec![Block::Paragraph(Paragraph::new(spans))]), Column::fixed(95.0, date)])
                })
                .collect();
            blocks.extend(print_section("Certifications", &s, body));
        }
        if !view.languages.is_empty() {
            let text = view
                .languages
                .iter()
                .map(|l| format!("{} ({})", l.language, l.proficiency))
                .collect::<Vec<_>>()
                .join(SEP);
            blocks.extend(print_section("Languages", &s, vec![Block::Paragraph(Paragraph::text(text, &s.body))]));
        }
        blocks
    }
}
