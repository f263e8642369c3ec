//! `lab-protocol`: shaded sidebar for contact and skills, monospace
//! section headers over a main column of entries

use super::parts::{bullet_list, bullets, contact_items, link, link_span};
use super::view::{EntryView, ResumeView};
use super::{page_css, PrintTemplate, ScreenTemplate};
use crate::rendering::layout::{Block, Column, PageSpec, Paragraph, Span, TextStyle};
use crate::rendering::paint::{rgb, Rgba};
use crate::rendering::screen::{el, Element};
use crate::typography::Typography;

pub struct LabProtocol;

const SIDEBAR: Rgba = rgb(0xf4f4f5);
const MUTED: Rgba = rgb(0x52525b);
const ACCENT: Rgba = rgb(0x2563eb);
const SIDEBAR_WIDTH: f32 = 170.0;

const MAIN_H2_CSS: &str = "font-family:monospace;font-size:12px;font-weight:700;text-transform:uppercase;letter-spacing:0.1em;color:#2563eb;margin:0 0 12px";
const SIDE_H2_CSS: &str = "font-family:monospace;font-size:11px;font-weight:700;text-transform:uppercase;letter-spacing:0.1em;color:#52525b;margin:0 0 8px";

fn header(title: &str) -> String {
    format!("// {}", title)
}

fn screen_section(title: &str, css: &str, body: Vec<Element>) -> Element {
    el("section").style("margin-bottom:28px").child(el("h2").style(css).text(header(title))).children(body)
}

fn screen_entry(entry: &EntryView) -> Element {
    el("div")
        .style("margin-bottom:18px")
        .child(el("h3").style("font-size:16px;font-weight:700;margin:0").text(entry.title.as_str()))
        .child_opt(entry.subtitle.as_ref().map(|s| el("div").style("font-size:14px;color:#52525b").text(s.as_str())))
        .child_opt((!entry.dates.is_empty()).then(|| {
            el("div").style("font-family:monospace;font-size:11px;color:#52525b;margin-top:2px").text(entry.dates.as_str())
        }))
        .child_opt(entry.location.as_ref().map(|l| el("div").style("font-family:monospace;font-size:11px;color:#52525b").text(l.as_str())))
        .child_opt(entry.gpa.as_ref().map(|g| el("div").style("font-size:12px").text(format!("GPA: {}", g))))
        .child_opt(entry.description.as_ref().map(|d| el("p").style("font-size:13px;line-height:1.6;margin:6px 0").text(d.as_str())))
        .child_opt((!entry.technologies.is_empty()).then(|| {
            el("div").style("font-family:monospace;font-size:11px;color:#2563eb").text(entry.technologies.join(" / "))
        }))
        .child_opt(entry.link.as_ref().map(|l| link(l, "font-family:monospace;font-size:11px;color:#2563eb")))
        .child_opt(bullet_list(
            &entry.highlights,
            ">",
            "list-style:none;padding:0;margin:6px 0 0;font-size:13px;line-height:1.5",
            "font-family:monospace;color:#2563eb",
        ))
}

impl ScreenTemplate for LabProtocol {
    fn render_screen(&self, view: &ResumeView, typography: &Typography) -> Element {
        let mut aside = el("aside")
            .style("width:32%;background:#f4f4f5;padding:40px 24px;box-sizing:border-box")
            .child(el("h1").style("font-size:30px;font-weight:900;line-height:1.1;margin:0 0 28px").text(view.name.as_str()));

        if !view.contact.is_empty() {
            aside = aside.child(screen_section(
                "Contact",
                SIDE_H2_CSS,
                vec![el("div")
                    .style("display:flex;flex-direction:column;gap:4px;font-size:12px;word-break:break-all")
                    .children(contact_items(&view.contact, "color:#27272a", "color:#2563eb"))],
            ));
        }
        if !view.skills.is_empty() {
            aside = aside.child(screen_section(
                "Skills",
                SIDE_H2_CSS,
                view.skills
                    .iter()
                    .map(|s| {
                        el("div")
                            .style("margin-bottom:10px")
                            .child(el("div").style("font-family:monospace;font-size:11px;font-weight:700").text(s.category.as_str()))
                            .child(el("div").style("font-size:12px;line-height:1.5").text(s.items.join(", ")))
                    })
                    .collect(),
            ));
        }
        if !view.languages.is_empty() {
            aside = aside.child(screen_section(
                "Languages",
                SIDE_H2_CSS,
                view.languages
                    .iter()
                    .map(|l| {
                        el("div")
                            .style("display:flex;justify-content:space-between;font-size:12px;margin-bottom:4px")
                            .child(el("span").text(l.language.as_str()))
                            .child(el("span").style("font-family:monospace;color:#52525b").text(l.proficiency))
                    })
                    .collect(),
            ));
        }

        let mut main = el("main").style("flex:1;padding:40px 32px");
        if let Some(summary) = &view.summary {
            main = main.child(screen_section(
                "Summary",
                MAIN_H2_CSS,
                vec![el("p").style("font-size:13px;line-height:1.6;margin:0").text(summary.as_str())],
            ));
        }
        for (title, entries) in [("Experience", &view.experience), ("Education", &view.education), ("Projects", &view.projects)] {
            if !entries.is_empty() {
                main = main.child(screen_section(title, MAIN_H2_CSS, entries.iter().map(screen_entry).collect()));
            }
        }
        if !view.certifications.is_empty() {
            main = main.child(screen_section(
                "Certifications",
                MAIN_H2_CSS,
                view.certifications
                    .iter()
                    .map(|c| {
                        el("div")
                            .style("font-size:13px;margin-bottom:8px")
                            .child(el("div").style("font-weight:700").text(c.name.as_str()))
                            .child_opt(c.issuer.as_ref().map(|i| el("div").style("color:#52525b").text(i.as_str())))
                            .child_opt((!c.date.is_empty()).then(|| el("div").style("font-family:monospace;font-size:11px").text(c.date.as_str())))
                            .child_opt(c.link.as_ref().map(|l| link(l, "font-family:monospace;font-size:11px;color:#2563eb")))
                    })
                    .collect(),
            ));
        }

        el("div").style(&page_css(typography, "display:flex")).child(aside).child(main)
    }
}

struct Styles {
    main_heading: TextStyle,
    side_heading: TextStyle,
    title: TextStyle,
    subtitle: TextStyle,
    mono: TextStyle,
    body: TextStyle,
    small: TextStyle,
    marker: TextStyle,
}

impl Styles {
    fn new() -> Self {
        Self {
            main_heading: TextStyle::new(9.5).mono().bold().upper().color(ACCENT),
            side_heading: TextStyle::new(8.5).mono().bold().upper().color(MUTED),
            title: TextStyle::new(11.0).bold(),
            subtitle: TextStyle::new(9.5).color(MUTED),
            mono: TextStyle::new(7.5).mono().color(MUTED),
            body: TextStyle::new(9.0).leading(1.45),
            small: TextStyle::new(8.0).leading(1.4),
            marker: TextStyle::new(9.0).mono().color(ACCENT),
        }
    }
}

fn print_section(title: &str, style: &TextStyle, body: Vec<Block>) -> Vec<Block> {
    let mut blocks = vec![Block::Heading(Paragraph::text(header(title), style).after(6.0))];
    blocks.extend(body);
    blocks.push(Block::Spacer(12.0));
    blocks
}

fn print_entry(entry: &EntryView, s: &Styles) -> Vec<Block> {
    let mut blocks = vec![Block::Paragraph(Paragraph::text(entry.title.as_str(), &s.title))];
    if let Some(subtitle) = &entry.subtitle {
        blocks.push(Block::Paragraph(Paragraph::text(subtitle.as_str(), &s.subtitle)));
    }
    if !entry.dates.is_empty() {
        blocks.push(Block::Paragraph(Paragraph::text(entry.dates.as_str(), &s.mono).after(1.0)));
    }
    if let Some(location) = &entry.location {
        blocks.push(Block::Paragraph(Paragraph::text(location.as_str(), &s.mono)));
    }
    if let Some(gpa) = &entry.gpa {
        blocks.push(Block::Paragraph(Paragraph::text(format!("GPA: {}", gpa), &s.small)));
    }
    if let Some(description) = &entry.description {
        blocks.push(Block::Spacer(2.0));
        blocks.push(Block::Paragraph(Paragraph::text(description.as_str(), &s.body).after(2.0)));
    }
    if !entry.technologies.is_empty() {
        blocks.push(Block::Paragraph(Paragraph::text(entry.technologies.join(" / "), &s.mono.clone().color(ACCENT))));
    }
    if let Some(l) = &entry.link {
        blocks.push(Block::Paragraph(Paragraph::new(vec![link_span(l, &s.mono.clone().color(ACCENT))])));
    }
    blocks.extend(bullets(&entry.highlights, ">", &s.marker, &s.body, 11.0, 1.5));
    blocks.push(Block::Spacer(9.0));
    blocks
}

impl PrintTemplate for LabProtocol {
    fn page(&self) -> PageSpec {
        PageSpec::a4(32.0)
    }

    fn render_print(&self, view: &ResumeView) -> Vec<Block> {
        let s = Styles::new();

        let mut side = vec![Block::Paragraph(
            Paragraph::text(view.name.as_str(), &TextStyle::new(20.0).black().leading(1.15)).after(18.0),
        )];
        if !view.contact.is_empty() {
            let mut items: Vec<Block> = view
                .contact
                .plain()
                .into_iter()
                .map(|t| Block::Paragraph(Paragraph::text(t, &s.small).after(2.0)))
                .collect();
            items.extend(view.contact.links.iter().map(|l| {
                Block::Paragraph(Paragraph::new(vec![link_span(l, &s.small.clone().color(ACCENT))]).after(2.0))
            }));
            side.extend(print_section("Contact", &s.side_heading, items));
        }
        if !view.skills.is_empty() {
            let items = view
                .skills
                .iter()
                .flat_map(|g| {
                    [
                        Block::Paragraph(Paragraph::text(g.category.as_str(), &s.mono.clone().bold())),
                        Block::Paragraph(Paragraph::text(g.items.join(", "), &s.small).after(6.0)),
                    ]
                })
                .collect();
            side.extend(print_section("Skills", &s.side_heading, items));
        }
        if !view.languages.is_empty() {
            let items = view
                .languages
                .iter()
                .map(|l| {
                    Block::Paragraph(
                        Paragraph::new(vec![Span::new(format!("{} ", l.language), &s.small), Span::new(l.proficiency, &s.mono)])
                            .after(3.0),
                    )
                })
                .collect();
            side.extend(print_section("Languages", &s.side_heading, items));
        }

        let mut main = Vec::new();
        if let Some(summary) = &view.summary {
            main.extend(print_section("Summary", &s.main_heading, vec![Block::Paragraph(Paragraph::text(summary.as_str(), &s.body))]));
        }
        for (title, entries) in [("Experience", &view.experience), ("Education", &view.education), ("Projects", &view.projects)] {
            if !entries.is_empty() {
                let body = entries.iter().flat_map(|e| print_entry(e, &s)).collect();
                main.extend(print_section(title, &s.main_heading, body));
            }
        }
        if !view.certifications.is_empty() {
            let body = view
                .certifications
                .iter()
                .flat_map(|c| {
                    let mut blocks = vec![Block::Paragraph(Paragraph::text(c.name.as_str(), &s.body.clone().bold()))];
                    if let Some(issuer) = &c.issuer {
                        blocks.push(Block::Paragraph(Paragraph::text(issuer.as_str(), &s.subtitle)));
                    }
                    if !c.date.is_empty() {
                        blocks.push(Block::Paragraph(Paragraph::text(c.date.as_str(), &s.mono)));
                    }
                    if let Some(l) = &c.link {
                        blocks.push(Block::Paragraph(Paragraph::new(vec![link_span(l, &s.mono.clone().color(ACCENT))])));
                    }
                    blocks.push(Block::Spacer(6.0));
                    blocks
                })
                .collect();
            main.extend(print_section("Certifications", &s.main_heading, body));
        }

        vec![Block::row(
            22.0,
            vec![
                Column::fixed(
                    SIDEBAR_WIDTH,
                    vec![Block::Panel {
                        background: Some(SIDEBAR),
                        accent: None,
                        padding_x: 14.0,
                        padding_y: 18.0,
                        space_after: 0.0,
                        blocks: side,
                    }],
                ),
                Column::flex(1.0, main),
            ],
        )]
    }
}
