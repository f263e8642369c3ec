//! `bold-impact`: dark header block, accent bar and a two-column lower half

use super::parts::{bullet_list, bullets, contact_spans, link, link_span};
use super::view::{EntryView, ResumeView};
use super::{page_css, PrintTemplate, ScreenTemplate};
use crate::rendering::layout::{Align, Block, Column, PageSpec, Paragraph, Span, TextStyle};
use crate::rendering::paint::{rgb, Rgba, BLACK, WHITE};
use crate::rendering::screen::{el, Element};
use crate::typography::Typography;

pub struct BoldImpact;

const BAR: Rgba = rgb(0x333333);
const STRIP: Rgba = rgb(0xf5f5f5);
const HAIRLINE: Rgba = rgb(0xeeeeee);
const LIGHT: Rgba = rgb(0xcccccc);
const GREY: Rgba = rgb(0x666666);
const FAINT: Rgba = rgb(0x999999);
const BODY: Rgba = rgb(0x555555);

fn screen_heading(title: &str) -> Element {
    el("h2")
        .style("display:flex;align-items:center;gap:8px;font-size:15px;font-weight:900;text-transform:uppercase;letter-spacing:0.15em;margin:0 0 14px")
        .child(el("span").attr("aria-hidden", "true").style("display:inline-block;width:24px;height:2px;background:#000"))
        .text(title)
}

fn screen_section(title: &str, body: Vec<Element>) -> Element {
    el("section").style("margin-bottom:28px").child(screen_heading(title)).children(body)
}

/// Position line, then company with the dates on the right
fn screen_entry(entry: &EntryView, boxed: bool) -> Element {
    let css = if boxed {
        "padding:14px;border:1px solid #eeeeee;margin-bottom:12px"
    } else {
        "padding-left:18px;border-left:2px solid #eeeeee;margin-bottom:18px"
    };
    let company = match (&entry.subtitle, &entry.location) {
        (Some(s), Some(l)) => Some(format!("{} \u{2014} {}", s, l)),
        (Some(s), None) => Some(s.clone()),
        (None, Some(l)) => Some(l.clone()),
        (None, None) => None,
    };
    el("div")
        .style(css)
        .child(el("h3").style("font-size:15px;font-weight:700;margin:0").text(entry.title.as_str()))
        .child(
            el("div")
                .style("display:flex;justify-content:space-between;gap:12px;font-size:12px;color:#666666;margin:2px 0 6px")
                .child_opt(company.map(|c| el("span").text(c)))
                .child_opt((!entry.dates.is_empty()).then(|| el("span").style("color:#999999;white-space:nowrap").text(entry.dates.as_str()))),
        )
        .child_opt(entry.gpa.as_ref().map(|g| el("div").style("font-size:12px;color:#666666").text(format!("GPA: {}", g))))
        .child_opt((!entry.technologies.is_empty()).then(|| {
            el("div").style("font-size:11px;color:#aaaaaa;margin-bottom:4px").text(entry.technologies.join(" \u{00b7} "))
        }))
        .child_opt(entry.description.as_ref().map(|d| el("p").style("font-size:12px;line-height:1.5;color:#555555;margin:0 0 4px").text(d.as_str())))
        .child_opt(entry.link.as_ref().map(|l| link(l, "font-size:11px;color:#666666")))
        .child_opt(bullet_list(
            &entry.highlights,
            "\u{203a}",
            "list-style:none;padding:0;margin:4px 0 0;font-size:12px;line-height:1.5;color:#555555",
            "font-weight:700;color:#000",
        ))
}

impl ScreenTemplate for BoldImpact {
    fn render_screen(&self, view: &ResumeView, typography: &Typography) -> Element {
        let header = el("header")
            .style("background:#000;color:#fff;padding:48px 48px 36px")
            .child(el("h1").style("font-size:44px;font-weight:900;letter-spacing:-0.03em;line-height:1;margin:0").text(view.name.as_str()))
            .child_opt(view.summary.as_ref().map(|s| {
                el("p").style("font-size:13px;line-height:1.6;color:#cccccc;max-width:520px;margin:12px 0 0").text(s.as_str())
            }));

        let mut root = el("div")
            .style(&page_css(typography, ""))
            .child(header)
            .child(el("div").attr("aria-hidden", "true").style("height:6px;background:#333333"));

        if !view.contact.is_empty() {
            let mut strip = el("div").style("display:flex;flex-wrap:wrap;gap:4px 20px;padding:10px 48px;background:#f5f5f5;border-bottom:1px solid #dddddd;font-size:12px;color:#666666");
            for item in view.contact.plain() {
                strip = strip.child(el("span").text(item));
            }
            for l in &view.contact.links {
                strip = strip.child(link(l, "color:#666666;text-decoration:none"));
            }
            root = root.child(strip);
        }

        let mut content = el("div").style("padding:36px 48px");
        if !view.experience.is_empty() {
            content = content.child(screen_section("Experience", view.experience.iter().map(|e| screen_entry(e, false)).collect()));
        }

        let mut halves = Vec::new();
        if !view.skills.is_empty() {
            halves.push(screen_section(
                "Skills",
                view.skills
                    .iter()
                    .map(|s| {
                        el("div")
                            .style("margin-bottom:10px")
                            .child(el("div").style("font-size:11px;font-weight:700;text-transform:uppercase;letter-spacing:0.08em").text(s.category.as_str()))
                            .child(el("div").style("font-size:12px;color:#666666").text(s.items.join(" \u{00b7} ")))
                    })
                    .collect(),
            ));
        }
        if !view.education.is_empty() {
            halves.push(screen_section("Education", view.education.iter().map(|e| screen_entry(e, false)).collect()));
        }
        if !halves.is_empty() {
            content = content.child(
                el("div")
                    .style("display:grid;grid-template-columns:1fr 1fr;gap:32px")
                    .children(halves.into_iter().map(|h| el("div").child(h))),
            );
        }

        if !view.projects.is_empty() {
            content = content.child(screen_section("Projects", view.projects.iter().map(|p| screen_entry(p, true)).collect()));
        }
        if !view.certifications.is_empty() {
            content = content.child(screen_section(
                "Certifications",
                view.certifications
                    .iter()
                    .map(|c| {
                        el("div")
                            .style("display:flex;justify-content:space-between;gap:12px;font-size:12px;margin-bottom:6px")
                            .child(
                                el("div")
                                    .child(el("span").style("font-weight:700").text(c.name.as_str()))
                                    .child_opt(c.issuer.as_ref().map(|i| el("span").style("color:#666666").text(format!(" \u{2014} {}", i))))
                                    .child_opt(c.link.as_ref().map(|l| link(l, "margin-left:8px;color:#666666"))),
                            )
                            .child_opt((!c.date.is_empty()).then(|| el("span").style("color:#999999").text(c.date.as_str())))
                    })
                    .collect(),
            ));
        }
        if !view.languages.is_empty() {
            content = content.child(screen_section(
                "Languages",
                vec![el("div").style("display:flex;flex-wrap:wrap;gap:6px 24px;font-size:12px").children(view.languages.iter().map(|l| {
                    el("span")
                        .child(el("span").style("font-weight:700").text(l.language.as_str()))
                        .child(el("span").style("color:#666666").text(format!(" {}", l.proficiency)))
                }))],
            ));
        }
        root.child(content)
    }
}

struct Styles {
    heading: TextStyle,
    title: TextStyle,
    company: TextStyle,
    date: TextStyle,
    body: TextStyle,
    marker: TextStyle,
    tech: TextStyle,
}

impl Styles {
    fn new() -> Self {
        Self {
            heading: TextStyle::new(11.0).black().upper(),
            title: TextStyle::new(11.0).bold(),
            company: TextStyle::new(9.0).color(GREY),
            date: TextStyle::new(8.0).color(FAINT),
            body: TextStyle::new(8.0).color(BODY).leading(1.5),
            marker: TextStyle::new(9.0).bold(),
            tech: TextStyle::new(7.0).color(rgb(0xaaaaaa)),
        }
    }
}

fn print_section(title: &str, s: &Styles, body: Vec<Block>) -> Vec<Block> {
    let mut blocks = vec![
        Block::Rule { thickness: 1.5, rgba: BLACK, width: Some(24.0), align: Align::Left },
        Block::Spacer(4.0),
        Block::Heading(Paragraph::text(title, &s.heading).after(8.0)),
    ];
    blocks.extend(body);
    blocks.push(Block::Spacer(14.0));
    blocks
}

fn print_entry(entry: &EntryView, s: &Styles, boxed: bool) -> Block {
    let mut inner = vec![Block::Paragraph(Paragraph::text(entry.title.as_str(), &s.title).after(1.0))];

    let company = match (&entry.subtitle, &entry.location) {
        (Some(c), Some(l)) => Some(format!("{} \u{2014} {}", c, l)),
        (Some(c), None) => Some(c.clone()),
        (None, Some(l)) => Some(l.clone()),
        (None, None) => None,
    };
    let left = company.map(|c| Block::Paragraph(Paragraph::text(c, &s.company))).into_iter().collect();
    let right = (!entry.dates.is_empty())
        .then(|| Block::Paragraph(Paragraph::text(entry.dates.as_str(), &s.date).align(Align::Right)))
        .into_iter()
        .collect();
    inner.push(Block::row(8.0, vec![Column::flex(1.0, left), Column::fixed(100.0, right)]));
    inner.push(Block::Spacer(3.0));

    if let Some(gpa) = &entry.gpa {
        inner.push(Block::Paragraph(Paragraph::text(format!("GPA: {}", gpa), &s.company)));
    }
    if !entry.technologies.is_empty() {
        inner.push(Block::Paragraph(Paragraph::text(entry.technologies.join(" \u{00b7} "), &s.tech).after(3.0)));
    }
    if let Some(description) = &entry.description {
        inner.push(Block::Paragraph(Paragraph::text(description.as_str(), &s.body).after(3.0)));
    }
    if let Some(l) = &entry.link {
        inner.push(Block::Paragraph(Paragraph::new(vec![link_span(l, &s.date.clone().color(GREY))]).after(2.0)));
    }
    inner.extend(bullets(&entry.highlights, "\u{203a}", &s.marker, &s.body, 10.0, 1.5));

    if boxed {
        Block::Panel { background: None, accent: Some((0.5, HAIRLINE)), padding_x: 10.0, padding_y: 8.0, space_after: 10.0, blocks: inner }
    } else {
        Block::Panel { background: None, accent: Some((1.5, HAIRLINE)), padding_x: 14.0, padding_y: 0.0, space_after: 14.0, blocks: inner }
    }
}

impl PrintTemplate for BoldImpact {
    fn page(&self) -> PageSpec {
        PageSpec::a4(30.0)
    }

    fn render_print(&self, view: &ResumeView) -> Vec<Block> {
        let s = Styles::new();

        let mut header = vec![Block::Paragraph(
            Paragraph::text(view.name.as_str(), &TextStyle::new(28.0).black().color(WHITE).leading(1.1)),
        )];
        if let Some(summary) = &view.summary {
            header.push(Block::Spacer(6.0));
            header.push(Block::Paragraph(Paragraph::text(summary.as_str(), &TextStyle::new(9.0).color(LIGHT).leading(1.5))));
        }
        let mut blocks = vec![
            Block::Panel { background: Some(BLACK), accent: None, padding_x: 26.0, padding_y: 26.0, space_after: 0.0, blocks: header },
            Block::rule(5.0, BAR),
        ];

        if !view.contact.is_empty() {
            let item = TextStyle::new(8.0).color(GREY);
            blocks.push(Block::Panel {
                background: Some(STRIP),
                accent: None,
                padding_x: 26.0,
                padding_y: 7.0,
                space_after: 0.0,
                blocks: vec![Block::Paragraph(Paragraph::new(contact_spans(&view.contact, "    ", &item, &item)))],
            });
        }
        blocks.push(Block::Spacer(22.0));

        let mut content = Vec::new();
        if !view.experience.is_empty() {
            let body = view.experience.iter().map(|e| print_entry(e, &s, false)).collect();
            content.extend(print_section("Experience", &s, body));
        }

        let mut halves = Vec::new();
        if !view.skills.is_empty() {
            let category = TextStyle::new(8.0).bold().upper();
            let items = view
                .skills
                .iter()
                .flat_map(|g| {
                    [
                        Block::Paragraph(Paragraph::text(g.category.as_str(), &category).after(2.0)),
                        Block::Paragraph(Paragraph::text(g.items.join(" \u{00b7} "), &s.company.clone().leading(1.4)).after(6.0)),
                    ]
                })
                .collect();
            halves.push(Column::flex(1.0, print_section("Skills", &s, items)));
        }
        if !view.education.is_empty() {
            let body = view.education.iter().map(|e| print_entry(e, &s, false)).collect();
            halves.push(Column::flex(1.0, print_section("Education", &s, body)));
        }
        if !halves.is_empty() {
            content.push(Block::row(24.0, halves));
        }

        if !view.projects.is_empty() {
            let body = view.projects.iter().map(|p| print_entry(p, &s, true)).collect();
            content.extend(print_section("Projects", &s, body));
        }
        if !view.certifications.is_empty() {
            let body = view
                .certifications
                .iter()
                .map(|c| {
                    let mut spans = vec![Span::new(c.name.as_str(), &s.title)];
                    if let Some(issuer) = &c.issuer {
                        spans.push(Span::new(format!(" \u{2014} {}", issuer), &s.company));
                    }
                    if let Some(l) = &c.link {
                        spans.push(Span::new("  ", &s.company));
                        spans.push(link_span(l, &s.company));
                    }
                    let date = (!c.date.is_empty())
                        .then(|| Block::Paragraph(Paragraph::text(c.date.as_str(), &s.date).align(Align::Right)))
                        .into_iter()
                        .collect();
                    Block::row(8.0, vec![Column::flex(1.0, vec![Block::Paragraph(Paragraph::new(spans).after(4.0))]), Column::fixed(100.0, date)])
                })
                .collect();
            content.extend(print_section("Certifications", &s, body));
        }
        if !view.languages.is_empty() {
            let mut spans = Vec::new();
            for (i, l) in view.languages.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::new("    ", &s.company));
                }
                spans.push(Span::new(l.language.as_str(), &s.title));
                spans.push(Span::new(format!(" {}", l.proficiency), &s.company));
            }
            content.extend(print_section("Languages", &s, vec![Block::Paragraph(Paragraph::new(spans))]));
        }

        blocks.push(Block::Panel { background: None, accent: None, padding_x: 26.0, padding_y: 0.0, space_after: 0.0, blocks: content });
        blocks
    }
}
