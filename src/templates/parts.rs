//! Building blocks shared by the template implementations

use super::view::{ContactView, LinkView};
use crate::rendering::layout::{Block, Paragraph, Span, TextStyle};
use crate::rendering::screen::{el, Element};

/// Anchor for a normalized link, opened in a new tab
pub fn link(link: &LinkView, css: &str) -> Element {
    el("a")
        .attr("href", link.href.as_str())
        .attr("target", "_blank")
        .attr("rel", "noopener noreferrer")
        .style(css)
        .text(link.label)
}

/// `<ul>` of highlights with a visible marker, or nothing when empty
pub fn bullet_list(items: &[String], marker: &str, ul_css: &str, marker_css: &str) -> Option<Element> {
    if items.is_empty() {
        return None;
    }
    Some(el("ul").style(ul_css).children(items.iter().map(|item| {
        el("li")
            .style("display:flex;gap:8px")
            .child(el("span").attr("aria-hidden", "true").style(marker_css).text(marker))
            .child(el("span").style("flex:1").text(item.as_str()))
    })))
}

/// Contact items as inline elements: plain text first, then labelled links
pub fn contact_items(contact: &ContactView, item_css: &str, link_css: &str) -> Vec<Element> {
    let mut items: Vec<Element> = contact.plain().into_iter().map(|t| el("span").style(item_css).text(t)).collect();
    items.extend(contact.links.iter().map(|l| link(l, link_css)));
    items
}

/// Print bullets, one block per highlight
pub fn bullets(items: &[String], marker: &str, marker_style: &TextStyle, style: &TextStyle, indent: f32, gap: f32) -> Vec<Block> {
    items
        .iter()
        .map(|item| Block::Bullet {
            marker: Span::new(marker, marker_style),
            indent,
            body: Paragraph::text(item.as_str(), style).after(gap),
        })
        .collect()
}

/// Contact line spans separated by `separator`; links carry their href
pub fn contact_spans(contact: &ContactView, separator: &str, style: &TextStyle, link_style: &TextStyle) -> Vec<Span> {
    let mut spans = Vec::new();
    let plain = contact.plain().into_iter().map(|t| Span::new(t, style));
    let links = contact.links.iter().map(|l| Span::link(l.label, l.href.as_str(), link_style));
    for span in plain.chain(links) {
        if !spans.is_empty() {
            spans.push(Span::new(separator, style));
        }
        spans.push(span);
    }
    spans
}

pub fn link_span(link: &LinkView, style: &TextStyle) -> Span {
    Span::link(link.label, link.href.as_str(), style)
}
