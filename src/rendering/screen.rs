//! Screen backend primitives: a small element tree with deterministic HTML output

use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenNode {
    Element(Element),
    Text(String),
}

/// An element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<ScreenNode>,
}

const VOID_TAGS: [&str; 2] = ["hr", "br"];

/// Start building an element
pub fn el(tag: &'static str) -> Element {
    Element { tag, attrs: Vec::new(), children: Vec::new() }
}

impl Element {
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn style(self, css: &str) -> Self {
        self.attr("style", css)
    }

    pub fn child(mut self, node: impl Into<ScreenNode>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append a child only when present
    pub fn child_opt(mut self, node: Option<impl Into<ScreenNode>>) -> Self {
        if let Some(node) = node {
            self.children.push(node.into());
        }
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<ScreenNode>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(ScreenNode::Text(text.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(n, _)| *n == name).map(|(_, v)| v.as_str())
    }
}

impl From<Element> for ScreenNode {
    fn from(element: Element) -> Self {
        ScreenNode::Element(element)
    }
}

impl ScreenNode {
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            ScreenNode::Text(text) => escape_into(text, false, out),
            ScreenNode::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_into(value, true, out);
                    out.push('"');
                }
                out.push('>');
                if VOID_TAGS.contains(&element.tag) {
                    return;
                }
                for child in &element.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(element.tag);
                out.push('>');
            }
        }
    }

    /// Text leaves in document order, one per line
    pub fn text_content(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join("\n")
    }

    fn collect_text<'a>(&'a self, parts: &mut Vec<&'a str>) {
        match self {
            ScreenNode::Text(text) => parts.push(text),
            ScreenNode::Element(element) => {
                for child in &element.children {
                    child.collect_text(parts);
                }
            }
        }
    }

    /// All elements with the given tag, in document order
    pub fn find_tag(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.walk(&mut |e| {
            if e.tag == tag {
                found.push(e);
            }
        });
        found
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        if let ScreenNode::Element(element) = self {
            visit(element);
            for child in &element.children {
                child.walk(visit);
            }
        }
    }

    pub fn fingerprint(&self) -> String {
        hex::encode(Sha256::digest(self.to_html().as_bytes()))
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
