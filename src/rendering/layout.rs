//! Flow layout and pagination for the print backend.
//!
//! Templates describe a page as a list of [`Block`]s. Layout runs on one
//! continuous canvas whose height is a multiple of the page content height;
//! a line never straddles a page boundary, and backgrounds that do are cut
//! into per-page segments when the canvas is sliced into pages.

use super::metrics::FontMetrics;
use super::paint::{Face, FontRef, PaintCommand, Rgba, BLACK};
use crate::typography::FontWeight;

const EPS: f32 = 0.01;
/// Space a heading reserves below itself so it does not end a page alone
const KEEP_WITH_NEXT: f32 = 28.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn uniform(m: f32) -> Self {
        Self { top: m, right: m, bottom: m, left: m }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSpec {
    pub width: f32,
    pub height: f32,
    pub margins: Margins,
}

impl PageSpec {
    pub const A4_WIDTH: f32 = 595.0;
    pub const A4_HEIGHT: f32 = 842.0;

    pub fn a4(margin: f32) -> Self {
        Self::a4_with(Margins::uniform(margin))
    }

    pub fn a4_with(margins: Margins) -> Self {
        Self { width: Self::A4_WIDTH, height: Self::A4_HEIGHT, margins }
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.margins.left - self.margins.right
    }

    pub fn content_height(&self) -> f32 {
        self.height - self.margins.top - self.margins.bottom
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub weight: FontWeight,
    pub face: Face,
    pub rgba: Rgba,
    pub uppercase: bool,
    /// Line height as a multiple of the size
    pub leading: f32,
}

impl TextStyle {
    pub fn new(size: f32) -> Self {
        Self { size, weight: FontWeight::Regular, face: Face::Body, rgba: BLACK, uppercase: false, leading: 1.35 }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn black(mut self) -> Self {
        self.weight = FontWeight::Black;
        self
    }

    pub fn mono(mut self) -> Self {
        self.face = Face::Mono;
        self
    }

    pub fn color(mut self, rgba: Rgba) -> Self {
        self.rgba = rgba;
        self
    }

    pub fn upper(mut self) -> Self {
        self.uppercase = true;
        self
    }

    pub fn leading(mut self, leading: f32) -> Self {
        self.leading = leading;
        self
    }

    pub fn font(&self) -> FontRef {
        FontRef { face: self.face, weight: self.weight }
    }

    fn line_height(&self) -> f32 {
        self.size * self.leading
    }
}

/// A run of text in one style, optionally a link
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub style: TextStyle,
    pub href: Option<String>,
}

impl Span {
    pub fn new(text: impl Into<String>, style: &TextStyle) -> Self {
        Self { text: text.into(), style: style.clone(), href: None }
    }

    pub fn link(label: impl Into<String>, href: impl Into<String>, style: &TextStyle) -> Self {
        Self { text: label.into(), style: style.clone(), href: Some(href.into()) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub spans: Vec<Span>,
    pub align: Align,
    pub space_after: f32,
}

impl Paragraph {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans, align: Align::Left, space_after: 0.0 }
    }

    pub fn text(text: impl Into<String>, style: &TextStyle) -> Self {
        Self::new(vec![Span::new(text, style)])
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn after(mut self, space: f32) -> Self {
        self.space_after = space;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnWidth {
    Fixed(f32),
    Flex(f32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub width: ColumnWidth,
    pub blocks: Vec<Block>,
}

impl Column {
    pub fn fixed(width: f32, blocks: Vec<Block>) -> Self {
        Self { width: ColumnWidth::Fixed(width), blocks }
    }

    pub fn flex(weight: f32, blocks: Vec<Block>) -> Self {
        Self { width: ColumnWidth::Flex(weight), blocks }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    /// A paragraph kept together with what follows it
    Heading(Paragraph),
    Bullet { marker: Span, indent: f32, body: Paragraph },
    Rule { thickness: f32, rgba: Rgba, width: Option<f32>, align: Align },
    /// Children drawn over an optional background and left accent bar
    Panel {
        background: Option<Rgba>,
        accent: Option<(f32, Rgba)>,
        padding_x: f32,
        padding_y: f32,
        space_after: f32,
        blocks: Vec<Block>,
    },
    /// Side-by-side columns; `reverse` places the first column on the right
    Row { gap: f32, reverse: bool, columns: Vec<Column> },
    Spacer(f32),
}

impl Block {
    pub fn rule(thickness: f32, rgba: Rgba) -> Self {
        Block::Rule { thickness, rgba, width: None, align: Align::Left }
    }

    pub fn row(gap: f32, columns: Vec<Column>) -> Self {
        Block::Row { gap, reverse: false, columns }
    }
}

/// Paint commands of one page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrintPage {
    pub commands: Vec<PaintCommand>,
}

enum Placed {
    /// Commands of one visual line; y values are canvas coordinates
    Line { top: f32, commands: Vec<PaintCommand> },
    Rect { x: f32, top: f32, width: f32, height: f32, rgba: Rgba },
}

struct Word {
    text: String,
    span: usize,
    width: f32,
    space_before: bool,
}

#[derive(Default)]
struct Line {
    words: Vec<(Word, f32)>,
    width: f32,
    height: f32,
    max_size: f32,
}

struct Laid {
    end: f32,
    first_baseline: Option<(f32, f32)>,
}

/// Lay out `blocks` on `page`, measuring text with `metrics`, and slice the
/// result into pages.
///
/// Always returns at least one page.
pub fn layout_document(blocks: &[Block], page: &PageSpec, metrics: &FontMetrics<'_>) -> Vec<PrintPage> {
    let mut flow = Flow { page: *page, content_height: page.content_height(), metrics, items: Vec::new() };
    flow.blocks(blocks, page.margins.left, page.content_width(), 0.0);
    flow.paginate()
}

struct Flow<'m, 'f> {
    page: PageSpec,
    content_height: f32,
    metrics: &'m FontMetrics<'f>,
    items: Vec<Placed>,
}

impl Flow<'_, '_> {
    fn page_index(&self, y: f32) -> usize {
        ((y + EPS) / self.content_height).floor().max(0.0) as usize
    }

    /// Move `y` to the next page start when a box of height `h` would cross the boundary
    fn fit(&self, y: f32, h: f32) -> f32 {
        let page_start = self.page_index(y) as f32 * self.content_height;
        let page_end = page_start + self.content_height;
        if y + h > page_end + EPS && y > page_start + EPS && h <= self.content_height {
            page_end
        } else {
            y
        }
    }

    fn blocks(&mut self, blocks: &[Block], x: f32, width: f32, mut y: f32) -> f32 {
        for block in blocks {
            y = match block {
                Block::Paragraph(p) => self.paragraph(p, x, width, y, false).end,
                Block::Heading(p) => {
                    let first_line = break_lines(p, width, self.metrics).first().map(|l| l.height).unwrap_or(0.0);
                    let y = self.fit(y, first_line + KEEP_WITH_NEXT);
                    self.paragraph(p, x, width, y, true).end
                }
                Block::Bullet { marker, indent, body } => {
                    let laid = self.paragraph(body, x + indent, (width - indent).max(1.0), y, false);
                    if let Some((top, baseline)) = laid.first_baseline {
                        let text = marker.text.clone();
                        self.items.push(Placed::Line {
                            top,
                            commands: vec![PaintCommand::Text {
                                x,
                                y: baseline,
                                size: marker.style.size,
                                font: marker.style.font(),
                                rgba: marker.style.rgba,
                                text,
                                heading: false,
                            }],
                        });
                    }
                    laid.end
                }
                Block::Rule { thickness, rgba, width: rule_width, align } => {
                    let y = self.fit(y, *thickness);
                    let w = rule_width.unwrap_or(width).min(width);
                    let rx = x + align_offset(*align, width, w);
                    self.items.push(Placed::Rect { x: rx, top: y, width: w, height: *thickness, rgba: *rgba });
                    y + thickness
                }
                Block::Panel { background, accent, padding_x, padding_y, space_after, blocks } => {
                    let start = self.fit(y, 2.0 * padding_y + 12.0);
                    let index = self.items.len();
                    let inner_end = self.blocks(blocks, x + padding_x, (width - 2.0 * padding_x).max(1.0), start + padding_y);
                    let end = inner_end + padding_y;
                    let mut under = Vec::new();
                    if let Some(rgba) = background {
                        under.push(Placed::Rect { x, top: start, width, height: end - start, rgba: *rgba });
                    }
                    if let Some((bar, rgba)) = accent {
                        under.push(Placed::Rect { x, top: start, width: *bar, height: end - start, rgba: *rgba });
                    }
                    for (offset, rect) in under.into_iter().enumerate() {
                        self.items.insert(index + offset, rect);
                    }
                    end + space_after
                }
                Block::Row { gap, reverse, columns } => {
                    let placements = column_placements(columns, x, width, *gap, *reverse);
                    let mut end = y;
                    for (column, (cx, cw)) in columns.iter().zip(placements) {
                        end = end.max(self.blocks(&column.blocks, cx, cw, y));
                    }
                    end
                }
                Block::Spacer(h) => y + h,
            };
        }
        y
    }

    fn paragraph(&mut self, p: &Paragraph, x: f32, width: f32, y: f32, heading: bool) -> Laid {
        let lines = break_lines(p, width, self.metrics);
        if lines.is_empty() {
            return Laid { end: y, first_baseline: None };
        }

        let mut y = y;
        let mut first_baseline = None;
        for line in lines {
            y = self.fit(y, line.height);
            let baseline = y + (line.height - line.max_size) / 2.0 + line.max_size * 0.8;
            first_baseline.get_or_insert((y, baseline));

            let mut cx = x + align_offset(p.align, width, line.width);
            let mut commands = Vec::new();
            let mut words = line.words.into_iter().peekable();
            while let Some((word, gap)) = words.next() {
                cx += gap;
                let span = &p.spans[word.span];
                let run_x = cx;
                let mut text = word.text;
                cx += word.width;
                // Merge following words of the same span into one run
                while let Some((next, _)) = words.peek() {
                    if next.span != word.span {
                        break;
                    }
                    if let Some((next, next_gap)) = words.next() {
                        if next_gap > 0.0 {
                            text.push(' ');
                        }
                        text.push_str(&next.text);
                        cx += next_gap + next.width;
                    }
                }
                commands.push(PaintCommand::Text {
                    x: run_x,
                    y: baseline,
                    size: span.style.size,
                    font: span.style.font(),
                    rgba: span.style.rgba,
                    text,
                    heading,
                });
                if let Some(href) = &span.href {
                    commands.push(PaintCommand::Link {
                        x: run_x,
                        y,
                        width: cx - run_x,
                        height: line.height,
                        href: href.clone(),
                    });
                }
            }
            self.items.push(Placed::Line { top: y, commands });
            y += line.height;
        }

        Laid { end: y + p.space_after, first_baseline }
    }

    fn paginate(self) -> Vec<PrintPage> {
        let mut pages: Vec<PrintPage> = vec![PrintPage::default()];
        let h = self.content_height;
        let top_margin = self.page.margins.top;

        for item in &self.items {
            match item {
                Placed::Line { top, commands } => {
                    let index = self.page_index(*top);
                    ensure_pages(&mut pages, index);
                    let shift = top_margin - index as f32 * h;
                    pages[index].commands.extend(commands.iter().cloned().map(|c| shift_y(c, shift)));
                }
                Placed::Rect { x, top, width, height, rgba } => {
                    let end = top + height;
                    let mut seg_top = *top;
                    while seg_top < end - EPS {
                        let index = self.page_index(seg_top);
                        let seg_end = end.min((index + 1) as f32 * h);
                        ensure_pages(&mut pages, index);
                        pages[index].commands.push(PaintCommand::SolidRect {
                            x: *x,
                            y: seg_top - index as f32 * h + top_margin,
                            width: *width,
                            height: seg_end - seg_top,
                            rgba: *rgba,
                        });
                        seg_top = seg_end;
                    }
                }
            }
        }
        pages
    }
}

fn ensure_pages(pages: &mut Vec<PrintPage>, index: usize) {
    while pages.len() <= index {
        pages.push(PrintPage::default());
    }
}

fn shift_y(command: PaintCommand, shift: f32) -> PaintCommand {
    match command {
        PaintCommand::SolidRect { x, y, width, height, rgba } => PaintCommand::SolidRect { x, y: y + shift, width, height, rgba },
        PaintCommand::Text { x, y, size, font, rgba, text, heading } => {
            PaintCommand::Text { x, y: y + shift, size, font, rgba, text, heading }
        }
        PaintCommand::Link { x, y, width, height, href } => PaintCommand::Link { x, y: y + shift, width, height, href },
    }
}

fn align_offset(align: Align, available: f32, used: f32) -> f32 {
    match align {
        Align::Left => 0.0,
        Align::Center => ((available - used) / 2.0).max(0.0),
        Align::Right => (available - used).max(0.0),
    }
}

fn column_placements(columns: &[Column], x: f32, width: f32, gap: f32, reverse: bool) -> Vec<(f32, f32)> {
    let gaps = gap * columns.len().saturating_sub(1) as f32;
    let fixed: f32 = columns
        .iter()
        .map(|c| match c.width {
            ColumnWidth::Fixed(w) => w,
            ColumnWidth::Flex(_) => 0.0,
        })
        .sum();
    let flex_total: f32 = columns
        .iter()
        .map(|c| match c.width {
            ColumnWidth::Flex(f) => f,
            ColumnWidth::Fixed(_) => 0.0,
        })
        .sum();
    let flexible = (width - fixed - gaps).max(0.0);

    let mut cursor = if reverse { x + width } else { x };
    columns
        .iter()
        .map(|c| {
            let w = match c.width {
                ColumnWidth::Fixed(w) => w,
                ColumnWidth::Flex(f) if flex_total > 0.0 => flexible * f / flex_total,
                ColumnWidth::Flex(_) => 0.0,
            };
            let cx = if reverse {
                cursor -= w;
                let cx = cursor;
                cursor -= gap;
                cx
            } else {
                let cx = cursor;
                cursor += w + gap;
                cx
            };
            (cx, w.max(1.0))
        })
        .collect()
}

fn words_of(p: &Paragraph, metrics: &FontMetrics<'_>) -> Vec<Word> {
    let mut words = Vec::new();
    let mut previous_ended_with_space = true;
    for (index, span) in p.spans.iter().enumerate() {
        let text = if span.style.uppercase { span.text.to_uppercase() } else { span.text.clone() };
        let starts_with_space = text.starts_with(char::is_whitespace);
        for (n, piece) in text.split_whitespace().enumerate() {
            let space_before = if n == 0 { previous_ended_with_space || starts_with_space } else { true };
            words.push(Word {
                width: metrics.text_width(piece, span.style.size, span.style.font()),
                text: piece.to_string(),
                span: index,
                space_before,
            });
        }
        if !text.is_empty() {
            previous_ended_with_space = text.ends_with(char::is_whitespace);
        }
    }
    words
}

fn break_lines(p: &Paragraph, width: f32, metrics: &FontMetrics<'_>) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current = Line::default();

    for word in words_of(p, metrics) {
        let style = &p.spans[word.span].style;
        let mut gap = match current.words.last() {
            Some((prev, _)) if word.space_before => {
                let prev_style = &p.spans[prev.span].style;
                metrics.text_width(" ", prev_style.size, prev_style.font())
            }
            _ => 0.0,
        };
        if !current.words.is_empty() && current.width + gap + word.width > width + EPS {
            lines.push(std::mem::take(&mut current));
            gap = 0.0;
        }
        current.width += gap + word.width;
        current.height = current.height.max(style.line_height());
        current.max_size = current.max_size.max(style.size);
        current.words.push((word, gap));
    }
    if !current.words.is_empty() {
        lines.push(current);
    }
    lines
}
