//! Flow layout of content nodes onto fixed-size pages.
//!
//! Coordinates are in points, measured from the top-left corner of the
//! page. The PDF writer flips them into PDF user space when drawing.

use std::mem;

use crate::model::{
    Alignment, Color, ColumnWidth, ContentNode, DocumentDescription, Image, InlineContent, List,
    Margins, PageBreak, Paragraph, Table, TableCell, TableLayout, TextStyle,
};

use super::fonts::Font;
use super::PdfOptions;

/// Heading sizes relative to the body font size, `h1` first.
const HEADING_SCALE: [f32; 6] = [2.0, 1.67, 1.33, 1.17, 1.0, 0.92];

const PLACEHOLDER_GRAY: Color = Color::GRAY;
const QUOTE_BAR: Color = Color::rgb(204, 204, 204);

/// A positioned drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A run of text in one font, `y` is the baseline
    Text {
        x: f32,
        y: f32,
        text: String,
        font: Font,
        size: f32,
        color: Color,
    },
    /// A filled rectangle
    Fill {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    /// An outlined rectangle
    Frame {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        line_width: f32,
        color: Color,
    },
    /// A straight line
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Color,
    },
    /// A clickable area pointing at a URI
    Link {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        url: String,
    },
}

impl Element {
    fn translate(&mut self, dx: f32, dy: f32) {
        match self {
            Element::Text { x, y, .. }
            | Element::Fill { x, y, .. }
            | Element::Frame { x, y, .. }
            | Element::Link { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
            Element::Line { x1, y1, x2, y2, .. } => {
                *x1 += dx;
                *x2 += dx;
                *y1 += dy;
                *y2 += dy;
            }
        }
    }
}

/// Elements of one output page.
pub type PageElements = Vec<Element>;

/// Lay out a whole document, footers included.
pub fn layout_document(doc: &DocumentDescription, options: &PdfOptions) -> Vec<PageElements> {
    let mut flow = Flow::paged(doc, options);
    let (page_width, _) = doc.page_size.dimensions();
    let content_width = (page_width - doc.page_margins.horizontal()).max(1.0);

    flow.blocks(&doc.content, doc.page_margins.left, content_width);
    let mut pages = flow.finish();

    let page_count = pages.len() as u32;
    for (index, page) in pages.iter_mut().enumerate() {
        if let Some(footer) = doc.footer_for(index as u32 + 1, page_count) {
            page.extend(layout_footer(doc, options, &footer, content_width));
        }
    }

    log::debug!("Laid out {} pages", page_count);
    pages
}

fn layout_footer(
    doc: &DocumentDescription,
    options: &PdfOptions,
    footer: &ContentNode,
    width: f32,
) -> Vec<Element> {
    let (_, page_height) = doc.page_size.dimensions();
    let mut flow = Flow::detached(doc, options);
    flow.compact = true;
    flow.block(footer, 0.0, width);

    let mut elements = flow.into_single_page();
    for el in &mut elements {
        el.translate(doc.page_margins.left, page_height - doc.page_margins.bottom);
    }
    elements
}

/// Resolved style of one text run.
#[derive(Debug, Clone, PartialEq)]
struct RunStyle {
    font: Font,
    size: f32,
    color: Color,
    underline: bool,
    strikethrough: bool,
    background: Option<Color>,
    link: Option<String>,
}

#[derive(Debug, Clone)]
enum Token {
    Word(String, RunStyle),
    Space(RunStyle),
    Break,
}

#[derive(Debug, Clone)]
struct Piece {
    text: String,
    style: RunStyle,
    x: f32,
    width: f32,
}

#[derive(Debug, Clone, Default)]
struct Line {
    pieces: Vec<Piece>,
    width: f32,
    size: f32,
}

impl Line {
    fn push(&mut self, text: &str, style: &RunStyle, width: f32) {
        match self.pieces.last_mut() {
            Some(last) if last.style == *style => {
                last.text.push_str(text);
                last.width += width;
            }
            _ => self.pieces.push(Piece {
                text: text.to_string(),
                style: style.clone(),
                x: self.width,
                width,
            }),
        }
        self.width += width;
        self.size = self.size.max(style.size);
    }
}

/// Block-level text settings after applying heading level and named style.
#[derive(Debug, Clone, Copy)]
struct BlockStyle {
    size: f32,
    bold: bool,
    italic: bool,
    margin: Margins,
    alignment: Alignment,
}

struct Flow<'a> {
    doc: &'a DocumentDescription,
    options: &'a PdfOptions,
    finished: Vec<PageElements>,
    current: PageElements,
    y: f32,
    top: f32,
    bottom: f32,
    paginate: bool,
    /// Drop default spacing below paragraphs and lists (table cells, list items)
    compact: bool,
    /// Alignment for left-aligned paragraphs (table cell alignment)
    default_alignment: Alignment,
}

impl<'a> Flow<'a> {
    fn paged(doc: &'a DocumentDescription, options: &'a PdfOptions) -> Self {
        let (_, page_height) = doc.page_size.dimensions();
        let top = doc.page_margins.top;
        Self {
            doc,
            options,
            finished: Vec::new(),
            current: Vec::new(),
            y: top,
            top,
            bottom: (page_height - doc.page_margins.bottom).max(top + 1.0),
            paginate: true,
            compact: false,
            default_alignment: Alignment::Left,
        }
    }

    fn detached(doc: &'a DocumentDescription, options: &'a PdfOptions) -> Self {
        Self {
            doc,
            options,
            finished: Vec::new(),
            current: Vec::new(),
            y: 0.0,
            top: 0.0,
            bottom: f32::INFINITY,
            paginate: false,
            compact: false,
            default_alignment: Alignment::Left,
        }
    }

    fn finish(mut self) -> Vec<PageElements> {
        self.finished.push(mem::take(&mut self.current));
        self.finished
    }

    fn into_single_page(self) -> PageElements {
        self.finish().into_iter().flatten().collect()
    }

    fn page_index(&self) -> usize {
        self.finished.len()
    }

    fn at_page_top(&self) -> bool {
        self.y <= self.top + 0.01
    }

    /// Top margins collapse at the top of a page.
    fn suppress_top_margin(&self) -> bool {
        self.paginate && self.at_page_top()
    }

    fn new_page(&mut self) {
        if !self.paginate {
            return;
        }
        self.finished.push(mem::take(&mut self.current));
        self.y = self.top;
    }

    /// Start a new page unless the current one is still blank.
    fn break_page(&mut self) {
        if !self.current.is_empty() || !self.at_page_top() {
            self.new_page();
        }
    }

    /// Make room for `height` points, moving to a new page if needed.
    fn ensure(&mut self, height: f32) {
        if self.paginate && self.y + height > self.bottom && !self.at_page_top() {
            self.new_page();
        }
    }

    fn push(&mut self, element: Element) {
        self.current.push(element);
    }

    fn line_height(&self, size: f32) -> f32 {
        size * self.options.line_height
    }

    fn baseline(&self, size: f32) -> f32 {
        let leading = self.line_height(size) - size;
        leading / 2.0 + size * 0.8
    }

    fn blocks(&mut self, nodes: &[ContentNode], x: f32, width: f32) {
        for node in nodes {
            self.block(node, x, width);
        }
    }

    fn block(&mut self, node: &ContentNode, x: f32, width: f32) {
        match node {
            ContentNode::Paragraph(para) => self.paragraph(para, x, width),
            ContentNode::Table(table) => self.table(table, x, width),
            ContentNode::List(list) => self.list(list, x, width),
            ContentNode::Image(image) => self.image(image, x, width),
            ContentNode::Rule => self.rule(x, width),
            ContentNode::Quote { content } => self.quote(content, x, width),
            ContentNode::Preformatted { text } => self.preformatted(text, x, width),
        }
    }

    fn block_style(&self, para: &Paragraph) -> BlockStyle {
        let base = self.options.base_font_size;
        let spacing = if self.compact {
            0.0
        } else {
            self.options.paragraph_spacing
        };
        let mut style = BlockStyle {
            size: base,
            bold: false,
            italic: false,
            margin: Margins::new(0.0, 0.0, 0.0, spacing),
            alignment: para.alignment,
        };

        if let Some(level) = para.heading_level {
            style.size = base * HEADING_SCALE[level.number() as usize - 1];
            style.bold = true;
            style.margin = Margins::new(0.0, style.size * 0.5, 0.0, style.size * 0.3);
        }

        if let Some(named) = para.style.as_deref().and_then(|name| self.doc.styles.get(name)) {
            if let Some(size) = named.font_size {
                style.size = size;
            }
            style.bold |= named.bold;
            style.italic |= named.italic;
            if let Some(margin) = named.margin {
                style.margin = margin;
            }
            if para.alignment == Alignment::Left {
                if let Some(alignment) = named.alignment {
                    style.alignment = alignment;
                }
            }
        }

        if let Some(margin) = para.margin {
            style.margin = margin;
        }
        if style.alignment == Alignment::Left {
            style.alignment = self.default_alignment;
        }
        style
    }

    fn paragraph(&mut self, para: &Paragraph, x: f32, width: f32) {
        if para.page_break == Some(PageBreak::Before) {
            self.break_page();
        }

        let style = self.block_style(para);
        let inner_x = x + style.margin.left;
        let inner_width = (width - style.margin.horizontal()).max(1.0);

        if !self.suppress_top_margin() {
            self.y += style.margin.top;
        }

        let tokens = tokenize(&para.content, &style);
        for line in wrap(&tokens, inner_width) {
            let size = if line.pieces.is_empty() {
                style.size
            } else {
                line.size
            };
            let height = self.line_height(size);
            self.ensure(height);
            self.place_line(&line, inner_x, inner_width, style.alignment, size);
            self.y += height;
        }

        self.y += style.margin.bottom;

        if para.page_break == Some(PageBreak::After) {
            self.break_page();
        }
    }

    fn place_line(&mut self, line: &Line, x: f32, width: f32, alignment: Alignment, size: f32) {
        let offset = match alignment {
            Alignment::Center => ((width - line.width) / 2.0).max(0.0),
            Alignment::Right => (width - line.width).max(0.0),
            Alignment::Left | Alignment::Justify => 0.0,
        };
        let height = self.line_height(size);
        let baseline = self.y + self.baseline(size);

        for piece in &line.pieces {
            let px = x + offset + piece.x;
            let style = &piece.style;

            if let Some(background) = style.background {
                self.push(Element::Fill {
                    x: px,
                    y: self.y,
                    width: piece.width,
                    height,
                    color: background,
                });
            }

            self.push(Element::Text {
                x: px,
                y: baseline,
                text: piece.text.clone(),
                font: style.font,
                size: style.size,
                color: style.color,
            });

            let stroke = style.size * 0.05;
            if style.underline {
                let uy = baseline + style.size * 0.12;
                self.push(Element::Line {
                    x1: px,
                    y1: uy,
                    x2: px + piece.width,
                    y2: uy,
                    width: stroke,
                    color: style.color,
                });
            }
            if style.strikethrough {
                let sy = baseline - style.size * 0.28;
                self.push(Element::Line {
                    x1: px,
                    y1: sy,
                    x2: px + piece.width,
                    y2: sy,
                    width: stroke,
                    color: style.color,
                });
            }
            if let Some(url) = &style.link {
                self.push(Element::Link {
                    x: px,
                    y: self.y,
                    width: piece.width,
                    height,
                    url: url.clone(),
                });
            }
        }
    }

    fn list(&mut self, list: &List, x: f32, width: f32) {
        let spacing = if self.compact {
            0.0
        } else {
            self.options.paragraph_spacing
        };
        let margin = list.margin.unwrap_or(Margins::new(0.0, 0.0, 0.0, spacing));
        let indent = self.options.list_indent;
        let size = self.options.base_font_size;
        let item_x = x + margin.left + indent;
        let item_width = (width - margin.horizontal() - indent).max(1.0);

        if !self.suppress_top_margin() {
            self.y += margin.top;
        }

        let was_compact = mem::replace(&mut self.compact, true);
        for (index, item) in list.items.iter().enumerate() {
            self.ensure(self.line_height(size));

            let marker = list.marker(index);
            let marker_width = Font::Helvetica.text_width(&marker, size);
            self.push(Element::Text {
                x: (item_x - marker_width - 4.0).max(x + margin.left),
                y: self.y + self.baseline(size),
                text: marker,
                font: Font::Helvetica,
                size,
                color: Color::BLACK,
            });

            if item.content.is_empty() {
                self.y += self.line_height(size);
            } else {
                self.blocks(&item.content, item_x, item_width);
            }
        }
        self.compact = was_compact;

        self.y += margin.bottom;
    }

    fn table(&mut self, table: &Table, x: f32, width: f32) {
        if table.is_empty() {
            return;
        }

        let grid = TableGrid::new(table);
        let layout = table.layout.unwrap_or_default();
        let widths = self.column_widths(table, &grid, &layout, width);
        let mut offsets = Vec::with_capacity(widths.len() + 1);
        let mut acc = 0.0;
        for w in &widths {
            offsets.push(acc);
            acc += w;
        }
        offsets.push(acc);

        let header_rows = (table.header_rows as usize).min(grid.rows.len());
        let last_row = grid.rows.len() - 1;

        for row_index in 0..grid.rows.len() {
            let row = self.layout_row(&grid, row_index, &layout, &offsets);
            let page_before = self.page_index();
            self.ensure(row.height);

            if self.page_index() != page_before && row_index >= header_rows {
                for header_index in 0..header_rows {
                    let header = self.layout_row(&grid, header_index, &layout, &offsets);
                    self.draw_row(header, x, &layout, &offsets, false);
                }
            }

            self.draw_row(row, x, &layout, &offsets, row_index == last_row);
        }

        if !self.compact {
            self.y += self.options.paragraph_spacing;
        }
    }

    fn column_widths(
        &self,
        table: &Table,
        grid: &TableGrid<'_>,
        layout: &TableLayout,
        available: f32,
    ) -> Vec<f32> {
        let columns = grid.columns;
        let declared: Vec<ColumnWidth> = (0..columns)
            .map(|c| {
                table
                    .widths
                    .as_ref()
                    .and_then(|w| w.get(c).copied())
                    .unwrap_or(ColumnWidth::Star)
            })
            .collect();

        let padding = layout.padding_left + layout.padding_right;
        let size = self.options.base_font_size;
        let mut natural = vec![0.0f32; columns];
        for row in &grid.rows {
            for slot in row.iter().filter(|s| s.span == 1) {
                let text = slot.cell.plain_text();
                let widest = text
                    .lines()
                    .map(|l| Font::Helvetica.text_width(l, size))
                    .fold(0.0, f32::max);
                natural[slot.col] = natural[slot.col].max(widest + padding);
            }
        }

        let mut widths = vec![0.0f32; columns];
        let mut fixed_total = 0.0;
        let mut stars = 0usize;
        for (c, width) in declared.iter().enumerate() {
            match width {
                ColumnWidth::Fixed(w) => widths[c] = w.max(padding + 1.0),
                ColumnWidth::Auto => widths[c] = natural[c].max(padding + 10.0),
                ColumnWidth::Star => stars += 1,
            }
            fixed_total += widths[c];
        }

        if stars > 0 {
            let share = ((available - fixed_total) / stars as f32).max(padding + 10.0);
            for (c, width) in declared.iter().enumerate() {
                if *width == ColumnWidth::Star {
                    widths[c] = share;
                }
            }
        }

        let total: f32 = widths.iter().sum();
        if total > available && total > 0.0 {
            let scale = available / total;
            for w in &mut widths {
                *w *= scale;
            }
        }
        widths
    }

    fn layout_row(
        &self,
        grid: &TableGrid<'_>,
        row_index: usize,
        layout: &TableLayout,
        offsets: &[f32],
    ) -> RowLayout {
        let min_height = self.line_height(self.options.base_font_size)
            + layout.padding_top
            + layout.padding_bottom;
        let mut cells = Vec::new();
        let mut height = min_height;

        for slot in &grid.rows[row_index] {
            let end = (slot.col + slot.span).min(offsets.len() - 1);
            let cell_width = offsets[end] - offsets[slot.col];
            let inner = (cell_width - layout.padding_left - layout.padding_right).max(1.0);

            let mut sub = Flow::detached(self.doc, self.options);
            sub.compact = true;
            sub.default_alignment = slot.cell.alignment;
            sub.blocks(&slot.cell.content, 0.0, inner);
            let content_height = sub.y;

            height = height.max(content_height + layout.padding_top + layout.padding_bottom);
            cells.push(CellLayout {
                col: slot.col,
                end,
                rowspan: slot.cell.rowspan.max(1),
                elements: sub.into_single_page(),
            });
        }

        RowLayout {
            cells,
            continued: grid.continued[row_index].clone(),
            height,
        }
    }

    fn draw_row(
        &mut self,
        row: RowLayout,
        x: f32,
        layout: &TableLayout,
        offsets: &[f32],
        last: bool,
    ) {
        let top = self.y;
        let bottom = top + row.height;
        let table_right = x + offsets.last().copied().unwrap_or(0.0);
        let h_line = |x1: f32, x2: f32, y: f32| Element::Line {
            x1,
            y1: y,
            x2,
            y2: y,
            width: layout.h_line_width,
            color: layout.h_line_color,
        };
        let v_line = |x: f32| Element::Line {
            x1: x,
            y1: top,
            x2: x,
            y2: bottom,
            width: layout.v_line_width,
            color: layout.v_line_color,
        };

        for cell in row.cells {
            let left = x + offsets[cell.col];
            let right = x + offsets[cell.end];
            for mut el in cell.elements {
                el.translate(left + layout.padding_left, top + layout.padding_top);
                self.push(el);
            }
            if layout.h_line_width > 0.0 {
                self.push(h_line(left, right, top));
                if cell.rowspan == 1 {
                    self.push(h_line(left, right, bottom));
                }
            }
            if layout.v_line_width > 0.0 {
                self.push(v_line(left));
            }
        }

        if layout.v_line_width > 0.0 {
            for col in &row.continued {
                self.push(v_line(x + offsets[*col]));
            }
            self.push(v_line(table_right));
        }
        if last && layout.h_line_width > 0.0 {
            self.push(h_line(x, table_right, bottom));
        }

        self.y = bottom;
    }

    fn image(&mut self, image: &Image, x: f32, width: f32) {
        let label = image
            .alt
            .clone()
            .unwrap_or_else(|| "[image]".to_string());
        let source: String = image.src.chars().take(48).collect();
        log::warn!("Image '{}' rendered as a placeholder", source);

        let requested_width = image.width.unwrap_or(width.min(200.0));
        let mut w = requested_width.min(width).max(1.0);
        let mut h = match image.height {
            Some(h) => h * (w / requested_width.max(1.0)),
            None => w * 0.6,
        };
        if self.paginate {
            let page_room = self.bottom - self.top;
            if h > page_room {
                w *= page_room / h;
                h = page_room;
            }
        }

        self.ensure(h);
        self.push(Element::Frame {
            x,
            y: self.y,
            width: w,
            height: h,
            line_width: 0.5,
            color: PLACEHOLDER_GRAY,
        });

        let size = (self.options.base_font_size * 0.75).min(h * 0.8).max(1.0);
        let label_width = Font::HelveticaOblique.text_width(&label, size);
        if label_width <= w - 4.0 {
            self.push(Element::Text {
                x: x + (w - label_width) / 2.0,
                y: self.y + h / 2.0 + size * 0.35,
                text: label,
                font: Font::HelveticaOblique,
                size,
                color: PLACEHOLDER_GRAY,
            });
        }

        self.y += h;
        if !self.compact {
            self.y += self.options.paragraph_spacing;
        }
    }

    fn rule(&mut self, x: f32, width: f32) {
        let gap = self.options.paragraph_spacing.max(4.0) / 2.0;
        self.ensure(gap * 2.0);
        self.y += gap;
        self.push(Element::Line {
            x1: x,
            y1: self.y,
            x2: x + width,
            y2: self.y,
            width: 0.5,
            color: PLACEHOLDER_GRAY,
        });
        self.y += gap;
    }

    fn quote(&mut self, content: &[ContentNode], x: f32, width: f32) {
        let indent = self.options.quote_indent;
        let start_page = self.page_index();
        let start_y = self.y;

        self.blocks(content, x + indent, (width - indent).max(1.0));

        let end_page = self.page_index();
        let bar_x = x + indent / 4.0;
        for page in start_page..=end_page {
            let y1 = if page == start_page { start_y } else { self.top };
            let y2 = if page == end_page { self.y } else { self.bottom };
            let bar = Element::Line {
                x1: bar_x,
                y1,
                x2: bar_x,
                y2,
                width: 2.0,
                color: QUOTE_BAR,
            };
            match self.finished.get_mut(page) {
                Some(done) => done.push(bar),
                None => self.current.push(bar),
            }
        }
    }

    fn preformatted(&mut self, text: &str, x: f32, width: f32) {
        let size = self.options.base_font_size * 0.85;
        let char_width = Font::Courier.text_width(" ", size);
        let max_chars = ((width / char_width).floor() as usize).max(1);
        let height = self.line_height(size);

        for source_line in text.split('\n') {
            let chars: Vec<char> = source_line.chars().collect();
            let chunks: Vec<String> = if chars.is_empty() {
                vec![String::new()]
            } else {
                chars.chunks(max_chars).map(|c| c.iter().collect()).collect()
            };
            for chunk in chunks {
                self.ensure(height);
                if !chunk.is_empty() {
                    self.push(Element::Text {
                        x,
                        y: self.y + self.baseline(size),
                        text: chunk,
                        font: Font::Courier,
                        size,
                        color: Color::BLACK,
                    });
                }
                self.y += height;
            }
        }

        if !self.compact {
            self.y += self.options.paragraph_spacing;
        }
    }
}

/// Split inline content into words, spaces and hard breaks.
fn tokenize(content: &[InlineContent], block: &BlockStyle) -> Vec<Token> {
    let mut tokens = Vec::new();

    for inline in content {
        match inline {
            InlineContent::Text(run) => {
                push_words(&mut tokens, &run.text, resolve(&run.style, block, None))
            }
            InlineContent::Link { text, url, style } => {
                push_words(&mut tokens, text, resolve(style, block, Some(url)))
            }
            InlineContent::LineBreak => tokens.push(Token::Break),
        }
    }

    tokens
}

fn push_words(tokens: &mut Vec<Token>, text: &str, style: RunStyle) {
    let mut word = String::new();
    for c in text.chars() {
        match c {
            '\n' => {
                flush_word(tokens, &mut word, &style);
                tokens.push(Token::Break);
            }
            ' ' | '\t' | '\r' => {
                flush_word(tokens, &mut word, &style);
                tokens.push(Token::Space(style.clone()));
            }
            _ => word.push(c),
        }
    }
    flush_word(tokens, &mut word, &style);
}

fn flush_word(tokens: &mut Vec<Token>, word: &mut String, style: &RunStyle) {
    if !word.is_empty() {
        tokens.push(Token::Word(mem::take(word), style.clone()));
    }
}

fn resolve(style: &TextStyle, block: &BlockStyle, link: Option<&String>) -> RunStyle {
    RunStyle {
        font: Font::select(block.bold || style.bold, block.italic || style.italic, style.monospace),
        size: style.font_size.unwrap_or(block.size),
        color: style.color.unwrap_or(Color::BLACK),
        underline: style.underline,
        strikethrough: style.strikethrough,
        background: style.background_color,
        link: link.cloned(),
    }
}

/// Greedy line breaking.
fn wrap(tokens: &[Token], max_width: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut line = Line::default();
    let mut pending_space: Option<&RunStyle> = None;

    for token in tokens {
        match token {
            Token::Break => {
                lines.push(mem::take(&mut line));
                pending_space = None;
            }
            Token::Space(style) => {
                if !line.pieces.is_empty() {
                    pending_space = Some(style);
                }
            }
            Token::Word(word, style) => {
                let word_width = style.font.text_width(word, style.size);
                let space_width = pending_space
                    .map(|s| s.font.text_width(" ", s.size))
                    .unwrap_or(0.0);

                if !line.pieces.is_empty() && line.width + space_width + word_width > max_width {
                    lines.push(mem::take(&mut line));
                } else if let Some(space_style) = pending_space {
                    line.push(" ", space_style, space_width);
                }
                pending_space = None;

                if word_width > max_width {
                    // Hard-split words wider than the line.
                    let mut chunk = String::new();
                    let mut chunk_width = 0.0;
                    for c in word.chars() {
                        let cw = style.font.char_width(c) as f32 * style.size / 1000.0;
                        if !chunk.is_empty() && line.width + chunk_width + cw > max_width {
                            line.push(&chunk, style, chunk_width);
                            lines.push(mem::take(&mut line));
                            chunk.clear();
                            chunk_width = 0.0;
                        }
                        chunk.push(c);
                        chunk_width += cw;
                    }
                    if !chunk.is_empty() {
                        line.push(&chunk, style, chunk_width);
                    }
                } else {
                    line.push(word, style, word_width);
                }
            }
        }
    }

    if !line.pieces.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

/// A cell placed on the column grid.
struct Slot<'t> {
    cell: &'t TableCell,
    col: usize,
    span: usize,
}

/// Table cells resolved to grid columns, honouring row and column spans.
struct TableGrid<'t> {
    rows: Vec<Vec<Slot<'t>>>,
    /// Columns covered by a row-spanning cell from an earlier row
    continued: Vec<Vec<usize>>,
    columns: usize,
}

impl<'t> TableGrid<'t> {
    fn new(table: &'t Table) -> Self {
        let mut carry: Vec<usize> = Vec::new();
        let mut rows = Vec::with_capacity(table.rows.len());
        let mut continued = Vec::with_capacity(table.rows.len());
        let mut columns = 0;

        for row in &table.rows {
            let mut slots = Vec::with_capacity(row.cells.len());
            let mut covered = Vec::new();
            let mut col = 0;

            for cell in &row.cells {
                while col < carry.len() && carry[col] > 0 {
                    covered.push(col);
                    col += 1;
                }
                let span = cell.colspan.max(1) as usize;
                if carry.len() < col + span {
                    carry.resize(col + span, 0);
                }
                for c in col..col + span {
                    carry[c] = cell.rowspan.max(1) as usize;
                }
                slots.push(Slot { cell, col, span });
                col += span;
            }
            while col < carry.len() {
                if carry[col] > 0 {
                    covered.push(col);
                }
                col += 1;
            }

            columns = columns.max(carry.len());
            for c in &mut carry {
                *c = c.saturating_sub(1);
            }
            rows.push(slots);
            continued.push(covered);
        }

        Self {
            rows,
            continued,
            columns,
        }
    }
}

struct CellLayout {
    col: usize,
    end: usize,
    rowspan: u8,
    elements: Vec<Element>,
}

struct RowLayout {
    cells: Vec<CellLayout>,
    continued: Vec<usize>,
    height: f32,
}
