//! HTML fragment to content tree conversion.

use scraper::{ElementRef, Html, Node};

use crate::error::Result;
use crate::model::{
    Alignment, Color, ColumnWidth, ContentNode, HeadingLevel, Image, InlineContent, List,
    ListItem, Paragraph, Table, TableCell, TableLayout, TableRow, TextRun, TextStyle,
};

use super::{css, ContentConverter, ConvertOptions, TextNormalizer};

/// Elements whose content is never rendered.
pub(crate) const IGNORED: &[&str] = &[
    "script", "style", "template", "head", "title", "meta", "link", "noscript", "iframe",
    "object", "svg",
];

/// Elements that only group other blocks.
const CONTAINERS: &[&str] = &[
    "html", "body", "div", "section", "article", "header", "footer", "main", "nav", "aside",
    "figure", "details", "summary", "center",
];

/// Converts editor HTML into content nodes.
#[derive(Debug, Clone)]
pub struct HtmlConverter {
    options: ConvertOptions,
    normalizer: TextNormalizer,
}

impl HtmlConverter {
    /// Create a converter with default options.
    pub fn new() -> Self {
        Self::with_options(ConvertOptions::default())
    }

    /// Create a converter with custom options.
    pub fn with_options(options: ConvertOptions) -> Self {
        let normalizer = TextNormalizer::new(options.normalize.clone());
        Self {
            options,
            normalizer,
        }
    }

    /// Convert an HTML fragment to top-level content nodes.
    pub fn convert_html(&self, html: &str) -> Vec<ContentNode> {
        let fragment = Html::parse_fragment(html);
        let nodes = self.collect_blocks(fragment.root_element(), &TextStyle::default());
        log::debug!("Converted HTML into {} content nodes", nodes.len());
        nodes
    }

    fn collect_blocks(&self, parent: ElementRef<'_>, inherited: &TextStyle) -> Vec<ContentNode> {
        let mut blocks = Vec::new();
        let mut pending = InlineSink::default();

        for child in parent.children() {
            if let Some(el) = ElementRef::wrap(child) {
                let tag = el.value().name();
                if IGNORED.contains(&tag) {
                    continue;
                }
                if is_block(tag) {
                    self.flush(&mut pending, Paragraph::new(), &mut blocks);
                    self.convert_block(el, inherited, &mut blocks);
                } else if contains_block(el) {
                    // Inline wrapper around blocks, e.g. <span><table>.
                    self.flush(&mut pending, Paragraph::new(), &mut blocks);
                    let style = self.element_style(el, inherited);
                    blocks.extend(self.collect_blocks(el, &style));
                } else {
                    self.collect_inline(el, inherited, &mut pending);
                }
            } else if let Node::Text(text) = child.value() {
                self.push_text(&**text, inherited, &mut pending);
            }
        }

        self.flush(&mut pending, Paragraph::new(), &mut blocks);
        blocks
    }

    fn convert_block(&self, el: ElementRef<'_>, inherited: &TextStyle, out: &mut Vec<ContentNode>) {
        let tag = el.value().name();
        let style_attr = el.value().attr("style").unwrap_or("");

        match tag {
            "p" | "figcaption" | "address" | "dt" | "dd" => {
                let mut para = Paragraph::new();
                para.alignment = css::text_align(style_attr).unwrap_or(if tag == "figcaption" {
                    Alignment::Center
                } else {
                    Alignment::Left
                });
                let mut sink = InlineSink::default();
                let style = self.element_style(el, inherited);
                self.collect_inline_children(el, &style, &mut sink);
                self.flush(&mut sink, para, out);
            }
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let mut para = Paragraph::new();
                para.heading_level = HeadingLevel::from_tag(tag);
                para.alignment = css::text_align(style_attr).unwrap_or_default();
                let mut sink = InlineSink::default();
                let style = self.element_style(el, inherited);
                self.collect_inline_children(el, &style, &mut sink);
                // Headings keep their slot even when empty, like the outline does.
                sink.force = true;
                self.flush(&mut sink, para, out);
            }
            "ul" | "ol" => out.push(ContentNode::List(self.convert_list(el, inherited))),
            "table" => out.push(ContentNode::Table(self.convert_table(el, inherited))),
            "img" => out.push(ContentNode::Image(convert_image(el))),
            "hr" => out.push(ContentNode::Rule),
            "blockquote" => {
                let style = self.element_style(el, inherited);
                let content = self.collect_blocks(el, &style);
                if !content.is_empty() {
                    out.push(ContentNode::Quote { content });
                }
            }
            "pre" => {
                let raw: String = el.text().collect();
                let text = self.normalizer.normalize_preformatted(raw.trim_end_matches('\n'));
                let text = text.strip_prefix('\n').unwrap_or(&text).to_string();
                out.push(ContentNode::Preformatted { text });
            }
            "li" => {
                // Stray list item outside a list.
                let mut list = List::unordered();
                list.add_item(ListItem::with_content(self.collect_blocks(el, inherited)));
                out.push(ContentNode::List(list));
            }
            _ => {
                let style = self.element_style(el, inherited);
                out.extend(self.collect_blocks(el, &style));
            }
        }
    }

    fn convert_list(&self, el: ElementRef<'_>, inherited: &TextStyle) -> List {
        let mut list = if el.value().name() == "ol" {
            List::ordered()
        } else {
            List::unordered()
        };
        if let Some(start) = el.value().attr("start").and_then(|s| s.trim().parse().ok()) {
            list.start = start;
        }

        for child in el.children().filter_map(ElementRef::wrap) {
            match child.value().name() {
                "li" => {
                    let style = self.element_style(child, inherited);
                    list.add_item(ListItem::with_content(self.collect_blocks(child, &style)));
                }
                // Nested list placed directly inside the list element.
                "ul" | "ol" => {
                    let nested = self.convert_list(child, inherited);
                    match list.items.last_mut() {
                        Some(last) => last.content.push(ContentNode::List(nested)),
                        None => list.add_item(ListItem::with_content(vec![nested.into()])),
                    }
                }
                _ => {}
            }
        }

        list
    }

    fn convert_table(&self, el: ElementRef<'_>, inherited: &TextStyle) -> Table {
        let mut table = Table::new();
        let mut header_done = false;

        for child in el.children().filter_map(ElementRef::wrap) {
            match child.value().name() {
                "thead" => {
                    for tr in child.children().filter_map(ElementRef::wrap) {
                        if tr.value().name() == "tr" {
                            let mut row = self.convert_row(tr, inherited);
                            row.is_header = true;
                            table.add_row(row);
                        }
                    }
                }
                "tbody" | "tfoot" => {
                    for tr in child.children().filter_map(ElementRef::wrap) {
                        if tr.value().name() == "tr" {
                            table.add_row(self.convert_row(tr, inherited));
                        }
                    }
                }
                "tr" => table.add_row(self.convert_row(child, inherited)),
                "colgroup" => table.widths = column_widths(child),
                _ => {}
            }
        }

        for row in &table.rows {
            if row.is_header && !header_done {
                table.header_rows = table.header_rows.saturating_add(1);
            } else {
                header_done = true;
            }
        }

        table.layout = authored_layout(el);
        table
    }

    fn convert_row(&self, tr: ElementRef<'_>, inherited: &TextStyle) -> TableRow {
        let mut cells = Vec::new();
        let mut all_th = true;

        for cell_el in tr.children().filter_map(ElementRef::wrap) {
            let tag = cell_el.value().name();
            if tag != "td" && tag != "th" {
                continue;
            }
            all_th &= tag == "th";

            let mut style = self.element_style(cell_el, inherited);
            if tag == "th" {
                style.bold = true;
            }
            let span = |name: &str| {
                cell_el
                    .value()
                    .attr(name)
                    .and_then(|v| v.trim().parse::<u8>().ok())
                    .unwrap_or(1)
            };

            let mut cell = TableCell::with_content(self.collect_blocks(cell_el, &style))
                .colspan(span("colspan"))
                .rowspan(span("rowspan"));
            if let Some(align) = cell_el.value().attr("style").and_then(css::text_align) {
                cell.alignment = align;
            }
            cells.push(cell);
        }

        let mut row = TableRow::new(cells);
        row.is_header = all_th && !row.cells.is_empty();
        row
    }

    fn collect_inline_children(&self, el: ElementRef<'_>, style: &TextStyle, sink: &mut InlineSink) {
        for child in el.children() {
            if let Some(child_el) = ElementRef::wrap(child) {
                self.collect_inline(child_el, style, sink);
            } else if let Node::Text(text) = child.value() {
                self.push_text(&**text, style, sink);
            }
        }
    }

    fn collect_inline(&self, el: ElementRef<'_>, inherited: &TextStyle, sink: &mut InlineSink) {
        let tag = el.value().name();
        match tag {
            _ if IGNORED.contains(&tag) => {}
            "br" => {
                sink.trim_trailing_space();
                sink.content.push(InlineContent::LineBreak);
            }
            "img" => sink.images.push(convert_image(el)),
            "a" => {
                let mut style = self.element_style(el, inherited);
                if style.color.is_none() {
                    style.color = Some(Color::LINK_BLUE);
                }
                style.underline = true;
                match el.value().attr("href") {
                    Some(href) if !href.trim().is_empty() => {
                        let raw: String = el.text().collect();
                        let text = self.normalizer.normalize(&raw);
                        let text = if sink.ends_with_space() {
                            text.trim_start().to_string()
                        } else {
                            text
                        };
                        if !text.is_empty() {
                            sink.content.push(InlineContent::Link {
                                text,
                                url: href.trim().to_string(),
                                style,
                            });
                        }
                    }
                    _ => self.collect_inline_children(el, &style, sink),
                }
            }
            _ => {
                let style = self.element_style(el, inherited);
                self.collect_inline_children(el, &style, sink);
            }
        }
    }

    fn push_text(&self, raw: &str, style: &TextStyle, sink: &mut InlineSink) {
        let mut text = self.normalizer.normalize(raw);
        if sink.ends_with_space() {
            text = text.trim_start_matches(' ').to_string();
        }
        if text.is_empty() {
            return;
        }

        if let Some(InlineContent::Text(last)) = sink.content.last_mut() {
            if last.style == *style {
                last.text.push_str(&text);
                return;
            }
        }
        sink.content
            .push(InlineContent::Text(TextRun::styled(text, style.clone())));
    }

    /// Text style of an element: tag semantics, then its `style` attribute.
    fn element_style(&self, el: ElementRef<'_>, inherited: &TextStyle) -> TextStyle {
        let mut style = inherited.clone();
        match el.value().name() {
            "strong" | "b" => style.bold = true,
            "em" | "i" | "cite" | "var" | "dfn" => style.italic = true,
            "u" | "ins" => style.underline = true,
            "s" | "strike" | "del" => style.strikethrough = true,
            "code" | "kbd" | "samp" | "tt" => style.monospace = true,
            "mark" => style.background_color = Some(Color::rgb(255, 255, 0)),
            "small" => style.font_size = Some(style.font_size.unwrap_or(12.0) * 0.8),
            _ => {}
        }
        if let Some(attr) = el.value().attr("style") {
            css::apply_text_style(attr, &mut style);
        }
        style
    }

    fn flush(&self, sink: &mut InlineSink, mut para: Paragraph, out: &mut Vec<ContentNode>) {
        let mut taken = std::mem::take(sink);
        taken.trim_trailing_space();

        let has_text = taken.content.iter().any(|c| match c {
            InlineContent::Text(run) => !run.text.trim().is_empty(),
            InlineContent::Link { text, .. } => !text.trim().is_empty(),
            InlineContent::LineBreak => false,
        });

        if has_text || taken.force || (self.options.keep_empty_paragraphs && !taken.content.is_empty())
        {
            para.content = taken.content;
            out.push(ContentNode::Paragraph(para));
        }
        out.extend(taken.images.into_iter().map(ContentNode::Image));
    }
}

impl Default for HtmlConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentConverter for HtmlConverter {
    fn name(&self) -> &str {
        "html"
    }

    fn convert(&self, html: &str) -> Result<Vec<ContentNode>> {
        Ok(self.convert_html(html))
    }
}

/// Inline content gathered for one paragraph, plus images found inside it.
#[derive(Debug, Default)]
struct InlineSink {
    content: Vec<InlineContent>,
    images: Vec<Image>,
    force: bool,
}

impl InlineSink {
    fn ends_with_space(&self) -> bool {
        match self.content.last() {
            None | Some(InlineContent::LineBreak) => true,
            Some(InlineContent::Text(run)) => run.text.ends_with(' '),
            Some(InlineContent::Link { text, .. }) => text.ends_with(' '),
        }
    }

    fn trim_trailing_space(&mut self) {
        while let Some(last) = self.content.last_mut() {
            let text = match last {
                InlineContent::Text(run) => &mut run.text,
                InlineContent::Link { text, .. } => text,
                InlineContent::LineBreak => return,
            };
            let trimmed_len = text.trim_end_matches(' ').len();
            text.truncate(trimmed_len);
            if text.is_empty() {
                self.content.pop();
            } else {
                return;
            }
        }
    }
}

/// Whether an inline element wraps block content. Images are hoisted from
/// inline context anyway.
fn contains_block(el: ElementRef<'_>) -> bool {
    el.descendants().skip(1).filter_map(ElementRef::wrap).any(|d| {
        let tag = d.value().name();
        tag != "img" && is_block(tag)
    })
}

pub(crate) fn is_block(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "ul"
            | "ol"
            | "li"
            | "table"
            | "img"
            | "hr"
            | "blockquote"
            | "pre"
            | "figcaption"
            | "address"
            | "dl"
            | "dt"
            | "dd"
    ) || CONTAINERS.contains(&tag)
}

fn convert_image(el: ElementRef<'_>) -> Image {
    let attrs = el.value();
    let style = attrs.attr("style").unwrap_or("");
    let dimension = |name: &str| {
        css::property(style, name)
            .and_then(|v| css::length_to_points(&v))
            .or_else(|| attrs.attr(name).and_then(css::length_to_points))
    };

    Image {
        src: attrs.attr("src").unwrap_or_default().to_string(),
        alt: attrs
            .attr("alt")
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string),
        width: dimension("width"),
        height: dimension("height"),
    }
}

/// Column widths from `<colgroup>`, only when every column has an absolute width.
fn column_widths(colgroup: ElementRef<'_>) -> Option<Vec<ColumnWidth>> {
    let widths: Vec<Option<f32>> = colgroup
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|c| c.value().name() == "col")
        .map(|col| {
            col.value()
                .attr("style")
                .and_then(|s| css::property(s, "width"))
                .or_else(|| col.value().attr("width").map(str::to_string))
                .and_then(|w| css::length_to_points(&w))
        })
        .collect();

    if widths.is_empty() || widths.iter().any(Option::is_none) {
        return None;
    }
    Some(widths.into_iter().flatten().map(ColumnWidth::Fixed).collect())
}

/// Border formatting the author put on the `<table>` element itself.
fn authored_layout(table: ElementRef<'_>) -> Option<TableLayout> {
    let attrs = table.value();
    let style = attrs.attr("style").unwrap_or("");

    let width = css::property(style, "border-width")
        .and_then(|w| css::length_to_points(&w))
        .or_else(|| {
            attrs
                .attr("border")
                .and_then(|b| b.trim().parse::<f32>().ok())
        });
    let color = css::property(style, "border-color").and_then(|c| Color::parse(&c));

    if width.is_none() && color.is_none() {
        return None;
    }

    let mut layout = TableLayout::grid(width.unwrap_or(1.0), color.unwrap_or(Color::BLACK), 4.0);
    if let Some(padding) = attrs
        .attr("cellpadding")
        .and_then(|p| p.trim().parse::<f32>().ok())
    {
        layout.padding_left = padding;
        layout.padding_right = padding;
        layout.padding_top = padding;
        layout.padding_bottom = padding;
    }
    Some(layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(html: &str) -> Vec<ContentNode> {
        HtmlConverter::new().convert_html(html)
    }

    #[test]
    fn test_heading_and_paragraph() {
        let nodes = convert("<h1>A</h1><p>text</p>");
        assert_eq!(nodes.len(), 2);

        let heading = nodes[0].as_paragraph().unwrap();
        assert_eq!(heading.heading_level, Some(HeadingLevel::H1));
        assert_eq!(heading.plain_text(), "A");

        let para = nodes[1].as_paragraph().unwrap();
        assert!(!para.is_heading());
        assert_eq!(para.plain_text(), "text");
    }

    #[test]
    fn test_inline_styles_become_runs() {
        let nodes = convert("<p>Hello <strong>bold</strong> and <em>it</em>!</p>");
        let para = nodes[0].as_paragraph().unwrap();
        assert_eq!(para.plain_text(), "Hello bold and it!");

        let bold = para
            .content
            .iter()
            .find_map(|c| match c {
                InlineContent::Text(run) if run.style.bold => Some(run.text.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(bold, "bold");
    }

    #[test]
    fn test_whitespace_between_runs() {
        let nodes = convert("<p>\n  one   <b> two </b>  three\n</p>");
        assert_eq!(nodes[0].plain_text(), "one two three");
    }

    #[test]
    fn test_line_break() {
        let nodes = convert("<p>first<br>second</p>");
        let para = nodes[0].as_paragraph().unwrap();
        assert_eq!(para.plain_text(), "first\nsecond");
    }

    #[test]
    fn test_empty_paragraphs_dropped_by_default() {
        let nodes = convert("<p>   </p><p>kept</p>");
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn test_links() {
        let nodes = convert(r#"<p>see <a href="https://example.com">the docs</a></p>"#);
        let para = nodes[0].as_paragraph().unwrap();
        assert!(para.content.iter().any(|c| matches!(
            c,
            InlineContent::Link { text, url, .. } if text == "the docs" && url == "https://example.com"
        )));
    }

    #[test]
    fn test_table_inside_inline_wrapper() {
        let nodes = convert(
            "<span>lead <table><tr><td>a</td><td>b</td></tr></table></span><p>after</p>",
        );
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].as_paragraph().unwrap().plain_text(), "lead");
        assert_eq!(nodes[1].as_table().unwrap().column_count(), 2);
        assert_eq!(nodes[2].as_paragraph().unwrap().plain_text(), "after");
    }

    #[test]
    fn test_paragraphs_inside_inline_wrapper_stay_separate() {
        let nodes = convert("<span><p>alpha</p><p>beta</p></span>");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].as_paragraph().unwrap().plain_text(), "alpha");
        assert_eq!(nodes[1].as_paragraph().unwrap().plain_text(), "beta");
    }

    #[test]
    fn test_inline_wrapper_style_reaches_nested_blocks() {
        let nodes = convert("<strong><p>loud</p></strong>");
        let para = nodes[0].as_paragraph().unwrap();
        assert_eq!(para.plain_text(), "loud");
        assert!(para.content.iter().all(|c| match c {
            InlineContent::Text(run) => run.style.bold,
            _ => false,
        }));
    }

    #[test]
    fn test_lists() {
        let nodes = convert("<ol start=\"3\"><li>a</li><li>b<ul><li>c</li></ul></li></ol>");
        let list = nodes[0].as_list().unwrap();
        assert!(list.ordered);
        assert_eq!(list.start, 3);
        assert_eq!(list.len(), 2);
        assert!(list.items[1].content.iter().any(|n| n.as_list().is_some()));
    }

    #[test]
    fn test_table_in_figure() {
        let html = r#"<figure class="table"><table><thead><tr><th>H1</th><th>H2</th><th>H3</th></tr></thead>
            <tbody><tr><td>a</td><td>b</td><td>c</td></tr></tbody></table></figure>"#;
        let nodes = convert(html);
        assert_eq!(nodes.len(), 1);

        let table = nodes[0].as_table().unwrap();
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.header_rows, 1);
        assert_eq!(table.rows[1].cells[2].plain_text(), "c");
        assert!(table.widths.is_none());
        assert!(table.layout.is_none());
    }

    #[test]
    fn test_authored_table_formatting_is_captured() {
        let html = r#"<table border="2" style="border-color:#f00"><colgroup><col style="width:100px"><col width="40"></colgroup>
            <tr><td>a</td><td>b</td></tr></table>"#;
        let nodes = convert(html);
        let table = nodes[0].as_table().unwrap();
        assert_eq!(
            table.widths,
            Some(vec![ColumnWidth::Fixed(75.0), ColumnWidth::Fixed(30.0)])
        );
        let layout = table.layout.unwrap();
        assert_eq!(layout.h_line_width, 2.0);
        assert_eq!(layout.h_line_color, Color::rgb(255, 0, 0));
    }

    #[test]
    fn test_images_hoisted_out_of_paragraphs() {
        let nodes = convert(r#"<p>caption <img src="a.png" alt="A" width="200"></p>"#);
        assert_eq!(nodes.len(), 2);
        assert!(nodes[0].is_paragraph());
        match &nodes[1] {
            ContentNode::Image(img) => {
                assert_eq!(img.src, "a.png");
                assert_eq!(img.alt.as_deref(), Some("A"));
                assert_eq!(img.width, Some(150.0));
            }
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn test_stray_top_level_text_becomes_paragraph() {
        let nodes = convert("loose text<hr><blockquote><p>quoted</p></blockquote>");
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].plain_text(), "loose text");
        assert!(matches!(nodes[1], ContentNode::Rule));
        assert!(matches!(nodes[2], ContentNode::Quote { .. }));
    }

    #[test]
    fn test_preformatted_keeps_layout() {
        let nodes = convert("<pre>line 1\n  line 2</pre>");
        match &nodes[0] {
            ContentNode::Preformatted { text } => assert_eq!(text, "line 1\n  line 2"),
            other => panic!("expected preformatted, got {:?}", other),
        }
    }

    #[test]
    fn test_scripts_ignored() {
        let nodes = convert("<script>alert(1)</script><p>safe</p>");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].plain_text(), "safe");
    }
}
