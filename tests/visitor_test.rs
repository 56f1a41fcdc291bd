//! Integration tests for the content visitor pattern.

use tocpdf::compose::{walk, ContentVisitor, TableLayoutPatcher, TablePatchPolicy, VisitorAction};
use tocpdf::model::{
    ColumnWidth, ContentNode, Image, List, ListItem, Paragraph, Table, TableCell, TableLayout,
    TableRow,
};

/// Custom visitor that tracks visit counts.
#[derive(Default)]
struct CountingVisitor {
    paragraph_count: usize,
    table_count: usize,
    image_count: usize,
    heading_count: usize,
}

impl ContentVisitor for CountingVisitor {
    fn visit_paragraph(&mut self, para: &mut Paragraph) -> VisitorAction {
        if para.is_heading() {
            self.heading_count += 1;
        } else {
            self.paragraph_count += 1;
        }
        VisitorAction::Continue
    }

    fn visit_table(&mut self, _table: &mut Table) -> VisitorAction {
        self.table_count += 1;
        VisitorAction::Continue
    }

    fn visit_image(&mut self, _image: &mut Image) -> VisitorAction {
        self.image_count += 1;
        VisitorAction::Continue
    }
}

/// Visitor that upper-cases paragraph text in place.
struct ShoutVisitor;

impl ContentVisitor for ShoutVisitor {
    fn visit_paragraph(&mut self, para: &mut Paragraph) -> VisitorAction {
        let text = para.plain_text().to_uppercase();
        VisitorAction::Replace(Paragraph::with_text(text).into())
    }
}

/// Visitor that drops every image.
struct DropImages;

impl ContentVisitor for DropImages {
    fn visit_image(&mut self, _image: &mut Image) -> VisitorAction {
        VisitorAction::Skip
    }
}

fn table_of(rows: &[&[&str]]) -> Table {
    let mut table = Table::new();
    for row in rows {
        table.add_row(TableRow::from_strings(row.iter().copied()));
    }
    table
}

fn sample_nodes() -> Vec<ContentNode> {
    let mut inner = table_of(&[&["x", "y"]]);
    inner.widths = Some(vec![ColumnWidth::Fixed(10.0), ColumnWidth::Fixed(20.0)]);

    let mut outer = Table::new();
    outer.add_row(TableRow::new(vec![
        TableCell::with_content(vec![inner.into()]),
        TableCell::text("b"),
        TableCell::text("c"),
    ]));

    let mut list = List::unordered();
    list.add_item(ListItem::text("item"));

    vec![
        Paragraph::heading("Title", tocpdf::HeadingLevel::H1).into(),
        Paragraph::with_text("body").into(),
        outer.into(),
        list.into(),
        ContentNode::Image(Image::new("a.png")),
    ]
}

#[test]
fn test_counting_visitor_descends_into_children() {
    let mut nodes = sample_nodes();
    let mut visitor = CountingVisitor::default();
    walk(&mut nodes, &mut visitor);

    assert_eq!(visitor.heading_count, 1);
    // body, b, c, x, y and the list item
    assert_eq!(visitor.paragraph_count, 6);
    assert_eq!(visitor.table_count, 2);
    assert_eq!(visitor.image_count, 1);
}

#[test]
fn test_skip_action_drops_nodes() {
    let mut nodes = sample_nodes();
    walk(&mut nodes, &mut DropImages);
    assert!(!nodes.iter().any(|n| n.is_image()));
    assert_eq!(nodes.len(), 4);
}

#[test]
fn test_replace_action() {
    let mut nodes = vec![Paragraph::with_text("quiet").into()];
    walk(&mut nodes, &mut ShoutVisitor);
    assert_eq!(nodes[0].plain_text(), "QUIET");
}

#[test]
fn test_patcher_reaches_nested_tables() {
    let mut nodes = sample_nodes();
    let mut patcher = TableLayoutPatcher::default();
    walk(&mut nodes, &mut patcher);

    assert_eq!(patcher.patched(), 2);

    let outer = nodes[2].as_table().unwrap();
    assert_eq!(outer.widths, Some(vec![ColumnWidth::Star; 3]));
    assert_eq!(outer.layout, Some(TableLayout::thin_gray()));

    let inner = outer.rows[0].cells[0].content[0].as_table().unwrap();
    assert_eq!(inner.widths, Some(vec![ColumnWidth::Star; 2]));
}

#[test]
fn test_patcher_keeps_author_formatting_when_asked() {
    let mut nodes = sample_nodes();
    let mut patcher = TableLayoutPatcher::new(TablePatchPolicy::OnlyIfUnset, TableLayout::thin_gray());
    walk(&mut nodes, &mut patcher);

    let outer = nodes[2].as_table().unwrap();
    let inner = outer.rows[0].cells[0].content[0].as_table().unwrap();
    assert_eq!(
        inner.widths,
        Some(vec![ColumnWidth::Fixed(10.0), ColumnWidth::Fixed(20.0)])
    );
    assert_eq!(inner.layout, Some(TableLayout::thin_gray()));
}
