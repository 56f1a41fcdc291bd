//! Integration tests for the renderer trait and the preview renderers.

use std::io::Write;

use serde_json::Value;
use tocpdf::model::{ContentNode, DocumentDescription};
use tocpdf::render::{to_text, PAGE_BREAK_MARKER};
use tocpdf::{
    compose, DocumentRenderer, Editor, ExportStats, JsonFormat, JsonRenderer, PdfRenderer,
    TextRenderer,
};

const SAMPLE: &str = "<h1>Overview</h1><p>Intro text.</p>\
                      <h2>Figures</h2>\
                      <figure class=\"table\"><table><tbody>\
                      <tr><td>a</td><td>b</td><td>c</td></tr>\
                      <tr><td>d</td><td>e</td><td>f</td></tr>\
                      </tbody></table></figure>\
                      <h3>Notes</h3><ul><li>first</li><li>second</li></ul>";

/// Renderer that writes one line per top-level node kind.
struct KindRenderer;

impl DocumentRenderer for KindRenderer {
    fn name(&self) -> &str {
        "kinds"
    }

    fn render(&self, doc: &DocumentDescription, out: &mut dyn Write) -> tocpdf::Result<()> {
        for node in &doc.content {
            writeln!(out, "{}", node.kind())?;
        }
        Ok(())
    }
}

#[test]
fn test_json_shape() {
    let doc = compose(SAMPLE).unwrap();
    let raw = tocpdf::render::to_json(&doc, JsonFormat::Compact).unwrap();
    let json: Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(json["page_size"], "a4");
    assert!(json.get("footer").is_none());

    let content = json["content"].as_array().unwrap();
    assert_eq!(content[0]["type"], "paragraph");
    assert_eq!(content[0]["style"], "header");
    assert_eq!(content[1]["type"], "list");
    assert_eq!(content[1]["items"].as_array().unwrap().len(), 3);

    let table = content.iter().find(|n| n["type"] == "table").unwrap();
    assert_eq!(table["widths"], serde_json::json!(["star", "star", "star"]));
    assert_eq!(table["layout"]["h_line_width"], 0.5);
    assert_eq!(table["layout"]["padding_top"], 4.0);
}

#[test]
fn test_text_preview_order() {
    let doc = compose(SAMPLE).unwrap();
    let text = to_text(&doc);

    let title = text.find("Table of Contents and Indexing").unwrap();
    let outline = text.find("3. Notes").unwrap();
    let marker = text.find(PAGE_BREAK_MARKER).unwrap();
    let body = text.find("Intro text.").unwrap();
    assert!(title < outline && outline < marker && marker < body);
    assert!(text.contains("a | b | c"));
}

#[test]
fn test_custom_renderer_through_editor() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = Editor::new();
    editor.on_change("<h1>A</h1><p>text</p>");

    let path = editor.download_with(&KindRenderer, dir.path()).unwrap();
    let kinds = std::fs::read_to_string(path).unwrap();
    let kinds: Vec<&str> = kinds.lines().collect();
    assert_eq!(kinds, vec!["paragraph", "list", "paragraph", "heading", "paragraph"]);
}

#[test]
fn test_renderers_are_interchangeable() {
    let doc = compose(SAMPLE).unwrap();
    let renderers: Vec<Box<dyn DocumentRenderer>> = vec![
        Box::new(PdfRenderer::new()),
        Box::new(JsonRenderer::new(JsonFormat::Pretty)),
        Box::new(TextRenderer),
    ];

    for renderer in &renderers {
        let mut out = Vec::new();
        renderer.render(&doc, &mut out).unwrap();
        assert!(!out.is_empty(), "{} wrote nothing", renderer.name());
    }
}

#[test]
fn test_stats_for_sample() {
    let doc = compose(SAMPLE).unwrap();
    let mut pdf = Vec::new();
    let pages = PdfRenderer::new().render_pages(&doc, &mut pdf).unwrap();
    let stats = ExportStats::collect(&doc).with_pages(pages);

    assert_eq!(stats.outline_entries, 3);
    assert_eq!(stats.heading_count, 3);
    assert_eq!(stats.table_count, 1);
    assert_eq!(stats.list_count, 1);
    assert_eq!(stats.page_count, 2);
}

#[test]
fn test_body_nodes_follow_page_break() {
    let doc = compose(SAMPLE).unwrap();
    let break_index = doc
        .content
        .iter()
        .position(|n| matches!(n, ContentNode::Paragraph(p) if p.is_page_break()))
        .unwrap();
    assert_eq!(break_index, 2);
    assert_eq!(doc.content[break_index + 1].plain_text(), "Overview");
}
