//! Plain text preview of document descriptions.

use std::io::Write;

use crate::error::Result;
use crate::model::{ContentNode, DocumentDescription, List, Table};

use super::DocumentRenderer;

/// Line written where the description forces a page break.
pub const PAGE_BREAK_MARKER: &str = "--- page break ---";

/// Convert a description to plain text.
pub fn to_text(doc: &DocumentDescription) -> String {
    let mut blocks = Vec::new();
    for node in &doc.content {
        push_node(&mut blocks, node, 0);
    }
    blocks.join("\n\n").trim().to_string()
}

fn push_node(blocks: &mut Vec<String>, node: &ContentNode, depth: usize) {
    match node {
        ContentNode::Paragraph(para) => {
            if para.is_page_break() {
                blocks.push(PAGE_BREAK_MARKER.to_string());
            }
            let text = para.plain_text();
            if !text.trim().is_empty() {
                blocks.push(text);
            }
        }
        ContentNode::List(list) => {
            if !list.is_empty() {
                blocks.push(list_text(list, depth));
            }
        }
        ContentNode::Table(table) => blocks.push(table_text(table)),
        ContentNode::Image(image) => {
            blocks.push(format!("[image: {}]", image.alt.as_deref().unwrap_or(&image.src)))
        }
        ContentNode::Rule => blocks.push("----".to_string()),
        ContentNode::Quote { content } => {
            let mut inner = Vec::new();
            for child in content {
                push_node(&mut inner, child, depth);
            }
            let quoted = inner
                .join("\n\n")
                .lines()
                .map(|l| format!("> {}", l))
                .collect::<Vec<_>>()
                .join("\n");
            blocks.push(quoted);
        }
        ContentNode::Preformatted { text } => blocks.push(text.clone()),
    }
}

fn list_text(list: &List, depth: usize) -> String {
    let indent = "  ".repeat(depth);
    let mut lines = Vec::new();
    for (index, item) in list.items.iter().enumerate() {
        let mut first = true;
        for node in &item.content {
            match node {
                ContentNode::List(nested) => lines.push(list_text(nested, depth + 1)),
                other => {
                    let text = other.plain_text();
                    if first {
                        lines.push(format!("{}{} {}", indent, list.marker(index), text));
                        first = false;
                    } else {
                        lines.push(format!("{}   {}", indent, text));
                    }
                }
            }
        }
        if first && !item.content.iter().any(|n| n.as_list().is_some()) {
            lines.push(format!("{}{}", indent, list.marker(index)));
        }
    }
    lines.join("\n")
}

fn table_text(table: &Table) -> String {
    table
        .rows
        .iter()
        .map(|row| {
            row.cells
                .iter()
                .map(|c| c.plain_text())
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renderer writing the plain text preview.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl DocumentRenderer for TextRenderer {
    fn name(&self) -> &str {
        "text"
    }

    fn render(&self, doc: &DocumentDescription, out: &mut dyn Write) -> Result<()> {
        out.write_all(to_text(doc).as_bytes())?;
        Ok(())
    }
}
