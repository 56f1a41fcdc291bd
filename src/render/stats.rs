//! Export statistics.

use serde::{Deserialize, Serialize};

use crate::model::{ContentNode, DocumentDescription};

/// Counts collected from a composed description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportStats {
    /// Number of rendered pages (0 until rendered)
    pub page_count: u32,

    /// Number of entries in the generated outline
    pub outline_entries: u32,

    /// Number of headings in the body
    pub heading_count: u32,

    /// Number of body paragraphs (headings excluded)
    pub paragraph_count: u32,

    /// Number of tables, nested ones included
    pub table_count: u32,

    /// Number of lists, nested ones included
    pub list_count: u32,

    /// Number of images
    pub image_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,
}

impl ExportStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics from a composed description.
    ///
    /// The outline is the first ordered list before the first forced page
    /// break; everything after that break counts as body.
    pub fn collect(doc: &DocumentDescription) -> Self {
        let mut stats = Self::new();
        let body_start = doc
            .content
            .iter()
            .position(|n| n.as_paragraph().is_some_and(|p| p.is_page_break()));

        if let Some(start) = body_start {
            stats.outline_entries = doc.content[..start]
                .iter()
                .find_map(|n| n.as_list().filter(|l| l.ordered))
                .map(|l| l.len() as u32)
                .unwrap_or(0);
        }

        let body = match body_start {
            Some(start) => &doc.content[start + 1..],
            None => &doc.content[..],
        };
        for node in body {
            stats.count_node(node);
        }
        stats
    }

    /// Set the rendered page count.
    pub fn with_pages(mut self, pages: u32) -> Self {
        self.page_count = pages;
        self
    }

    /// Add word counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
    }

    fn count_node(&mut self, node: &ContentNode) {
        match node {
            ContentNode::Paragraph(para) => {
                if para.is_heading() {
                    self.heading_count += 1;
                } else if !para.is_empty() {
                    self.paragraph_count += 1;
                }
                self.count_text(&para.plain_text());
            }
            ContentNode::Table(table) => {
                self.table_count += 1;
                for cell in table.rows.iter().flat_map(|r| &r.cells) {
                    for child in &cell.content {
                        self.count_node(child);
                    }
                }
            }
            ContentNode::List(list) => {
                self.list_count += 1;
                for child in list.items.iter().flat_map(|i| &i.content) {
                    self.count_node(child);
                }
            }
            ContentNode::Image(_) => self.image_count += 1,
            ContentNode::Rule => {}
            ContentNode::Quote { content } => {
                for child in content {
                    self.count_node(child);
                }
            }
            ContentNode::Preformatted { text } => self.count_text(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose;

    #[test]
    fn test_count_text() {
        let mut stats = ExportStats::new();
        stats.count_text("Hello, world! This is a test.");
        assert_eq!(stats.word_count, 6);
    }

    #[test]
    fn test_collect_from_composed_description() {
        let html = "<h1>Intro</h1><p>one two</p><h2>Data</h2>\
                    <table><tr><td>a</td></tr></table><ul><li>x</li></ul><img src=\"a.png\">";
        let doc = compose(html).unwrap();
        let stats = ExportStats::collect(&doc).with_pages(2);

        assert_eq!(stats.outline_entries, 2);
        assert_eq!(stats.heading_count, 2);
        // "one two", the cell and the list item
        assert_eq!(stats.paragraph_count, 3);
        assert_eq!(stats.table_count, 1);
        assert_eq!(stats.list_count, 1);
        assert_eq!(stats.image_count, 1);
        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.page_count, 2);
    }
}
