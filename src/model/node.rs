//! Content tree nodes consumed by renderers.

use serde::{Deserialize, Serialize};

use super::{Margins, Paragraph, Table};

/// One element of the renderer-consumable content tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentNode {
    /// A paragraph, heading, title block or page break marker
    Paragraph(Paragraph),

    /// A table
    Table(Table),

    /// An ordered or unordered list
    List(List),

    /// An image reference
    Image(Image),

    /// A horizontal rule
    Rule,

    /// A block quotation
    Quote {
        /// Quoted blocks
        content: Vec<ContentNode>,
    },

    /// Preformatted text, whitespace preserved
    Preformatted {
        /// Raw text
        text: String,
    },
}

impl ContentNode {
    /// Short name of the node variant, used in logs and statistics.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentNode::Paragraph(p) if p.is_heading() => "heading",
            ContentNode::Paragraph(_) => "paragraph",
            ContentNode::Table(_) => "table",
            ContentNode::List(_) => "list",
            ContentNode::Image(_) => "image",
            ContentNode::Rule => "rule",
            ContentNode::Quote { .. } => "quote",
            ContentNode::Preformatted { .. } => "preformatted",
        }
    }

    /// Check if this node is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, ContentNode::Paragraph(_))
    }

    /// Check if this node is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, ContentNode::Table(_))
    }

    /// Check if this node is an image.
    pub fn is_image(&self) -> bool {
        matches!(self, ContentNode::Image(_))
    }

    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            ContentNode::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            ContentNode::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            ContentNode::List(l) => Some(l),
            _ => None,
        }
    }

    /// Get plain text content of the node.
    pub fn plain_text(&self) -> String {
        match self {
            ContentNode::Paragraph(p) => p.plain_text(),
            ContentNode::Table(t) => t.plain_text(),
            ContentNode::List(l) => l.plain_text(),
            ContentNode::Image(img) => img.alt.clone().unwrap_or_default(),
            ContentNode::Rule => String::new(),
            ContentNode::Quote { content } => content
                .iter()
                .map(|n| n.plain_text())
                .collect::<Vec<_>>()
                .join("\n"),
            ContentNode::Preformatted { text } => text.clone(),
        }
    }
}

impl From<Paragraph> for ContentNode {
    fn from(p: Paragraph) -> Self {
        ContentNode::Paragraph(p)
    }
}

impl From<Table> for ContentNode {
    fn from(t: Table) -> Self {
        ContentNode::Table(t)
    }
}

impl From<List> for ContentNode {
    fn from(l: List) -> Self {
        ContentNode::List(l)
    }
}

/// An ordered or unordered list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct List {
    /// Numbered (`ol`) or bulleted (`ul`)
    pub ordered: bool,

    /// First number of an ordered list
    pub start: u32,

    /// List items in order
    pub items: Vec<ListItem>,

    /// Outer margin in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margins>,
}

impl List {
    /// Create an empty numbered list.
    pub fn ordered() -> Self {
        Self {
            ordered: true,
            start: 1,
            ..Default::default()
        }
    }

    /// Create an empty bulleted list.
    pub fn unordered() -> Self {
        Self {
            ordered: false,
            start: 1,
            ..Default::default()
        }
    }

    /// Set the outer margin.
    pub fn with_margin(mut self, margin: Margins) -> Self {
        self.margin = Some(margin);
        self
    }

    /// Add an item.
    pub fn add_item(&mut self, item: ListItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Marker for the item at `index` (0-based).
    pub fn marker(&self, index: usize) -> String {
        if self.ordered {
            format!("{}.", self.start as usize + index)
        } else {
            "\u{2022}".to_string()
        }
    }

    /// Get plain text content, one item per line.
    pub fn plain_text(&self) -> String {
        self.items
            .iter()
            .map(|item| item.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A single list item; may hold nested lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub content: Vec<ContentNode>,
}

impl ListItem {
    /// Item holding one plain text paragraph.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentNode::Paragraph(Paragraph::with_text(text))],
        }
    }

    pub fn with_content(content: Vec<ContentNode>) -> Self {
        Self { content }
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|n| n.plain_text())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// An image reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Source URL or data URI
    pub src: String,

    /// Alternative text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    /// Requested width in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,

    /// Requested height in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

impl Image {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeadingLevel;

    #[test]
    fn test_node_kinds() {
        let heading: ContentNode = Paragraph::heading("A", HeadingLevel::H1).into();
        assert_eq!(heading.kind(), "heading");
        assert_eq!(ContentNode::from(Table::new()).kind(), "table");
        assert_eq!(ContentNode::Rule.kind(), "rule");
    }

    #[test]
    fn test_list_markers() {
        let mut ol = List::ordered();
        ol.add_item(ListItem::text("one"));
        ol.add_item(ListItem::text("two"));
        assert_eq!(ol.marker(1), "2.");
        assert_eq!(ol.plain_text(), "one\ntwo");

        let ul = List::unordered();
        assert_eq!(ul.marker(0), "\u{2022}");
    }

    #[test]
    fn test_node_serializes_with_type_tag() {
        let node = ContentNode::Image(Image::new("logo.png"));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "image");
        assert_eq!(json["src"], "logo.png");
    }
}
