//! Visitor pattern for rewriting content trees.
//!
//! Visitors see each node of a content tree in reading order and may edit
//! it in place, replace it, or drop it. The composer uses one to patch
//! table layouts; callers can run their own through [`walk`].
//!
//! # Example
//!
//! ```
//! use tocpdf::compose::visitor::{walk, ContentVisitor, VisitorAction};
//! use tocpdf::model::{ContentNode, Image, Paragraph};
//!
//! struct AltTextVisitor;
//!
//! impl ContentVisitor for AltTextVisitor {
//!     fn visit_image(&mut self, image: &mut Image) -> VisitorAction {
//!         let alt = image.alt.clone().unwrap_or_else(|| image.src.clone());
//!         VisitorAction::Replace(Paragraph::with_text(alt).into())
//!     }
//! }
//!
//! let mut nodes = vec![ContentNode::Image(Image::new("logo.png"))];
//! walk(&mut nodes, &mut AltTextVisitor);
//! assert_eq!(nodes[0].plain_text(), "logo.png");
//! ```

use crate::model::{ContentNode, Image, List, Paragraph, Table};

/// Action returned by visitor methods to control the walk.
#[derive(Debug, Clone, Default)]
pub enum VisitorAction {
    /// Keep the (possibly edited) node and descend into its children.
    #[default]
    Continue,

    /// Replace the node. The replacement is not visited.
    Replace(ContentNode),

    /// Drop the node entirely.
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the node should be dropped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action provides a replacement node.
    pub fn is_replace(&self) -> bool {
        matches!(self, VisitorAction::Replace(_))
    }
}

/// Trait for visiting content nodes.
///
/// All methods return `VisitorAction::Continue` by default.
pub trait ContentVisitor {
    /// Called for paragraphs, headings and page break markers.
    fn visit_paragraph(&mut self, para: &mut Paragraph) -> VisitorAction {
        let _ = para;
        VisitorAction::Continue
    }

    /// Called for tables, before their cells are visited.
    fn visit_table(&mut self, table: &mut Table) -> VisitorAction {
        let _ = table;
        VisitorAction::Continue
    }

    /// Called for lists, before their items are visited.
    fn visit_list(&mut self, list: &mut List) -> VisitorAction {
        let _ = list;
        VisitorAction::Continue
    }

    /// Called for images.
    fn visit_image(&mut self, image: &mut Image) -> VisitorAction {
        let _ = image;
        VisitorAction::Continue
    }

    /// Called for horizontal rules.
    fn visit_rule(&mut self) -> VisitorAction {
        VisitorAction::Continue
    }

    /// Called for block quotes, before their content is visited.
    fn visit_quote(&mut self, content: &mut Vec<ContentNode>) -> VisitorAction {
        let _ = content;
        VisitorAction::Continue
    }

    /// Called for preformatted blocks.
    fn visit_preformatted(&mut self, text: &mut String) -> VisitorAction {
        let _ = text;
        VisitorAction::Continue
    }

    /// Whether the walk descends into quotes, list items and table cells.
    fn descend(&self) -> bool {
        true
    }
}

/// Walk a content sequence in reading order, applying the visitor.
pub fn walk(nodes: &mut Vec<ContentNode>, visitor: &mut dyn ContentVisitor) {
    let mut out = Vec::with_capacity(nodes.len());

    for mut node in nodes.drain(..) {
        let action = match &mut node {
            ContentNode::Paragraph(para) => visitor.visit_paragraph(para),
            ContentNode::Table(table) => visitor.visit_table(table),
            ContentNode::List(list) => visitor.visit_list(list),
            ContentNode::Image(image) => visitor.visit_image(image),
            ContentNode::Rule => visitor.visit_rule(),
            ContentNode::Quote { content } => visitor.visit_quote(content),
            ContentNode::Preformatted { text } => visitor.visit_preformatted(text),
        };

        match action {
            VisitorAction::Continue => {
                if visitor.descend() {
                    walk_children(&mut node, visitor);
                }
                out.push(node);
            }
            VisitorAction::Replace(replacement) => out.push(replacement),
            VisitorAction::Skip => {}
        }
    }

    *nodes = out;
}

fn walk_children(node: &mut ContentNode, visitor: &mut dyn ContentVisitor) {
    match node {
        ContentNode::Table(table) => {
            for row in &mut table.rows {
                for cell in &mut row.cells {
                    walk(&mut cell.content, visitor);
                }
            }
        }
        ContentNode::List(list) => {
            for item in &mut list.items {
                walk(&mut item.content, visitor);
            }
        }
        ContentNode::Quote { content } => walk(content, visitor),
        _ => {}
    }
}
