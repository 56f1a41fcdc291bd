//! Document-level types.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ContentNode, Margins, PageSize, StyleRegistry, Table};

/// The complete description of a printable document handed to a renderer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentDescription {
    /// Content nodes in reading order
    pub content: Vec<ContentNode>,

    /// Page size
    pub page_size: PageSize,

    /// Page margins
    pub page_margins: Margins,

    /// Per-page footer, evaluated by the renderer while laying out pages
    #[serde(skip)]
    pub footer: Option<Footer>,

    /// Named styles referenced by text nodes
    pub styles: StyleRegistry,

    /// Document metadata (title, author, etc.)
    pub metadata: Metadata,
}

impl DocumentDescription {
    /// Create a description with default page geometry.
    pub fn new(content: Vec<ContentNode>) -> Self {
        Self {
            content,
            ..Default::default()
        }
    }

    /// Iterate over the top-level table nodes.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.content.iter().filter_map(ContentNode::as_table)
    }

    /// Evaluate the footer for a page, if one is attached.
    pub fn footer_for(&self, page: u32, page_count: u32) -> Option<ContentNode> {
        self.footer.as_ref().map(|f| f.render(page, page_count))
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|node| node.plain_text())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Compare everything except the footer, which is a function and has
    /// no structural identity.
    pub fn same_structure(&self, other: &DocumentDescription) -> bool {
        self.content == other.content
            && self.page_size == other.page_size
            && self.page_margins == other.page_margins
            && self.styles == other.styles
            && self.metadata == other.metadata
            && self.footer.is_some() == other.footer.is_some()
    }
}

type FooterFn = dyn Fn(u32, u32) -> ContentNode + Send + Sync;

/// Page footer as a function of (current page, page count).
#[derive(Clone)]
pub struct Footer(Arc<FooterFn>);

impl Footer {
    /// Wrap a footer function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(u32, u32) -> ContentNode + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Build the footer node for a page.
    pub fn render(&self, page: u32, page_count: u32) -> ContentNode {
        (self.0)(page, page_count)
    }
}

impl fmt::Debug for Footer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Footer(<fn>)")
    }
}

/// Document metadata written to the output's information dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Keywords
    pub keywords: Option<String>,

    /// Creator application
    pub creator: Option<String>,

    /// PDF producer
    pub producer: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Metadata with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}
