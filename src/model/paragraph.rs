//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};

use super::{Alignment, Color, HeadingLevel, Margins};

/// A block of text: body paragraph, heading, title block or page break marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in the paragraph
    pub content: Vec<InlineContent>,

    /// Name of a style in the document's style registry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    /// Heading level when converted from an `h1`..`h6` element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_level: Option<HeadingLevel>,

    /// Text alignment
    pub alignment: Alignment,

    /// Outer margin in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margins>,

    /// Forced page break around this block
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_break: Option<PageBreak>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Create a heading paragraph.
    pub fn heading(text: impl Into<String>, level: HeadingLevel) -> Self {
        let mut p = Self::with_text(text);
        p.heading_level = Some(level);
        p
    }

    /// An empty block that starts a new page.
    pub fn page_break_before() -> Self {
        Self {
            content: vec![InlineContent::Text(TextRun::new(""))],
            page_break: Some(PageBreak::Before),
            ..Default::default()
        }
    }

    /// Set the named style.
    pub fn styled(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Set the alignment.
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the outer margin.
    pub fn with_margin(mut self, margin: Margins) -> Self {
        self.margin = Some(margin);
        self
    }

    /// Add plain text to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.content.push(InlineContent::Text(TextRun {
            text: text.into(),
            style: TextStyle::default(),
        }));
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.content.push(InlineContent::Text(run));
    }

    /// Add a line break.
    pub fn add_line_break(&mut self) {
        self.content.push(InlineContent::LineBreak);
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                InlineContent::Text(run) => run.text.as_str(),
                InlineContent::LineBreak => "\n",
                InlineContent::Link { text, .. } => text.as_str(),
            })
            .collect()
    }

    /// Check if the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() || self.plain_text().trim().is_empty()
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        self.heading_level.is_some()
    }

    /// Check if this block forces a page break.
    pub fn is_page_break(&self) -> bool {
        self.page_break.is_some()
    }
}

/// Position of a forced page break relative to the block carrying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageBreak {
    Before,
    After,
}

/// Inline content within a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineContent {
    /// A text run with styling
    Text(TextRun),

    /// A line break
    LineBreak,

    /// A hyperlink
    Link {
        /// Link text
        text: String,
        /// Link URL
        url: String,
        /// Styling of the link text
        style: TextStyle,
    },
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a text run with the given style.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                bold: true,
                ..Default::default()
            },
        )
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                italic: true,
                ..Default::default()
            },
        )
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Text styling properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Underlined text
    pub underline: bool,

    /// Strikethrough text
    pub strikethrough: bool,

    /// Monospaced text (`code`, `pre`)
    pub monospace: bool,

    /// Font size in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,

    /// Text color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,

    /// Background/highlight color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
}

impl TextStyle {
    /// Check if any styling is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic || self.underline || self.strikethrough || self.monospace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_plain_text() {
        let mut p = Paragraph::new();
        p.add_text("Hello ");
        p.add_run(TextRun::bold("world"));
        p.add_text("!");

        assert_eq!(p.plain_text(), "Hello world!");
    }

    #[test]
    fn test_heading() {
        let h1 = Paragraph::heading("Title", HeadingLevel::H1);
        assert!(h1.is_heading());
        assert_eq!(h1.heading_level, Some(HeadingLevel::H1));
    }

    #[test]
    fn test_page_break_marker_is_empty() {
        let brk = Paragraph::page_break_before();
        assert!(brk.is_page_break());
        assert!(brk.is_empty());
        assert_eq!(brk.page_break, Some(PageBreak::Before));
    }

    #[test]
    fn test_text_style() {
        let style = TextStyle::default();
        assert!(!style.has_styling());

        let bold_style = TextStyle {
            bold: true,
            ..Default::default()
        };
        assert!(bold_style.has_styling());
    }
}
