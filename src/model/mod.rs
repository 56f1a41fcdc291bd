//! Document model types for exported content.
//!
//! This module defines the content tree that bridges HTML conversion and
//! rendering. The model is renderer-agnostic: the PDF, JSON and text
//! renderers all consume the same [`DocumentDescription`].

mod document;
mod node;
mod outline;
mod paragraph;
mod style;
mod table;

pub use document::{DocumentDescription, Footer, Metadata};
pub use node::{ContentNode, Image, List, ListItem};
pub use outline::{HeadingEntry, HeadingLevel};
pub use paragraph::{InlineContent, PageBreak, Paragraph, TextRun, TextStyle};
pub use style::{Alignment, Color, Margins, NamedStyle, PageSize, StyleRegistry};
pub use table::{ColumnWidth, Table, TableCell, TableLayout, TableRow};
