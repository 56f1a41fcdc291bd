//! Rendering of document descriptions to output formats.
//!
//! Renderers consume a [`DocumentDescription`] through the
//! [`DocumentRenderer`] trait; the PDF renderer is the one used for
//! downloads, the JSON and text renderers serve inspection and previews.

mod fonts;
mod json;
mod layout;
mod options;
mod pdf;
mod stats;
mod text;

pub use fonts::{to_win_ansi, Font};
pub use json::{to_json, JsonFormat, JsonRenderer};
pub use options::PdfOptions;
pub use pdf::PdfRenderer;
pub use stats::ExportStats;
pub use text::{to_text, TextRenderer, PAGE_BREAK_MARKER};

use std::io::Write;

use crate::error::Result;
use crate::model::DocumentDescription;

/// Trait for document renderers.
///
/// Implement this trait to produce another output from a composed
/// description.
pub trait DocumentRenderer {
    /// Get the name of this renderer.
    fn name(&self) -> &str;

    /// Render the description into `out`.
    fn render(&self, doc: &DocumentDescription, out: &mut dyn Write) -> Result<()>;
}
