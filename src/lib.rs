//! # tocpdf
//!
//! Export rich-text editor HTML to PDF with a generated table of contents.
//!
//! The pipeline takes the editor's serialized HTML, numbers every heading
//! into an outline, converts the markup to a content tree, gives every
//! table equal column widths with thin gray borders and renders the result
//! as an A4 PDF with a "Page n" footer.
//!
//! ## Quick Start
//!
//! ```no_run
//! use tocpdf::export_to_file;
//!
//! fn main() -> tocpdf::Result<()> {
//!     let html = "<h1>Introduction</h1><p>Hello.</p><h2>Details</h2><p>More.</p>";
//!     let path = export_to_file(html, ".")?;
//!     println!("Wrote {}", path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Outline**: numbered "1. Title" entries for every `h1`..`h6`
//! - **Tables**: equal-width columns, 0.5pt gray borders, 4pt padding
//! - **Paging**: forced break after the outline, per-page footers
//! - **Other outputs**: JSON and plain-text previews of the description

pub mod compose;
pub mod convert;
pub mod error;
pub mod extract;
pub mod model;
pub mod render;
pub mod session;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types
pub use compose::{compose, ComposeOptions, DocumentComposer, TablePatchPolicy};
pub use convert::{ContentConverter, ConvertOptions, HtmlConverter};
pub use error::{Error, Result};
pub use extract::{extract_titles, TitleExtractor};
pub use model::{
    Alignment, ColumnWidth, ContentNode, DocumentDescription, HeadingEntry, HeadingLevel,
    Margins, Metadata, PageSize, Paragraph, Table, TableLayout,
};
pub use render::{
    DocumentRenderer, ExportStats, JsonFormat, JsonRenderer, PdfOptions, PdfRenderer,
    TextRenderer,
};
pub use session::{Editor, OUTPUT_FILENAME};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Export editor HTML to PDF bytes.
///
/// # Example
///
/// ```
/// let bytes = tocpdf::export_pdf("<h1>Title</h1><p>Body</p>")?;
/// assert!(bytes.starts_with(b"%PDF"));
/// # Ok::<(), tocpdf::Error>(())
/// ```
pub fn export_pdf(html: &str) -> Result<Vec<u8>> {
    Exporter::new().export(html)
}

/// Export editor HTML to `<dir>/document.pdf`.
///
/// Nothing is written when the content is empty.
///
/// # Example
///
/// ```no_run
/// use tocpdf::export_to_file;
///
/// let path = export_to_file("<h1>Title</h1>", "out").unwrap();
/// assert!(path.ends_with("document.pdf"));
/// ```
pub fn export_to_file<P: AsRef<Path>>(html: &str, dir: P) -> Result<PathBuf> {
    Exporter::new().export_to_file(html, dir).map(|output| output.path)
}

/// Export editor HTML to `<dir>/document.pdf` using async file I/O.
///
/// Composition and rendering run synchronously; only the write is async.
#[cfg(feature = "async")]
pub async fn export_to_file_async<P: AsRef<Path>>(html: &str, dir: P) -> Result<PathBuf> {
    let exporter = Exporter::new();
    let bytes = exporter.export(html)?;

    let dir = dir.as_ref();
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(&exporter.filename);
    tokio::fs::write(&path, bytes).await?;
    log::debug!("Wrote {}", path.display());
    Ok(path)
}

/// Builder for the export pipeline.
///
/// # Example
///
/// ```no_run
/// use tocpdf::{ComposeOptions, Exporter, PageSize, PdfOptions};
///
/// let output = Exporter::new()
///     .with_compose_options(ComposeOptions::new().with_page_size(PageSize::Letter))
///     .with_pdf_options(PdfOptions::new().with_compression(false))
///     .with_filename("notes.pdf")
///     .export_to_file("<h1>Notes</h1>", "out")?;
/// println!("{} pages", output.stats.page_count);
/// # Ok::<(), tocpdf::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Exporter {
    compose_options: ComposeOptions,
    pdf_options: PdfOptions,
    filename: String,
}

impl Exporter {
    /// Create an exporter with default options.
    pub fn new() -> Self {
        Self {
            compose_options: ComposeOptions::default(),
            pdf_options: PdfOptions::default(),
            filename: OUTPUT_FILENAME.to_string(),
        }
    }

    /// Set composition options.
    pub fn with_compose_options(mut self, options: ComposeOptions) -> Self {
        self.compose_options = options;
        self
    }

    /// Set PDF rendering options.
    pub fn with_pdf_options(mut self, options: PdfOptions) -> Self {
        self.pdf_options = options;
        self
    }

    /// Set the output file name.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Get the output file name.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Compose the document description for `html`.
    pub fn compose(&self, html: &str) -> Result<DocumentDescription> {
        DocumentComposer::with_options(self.compose_options.clone()).compose(html)
    }

    /// Export `html` to PDF bytes.
    pub fn export(&self, html: &str) -> Result<Vec<u8>> {
        let doc = self.compose(html)?;
        PdfRenderer::with_options(self.pdf_options.clone()).render_to_vec(&doc)
    }

    /// Export `html` to a file in `dir`, creating the directory if needed.
    pub fn export_to_file<P: AsRef<Path>>(&self, html: &str, dir: P) -> Result<ExportOutput> {
        let doc = self.compose(html)?;

        let mut bytes = Vec::new();
        let renderer = PdfRenderer::with_options(self.pdf_options.clone());
        let pages = renderer.render_pages(&doc, &mut bytes)?;

        let path = self.write(dir.as_ref(), &bytes)?;
        Ok(ExportOutput {
            path,
            stats: ExportStats::collect(&doc).with_pages(pages),
        })
    }

    /// Export `html` through another renderer into a file in `dir`.
    pub fn export_with<P: AsRef<Path>>(
        &self,
        html: &str,
        renderer: &dyn DocumentRenderer,
        dir: P,
    ) -> Result<PathBuf> {
        let doc = self.compose(html)?;

        let mut bytes = Vec::new();
        renderer.render(&doc, &mut bytes)?;
        log::debug!("Renderer '{}' produced {} bytes", renderer.name(), bytes.len());

        self.write(dir.as_ref(), &bytes)
    }

    fn write(&self, dir: &Path, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        let mut file = fs::File::create(&path)?;
        file.write_all(bytes)?;
        log::debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a file export.
#[derive(Debug, Clone)]
pub struct ExportOutput {
    /// Path of the written file
    pub path: PathBuf,

    /// Statistics about the exported document
    pub stats: ExportStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_export_pdf() {
        let bytes = export_pdf("<h1>A</h1><p>text</p>").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_export_empty_content() {
        assert!(matches!(export_pdf(""), Err(Error::EmptyContent)));
    }

    #[test]
    fn test_export_to_file_uses_fixed_name() {
        let dir = tempdir().unwrap();
        let path = export_to_file("<h1>A</h1>", dir.path()).unwrap();
        assert_eq!(path, dir.path().join("document.pdf"));
        assert!(path.exists());
    }

    #[test]
    fn test_exporter_reports_stats() {
        let dir = tempdir().unwrap();
        let output = Exporter::new()
            .with_filename("out.pdf")
            .export_to_file("<h1>A</h1><h2>B</h2><p>text</p>", dir.path())
            .unwrap();

        assert!(output.path.ends_with("out.pdf"));
        assert_eq!(output.stats.outline_entries, 2);
        assert_eq!(output.stats.heading_count, 2);
        // Outline page plus body page
        assert_eq!(output.stats.page_count, 2);
    }

    #[test]
    fn test_export_with_text_renderer() {
        let dir = tempdir().unwrap();
        let path = Exporter::new()
            .with_filename("document.txt")
            .export_with("<h1>A</h1>", &TextRenderer, dir.path())
            .unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert!(text.contains("1. A"));
    }
}
