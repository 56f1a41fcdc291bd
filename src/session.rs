//! Editor session holding the current content.
//!
//! The editor reports its serialized HTML on every change; a download runs
//! the whole export pipeline on whatever content is current at that moment.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::render::DocumentRenderer;
use crate::Exporter;

/// File name used for downloads.
pub const OUTPUT_FILENAME: &str = "document.pdf";

/// State of one editing session.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    content: String,
    exporter: Exporter,
}

impl Editor {
    /// Create an editor with empty content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an editor exporting with a custom pipeline.
    pub fn with_exporter(exporter: Exporter) -> Self {
        Self {
            content: String::new(),
            exporter,
        }
    }

    /// Replace the content with the editor's latest serialization.
    pub fn on_change(&mut self, html: impl Into<String>) {
        self.content = html.into();
        log::trace!("Editor content changed ({} bytes)", self.content.len());
    }

    /// Current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if there is nothing to export.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Export the current content as a PDF into `dir`.
    pub fn download_pdf<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        self.exporter
            .export_to_file(&self.content, dir)
            .map(|output| output.path)
    }

    /// Export the current content through `renderer` into `dir`.
    pub fn download_with<P: AsRef<Path>>(
        &self,
        renderer: &dyn DocumentRenderer,
        dir: P,
    ) -> Result<PathBuf> {
        self.exporter.export_with(&self.content, renderer, dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use tempfile::tempdir;

    #[test]
    fn test_on_change_replaces_content() {
        let mut editor = Editor::new();
        assert!(editor.is_empty());

        editor.on_change("<p>first</p>");
        editor.on_change("<p>second</p>");
        assert_eq!(editor.content(), "<p>second</p>");
        assert!(!editor.is_empty());
    }

    #[test]
    fn test_download_empty_writes_nothing() {
        let dir = tempdir().unwrap();
        let editor = Editor::new();

        let result = editor.download_pdf(dir.path());
        assert!(matches!(result, Err(Error::EmptyContent)));
        assert!(!dir.path().join(OUTPUT_FILENAME).exists());
    }

    #[test]
    fn test_repeated_download_reruns_pipeline() {
        let dir = tempdir().unwrap();
        let mut editor = Editor::new();
        editor.on_change("<h1>A</h1><p>text</p>");

        let first = editor.download_pdf(dir.path()).unwrap();
        let second = editor.download_pdf(dir.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.file_name().unwrap(), OUTPUT_FILENAME);
    }
}
