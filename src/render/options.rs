//! PDF rendering options.

/// Options for PDF output.
#[derive(Debug, Clone)]
pub struct PdfOptions {
    /// Compress page content streams with zlib
    pub compress: bool,

    /// Body text size in points
    pub base_font_size: f32,

    /// Line height as a multiple of the font size
    pub line_height: f32,

    /// Space below body paragraphs, in points
    pub paragraph_spacing: f32,

    /// Indentation of list item content, in points
    pub list_indent: f32,

    /// Indentation of block quotes, in points
    pub quote_indent: f32,

    /// Emit clickable link annotations for hyperlinks
    pub link_annotations: bool,

    /// PDF header version
    pub pdf_version: String,
}

impl PdfOptions {
    /// Create new PDF options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable content stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set the body font size.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.base_font_size = size.max(1.0);
        self
    }

    /// Set the line height factor.
    pub fn with_line_height(mut self, factor: f32) -> Self {
        self.line_height = factor.max(1.0);
        self
    }

    /// Set the spacing below body paragraphs.
    pub fn with_paragraph_spacing(mut self, spacing: f32) -> Self {
        self.paragraph_spacing = spacing.max(0.0);
        self
    }

    /// Set the list indentation.
    pub fn with_list_indent(mut self, indent: f32) -> Self {
        self.list_indent = indent.max(0.0);
        self
    }

    /// Enable or disable link annotations.
    pub fn with_link_annotations(mut self, enabled: bool) -> Self {
        self.link_annotations = enabled;
        self
    }
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            compress: true,
            base_font_size: 12.0,
            line_height: 1.25,
            paragraph_spacing: 8.0,
            list_indent: 20.0,
            quote_indent: 16.0,
            link_annotations: true,
            pdf_version: "1.7".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_options_builder() {
        let options = PdfOptions::new()
            .with_compression(false)
            .with_font_size(0.0)
            .with_list_indent(30.0)
            .with_link_annotations(false);

        assert!(!options.compress);
        assert_eq!(options.base_font_size, 1.0);
        assert_eq!(options.list_indent, 30.0);
        assert!(!options.link_annotations);
    }

    #[test]
    fn test_pdf_options_default() {
        let options = PdfOptions::default();
        assert!(options.compress);
        assert_eq!(options.base_font_size, 12.0);
        assert_eq!(options.pdf_version, "1.7");
    }
}
