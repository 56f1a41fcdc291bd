//! HTML to content tree conversion.
//!
//! The composer talks to conversion only through the [`ContentConverter`]
//! trait, so the HTML front end can be swapped for another implementation.
//!
//! # Example
//!
//! ```
//! use tocpdf::convert::{ContentConverter, HtmlConverter};
//!
//! fn main() -> tocpdf::Result<()> {
//!     let converter = HtmlConverter::new();
//!     let nodes = converter.convert("<h1>Title</h1><p>Body</p>")?;
//!     assert_eq!(nodes.len(), 2);
//!     Ok(())
//! }
//! ```

pub mod css;
mod html;
mod normalize;

pub use html::HtmlConverter;
pub(crate) use html::{is_block, IGNORED};
pub use normalize::{NormalizeOptions, NormalizePreset, TextNormalizer};

use crate::error::Result;
use crate::model::ContentNode;

/// Options for HTML conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Text normalization applied to every text node
    pub normalize: NormalizeOptions,

    /// Keep paragraphs that contain only whitespace or line breaks
    pub keep_empty_paragraphs: bool,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set normalization options.
    pub fn with_normalize(mut self, normalize: NormalizeOptions) -> Self {
        self.normalize = normalize;
        self
    }

    /// Set normalization from a preset.
    pub fn with_preset(mut self, preset: NormalizePreset) -> Self {
        self.normalize = NormalizeOptions::from_preset(preset);
        self
    }

    /// Keep or drop whitespace-only paragraphs.
    pub fn with_empty_paragraphs(mut self, keep: bool) -> Self {
        self.keep_empty_paragraphs = keep;
        self
    }
}

/// Trait for HTML to content tree converters.
///
/// Implement this trait to plug a different conversion front end into the
/// composer.
pub trait ContentConverter: Send + Sync {
    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Convert editor HTML into an ordered sequence of content nodes.
    fn convert(&self, html: &str) -> Result<Vec<ContentNode>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_options_builder() {
        let options = ConvertOptions::new()
            .with_preset(NormalizePreset::Minimal)
            .with_empty_paragraphs(true);

        assert!(!options.normalize.normalize_unicode);
        assert!(options.keep_empty_paragraphs);
    }

    #[test]
    fn test_converter_as_trait_object() {
        let converter: Box<dyn ContentConverter> = Box::new(HtmlConverter::new());
        assert_eq!(converter.name(), "html");

        let nodes = converter.convert("<p>one</p><p>two</p>").unwrap();
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn test_keep_empty_paragraphs() {
        let converter =
            HtmlConverter::with_options(ConvertOptions::new().with_empty_paragraphs(true));
        let nodes = converter.convert("<p><br></p>").unwrap();
        assert_eq!(nodes.len(), 1);
    }
}
