//! Document composition: outline, table patching and page setup.
//!
//! The composer turns editor HTML into a [`DocumentDescription`]: a centered
//! title block, the numbered heading outline as an ordered list, a forced
//! page break, then the converted body with every table patched for equal
//! column widths and thin gray borders.
//!
//! # Example
//!
//! ```
//! use tocpdf::compose::DocumentComposer;
//!
//! fn main() -> tocpdf::Result<()> {
//!     let doc = DocumentComposer::new().compose("<h1>A</h1><p>text</p>")?;
//!     assert_eq!(doc.content[0].plain_text(), "Table of Contents and Indexing");
//!     assert_eq!(doc.content[1].plain_text(), "1. A");
//!     Ok(())
//! }
//! ```

mod patch;
pub mod visitor;

pub use patch::{TableLayoutPatcher, TablePatchPolicy};
pub use visitor::{walk, ContentVisitor, VisitorAction};

use crate::convert::{ContentConverter, ConvertOptions, HtmlConverter};
use crate::error::{Error, Result};
use crate::extract::TitleExtractor;
use crate::model::{
    Alignment, ContentNode, DocumentDescription, Footer, HeadingEntry, List, ListItem, Margins,
    Metadata, NamedStyle, PageSize, Paragraph, StyleRegistry, TableLayout,
};

/// Text of the title block placed above the outline.
pub const DEFAULT_TITLE: &str = "Table of Contents and Indexing";

/// Name of the style applied to the title block.
pub const HEADER_STYLE: &str = "header";

/// Options for document composition.
#[derive(Debug, Clone)]
pub struct ComposeOptions {
    /// Title block text
    pub title: String,

    /// Output page size
    pub page_size: PageSize,

    /// Page margins
    pub page_margins: Margins,

    /// When table formatting is overwritten
    pub table_policy: TablePatchPolicy,

    /// Layout applied to patched tables
    pub table_layout: TableLayout,

    /// Metadata copied into the description
    pub metadata: Metadata,

    /// Options for the default HTML converter
    pub convert: ConvertOptions,
}

impl ComposeOptions {
    /// Create default compose options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title block text.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the page margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.page_margins = margins;
        self
    }

    /// Set the table patch policy.
    pub fn with_table_policy(mut self, policy: TablePatchPolicy) -> Self {
        self.table_policy = policy;
        self
    }

    /// Set the layout given to patched tables.
    pub fn with_table_layout(mut self, layout: TableLayout) -> Self {
        self.table_layout = layout;
        self
    }

    /// Set document metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set conversion options.
    pub fn with_convert_options(mut self, convert: ConvertOptions) -> Self {
        self.convert = convert;
        self
    }
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            page_size: PageSize::A4,
            page_margins: Margins::new(40.0, 60.0, 40.0, 60.0),
            table_policy: TablePatchPolicy::Always,
            table_layout: TableLayout::thin_gray(),
            metadata: Metadata::default(),
            convert: ConvertOptions::default(),
        }
    }
}

/// Builds document descriptions from editor HTML.
pub struct DocumentComposer {
    options: ComposeOptions,
    converter: Box<dyn ContentConverter>,
    extractor: TitleExtractor,
}

impl DocumentComposer {
    /// Create a composer with default options.
    pub fn new() -> Self {
        Self::with_options(ComposeOptions::default())
    }

    /// Create a composer with custom options.
    pub fn with_options(options: ComposeOptions) -> Self {
        let converter = HtmlConverter::with_options(options.convert.clone());
        Self {
            options,
            converter: Box::new(converter),
            extractor: TitleExtractor::new(),
        }
    }

    /// Replace the HTML converter.
    pub fn with_converter(mut self, converter: Box<dyn ContentConverter>) -> Self {
        self.converter = converter;
        self
    }

    /// Get the compose options.
    pub fn options(&self) -> &ComposeOptions {
        &self.options
    }

    /// Compose a document description from editor HTML.
    ///
    /// Returns [`Error::EmptyContent`] without converting anything when the
    /// input is empty or whitespace only.
    pub fn compose(&self, html: &str) -> Result<DocumentDescription> {
        if html.trim().is_empty() {
            log::error!("Editor content is empty");
            return Err(Error::EmptyContent);
        }

        let titles = self.extractor.extract(html);

        let mut body = self.converter.convert(html)?;
        log::debug!(
            "Converter '{}' produced {} nodes",
            self.converter.name(),
            body.len()
        );

        let mut patcher = TableLayoutPatcher::new(self.options.table_policy, self.options.table_layout);
        walk(&mut body, &mut patcher);
        log::debug!("Patched {} tables", patcher.patched());

        Ok(self.assemble(&titles, body))
    }

    /// Assemble the final description from an outline and a patched body.
    pub fn assemble(&self, titles: &[HeadingEntry], body: Vec<ContentNode>) -> DocumentDescription {
        let mut content = Vec::with_capacity(body.len() + 3);

        content.push(
            Paragraph::with_text(self.options.title.clone())
                .styled(HEADER_STYLE)
                .align(Alignment::Center)
                .with_margin(Margins::symmetric(0.0, 20.0))
                .into(),
        );

        let mut outline = List::ordered().with_margin(Margins::symmetric(0.0, 10.0));
        for title in titles {
            outline.add_item(ListItem::text(title.text.clone()));
        }
        content.push(outline.into());

        content.push(Paragraph::page_break_before().into());
        content.extend(body);

        DocumentDescription {
            content,
            page_size: self.options.page_size,
            page_margins: self.options.page_margins,
            footer: Some(page_number_footer()),
            styles: default_styles(),
            metadata: self.options.metadata.clone(),
        }
    }
}

impl Default for DocumentComposer {
    fn default() -> Self {
        Self::new()
    }
}

/// Footer reading "Page <n>", centered, with a 10pt vertical margin.
pub fn page_number_footer() -> Footer {
    Footer::new(|page, _page_count| {
        Paragraph::with_text(format!("Page {}", page))
            .align(Alignment::Center)
            .with_margin(Margins::symmetric(0.0, 10.0))
            .into()
    })
}

/// Style registry with the title block style.
pub fn default_styles() -> StyleRegistry {
    StyleRegistry::new().with(
        HEADER_STYLE,
        NamedStyle {
            font_size: Some(20.0),
            bold: true,
            margin: Some(Margins::new(0.0, 20.0, 0.0, 10.0)),
            ..Default::default()
        },
    )
}

/// Compose a document description with default options.
///
/// Blank input, including whitespace only, is rejected with
/// [`Error::EmptyContent`].
pub fn compose(html: &str) -> Result<DocumentDescription> {
    DocumentComposer::new().compose(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColumnWidth, Color, PageBreak};

    #[test]
    fn test_empty_content_is_rejected() {
        assert!(matches!(compose(""), Err(Error::EmptyContent)));
        assert!(matches!(compose("  \n "), Err(Error::EmptyContent)));
        assert!(matches!(compose("\t\r\n"), Err(Error::EmptyContent)));
    }

    #[test]
    fn test_scenario_heading_and_paragraph() {
        let doc = compose("<h1>A</h1><p>text</p>").unwrap();

        let header = doc.content[0].as_paragraph().unwrap();
        assert_eq!(header.plain_text(), DEFAULT_TITLE);
        assert_eq!(header.style.as_deref(), Some(HEADER_STYLE));
        assert_eq!(header.alignment, Alignment::Center);
        assert_eq!(header.margin, Some(Margins::new(0.0, 20.0, 0.0, 20.0)));

        let outline = doc.content[1].as_list().unwrap();
        assert!(outline.ordered);
        assert_eq!(outline.len(), 1);
        assert_eq!(outline.items[0].plain_text(), "1. A");

        let page_break = doc.content[2].as_paragraph().unwrap();
        assert_eq!(page_break.page_break, Some(PageBreak::Before));
        assert_eq!(page_break.plain_text(), "");

        assert_eq!(doc.content[3].as_paragraph().unwrap().plain_text(), "A");
        assert_eq!(doc.content[4].as_paragraph().unwrap().plain_text(), "text");
        assert_eq!(doc.content.len(), 5);
    }

    #[test]
    fn test_no_headings_keeps_empty_outline() {
        let doc = compose("<p>just text</p>").unwrap();
        assert_eq!(doc.content[0].plain_text(), DEFAULT_TITLE);
        let outline = doc.content[1].as_list().unwrap();
        assert!(outline.is_empty());
        assert_eq!(outline.margin, Some(Margins::symmetric(0.0, 10.0)));
    }

    #[test]
    fn test_page_setup() {
        let doc = compose("<p>x</p>").unwrap();
        assert_eq!(doc.page_size, PageSize::A4);
        assert_eq!(doc.page_margins, Margins::new(40.0, 60.0, 40.0, 60.0));

        let header = doc.styles.get(HEADER_STYLE).unwrap();
        assert_eq!(header.font_size, Some(20.0));
        assert!(header.bold);
        assert_eq!(header.margin, Some(Margins::new(0.0, 20.0, 0.0, 10.0)));
    }

    #[test]
    fn test_footer_is_evaluated_per_page() {
        let doc = compose("<p>x</p>").unwrap();
        let footer = doc.footer_for(3, 7).unwrap();
        let para = footer.as_paragraph().unwrap();
        assert_eq!(para.plain_text(), "Page 3");
        assert_eq!(para.alignment, Alignment::Center);
        assert_eq!(para.margin, Some(Margins::symmetric(0.0, 10.0)));
    }

    #[test]
    fn test_tables_are_patched() {
        let html = "<figure class=\"table\"><table><tbody><tr><td>1</td><td>2</td><td>3</td></tr>\
                    <tr><td>4</td><td>5</td><td>6</td></tr></tbody></table></figure>";
        let doc = compose(html).unwrap();

        let tables: Vec<_> = doc.tables().collect();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].widths, Some(vec![ColumnWidth::Star; 3]));
        let layout = tables[0].layout.unwrap();
        assert_eq!(layout.h_line_width, 0.5);
        assert_eq!(layout.v_line_color, Color::GRAY);
        assert_eq!(layout.padding_left, 4.0);
    }

    #[test]
    fn test_spanned_and_wrapped_tables_are_patched() {
        let html = "<span><table><tr><td colspan=\"2\">a</td><td>b</td></tr>\
                    <tr><td>1</td><td>2</td><td>3</td></tr></table></span>";
        let doc = compose(html).unwrap();

        let tables: Vec<_> = doc.tables().collect();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].widths, Some(vec![ColumnWidth::Star; 3]));
        assert_eq!(tables[0].layout, Some(TableLayout::thin_gray()));
    }

    #[test]
    fn test_outline_separates_broken_heading_lines() {
        let doc = compose("<h1>Intro<br>Part two</h1>").unwrap();
        let outline = doc.content[1].as_list().unwrap();
        assert_eq!(outline.items[0].plain_text(), "1. Intro Part two");
    }

    #[test]
    fn test_idempotent_composition() {
        let html = "<h1>One</h1><p>a</p><h2>Two</h2><table><tr><td>x</td></tr></table>";
        let first = compose(html).unwrap();
        let second = compose(html).unwrap();
        assert!(first.same_structure(&second));
    }

    #[test]
    fn test_custom_options() {
        let options = ComposeOptions::new()
            .with_title("Contents")
            .with_page_size(PageSize::Letter)
            .with_metadata(Metadata::titled("Report"));
        let doc = DocumentComposer::with_options(options)
            .compose("<p>x</p>")
            .unwrap();

        assert_eq!(doc.content[0].plain_text(), "Contents");
        assert_eq!(doc.page_size, PageSize::Letter);
        assert_eq!(doc.metadata.title.as_deref(), Some("Report"));
    }
}
