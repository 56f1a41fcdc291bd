//! PDF output using `lopdf`.

use std::io::Write;

use chrono::Utc;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::error::Result;
use crate::model::{Color, DocumentDescription};

use super::fonts::{to_win_ansi, Font};
use super::layout::{layout_document, Element};
use super::{DocumentRenderer, PdfOptions};

const PRODUCER: &str = concat!("tocpdf ", env!("CARGO_PKG_VERSION"));

/// Renders document descriptions to PDF with the standard Type1 fonts.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    options: PdfOptions,
}

impl PdfRenderer {
    /// Create a renderer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with custom options.
    pub fn with_options(options: PdfOptions) -> Self {
        Self { options }
    }

    /// Get the renderer options.
    pub fn options(&self) -> &PdfOptions {
        &self.options
    }

    /// Render into a byte vector.
    pub fn render_to_vec(&self, doc: &DocumentDescription) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.render_pages(doc, &mut bytes)?;
        Ok(bytes)
    }

    /// Render and write the PDF, returning the number of pages.
    pub fn render_pages(&self, doc: &DocumentDescription, mut out: &mut dyn Write) -> Result<u32> {
        let mut document = self.build(doc)?;
        let page_count = document.get_pages().len() as u32;
        document.save_to(&mut out)?;
        Ok(page_count)
    }

    fn build(&self, doc: &DocumentDescription) -> Result<Document> {
        let (page_width, page_height) = doc.page_size.dimensions();
        let pages = layout_document(doc, &self.options);

        let mut document = Document::with_version(self.options.pdf_version.as_str());
        let pages_id = document.new_object_id();

        let mut fonts = Dictionary::new();
        for font in Font::ALL {
            let font_id = document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name(), font_id);
        }
        let resources_id = document.add_object(dictionary! { "Font" => fonts });

        let mut page_ids: Vec<ObjectId> = Vec::with_capacity(pages.len());
        for elements in &pages {
            let content = draw_page(elements, page_height);
            let content_id = document.add_object(self.content_stream(&content)?);

            let mut page = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), page_width.into(), page_height.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            };

            if self.options.link_annotations {
                let annots: Vec<Object> = link_annotations(elements, page_height)
                    .into_iter()
                    .map(|annot| document.add_object(annot).into())
                    .collect();
                if !annots.is_empty() {
                    page.set("Annots", annots);
                }
            }

            page_ids.push(document.add_object(page));
        }

        let kids: Vec<Object> = page_ids.iter().map(|id| Object::from(*id)).collect();
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_ids.len() as i32,
            }),
        );

        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        let info_id = document.add_object(info_dictionary(doc));
        document.trailer.set("Info", info_id);

        log::debug!("Built PDF with {} pages", page_ids.len());
        Ok(document)
    }

    fn content_stream(&self, content: &Content) -> Result<Stream> {
        let encoded = content.encode()?;
        if !self.options.compress {
            return Ok(Stream::new(Dictionary::new(), encoded));
        }

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&encoded)?;
        let compressed = encoder.finish()?;
        Ok(Stream::new(dictionary! { "Filter" => "FlateDecode" }, compressed))
    }
}

impl DocumentRenderer for PdfRenderer {
    fn name(&self) -> &str {
        "pdf"
    }

    fn render(&self, doc: &DocumentDescription, out: &mut dyn Write) -> Result<()> {
        self.render_pages(doc, out).map(|_| ())
    }
}

fn color_operands(color: Color) -> Vec<Object> {
    color.to_unit().iter().map(|c| (*c).into()).collect()
}

fn draw_page(elements: &[Element], page_height: f32) -> Content {
    let mut ops = Vec::new();

    for element in elements {
        match element {
            Element::Text {
                x,
                y,
                text,
                font,
                size,
                color,
            } => {
                if text.is_empty() {
                    continue;
                }
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![font.resource_name().into(), (*size).into()],
                ));
                ops.push(Operation::new("rg", color_operands(*color)));
                ops.push(Operation::new("Td", vec![(*x).into(), (page_height - y).into()]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            Element::Fill {
                x,
                y,
                width,
                height,
                color,
            } => {
                ops.push(Operation::new("rg", color_operands(*color)));
                ops.push(Operation::new(
                    "re",
                    vec![
                        (*x).into(),
                        (page_height - y - height).into(),
                        (*width).into(),
                        (*height).into(),
                    ],
                ));
                ops.push(Operation::new("f", vec![]));
            }
            Element::Frame {
                x,
                y,
                width,
                height,
                line_width,
                color,
            } => {
                ops.push(Operation::new("w", vec![(*line_width).into()]));
                ops.push(Operation::new("RG", color_operands(*color)));
                ops.push(Operation::new(
                    "re",
                    vec![
                        (*x).into(),
                        (page_height - y - height).into(),
                        (*width).into(),
                        (*height).into(),
                    ],
                ));
                ops.push(Operation::new("S", vec![]));
            }
            Element::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => {
                ops.push(Operation::new("w", vec![(*width).into()]));
                ops.push(Operation::new("RG", color_operands(*color)));
                ops.push(Operation::new("m", vec![(*x1).into(), (page_height - y1).into()]));
                ops.push(Operation::new("l", vec![(*x2).into(), (page_height - y2).into()]));
                ops.push(Operation::new("S", vec![]));
            }
            Element::Link { .. } => {}
        }
    }

    Content { operations: ops }
}

fn link_annotations(elements: &[Element], page_height: f32) -> Vec<Dictionary> {
    elements
        .iter()
        .filter_map(|element| match element {
            Element::Link {
                x,
                y,
                width,
                height,
                url,
            } => Some(dictionary! {
                "Type" => "Annot",
                "Subtype" => "Link",
                "Rect" => vec![
                    (*x).into(),
                    (page_height - y - height).into(),
                    (x + width).into(),
                    (page_height - y).into(),
                ],
                "Border" => vec![0.into(), 0.into(), 0.into()],
                "A" => dictionary! {
                    "S" => "URI",
                    "URI" => Object::string_literal(url.as_str()),
                },
            }),
            _ => None,
        })
        .collect()
}

fn info_dictionary(doc: &DocumentDescription) -> Dictionary {
    let meta = &doc.metadata;
    let text = |value: &str| Object::String(to_win_ansi(value), StringFormat::Literal);

    let mut info = Dictionary::new();
    let fields = [
        ("Title", &meta.title),
        ("Author", &meta.author),
        ("Subject", &meta.subject),
        ("Keywords", &meta.keywords),
        ("Creator", &meta.creator),
    ];
    for (key, value) in fields {
        if let Some(value) = value {
            info.set(key, text(value));
        }
    }
    info.set("Producer", text(meta.producer.as_deref().unwrap_or(PRODUCER)));

    let created = meta.created.unwrap_or_else(Utc::now);
    info.set(
        "CreationDate",
        text(&created.format("D:%Y%m%d%H%M%SZ").to_string()),
    );
    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Metadata, Paragraph};

    #[test]
    fn test_render_produces_pdf_header() {
        let doc = DocumentDescription::new(vec![Paragraph::with_text("Hello").into()]);
        let bytes = PdfRenderer::new().render_to_vec(&doc).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
    }

    #[test]
    fn test_uncompressed_content_is_readable() {
        let doc = DocumentDescription::new(vec![Paragraph::with_text("Hello").into()]);
        let renderer = PdfRenderer::with_options(PdfOptions::new().with_compression(false));
        let bytes = renderer.render_to_vec(&doc).unwrap();
        let haystack = String::from_utf8_lossy(&bytes);
        assert!(haystack.contains("(Hello) Tj"));
    }

    #[test]
    fn test_draw_page_flips_y() {
        let content = draw_page(
            &[Element::Text {
                x: 10.0,
                y: 100.0,
                text: "x".into(),
                font: Font::Helvetica,
                size: 12.0,
                color: Color::BLACK,
            }],
            800.0,
        );
        let td = content
            .operations
            .iter()
            .find(|op| op.operator == "Td")
            .unwrap();
        assert_eq!(td.operands[1].as_float().unwrap(), 700.0);
    }

    #[test]
    fn test_info_dictionary() {
        let mut doc = DocumentDescription::default();
        doc.metadata = Metadata::titled("Report");
        let info = info_dictionary(&doc);
        assert_eq!(info.get(b"Title").unwrap().as_str().unwrap(), b"Report");
        assert!(info.has(b"Producer"));
        assert!(info.has(b"CreationDate"));
    }
}
