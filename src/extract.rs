//! Heading extraction for the generated table of contents.

use scraper::{ElementRef, Html, Node, Selector};

use crate::convert::{is_block, NormalizeOptions, TextNormalizer, IGNORED};
use crate::model::{HeadingEntry, HeadingLevel};

const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

/// Extract a numbered outline from an HTML fragment.
///
/// The fragment is parsed into a detached tree; scripts are never run and
/// nothing is fetched. Headings are visited in document order regardless of
/// level, and each entry's text is `"<ordinal>. <heading text>"` with nested
/// markup flattened. Line breaks and nested blocks separate words; script
/// and style content is left out.
///
/// # Example
///
/// ```
/// use tocpdf::extract_titles;
///
/// let titles = extract_titles("<h1>Intro</h1><p>x</p><h2>Setup</h2>");
/// assert_eq!(titles[1].text, "2. Setup");
/// ```
pub fn extract_titles(html: &str) -> Vec<HeadingEntry> {
    TitleExtractor::new().extract(html)
}

/// Reusable heading extractor.
#[derive(Debug, Clone)]
pub struct TitleExtractor {
    selector: Selector,
    normalizer: TextNormalizer,
}

impl TitleExtractor {
    pub fn new() -> Self {
        Self::with_normalizer(TextNormalizer::new(NormalizeOptions::rendered_text()))
    }

    /// Use a custom text normalizer for heading text.
    pub fn with_normalizer(normalizer: TextNormalizer) -> Self {
        Self {
            selector: Selector::parse(HEADING_SELECTOR).unwrap(),
            normalizer,
        }
    }

    /// Extract heading entries from an HTML fragment.
    pub fn extract(&self, html: &str) -> Vec<HeadingEntry> {
        if html.trim().is_empty() {
            return Vec::new();
        }

        let fragment = Html::parse_fragment(html);
        let mut titles = Vec::new();

        for element in fragment.select(&self.selector) {
            let Some(level) = HeadingLevel::from_tag(element.value().name()) else {
                continue;
            };
            let mut raw = String::new();
            rendered_text(element, &mut raw);
            let text = self.normalizer.normalize_trimmed(&raw);
            let ordinal = titles.len() as u32 + 1;
            titles.push(HeadingEntry::new(ordinal, &text, level));
        }

        log::debug!("Extracted {} headings", titles.len());
        titles
    }
}

/// Append the text an element renders, with a break at `br` and around
/// nested blocks.
fn rendered_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        if let Some(child_el) = ElementRef::wrap(child) {
            let tag = child_el.value().name();
            if IGNORED.contains(&tag) {
                continue;
            }
            if tag == "br" {
                out.push('\n');
            } else if is_block(tag) {
                out.push('\n');
                rendered_text(child_el, out);
                out.push('\n');
            } else {
                rendered_text(child_el, out);
            }
        } else if let Node::Text(text) = child.value() {
            out.push_str(&**text);
        }
    }
}

impl Default for TitleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(extract_titles("").is_empty());
        assert!(extract_titles("   ").is_empty());
        assert!(extract_titles("<p>no headings</p>").is_empty());
    }

    #[test]
    fn test_single_heading() {
        let titles = extract_titles("<h1>A</h1><p>text</p>");
        assert_eq!(
            titles,
            vec![HeadingEntry {
                ordinal: 1,
                text: "1. A".to_string(),
                level: HeadingLevel::H1,
            }]
        );
    }

    #[test]
    fn test_document_order_across_levels() {
        let html = "<h2>Second level</h2><h1>Top</h1><h6>Deep</h6><h3>Mid</h3>";
        let titles = extract_titles(html);

        let texts: Vec<&str> = titles.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["1. Second level", "2. Top", "3. Deep", "4. Mid"]
        );
        let levels: Vec<&str> = titles.iter().map(|t| t.level.as_str()).collect();
        assert_eq!(levels, vec!["h2", "h1", "h6", "h3"]);
    }

    #[test]
    fn test_nested_markup_is_flattened() {
        let titles = extract_titles("<h2>Hello <strong>bold <em>world</em></strong>\n  again</h2>");
        assert_eq!(titles[0].text, "1. Hello bold world again");
    }

    #[test]
    fn test_line_breaks_separate_words() {
        let titles = extract_titles("<h1>Intro<br>Part two</h1><h2>One<div>Two</div></h2>");
        assert_eq!(titles[0].text, "1. Intro Part two");
        assert_eq!(titles[1].text, "2. One Two");
    }

    #[test]
    fn test_script_and_style_text_is_skipped() {
        let titles = extract_titles(
            "<h1>Visible<style>h1 { color: red }</style><script>var x = 1;</script></h1>",
        );
        assert_eq!(titles[0].text, "1. Visible");
    }

    #[test]
    fn test_ligatures_are_kept_as_written() {
        let titles = extract_titles("<h1>O\u{FB01}ce e\u{0301}tude</h1>");
        assert_eq!(titles[0].text, "1. O\u{FB01}ce \u{00E9}tude");
    }

    #[test]
    fn test_repeated_headings_not_deduplicated() {
        let titles = extract_titles("<h3>Same</h3><h3>Same</h3>");
        assert_eq!(titles.len(), 2);
        assert_eq!(titles[1].text, "2. Same");
    }

    #[test]
    fn test_empty_heading_consumes_ordinal() {
        let titles = extract_titles("<h1></h1><h1>Next</h1>");
        assert_eq!(titles.len(), 2);
        assert_eq!(titles[0].text, "1. ");
        assert_eq!(titles[1].text, "2. Next");
    }

    #[test]
    fn test_headings_inside_containers() {
        let html = "<div><section><h4>Inner</h4></section></div><figure><h5>Fig</h5></figure>";
        let titles = extract_titles(html);
        assert_eq!(titles.len(), 2);
        assert_eq!(titles[0].level, HeadingLevel::H4);
        assert_eq!(titles[1].level, HeadingLevel::H5);
    }

    #[test]
    fn test_script_content_is_not_executed_or_counted() {
        let html = "<script>document.write('<h1>x</h1>')</script><h1>Real</h1>";
        let titles = extract_titles(html);
        assert_eq!(titles.len(), 1);
        assert_eq!(titles[0].text, "1. Real");
    }
}
