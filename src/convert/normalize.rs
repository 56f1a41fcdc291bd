//! Text normalization applied to HTML text nodes before they enter the
//! content tree.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Normalization preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizePreset {
    /// Whitespace collapsing only, text otherwise untouched
    Minimal,
    /// NFC + ligatures + invisible character removal + whitespace collapsing
    #[default]
    Standard,
}

/// Options for text normalization.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Fix ligatures (fi, fl, etc.)
    pub fix_ligatures: bool,

    /// Remove Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Remove zero-width spaces and joiners that editors leave behind
    pub remove_zero_width: bool,

    /// Turn non-breaking spaces into ordinary spaces
    pub replace_nbsp: bool,

    /// Collapse runs of HTML whitespace into a single space
    pub collapse_whitespace: bool,
}

impl NormalizeOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: NormalizePreset) -> Self {
        match preset {
            NormalizePreset::Minimal => Self::minimal(),
            NormalizePreset::Standard => Self::standard(),
        }
    }

    /// Minimal normalization options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: false,
            fix_ligatures: false,
            remove_replacement_char: false,
            remove_zero_width: false,
            replace_nbsp: false,
            collapse_whitespace: true,
        }
    }

    /// NFC composition and whitespace collapsing only. Characters stay as
    /// the browser would display them.
    pub fn rendered_text() -> Self {
        Self {
            normalize_unicode: true,
            ..Self::minimal()
        }
    }

    /// Standard normalization options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: true,
            remove_replacement_char: true,
            remove_zero_width: true,
            replace_nbsp: false,
            collapse_whitespace: true,
        }
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Text normalizer for HTML text nodes.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    options: NormalizeOptions,
    whitespace_regex: Regex,
    ligature_map: Vec<(&'static str, &'static str)>,
}

impl TextNormalizer {
    /// Create a new normalizer with the given options.
    pub fn new(options: NormalizeOptions) -> Self {
        Self {
            options,
            // HTML whitespace only; U+00A0 must survive collapsing.
            whitespace_regex: Regex::new(r"[ \t\n\r\x0C]+").unwrap(),
            ligature_map: vec![
                ("\u{FB00}", "ff"),
                ("\u{FB01}", "fi"),
                ("\u{FB02}", "fl"),
                ("\u{FB03}", "ffi"),
                ("\u{FB04}", "ffl"),
                ("\u{FB05}", "st"),
                ("\u{FB06}", "st"),
            ],
        }
    }

    /// Create a normalizer from a preset.
    pub fn from_preset(preset: NormalizePreset) -> Self {
        Self::new(NormalizeOptions::from_preset(preset))
    }

    /// Normalize a flowing text node. Leading and trailing whitespace is
    /// collapsed but not removed, so adjacent inline runs keep their gaps.
    pub fn normalize(&self, text: &str) -> String {
        let mut result = self.normalize_chars(text);

        if self.options.collapse_whitespace {
            result = self.whitespace_regex.replace_all(&result, " ").into_owned();
        }

        result
    }

    /// Normalize preformatted text: character fixes only, whitespace kept.
    pub fn normalize_preformatted(&self, text: &str) -> String {
        self.normalize_chars(text)
    }

    /// Normalize text and trim it, as rendered text of a whole element.
    pub fn normalize_trimmed(&self, text: &str) -> String {
        self.normalize(text).trim_matches(' ').to_string()
    }

    fn normalize_chars(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        if self.options.fix_ligatures {
            for (ligature, replacement) in &self.ligature_map {
                result = result.replace(ligature, replacement);
            }
        }

        if self.options.remove_replacement_char {
            result = result.replace('\u{FFFD}', "");
        }

        if self.options.remove_zero_width {
            result = result
                .chars()
                .filter(|c| !matches!(c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}'))
                .collect();
        }

        if self.options.replace_nbsp {
            result = result.replace('\u{00A0}', " ");
        }

        result
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(NormalizeOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace_keeps_edges() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.normalize("  hello \n\t world  "), " hello world ");
        assert_eq!(normalizer.normalize_trimmed("  hello \n world "), "hello world");
    }

    #[test]
    fn test_nbsp_survives_collapsing() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.normalize("a\u{00A0}\u{00A0}b"), "a\u{00A0}\u{00A0}b");

        let mut options = NormalizeOptions::standard();
        options.replace_nbsp = true;
        let normalizer = TextNormalizer::new(options);
        assert_eq!(normalizer.normalize("a\u{00A0}\u{00A0}b"), "a b");
    }

    #[test]
    fn test_ligatures_and_invisibles() {
        let normalizer = TextNormalizer::from_preset(NormalizePreset::Standard);
        assert_eq!(normalizer.normalize("\u{FB01}nal\u{200B}ly"), "finally");

        let minimal = TextNormalizer::from_preset(NormalizePreset::Minimal);
        assert_eq!(minimal.normalize("\u{FB01}"), "\u{FB01}");
    }

    #[test]
    fn test_nfc_normalization() {
        let normalizer = TextNormalizer::default();
        // e + combining acute accent -> precomposed é
        assert_eq!(normalizer.normalize("e\u{0301}"), "\u{00E9}");
    }

    #[test]
    fn test_rendered_text_composes_but_keeps_ligatures() {
        let normalizer = TextNormalizer::new(NormalizeOptions::rendered_text());
        assert_eq!(normalizer.normalize("e\u{0301} \u{FB01}"), "\u{00E9} \u{FB01}");
    }

    #[test]
    fn test_preformatted_keeps_whitespace() {
        let normalizer = TextNormalizer::default();
        assert_eq!(
            normalizer.normalize_preformatted("fn main() {\n    run();\n}"),
            "fn main() {\n    run();\n}"
        );
    }
}
