//! Outline (table of contents) types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Heading level of an `h1`..`h6` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// All levels, outermost first.
    pub const ALL: [HeadingLevel; 6] = [
        HeadingLevel::H1,
        HeadingLevel::H2,
        HeadingLevel::H3,
        HeadingLevel::H4,
        HeadingLevel::H5,
        HeadingLevel::H6,
    ];

    /// Map a tag name (any case) to a heading level.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "h1" => Some(HeadingLevel::H1),
            "h2" => Some(HeadingLevel::H2),
            "h3" => Some(HeadingLevel::H3),
            "h4" => Some(HeadingLevel::H4),
            "h5" => Some(HeadingLevel::H5),
            "h6" => Some(HeadingLevel::H6),
            _ => None,
        }
    }

    /// Lowercase tag name.
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
            HeadingLevel::H5 => "h5",
            HeadingLevel::H6 => "h6",
        }
    }

    /// Numeric level, 1 through 6.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A numbered outline item derived from one heading element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingEntry {
    /// 1-based position among all headings
    pub ordinal: u32,

    /// Display text, `"<ordinal>. <heading text>"`
    pub text: String,

    /// Heading level of the source element
    pub level: HeadingLevel,
}

impl HeadingEntry {
    /// Build an entry, prefixing the heading text with its ordinal.
    pub fn new(ordinal: u32, heading_text: &str, level: HeadingLevel) -> Self {
        Self {
            ordinal,
            text: format!("{}. {}", ordinal, heading_text),
            level,
        }
    }

    /// The heading text without the ordinal prefix.
    pub fn title(&self) -> &str {
        let prefix_len = self.ordinal.to_string().len() + 2;
        self.text.get(prefix_len..).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_from_tag() {
        assert_eq!(HeadingLevel::from_tag("H3"), Some(HeadingLevel::H3));
        assert_eq!(HeadingLevel::from_tag("p"), None);
        assert_eq!(HeadingLevel::H6.number(), 6);
        assert_eq!(HeadingLevel::H1.to_string(), "h1");
    }

    #[test]
    fn test_heading_entry_text() {
        let entry = HeadingEntry::new(12, "Results", HeadingLevel::H2);
        assert_eq!(entry.text, "12. Results");
        assert_eq!(entry.title(), "Results");
    }

    #[test]
    fn test_heading_level_serializes_lowercase() {
        let json = serde_json::to_string(&HeadingLevel::H4).unwrap();
        assert_eq!(json, "\"h4\"");
    }
}
