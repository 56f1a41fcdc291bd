//! Page geometry, colors and the named style registry.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Box margins in points, stored in (left, top, right, bottom) order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Margins {
    /// Create margins from all four sides.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Same margin on the left/right and on the top/bottom.
    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self::new(horizontal, vertical, horizontal, vertical)
    }

    /// Same margin on every side.
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Sum of left and right margins.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of top and bottom margins.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}

impl Alignment {
    /// Parse a CSS `text-align` value.
    pub fn from_css(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" | "end" => Some(Alignment::Right),
            "justify" => Some(Alignment::Justify),
            _ => None,
        }
    }
}

/// An RGB color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Neutral gray used for table rules (`#aaa`).
    pub const GRAY: Color = Color::rgb(0xaa, 0xaa, 0xaa);
    pub const LINK_BLUE: Color = Color::rgb(0x1a, 0x0d, 0xab);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb`, `#rrggbb`, `rgb(r, g, b)` or a basic color name.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();

        if let Some(hex) = value.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        if let Some(args) = value
            .strip_prefix("rgb(")
            .or_else(|| value.strip_prefix("rgba("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let parts: Vec<u8> = args
                .split(',')
                .take(3)
                .filter_map(|p| p.trim().parse::<f32>().ok())
                .map(|v| v.clamp(0.0, 255.0) as u8)
                .collect();
            return match parts.as_slice() {
                [r, g, b] => Some(Self::rgb(*r, *g, *b)),
                _ => None,
            };
        }

        match value.as_str() {
            "black" => Some(Self::BLACK),
            "white" => Some(Self::rgb(255, 255, 255)),
            "gray" | "grey" => Some(Self::rgb(128, 128, 128)),
            "red" => Some(Self::rgb(255, 0, 0)),
            "green" => Some(Self::rgb(0, 128, 0)),
            "blue" => Some(Self::rgb(0, 0, 255)),
            "yellow" => Some(Self::rgb(255, 255, 0)),
            "orange" => Some(Self::rgb(255, 165, 0)),
            "purple" => Some(Self::rgb(128, 0, 128)),
            _ => None,
        }
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        let expand = |c: char| c.to_digit(16).map(|d| (d * 17) as u8);
        match hex.len() {
            3 => {
                let mut chars = hex.chars();
                Some(Self::rgb(
                    expand(chars.next()?)?,
                    expand(chars.next()?)?,
                    expand(chars.next()?)?,
                ))
            }
            6 => Some(Self::rgb(
                u8::from_str_radix(&hex[0..2], 16).ok()?,
                u8::from_str_radix(&hex[2..4], 16).ok()?,
                u8::from_str_radix(&hex[4..6], 16).ok()?,
            )),
            _ => None,
        }
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Components scaled to 0.0..=1.0 for PDF color operators.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Color::parse(&value).ok_or_else(|| format!("invalid color: {}", value))
    }
}

/// Output page size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    /// ISO A4 (210 x 297 mm)
    #[default]
    A4,
    /// US Letter (8.5 x 11 in)
    Letter,
    /// US Legal (8.5 x 14 in)
    Legal,
    /// Arbitrary size in points
    Custom { width: f32, height: f32 },
}

impl PageSize {
    /// Page dimensions as (width, height) in points.
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

impl FromStr for PageSize {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            other => Err(Error::InvalidPageSize(other.to_string())),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::A4 => write!(f, "A4"),
            PageSize::Letter => write!(f, "LETTER"),
            PageSize::Legal => write!(f, "LEGAL"),
            PageSize::Custom { width, height } => write!(f, "{}x{}pt", width, height),
        }
    }
}

/// A reusable style referenced by name from text nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedStyle {
    /// Font size in points
    pub font_size: Option<f32>,

    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Outer margin
    pub margin: Option<Margins>,

    /// Text alignment override
    pub alignment: Option<Alignment>,
}

/// Registry of named styles, keyed by style name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleRegistry {
    styles: BTreeMap<String, NamedStyle>,
}

impl StyleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a style.
    pub fn insert(&mut self, name: impl Into<String>, style: NamedStyle) {
        self.styles.insert(name.into(), style);
    }

    /// Builder form of [`StyleRegistry::insert`].
    pub fn with(mut self, name: impl Into<String>, style: NamedStyle) -> Self {
        self.insert(name, style);
        self
    }

    /// Look up a style by name.
    pub fn get(&self, name: &str) -> Option<&NamedStyle> {
        self.styles.get(name)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &NamedStyle)> {
        self.styles.iter()
    }
}
