//! Minimal inline `style` attribute handling.

use crate::model::{Alignment, Color, TextStyle};

/// Split a `style` attribute into lowercase `(property, value)` pairs.
pub fn declarations(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let prop = prop.trim().to_ascii_lowercase();
            let value = value.trim().trim_end_matches("!important").trim();
            if prop.is_empty() || value.is_empty() {
                None
            } else {
                Some((prop, value.to_string()))
            }
        })
        .collect()
}

/// Convert a CSS length to points. Percentages and unknown units yield `None`.
pub fn length_to_points(value: &str) -> Option<f32> {
    let value = value.trim().to_ascii_lowercase();
    let (number, factor) = if let Some(n) = value.strip_suffix("px") {
        (n, 0.75)
    } else if let Some(n) = value.strip_suffix("pt") {
        (n, 1.0)
    } else if let Some(n) = value.strip_suffix("rem") {
        (n, 12.0)
    } else if let Some(n) = value.strip_suffix("em") {
        (n, 12.0)
    } else if value.ends_with('%') {
        return None;
    } else {
        // Bare numbers in HTML attributes are CSS pixels.
        (value.as_str(), 0.75)
    };
    number
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n * factor)
}

/// Apply text-level declarations of a `style` attribute on top of `style`.
pub fn apply_text_style(css: &str, style: &mut TextStyle) {
    for (prop, value) in declarations(css) {
        match prop.as_str() {
            "font-weight" => {
                let v = value.to_ascii_lowercase();
                style.bold = v == "bold"
                    || v == "bolder"
                    || v.parse::<u16>().map(|w| w >= 600).unwrap_or(false);
            }
            "font-style" => {
                let v = value.to_ascii_lowercase();
                style.italic = v == "italic" || v == "oblique";
            }
            "text-decoration" | "text-decoration-line" => {
                let v = value.to_ascii_lowercase();
                if v.contains("underline") {
                    style.underline = true;
                }
                if v.contains("line-through") {
                    style.strikethrough = true;
                }
                if v == "none" {
                    style.underline = false;
                    style.strikethrough = false;
                }
            }
            "color" => {
                if let Some(color) = Color::parse(&value) {
                    style.color = Some(color);
                }
            }
            "background-color" | "background" => {
                if let Some(color) = Color::parse(&value) {
                    style.background_color = Some(color);
                }
            }
            "font-size" => {
                if let Some(size) = length_to_points(&value) {
                    style.font_size = Some(size);
                }
            }
            "font-family" => {
                let v = value.to_ascii_lowercase();
                if v.contains("mono") || v.contains("courier") {
                    style.monospace = true;
                }
            }
            _ => {}
        }
    }
}

/// Read `text-align` from a `style` attribute.
pub fn text_align(css: &str) -> Option<Alignment> {
    declarations(css)
        .into_iter()
        .find(|(prop, _)| prop == "text-align")
        .and_then(|(_, value)| Alignment::from_css(&value))
}

/// Read a property value from a `style` attribute.
pub fn property(css: &str, name: &str) -> Option<String> {
    declarations(css)
        .into_iter()
        .find(|(prop, _)| prop == name)
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declarations() {
        let decls = declarations("color: #f00; FONT-WEIGHT:bold;;  broken");
        assert_eq!(
            decls,
            vec![
                ("color".to_string(), "#f00".to_string()),
                ("font-weight".to_string(), "bold".to_string()),
            ]
        );
    }

    #[test]
    fn test_length_to_points() {
        assert_eq!(length_to_points("16px"), Some(12.0));
        assert_eq!(length_to_points("10pt"), Some(10.0));
        assert_eq!(length_to_points("200"), Some(150.0));
        assert_eq!(length_to_points("50%"), None);
        assert_eq!(length_to_points("wide"), None);
    }

    #[test]
    fn test_apply_text_style() {
        let mut style = TextStyle::default();
        apply_text_style(
            "font-weight: 700; font-style: italic; text-decoration: underline line-through; color: rgb(1,2,3)",
            &mut style,
        );
        assert!(style.bold);
        assert!(style.italic);
        assert!(style.underline);
        assert!(style.strikethrough);
        assert_eq!(style.color, Some(Color::rgb(1, 2, 3)));
    }

    #[test]
    fn test_text_align() {
        assert_eq!(text_align("text-align:center;"), Some(Alignment::Center));
        assert_eq!(text_align("color: red"), None);
    }
}
