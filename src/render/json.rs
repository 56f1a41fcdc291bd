//! JSON rendering for document descriptions.

use std::io::Write;

use crate::error::Result;
use crate::model::DocumentDescription;

use super::DocumentRenderer;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a description to JSON. The footer is a function and is omitted.
pub fn to_json(doc: &DocumentDescription, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc)?,
        JsonFormat::Compact => serde_json::to_string(doc)?,
    };
    Ok(json)
}

/// Renderer writing the description as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    format: JsonFormat,
}

impl JsonRenderer {
    pub fn new(format: JsonFormat) -> Self {
        Self { format }
    }
}

impl DocumentRenderer for JsonRenderer {
    fn name(&self) -> &str {
        "json"
    }

    fn render(&self, doc: &DocumentDescription, out: &mut dyn Write) -> Result<()> {
        out.write_all(to_json(doc, self.format)?.as_bytes())?;
        Ok(())
    }
}
