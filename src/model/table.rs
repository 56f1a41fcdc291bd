//! Table types.

use serde::{Deserialize, Serialize};

use super::{Alignment, Color, ContentNode, Paragraph};

/// A table structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,

    /// Number of header rows (0 = no header)
    pub header_rows: u8,

    /// Column widths, one per column of the first row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widths: Option<Vec<ColumnWidth>>,

    /// Border and padding descriptor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<TableLayout>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with header.
    pub fn with_header(header_rows: u8) -> Self {
        Self {
            header_rows,
            ..Self::new()
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of grid columns spanned by the first row.
    pub fn column_count(&self) -> usize {
        self.rows
            .first()
            .map(|r| r.cells.iter().map(|c| c.colspan.max(1) as usize).sum())
            .unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get header rows.
    pub fn header(&self) -> &[TableRow] {
        let end = (self.header_rows as usize).min(self.rows.len());
        &self.rows[..end]
    }

    /// Get body rows (non-header).
    pub fn body(&self) -> &[TableRow] {
        let start = (self.header_rows as usize).min(self.rows.len());
        &self.rows[start..]
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if the table has complex structure (merged cells).
    pub fn has_merged_cells(&self) -> bool {
        self.rows
            .iter()
            .flat_map(|r| &r.cells)
            .any(|c| c.rowspan > 1 || c.colspan > 1)
    }
}

/// Width of a single table column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnWidth {
    /// An equal share of the width left after fixed and auto columns
    Star,
    /// Sized to content
    Auto,
    /// Fixed width in points
    Fixed(f32),
}

/// Border widths, border colors and cell padding of a table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableLayout {
    pub h_line_width: f32,
    pub v_line_width: f32,
    pub h_line_color: Color,
    pub v_line_color: Color,
    pub padding_left: f32,
    pub padding_right: f32,
    pub padding_top: f32,
    pub padding_bottom: f32,
}

impl TableLayout {
    /// Same rule width and color on every line, same padding on every side.
    pub fn grid(line_width: f32, color: Color, padding: f32) -> Self {
        Self {
            h_line_width: line_width,
            v_line_width: line_width,
            h_line_color: color,
            v_line_color: color,
            padding_left: padding,
            padding_right: padding,
            padding_top: padding,
            padding_bottom: padding,
        }
    }

    /// Thin gray rules with 4pt padding, applied to every exported table.
    pub fn thin_gray() -> Self {
        Self::grid(0.5, Color::GRAY, 4.0)
    }
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            h_line_width: 1.0,
            v_line_width: 1.0,
            h_line_color: Color::BLACK,
            v_line_color: Color::BLACK,
            padding_left: 4.0,
            padding_right: 4.0,
            padding_top: 2.0,
            padding_bottom: 2.0,
        }
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,

    /// Whether this is a header row
    pub is_header: bool,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: false,
        }
    }

    /// Create a header row.
    pub fn header(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: true,
        }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.plain_text())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content
    pub content: Vec<ContentNode>,

    /// Number of rows this cell spans
    pub rowspan: u8,

    /// Number of columns this cell spans
    pub colspan: u8,

    /// Cell alignment
    pub alignment: Alignment,
}

impl TableCell {
    /// Create a cell holding a single text paragraph.
    pub fn text(text: impl Into<String>) -> Self {
        Self::with_content(vec![ContentNode::Paragraph(Paragraph::with_text(text))])
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self::with_content(Vec::new())
    }

    /// Create a cell with arbitrary content.
    pub fn with_content(content: Vec<ContentNode>) -> Self {
        Self {
            content,
            rowspan: 1,
            colspan: 1,
            alignment: Alignment::Left,
        }
    }

    /// Set colspan and return self.
    pub fn colspan(mut self, span: u8) -> Self {
        self.colspan = span.max(1);
        self
    }

    /// Set rowspan and return self.
    pub fn rowspan(mut self, span: u8) -> Self {
        self.rowspan = span.max(1);
        self
    }

    /// Set alignment and return self.
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|n| n.plain_text())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() || self.plain_text().trim().is_empty()
    }

    /// Check if this cell spans multiple rows or columns.
    pub fn is_merged(&self) -> bool {
        self.rowspan > 1 || self.colspan > 1
    }
}
