//! Table column width and border patching.

use serde::{Deserialize, Serialize};

use crate::model::{ColumnWidth, Table, TableLayout};

use super::visitor::{ContentVisitor, VisitorAction};

/// When the composer overwrites table formatting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TablePatchPolicy {
    /// Replace widths and layout on every table
    #[default]
    Always,
    /// Only fill in widths or layout the author left unset
    OnlyIfUnset,
}

/// Visitor that gives every table equal flexible columns and a uniform
/// border layout.
#[derive(Debug, Clone)]
pub struct TableLayoutPatcher {
    policy: TablePatchPolicy,
    layout: TableLayout,
    patched: usize,
}

impl TableLayoutPatcher {
    /// Patcher applying `layout` under `policy`.
    pub fn new(policy: TablePatchPolicy, layout: TableLayout) -> Self {
        Self {
            policy,
            layout,
            patched: 0,
        }
    }

    /// Number of tables visited so far.
    pub fn patched(&self) -> usize {
        self.patched
    }

    /// Patch a single table.
    pub fn patch(&mut self, table: &mut Table) {
        let columns = table.column_count();
        let widths_valid = table
            .widths
            .as_ref()
            .is_some_and(|w| w.len() == columns);

        match self.policy {
            TablePatchPolicy::Always => {
                table.widths = Some(vec![ColumnWidth::Star; columns]);
                table.layout = Some(self.layout);
            }
            TablePatchPolicy::OnlyIfUnset => {
                // Author widths that disagree with the column count are unusable.
                if !widths_valid {
                    table.widths = Some(vec![ColumnWidth::Star; columns]);
                }
                if table.layout.is_none() {
                    table.layout = Some(self.layout);
                }
            }
        }

        self.patched += 1;
    }
}

impl Default for TableLayoutPatcher {
    fn default() -> Self {
        Self::new(TablePatchPolicy::default(), TableLayout::thin_gray())
    }
}

impl ContentVisitor for TableLayoutPatcher {
    fn visit_table(&mut self, table: &mut Table) -> VisitorAction {
        self.patch(table);
        VisitorAction::Continue
    }
}
