// SPDX-License-Identifier: MIT

//! Cell edits made directly in the output table
//!
//! Edits are stored as a JSON list in the `celledits` parameter of an
//! "Edit Cells" step. A value that does not parse (usually an empty parameter)
//! is treated as an empty list.

use serde::{Deserialize, Serialize};

/// Module id of the step that stores cell edits
pub const EDIT_CELLS_MODULE: &str = "editcells";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEdit {
    pub row: u64,
    pub col: String,
    pub value: String,
}

pub fn parse_cell_edits(json: &str) -> Vec<CellEdit> {
    if json.trim().is_empty() {
        return Vec::new();
    }
    serde_json::from_str(json).unwrap_or_else(|e| {
        log::warn!("Resetting unreadable cell edits: {}", e);
        Vec::new()
    })
}

/// Add one edit to a stored list, returning the new parameter value
pub fn append_cell_edit(json: &str, edit: CellEdit) -> Result<String, serde_json::Error> {
    let mut edits = parse_cell_edits(json);
    edits.push(edit);
    serde_json::to_string(&edits)
}

/// Where an edit of step `index`'s output should go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellEditTarget {
    /// Merge into the existing Edit Cells step at this index
    Existing(usize),
    /// Create a new Edit Cells step at this index
    InsertAt(usize),
}

/// `modules` are the module ids of a tab's steps, in order. The edited step
/// itself or the one right after it is reused when it is an Edit Cells step.
pub fn edit_cells_target(modules: &[&str], index: usize) -> CellEditTarget {
    if modules.get(index) == Some(&EDIT_CELLS_MODULE) {
        return CellEditTarget::Existing(index);
    }
    if modules.get(index + 1) == Some(&EDIT_CELLS_MODULE) {
        return CellEditTarget::Existing(index + 1);
    }
    CellEditTarget::InsertAt(index + 1)
}

/// A step to update (or create) and the `celledits` value to store on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellEditPlan {
    pub target: CellEditTarget,
    pub celledits: String,
}

/// Route `edit` to an Edit Cells step. `existing` is the `celledits` value of
/// the step that would be reused; a newly inserted step starts empty.
pub fn add_cell_edit(
    modules: &[&str],
    index: usize,
    existing: &str,
    edit: CellEdit,
) -> Result<CellEditPlan, serde_json::Error> {
    let target = edit_cells_target(modules, index);
    let current = match target {
        CellEditTarget::Existing(_) => existing,
        CellEditTarget::InsertAt(_) => "",
    };
    Ok(CellEditPlan {
        target,
        celledits: append_cell_edit(current, edit)?,
    })
}
