// SPDX-License-Identifier: MIT

//! Local cache of pending and completed workflow edits
//!
//! To edit a workflow, dispatch `BeginEdit` with the optimistic changes, then
//! submit the API request. When the request completes, dispatch `EndEdit`
//! with whatever the server confirmed. The derived [`edited_workflows`] view
//! overlays the cached changes onto the server list.
//!
//! Every begin carries an [`EditTicket`]. Each record remembers, per field, the
//! newest ticket that touched it, so a slow fulfillment cannot overwrite a
//! field that a later edit already changed. A ticket can end only once.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::types::{merge_changes, Changes, WorkflowId, WorkflowSummary};
use crate::client::error::{EditError, StoreError};
use crate::client::store::Reducer;

/// Identifies one begin/end pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditTicket {
    pub id: WorkflowId,
    pub seq: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditRecord {
    pub changes: Changes,
    pub n_pending_changes: u32,
    field_seqs: HashMap<String, u64>,
    open_seqs: HashSet<u64>,
}

impl EditRecord {
    /// Seq of the newest operation that wrote `field`
    pub fn field_seq(&self, field: &str) -> Option<u64> {
        self.field_seqs.get(field).copied()
    }

    pub fn is_open(&self, seq: u64) -> bool {
        self.open_seqs.contains(&seq)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowEditState {
    /// Workflows created locally by duplication, newest first
    pub adds: Vec<WorkflowSummary>,
    pub edits: HashMap<WorkflowId, EditRecord>,
}

#[derive(Debug, Clone)]
pub enum WorkflowEditEvent {
    BeginEdit {
        ticket: EditTicket,
        changes: Changes,
    },
    EndEdit {
        ticket: EditTicket,
        changes: Changes,
    },
    BeginDuplicate {
        ticket: EditTicket,
    },
    EndDuplicate {
        ticket: EditTicket,
        workflow: WorkflowSummary,
    },
}

pub fn begin_edit(
    edits: &HashMap<WorkflowId, EditRecord>,
    ticket: EditTicket,
    changes: &Changes,
) -> HashMap<WorkflowId, EditRecord> {
    let mut record = edits.get(&ticket.id).cloned().unwrap_or_default();
    merge_changes(&mut record.changes, changes);
    for field in changes.keys() {
        let seq = record.field_seqs.entry(field.clone()).or_insert(0);
        *seq = (*seq).max(ticket.seq);
    }
    record.open_seqs.insert(ticket.seq);
    record.n_pending_changes += 1;

    let mut next = edits.clone();
    next.insert(ticket.id, record);
    next
}

pub fn end_edit(
    edits: &HashMap<WorkflowId, EditRecord>,
    ticket: EditTicket,
    changes: &Changes,
) -> Result<HashMap<WorkflowId, EditRecord>, EditError> {
    let mut record = match edits.get(&ticket.id) {
        Some(record) if record.n_pending_changes > 0 => record.clone(),
        _ => return Err(EditError::NoPendingEdit { id: ticket.id }),
    };
    if !record.open_seqs.remove(&ticket.seq) {
        return Err(EditError::UnknownTicket {
            id: ticket.id,
            seq: ticket.seq,
        });
    }

    for (field, value) in changes {
        let newest = record.field_seq(field).unwrap_or(0);
        if ticket.seq >= newest {
            record.changes.insert(field.clone(), value.clone());
            record.field_seqs.insert(field.clone(), ticket.seq);
        } else {
            log::debug!(
                "Ignoring stale '{}' for workflow {} (seq {} < {})",
                field,
                ticket.id,
                ticket.seq,
                newest
            );
        }
    }
    record.n_pending_changes -= 1;

    let mut next = edits.clone();
    next.insert(ticket.id, record);
    Ok(next)
}

pub fn reduce_workflow_edit(
    state: &WorkflowEditState,
    event: WorkflowEditEvent,
) -> Result<WorkflowEditState, EditError> {
    let WorkflowEditState { adds, edits } = state;
    match event {
        WorkflowEditEvent::BeginEdit { ticket, changes } => Ok(WorkflowEditState {
            adds: adds.clone(),
            edits: begin_edit(edits, ticket, &changes),
        }),
        WorkflowEditEvent::EndEdit { ticket, changes } => Ok(WorkflowEditState {
            adds: adds.clone(),
            edits: end_edit(edits, ticket, &changes)?,
        }),
        WorkflowEditEvent::BeginDuplicate { ticket } => Ok(WorkflowEditState {
            adds: adds.clone(),
            edits: begin_edit(edits, ticket, &Changes::new()),
        }),
        WorkflowEditEvent::EndDuplicate { ticket, workflow } => {
            let edits = end_edit(edits, ticket, &Changes::new())?;
            let mut next_adds = Vec::with_capacity(adds.len() + 1);
            next_adds.push(workflow);
            next_adds.extend(adds.iter().cloned());
            Ok(WorkflowEditState {
                adds: next_adds,
                edits,
            })
        }
    }
}

/// Overlay pending and confirmed edits onto `workflows`, locally-added ones
/// first. Confirmed deletes are hidden; pending deletes stay visible.
pub fn edited_workflows(
    state: &WorkflowEditState,
    workflows: &[WorkflowSummary],
) -> Vec<WorkflowSummary> {
    state
        .adds
        .iter()
        .chain(workflows.iter())
        .map(|workflow| match state.edits.get(&workflow.id) {
            Some(record) => {
                let mut edited = workflow.with_changes(&record.changes).unwrap_or_else(|e| {
                    log::warn!("Cannot apply edits to workflow {}: {}", workflow.id, e);
                    workflow.clone()
                });
                edited.n_pending_changes = record.n_pending_changes;
                edited
            }
            None => workflow.clone(),
        })
        .filter(|workflow| !workflow.is_deleted || workflow.n_pending_changes > 0)
        .collect()
}

/// [`Reducer`] adapter so the edit cache can live in a [`crate::client::Store`]
pub struct WorkflowEditReducer;

impl Reducer for WorkflowEditReducer {
    type State = WorkflowEditState;
    type Event = WorkflowEditEvent;

    fn reduce(
        &self,
        state: &WorkflowEditState,
        event: WorkflowEditEvent,
    ) -> Result<WorkflowEditState, StoreError> {
        Ok(reduce_workflow_edit(state, event)?)
    }
}
