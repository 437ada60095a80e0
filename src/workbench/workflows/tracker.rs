// SPDX-License-Identifier: MIT

//! Callback handles over the edit cache
//!
//! `WorkflowEdits` is what list and context-menu components hold: four
//! callbacks that turn user actions into begin/end events, plus the derived
//! list to render.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::edits::{
    edited_workflows, EditTicket, WorkflowEditEvent, WorkflowEditReducer, WorkflowEditState,
};
use super::types::{Changes, WorkflowId, WorkflowSummary};
use crate::client::error::StoreError;
use crate::client::store::Store;

#[derive(Clone)]
pub struct WorkflowEdits {
    store: Store<WorkflowEditReducer>,
    next_seq: Arc<AtomicU64>,
}

// No `Default`: construction spawns the store task.
#[allow(clippy::new_without_default)]
impl WorkflowEdits {
    /// Start a tracker with an empty cache.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime, since the backing
    /// [`Store`] spawns its task immediately.
    pub fn new() -> Self {
        Self {
            store: Store::new(WorkflowEditReducer, WorkflowEditState::default()),
            next_seq: Arc::new(AtomicU64::new(1)),
        }
    }

    fn ticket(&self, id: WorkflowId) -> EditTicket {
        EditTicket {
            id,
            seq: self.next_seq.fetch_add(1, Ordering::SeqCst),
        }
    }

    /// Record optimistic `changes` before the API request is sent
    pub fn on_workflow_changing(
        &self,
        id: WorkflowId,
        changes: Changes,
    ) -> Result<EditTicket, StoreError> {
        let ticket = self.ticket(id);
        self.store
            .dispatch(WorkflowEditEvent::BeginEdit { ticket, changes })?;
        Ok(ticket)
    }

    /// Mark the request behind `ticket` as done, merging what the server confirmed
    pub fn on_workflow_changed(
        &self,
        ticket: EditTicket,
        changes: Changes,
    ) -> Result<(), StoreError> {
        self.store
            .dispatch(WorkflowEditEvent::EndEdit { ticket, changes })
    }

    pub fn on_workflow_duplicating(&self, id: WorkflowId) -> Result<EditTicket, StoreError> {
        let ticket = self.ticket(id);
        self.store
            .dispatch(WorkflowEditEvent::BeginDuplicate { ticket })?;
        Ok(ticket)
    }

    pub fn on_workflow_duplicated(
        &self,
        ticket: EditTicket,
        workflow: WorkflowSummary,
    ) -> Result<(), StoreError> {
        self.store
            .dispatch(WorkflowEditEvent::EndDuplicate { ticket, workflow })
    }

    /// The list to render, after every event dispatched so far is applied
    pub async fn edited_workflows(
        &self,
        workflows: &[WorkflowSummary],
    ) -> Result<Vec<WorkflowSummary>, StoreError> {
        self.store.flush().await?;
        Ok(edited_workflows(&self.store.state(), workflows))
    }

    pub fn store(&self) -> &Store<WorkflowEditReducer> {
        &self.store
    }
}
