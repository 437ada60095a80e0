// SPDX-License-Identifier: MIT

//! Per-workflow context menu actions
//!
//! Each action marks the workflow as changing, calls the API, and marks it
//! changed with whatever the server confirmed. A rejected call is logged and
//! returned; the edit then stays pending.

use serde_json::Value;
use std::sync::Arc;

use super::tracker::WorkflowEdits;
use super::types::{Changes, WorkflowId, WorkflowSummary};
use crate::client::error::SyncError;
use crate::workbench::api::{PublicAccess, WorkbenchApi};

pub struct WorkflowMenu<A: WorkbenchApi> {
    api: Arc<A>,
    edits: WorkflowEdits,
}

impl<A: WorkbenchApi> WorkflowMenu<A> {
    pub fn new(api: Arc<A>, edits: WorkflowEdits) -> Self {
        Self { api, edits }
    }

    pub fn edits(&self) -> &WorkflowEdits {
        &self.edits
    }

    pub async fn delete_workflow(&self, id: WorkflowId) -> Result<(), SyncError> {
        let mut changes = Changes::new();
        changes.insert("isDeleted".to_string(), Value::Bool(true));
        let ticket = self.edits.on_workflow_changing(id, changes)?;

        self.api.delete_workflow(id).await.map_err(|e| {
            log::error!("Deleting workflow {} failed: {}", id, e);
            e
        })?;

        log::info!("Deleted workflow {}", id);
        self.edits.on_workflow_changed(ticket, Changes::new())?;
        Ok(())
    }

    pub async fn duplicate_workflow(&self, id: WorkflowId) -> Result<WorkflowSummary, SyncError> {
        let ticket = self.edits.on_workflow_duplicating(id)?;

        let workflow = self.api.duplicate_workflow(id).await.map_err(|e| {
            log::error!("Duplicating workflow {} failed: {}", id, e);
            e
        })?;

        log::info!("Duplicated workflow {} as {}", id, workflow.id);
        self.edits.on_workflow_duplicated(ticket, workflow.clone())?;
        Ok(workflow)
    }

    pub async fn set_workflow_public_access(
        &self,
        id: WorkflowId,
        is_public: bool,
        has_secret: bool,
    ) -> Result<PublicAccess, SyncError> {
        let mut changes = Changes::new();
        changes.insert("public".to_string(), Value::Bool(is_public));
        let ticket = self.edits.on_workflow_changing(id, changes)?;

        let access = self
            .api
            .set_workflow_public_access(id, is_public, has_secret)
            .await
            .map_err(|e| {
                log::error!("Changing visibility of workflow {} failed: {}", id, e);
                e
            })?;

        let mut confirmed = Changes::new();
        confirmed.insert("public".to_string(), Value::Bool(access.public));
        confirmed.insert(
            "secret_id".to_string(),
            Value::String(access.secret_id.clone()),
        );
        self.edits.on_workflow_changed(ticket, confirmed)?;
        Ok(access)
    }
}
