// SPDX-License-Identifier: MIT

//! Share-modal action creators
//!
//! Each action reads the workflow id from the store, dispatches its pending
//! event, awaits the API, then dispatches fulfilled or rejected. The result of
//! the API call is returned to the caller as well.

use std::sync::Arc;

use super::acl::{Role, ShareActionKind, ShareEvent, ShareReducer, ShareState, ShareWorkflow};
use crate::client::error::{ApiError, ShareError, SyncError};
use crate::client::store::Store;
use crate::workbench::api::{PublicAccess, WorkbenchApi};

pub struct ShareActions<A: WorkbenchApi> {
    api: Arc<A>,
    store: Store<ShareReducer>,
}

impl<A: WorkbenchApi> ShareActions<A> {
    pub fn new(api: Arc<A>, workflow: ShareWorkflow) -> Self {
        Self {
            api,
            store: Store::new(ShareReducer, ShareState::new(workflow)),
        }
    }

    pub fn store(&self) -> &Store<ShareReducer> {
        &self.store
    }

    /// Settled state: waits for every dispatched event first
    pub async fn state(&self) -> Result<ShareState, SyncError> {
        self.store.flush().await?;
        Ok(self.store.state())
    }

    fn settle<T>(
        &self,
        action: ShareActionKind,
        result: Result<T, ApiError>,
        fulfilled: impl FnOnce(&T) -> ShareEvent,
    ) -> Result<T, SyncError> {
        match result {
            Ok(value) => {
                self.store.dispatch(fulfilled(&value))?;
                Ok(value)
            }
            Err(e) => {
                log::error!("{:?} failed: {}", action, e);
                self.store.dispatch(ShareEvent::Rejected {
                    action,
                    message: e.to_string(),
                })?;
                Err(e.into())
            }
        }
    }

    /// Make the workflow public or private, with or without a secret link
    pub async fn set_workflow_public_access(
        &self,
        is_public: bool,
        has_secret: bool,
    ) -> Result<PublicAccess, SyncError> {
        let id = self.store.state().workflow.id;
        self.store
            .dispatch(ShareEvent::SetWorkflowPublicPending { is_public })?;

        let result = self
            .api
            .set_workflow_public_access(id, is_public, has_secret)
            .await;
        self.settle(ShareActionKind::SetWorkflowPublic, result, |workflow| {
            ShareEvent::SetWorkflowPublicFulfilled {
                workflow: workflow.clone(),
            }
        })
    }

    /// Create or edit an entry so that `email` has `role` access
    pub async fn update_acl_entry(&self, email: &str, role: Role) -> Result<(), SyncError> {
        let id = self.store.state().workflow.id;
        self.store.dispatch(ShareEvent::UpdateAclEntryPending {
            email: email.to_string(),
            role,
        })?;

        let result = self.api.update_acl_entry(id, email, role).await;
        self.settle(ShareActionKind::UpdateAclEntry, result, |_| {
            ShareEvent::UpdateAclEntryFulfilled
        })
    }

    /// Remove `email`'s entry so it has no special access
    pub async fn delete_acl_entry(&self, email: &str) -> Result<(), SyncError> {
        let id = self.store.state().workflow.id;
        self.store.dispatch(ShareEvent::DeleteAclEntryPending {
            email: email.to_string(),
        })?;

        let result = self.api.delete_acl_entry(id, email).await;
        self.settle(ShareActionKind::DeleteAclEntry, result, |_| {
            ShareEvent::DeleteAclEntryFulfilled
        })
    }

    /// "Grant access" form: new collaborators start as viewers. The owner's
    /// own address is ignored. Returns whether a request was made.
    pub async fn submit_new_acl_entry(&self, email: &str) -> Result<bool, SyncError> {
        let email = validate_email(email)?;
        if email == self.store.state().workflow.owner_email {
            log::debug!("Ignoring ACL entry for the owner");
            return Ok(false);
        }
        self.update_acl_entry(email, Role::Viewer).await?;
        Ok(true)
    }
}

/// Minimal shape check standing in for the browser's `type=email` validation
pub fn validate_email(email: &str) -> Result<&str, ShareError> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(ShareError::InvalidEmail(email.to_string())),
    }
}
