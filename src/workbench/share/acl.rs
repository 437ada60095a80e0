// SPDX-License-Identifier: MIT

//! Share-modal state: visibility and access-control list of one workflow
//!
//! The ACL is edited locally and pushed to the server, assuming nothing
//! conflicts. Pending events apply the change; fulfilled ACL events have
//! nothing left to do, and only visibility re-syncs from the server.

use feruca::{Collator, Locale, Tailoring};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::client::error::StoreError;
use crate::client::store::Reducer;
use crate::workbench::api::PublicAccess;
use crate::workbench::workflows::types::WorkflowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Editor,
    Viewer,
    ReportViewer,
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "editor" => Ok(Role::Editor),
            "viewer" => Ok(Role::Viewer),
            "report-viewer" => Ok(Role::ReportViewer),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclEntry {
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareWorkflow {
    pub id: WorkflowId,
    pub public: bool,
    #[serde(default)]
    pub secret_id: String,
    pub owner_email: String,
    #[serde(default)]
    pub acl: Vec<AclEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareState {
    pub workflow: ShareWorkflow,
    /// Message of the most recent rejected request, cleared by the next pending one
    pub last_error: Option<String>,
}

impl ShareState {
    pub fn new(workflow: ShareWorkflow) -> Self {
        Self {
            workflow,
            last_error: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareActionKind {
    SetWorkflowPublic,
    UpdateAclEntry,
    DeleteAclEntry,
}

#[derive(Debug, Clone)]
pub enum ShareEvent {
    SetWorkflowPublicPending { is_public: bool },
    SetWorkflowPublicFulfilled { workflow: PublicAccess },
    UpdateAclEntryPending { email: String, role: Role },
    UpdateAclEntryFulfilled,
    DeleteAclEntryPending { email: String },
    DeleteAclEntryFulfilled,
    Rejected { action: ShareActionKind, message: String },
}

/// CLDR root collation with punctuation kept significant (non-ignorable),
/// which is how browsers order strings for `localeCompare`
fn email_collator() -> Collator {
    Collator::new(Tailoring::Cldr(Locale::Root), false, true)
}

/// Locale-aware email ordering. Punctuation sorts before digits, digits
/// before letters, and lowercase before uppercase on otherwise equal strings.
pub fn compare_emails(a: &str, b: &str) -> Ordering {
    email_collator().collate(a, b)
}

fn sort_acl(acl: &mut [AclEntry]) {
    let mut collator = email_collator();
    acl.sort_by(|a, b| collator.collate(a.email.as_str(), b.email.as_str()));
}

fn reduce_set_workflow_public_pending(state: &ShareState, is_public: bool) -> ShareState {
    ShareState {
        workflow: ShareWorkflow {
            public: is_public,
            ..state.workflow.clone()
        },
        last_error: None,
    }
}

fn reduce_set_workflow_public_fulfilled(state: &ShareState, server: PublicAccess) -> ShareState {
    ShareState {
        workflow: ShareWorkflow {
            public: server.public,
            secret_id: server.secret_id,
            ..state.workflow.clone()
        },
        last_error: state.last_error.clone(),
    }
}

fn reduce_update_acl_entry_pending(state: &ShareState, email: String, role: Role) -> ShareState {
    let mut acl = state.workflow.acl.clone();

    // overwrite or append
    match acl.iter_mut().find(|entry| entry.email == email) {
        Some(entry) => entry.role = role,
        None => acl.push(AclEntry { email, role }),
    }

    sort_acl(&mut acl);

    ShareState {
        workflow: ShareWorkflow {
            acl,
            ..state.workflow.clone()
        },
        last_error: None,
    }
}

fn reduce_delete_acl_entry_pending(state: &ShareState, email: &str) -> ShareState {
    let acl = state
        .workflow
        .acl
        .iter()
        .filter(|entry| entry.email != email)
        .cloned()
        .collect();

    ShareState {
        workflow: ShareWorkflow {
            acl,
            ..state.workflow.clone()
        },
        last_error: None,
    }
}

pub fn reduce_share(state: &ShareState, event: ShareEvent) -> ShareState {
    match event {
        ShareEvent::SetWorkflowPublicPending { is_public } => {
            reduce_set_workflow_public_pending(state, is_public)
        }
        ShareEvent::SetWorkflowPublicFulfilled { workflow } => {
            reduce_set_workflow_public_fulfilled(state, workflow)
        }
        ShareEvent::UpdateAclEntryPending { email, role } => {
            reduce_update_acl_entry_pending(state, email, role)
        }
        ShareEvent::DeleteAclEntryPending { email } => {
            reduce_delete_acl_entry_pending(state, &email)
        }
        ShareEvent::UpdateAclEntryFulfilled | ShareEvent::DeleteAclEntryFulfilled => {
            state.clone()
        }
        ShareEvent::Rejected { action, message } => {
            log::warn!("{:?} rejected; keeping optimistic state: {}", action, message);
            ShareState {
                workflow: state.workflow.clone(),
                last_error: Some(message),
            }
        }
    }
}

pub struct ShareReducer;

impl Reducer for ShareReducer {
    type State = ShareState;
    type Event = ShareEvent;

    fn reduce(&self, state: &ShareState, event: ShareEvent) -> Result<ShareState, StoreError> {
        Ok(reduce_share(state, event))
    }
}
