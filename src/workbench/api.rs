// SPDX-License-Identifier: MIT

//! The workbench API collaborator
//!
//! Every user action that reaches the server goes through [`WorkbenchApi`].
//! The reducers never call it; action creators and the context menu bracket
//! each call with pending and fulfilled events.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::error::ApiError;
use crate::workbench::share::acl::Role;
use crate::workbench::workflows::types::{WorkflowId, WorkflowSummary};

/// Visibility as the server reports it after a change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicAccess {
    pub public: bool,
    #[serde(default)]
    pub secret_id: String,
}

#[async_trait]
pub trait WorkbenchApi: Send + Sync {
    async fn delete_workflow(&self, id: WorkflowId) -> Result<(), ApiError>;

    /// Returns the newly created copy
    async fn duplicate_workflow(&self, id: WorkflowId) -> Result<WorkflowSummary, ApiError>;

    async fn update_acl_entry(
        &self,
        id: WorkflowId,
        email: &str,
        role: Role,
    ) -> Result<(), ApiError>;

    async fn delete_acl_entry(&self, id: WorkflowId, email: &str) -> Result<(), ApiError>;

    /// `has_secret` asks the server to mint (or keep) a secret link id
    async fn set_workflow_public_access(
        &self,
        id: WorkflowId,
        is_public: bool,
        has_secret: bool,
    ) -> Result<PublicAccess, ApiError>;
}
