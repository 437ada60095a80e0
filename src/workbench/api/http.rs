// SPDX-License-Identifier: MIT

//! reqwest implementation of [`WorkbenchApi`]
//!
//! Routes, relative to the configured base URL:
//! - `DELETE api/workflows/{id}`
//! - `POST   api/workflows/{id}/duplicate` → the new workflow
//! - `PUT    api/workflows/{id}/acl/{email}` with `{"role": ...}`
//! - `DELETE api/workflows/{id}/acl/{email}`
//! - `POST   api/workflows/{id}` with `{"public": ..., "has_secret": ...}`
//!   → `{"workflow": {"public": ..., "secret_id": ...}}`

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use super::{PublicAccess, WorkbenchApi};
use crate::client::error::ApiError;
use crate::workbench::config::ApiConfig;
use crate::workbench::share::acl::Role;
use crate::workbench::workflows::types::{WorkflowId, WorkflowSummary};

#[derive(Debug, Deserialize)]
struct SetPublicResponse {
    workflow: PublicAccess,
}

#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    config: ApiConfig,
}

impl HttpApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Append percent-encoded path segments to the base URL
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::other("base URL cannot have path segments"))?
            .pop_if_empty()
            .push("api")
            .push("workflows")
            .extend(segments);
        Ok(url)
    }

    async fn request(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        log::debug!("{} {}", method, url);

        let mut req = self
            .client
            .request(method, url.clone())
            .header("Accept", "application/json");

        if let Some(token) = &self.config.csrf_token {
            req = req.header("X-CSRFToken", token);
        }
        if let Some(session) = &self.config.session_id {
            req = req.header("Cookie", format!("sessionid={}", session));
        }
        if let Some(b) = body {
            req = req.json(&b);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(ApiError::status(status.as_u16(), url.as_str(), text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl WorkbenchApi for HttpApi {
    async fn delete_workflow(&self, id: WorkflowId) -> Result<(), ApiError> {
        let id = id.to_string();
        let url = self.endpoint(&[id.as_str()])?;
        self.request(Method::DELETE, url, None).await?;
        Ok(())
    }

    async fn duplicate_workflow(&self, id: WorkflowId) -> Result<WorkflowSummary, ApiError> {
        let id = id.to_string();
        let url = self.endpoint(&[id.as_str(), "duplicate"])?;
        let value = self.request(Method::POST, url, None).await?;
        serde_json::from_value(value).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    async fn update_acl_entry(
        &self,
        id: WorkflowId,
        email: &str,
        role: Role,
    ) -> Result<(), ApiError> {
        let id = id.to_string();
        let url = self.endpoint(&[id.as_str(), "acl", email])?;
        self.request(Method::PUT, url, Some(json!({ "role": role })))
            .await?;
        Ok(())
    }

    async fn delete_acl_entry(&self, id: WorkflowId, email: &str) -> Result<(), ApiError> {
        let id = id.to_string();
        let url = self.endpoint(&[id.as_str(), "acl", email])?;
        self.request(Method::DELETE, url, None).await?;
        Ok(())
    }

    async fn set_workflow_public_access(
        &self,
        id: WorkflowId,
        is_public: bool,
        has_secret: bool,
    ) -> Result<PublicAccess, ApiError> {
        let id = id.to_string();
        let url = self.endpoint(&[id.as_str()])?;
        let value = self
            .request(
                Method::POST,
                url,
                Some(json!({ "public": is_public, "has_secret": has_secret })),
            )
            .await?;
        let resp: SetPublicResponse =
            serde_json::from_value(value).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        Ok(resp.workflow)
    }
}
