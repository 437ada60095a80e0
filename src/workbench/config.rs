// SPDX-License-Identifier: MIT

//! Client configuration
//!
//! Read from the environment (a `.env` file is loaded by the binary first):
//! - `WORKBENCH_BASE_URL` (required), e.g. `https://app.workbenchdata.com`
//! - `WORKBENCH_CSRF_TOKEN` (optional), sent as `X-CSRFToken`
//! - `WORKBENCH_SESSION_ID` (optional), sent as the `sessionid` cookie

use std::env;
use url::Url;

use crate::client::error::SyncError;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: Url,
    pub csrf_token: Option<String>,
    pub session_id: Option<String>,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self, SyncError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SyncError::config(format!("invalid base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(SyncError::config(format!(
                "base URL '{}' cannot be joined",
                base_url
            )));
        }

        Ok(Self {
            base_url,
            csrf_token: None,
            session_id: None,
        })
    }

    pub fn from_env() -> Result<Self, SyncError> {
        let base_url = env::var("WORKBENCH_BASE_URL")
            .map_err(|_| SyncError::config("WORKBENCH_BASE_URL must be set"))?;
        let mut config = Self::new(&base_url)?;
        config.csrf_token = env::var("WORKBENCH_CSRF_TOKEN").ok().filter(|t| !t.is_empty());
        config.session_id = env::var("WORKBENCH_SESSION_ID").ok().filter(|s| !s.is_empty());

        log::info!(
            "Workbench client: base_url={}, has_csrf={}, has_session={}",
            config.base_url,
            config.csrf_token.is_some(),
            config.session_id.is_some()
        );
        Ok(config)
    }

    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }
}
