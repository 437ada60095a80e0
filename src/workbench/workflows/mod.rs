// SPDX-License-Identifier: MIT

//! "My workflows" list with optimistic edits
//!
//! This module provides:
//! - `WorkflowSummary` - one row of the list
//! - `edits` - the pure reducer and the derived `edited_workflows` view
//! - `WorkflowEdits` - the callback handles components hold
//! - `WorkflowMenu` - delete, duplicate and share actions against the API

pub mod edits;
pub mod menu;
pub mod tracker;
pub mod types;

pub use edits::{edited_workflows, EditRecord, EditTicket, WorkflowEditEvent, WorkflowEditState};
pub use menu::WorkflowMenu;
pub use tracker::WorkflowEdits;
pub use types::{Changes, WorkflowId, WorkflowSummary};
