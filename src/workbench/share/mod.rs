// SPDX-License-Identifier: MIT

//! Share modal: public/private visibility and per-email access roles

pub mod acl;
pub mod actions;

pub use acl::{AclEntry, Role, ShareEvent, ShareReducer, ShareState, ShareWorkflow};
pub use actions::ShareActions;
