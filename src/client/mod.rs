// SPDX-License-Identifier: MIT

//! Client plumbing shared by every workbench component: typed errors and the
//! event-queue store that threads events through pure reducers.

pub mod error;
pub mod store;

pub use error::{ApiError, EditError, ShareError, StoreError, SyncError};
pub use store::{Reducer, Store};
