// SPDX-License-Identifier: MIT

pub mod api;
pub mod cells;
pub mod config;
pub mod scenario;
pub mod share;
pub mod util;
pub mod workflows;
