// SPDX-License-Identifier: MIT

pub mod client;
pub mod workbench;
