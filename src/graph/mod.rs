// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Task graph construction.
//!
//! Tasks live in an arena owned by [`TaskGraph`] and are addressed by [`TaskId`]. Links
//! are stored on both ends as id lists: children in declaration order (which fixes
//! fan-out and merge order), parents only for root detection.

mod task;
mod task_graph;
mod validation;

pub use task::{Task, TaskId, TaskNode};
pub use task_graph::TaskGraph;
