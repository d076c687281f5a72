// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while linking tasks together.

use crate::graph::TaskId;
use thiserror::Error;

/// Errors that can occur when adding parent/child links to a [`TaskGraph`](crate::graph::TaskGraph).
///
/// A failed link call leaves the graph exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The id was not issued by this graph.
    #[error("unknown task {0}")]
    UnknownTask(TaskId),

    /// The link would give a task more than one child without a merge function.
    #[error("task '{task}' would have {children} children but has no merge function to combine their outputs")]
    MissingMergeFunction { task: String, children: usize },
}
