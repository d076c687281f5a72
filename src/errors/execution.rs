// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors produced while executing a task graph or a step.

use crate::graph::TaskId;
use thiserror::Error;

/// Error type returned by caller-supplied processors, merge functions and step functions.
///
/// The engine never wraps or rewrites these; whatever a processor returns is what the
/// caller of `execute` gets back inside [`ExecutionError::Processor`].
pub type TaskError = anyhow::Error;

/// Errors that can occur during graph or step execution.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// A task with more than one child has no merge function to combine their outputs.
    #[error("task '{task}' has {children} children but no merge function to combine their outputs")]
    MissingMergeFunction { task: String, children: usize },

    /// Execution was requested on a task that has parents.
    #[error("cannot execute non-root task '{task}': it has {parents} parent(s)")]
    NotRoot { task: String, parents: usize },

    /// The id does not belong to this graph.
    #[error("unknown task {0}")]
    UnknownTask(TaskId),

    /// First error returned by a processor, merge function or child subtree.
    #[error(transparent)]
    Processor(TaskError),

    /// A concurrent unit panicked or was cancelled before producing a result.
    #[error("concurrent unit failed to complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ExecutionError {
    /// Returns the caller's own error when this is a processor failure.
    pub fn as_task_error(&self) -> Option<&TaskError> {
        match self {
            ExecutionError::Processor(err) => Some(err),
            _ => None,
        }
    }

    /// Converts into a [`TaskError`], unwrapping processor failures so they stay unchanged.
    ///
    /// Used when a step runs as a graph node's processor: the step's processor error must
    /// surface from the graph exactly as the function returned it.
    pub fn into_task_error(self) -> TaskError {
        match self {
            ExecutionError::Processor(err) => err,
            other => TaskError::new(other),
        }
    }
}

impl From<TaskError> for ExecutionError {
    fn from(err: TaskError) -> Self {
        ExecutionError::Processor(err)
    }
}
