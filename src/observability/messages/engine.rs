// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the recursive executor.
//!
//! This module contains message types for logging events related to:
//! * Graph execution lifecycle (start, completion, failure)
//! * Per-task self-processing results
//! * Fan-out to children and fan-in of their results

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Execution of a graph started from a root task.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_tasktree::observability::messages::engine::ExecutionStarted;
///
/// let msg = ExecutionStarted {
///     task: "root",
///     task_count: 5,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ExecutionStarted<'a> {
    pub task: &'a str,
    pub task_count: usize,
}

impl Display for ExecutionStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting graph execution from task '{}' ({} tasks in graph)",
            self.task, self.task_count
        )
    }
}

impl StructuredLog for ExecutionStarted<'_> {
    fn log(&self) {
        tracing::info!(task = self.task, task_count = self.task_count, "{}", self);
    }
}

impl ExecutionStarted<'_> {
    /// Span wrapping the whole execution, carrying the root task and graph size
    pub fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "execution",
            span_name = name,
            task = self.task,
            task_count = self.task_count,
        )
    }
}

/// Execution completed successfully.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_tasktree::observability::messages::engine::ExecutionCompleted;
/// use std::time::Duration;
///
/// let msg = ExecutionCompleted {
///     task: "root",
///     duration: Duration::from_millis(250),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ExecutionCompleted<'a> {
    pub task: &'a str,
    pub duration: std::time::Duration,
}

impl Display for ExecutionCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Graph execution from task '{}' completed in {:?}",
            self.task, self.duration
        )
    }
}

impl StructuredLog for ExecutionCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            task = self.task,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }
}

/// Execution failed with error.
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_tasktree::observability::messages::engine::ExecutionFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "test error");
/// let msg = ExecutionFailed {
///     task: "root",
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct ExecutionFailed<'a> {
    pub task: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ExecutionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Graph execution from task '{}' failed: {}",
            self.task, self.error
        )
    }
}

impl StructuredLog for ExecutionFailed<'_> {
    fn log(&self) {
        tracing::error!(task = self.task, error = %self.error, "{}", self);
    }
}

/// A task finished its own processing stage.
///
/// # Log Level
/// `debug!` - Per-task detail
pub struct SelfProcessingCompleted<'a> {
    pub task: &'a str,
    pub success: bool,
    pub duration: std::time::Duration,
}

impl Display for SelfProcessingCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let outcome = if self.success { "succeeded" } else { "failed" };
        write!(
            f,
            "Task '{}' self-processing {} in {:?}",
            self.task, outcome, self.duration
        )
    }
}

impl StructuredLog for SelfProcessingCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            task = self.task,
            success = self.success,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }
}

/// A task is dispatching its output to its children.
///
/// # Log Level
/// `debug!` - Per-task detail
pub struct FanOutStarted<'a> {
    pub task: &'a str,
    pub child_count: usize,
}

impl Display for FanOutStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Task '{}' fanning out to {} children",
            self.task, self.child_count
        )
    }
}

impl StructuredLog for FanOutStarted<'_> {
    fn log(&self) {
        tracing::debug!(task = self.task, child_count = self.child_count, "{}", self);
    }
}

/// Several concurrent units failed; only the earliest-declared error is returned.
///
/// # Log Level
/// `debug!` - The dropped errors are not returned anywhere else
pub struct SiblingErrorsDropped<'a> {
    pub scope: &'a str,
    pub returned_index: usize,
    pub dropped_index: usize,
    pub error: &'a dyn Display,
}

impl Display for SiblingErrorsDropped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "'{}': dropping error from unit {} in favour of unit {}: {}",
            self.scope, self.dropped_index, self.returned_index, self.error
        )
    }
}

impl StructuredLog for SiblingErrorsDropped<'_> {
    fn log(&self) {
        tracing::debug!(
            scope = self.scope,
            returned_index = self.returned_index,
            dropped_index = self.dropped_index,
            error = %self.error,
            "{}", self
        );
    }
}
