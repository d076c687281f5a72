// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for graph construction events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// Two tasks were linked as parent and child.
///
/// # Log Level
/// `trace!` - Construction detail
pub struct TasksLinked<'a> {
    pub parent: &'a str,
    pub child: &'a str,
}

impl Display for TasksLinked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Linked task '{}' -> '{}'", self.parent, self.child)
    }
}

impl StructuredLog for TasksLinked<'_> {
    fn log(&self) {
        tracing::trace!(parent = self.parent, child = self.child, "{}", self);
    }
}

/// A link was refused because the parent would need a merge function it doesn't have.
///
/// # Log Level
/// `warn!` - Graph construction bug in the caller
///
/// # Example
/// ```
/// use the_tasktree::observability::messages::graph::LinkRejected;
///
/// let msg = LinkRejected {
///     task: "splitter",
///     children: 2,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct LinkRejected<'a> {
    pub task: &'a str,
    pub children: usize,
}

impl Display for LinkRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Refusing link: task '{}' would have {} children and no merge function",
            self.task, self.children
        )
    }
}

impl StructuredLog for LinkRejected<'_> {
    fn log(&self) {
        tracing::warn!(task = self.task, children = self.children, "{}", self);
    }
}

/// A graph was built from configuration.
///
/// # Log Level
/// `info!` - Important operational event
pub struct GraphBuilt {
    pub task_count: usize,
    pub root_count: usize,
}

impl Display for GraphBuilt {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Built task graph: {} tasks, {} roots",
            self.task_count, self.root_count
        )
    }
}

impl StructuredLog for GraphBuilt {
    fn log(&self) {
        tracing::info!(
            task_count = self.task_count,
            root_count = self.root_count,
            "{}", self
        );
    }
}
