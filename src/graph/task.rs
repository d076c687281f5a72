// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;

use crate::traits::{Merge, Processor};

/// Stable identifier of a task inside the [`TaskGraph`](super::TaskGraph) that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub(crate) usize);

impl TaskId {
    /// Position of the task in its graph's arena.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Description of a task before it is added to a graph.
///
/// A task with no processor passes its input through unchanged. A task that will have
/// more than one child needs a merge function, otherwise linking the second child fails.
///
/// ```rust
/// use the_tasktree::graph::Task;
/// use the_tasktree::traits::{merge_fn, processor_fn};
///
/// let task = Task::with_processor(processor_fn(|s: String| Ok(s.trim().to_string())))
///     .merge(merge_fn(|parts: Vec<String>| Ok(parts.concat())))
///     .named("trim");
/// # let _ = task;
/// ```
pub struct Task<T: Send + 'static> {
    pub(crate) name: Option<String>,
    pub(crate) processor: Option<Arc<dyn Processor<T>>>,
    pub(crate) merge: Option<Arc<dyn Merge<T>>>,
}

impl<T: Send + 'static> Task<T> {
    /// A pass-through task with neither processor nor merge function.
    pub fn new() -> Self {
        Self {
            name: None,
            processor: None,
            merge: None,
        }
    }

    pub fn with_processor(processor: Arc<dyn Processor<T>>) -> Self {
        Self::new().processor(processor)
    }

    pub fn processor(mut self, processor: Arc<dyn Processor<T>>) -> Self {
        self.processor = Some(processor);
        self
    }

    pub fn merge(mut self, merge: Arc<dyn Merge<T>>) -> Self {
        self.merge = Some(merge);
        self
    }

    /// Name used in logs and error messages. Defaults to `task-<index>`.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl<T: Send + 'static> Default for Task<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> fmt::Debug for Task<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("has_processor", &self.processor.is_some())
            .field("has_merge", &self.merge.is_some())
            .finish()
    }
}

/// A task placed in a graph, together with its links.
pub struct TaskNode<T: Send + 'static> {
    pub(crate) id: TaskId,
    pub(crate) name: String,
    pub(crate) processor: Option<Arc<dyn Processor<T>>>,
    pub(crate) merge: Option<Arc<dyn Merge<T>>>,
    pub(crate) parents: Vec<TaskId>,
    pub(crate) children: Vec<TaskId>,
}

impl<T: Send + 'static> TaskNode<T> {
    pub(crate) fn new(id: TaskId, task: Task<T>) -> Self {
        Self {
            id,
            name: task.name.unwrap_or_else(|| format!("task-{}", id.0)),
            processor: task.processor,
            merge: task.merge,
            parents: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Children in declaration order.
    pub fn children(&self) -> &[TaskId] {
        &self.children
    }

    pub fn parents(&self) -> &[TaskId] {
        &self.parents
    }

    /// True iff the task has no parents.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn has_processor(&self) -> bool {
        self.processor.is_some()
    }

    pub fn has_merge(&self) -> bool {
        self.merge.is_some()
    }
}

impl<T: Send + 'static> fmt::Debug for TaskNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskNode")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("has_processor", &self.processor.is_some())
            .field("has_merge", &self.merge.is_some())
            .field("parents", &self.parents)
            .field("children", &self.children)
            .finish()
    }
}
