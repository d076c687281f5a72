// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::GraphOptions;
use crate::errors::GraphError;
use crate::graph::task::{Task, TaskId, TaskNode};
use crate::observability::messages::graph::{LinkRejected, TasksLinked};
use crate::observability::messages::StructuredLog;

/// Arena of tasks plus their parent/child links.
///
/// The graph is built with [`add_task`](Self::add_task), [`add_child`](Self::add_child) and
/// [`add_parent`](Self::add_parent), then wrapped in an `Arc` and executed from a root
/// with [`execute`](Self::execute). Execution only reads the graph; links can be added
/// again between runs as long as the caller still holds the graph mutably.
///
/// Linking never checks for cycles; [`validate`](Self::validate) does, on request.
pub struct TaskGraph<T: Send + 'static> {
    pub(crate) nodes: Vec<TaskNode<T>>,
    pub(crate) options: GraphOptions,
}

impl<T: Send + 'static> TaskGraph<T> {
    /// Create an empty graph with default execution policies
    pub fn new() -> Self {
        Self::with_options(GraphOptions::default())
    }

    /// Create an empty graph with the given execution policies
    pub fn with_options(options: GraphOptions) -> Self {
        Self {
            nodes: Vec::new(),
            options,
        }
    }

    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    /// Add an unlinked task and return its id.
    pub fn add_task(&mut self, task: Task<T>) -> TaskId {
        let id = TaskId(self.nodes.len());
        self.nodes.push(TaskNode::new(id, task));
        id
    }

    /// Link `children` under `parent`, preserving the order given.
    ///
    /// Pairs that are already linked are left alone, so repeating a call is a no-op. The
    /// call is rejected as a whole, leaving the graph untouched, if any id is unknown or if
    /// `parent` would end up with more than one child while having no merge function.
    pub fn add_child(&mut self, parent: TaskId, children: &[TaskId]) -> Result<(), GraphError> {
        self.check(parent)?;
        for &child in children {
            self.check(child)?;
        }

        let projected = self.projected_child_count(parent, children);
        self.ensure_mergeable(parent, projected)?;

        for &child in children {
            self.link(parent, child);
        }
        Ok(())
    }

    /// Link `child` under each of `parents`; the mirror image of [`add_child`](Self::add_child).
    ///
    /// Every parent is validated before any link is made.
    pub fn add_parent(&mut self, child: TaskId, parents: &[TaskId]) -> Result<(), GraphError> {
        self.check(child)?;
        for &parent in parents {
            self.check(parent)?;
        }

        for &parent in parents {
            let projected = self.projected_child_count(parent, &[child]);
            self.ensure_mergeable(parent, projected)?;
        }

        for &parent in parents {
            self.link(parent, child);
        }
        Ok(())
    }

    /// True iff the task has no parents.
    pub fn is_root(&self, id: TaskId) -> Result<bool, GraphError> {
        self.node(id)
            .map(TaskNode::is_root)
            .ok_or(GraphError::UnknownTask(id))
    }

    /// True iff the task has at least one child.
    pub fn has_children(&self, id: TaskId) -> Result<bool, GraphError> {
        self.node(id)
            .map(TaskNode::has_children)
            .ok_or(GraphError::UnknownTask(id))
    }

    pub fn node(&self, id: TaskId) -> Option<&TaskNode<T>> {
        self.nodes.get(id.0)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &TaskNode<T>> {
        self.nodes.iter()
    }

    /// Ids of every task without parents, in creation order.
    pub fn roots(&self) -> Vec<TaskId> {
        self.nodes
            .iter()
            .filter(|node| node.is_root())
            .map(|node| node.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn check(&self, id: TaskId) -> Result<(), GraphError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownTask(id))
        }
    }

    /// Number of children `parent` would have after linking `children`.
    fn projected_child_count(&self, parent: TaskId, children: &[TaskId]) -> usize {
        let existing = &self.nodes[parent.0].children;
        let mut added: Vec<TaskId> = Vec::new();
        for &child in children {
            if !existing.contains(&child) && !added.contains(&child) {
                added.push(child);
            }
        }
        existing.len() + added.len()
    }

    fn ensure_mergeable(&self, parent: TaskId, children: usize) -> Result<(), GraphError> {
        let node = &self.nodes[parent.0];
        if children > 1 && node.merge.is_none() {
            LinkRejected {
                task: &node.name,
                children,
            }
            .log();
            return Err(GraphError::MissingMergeFunction {
                task: node.name.clone(),
                children,
            });
        }
        Ok(())
    }

    fn link(&mut self, parent: TaskId, child: TaskId) {
        let mut changed = false;
        if !self.nodes[parent.0].children.contains(&child) {
            self.nodes[parent.0].children.push(child);
            changed = true;
        }
        if !self.nodes[child.0].parents.contains(&parent) {
            self.nodes[child.0].parents.push(parent);
            changed = true;
        }
        if changed {
            TasksLinked {
                parent: &self.nodes[parent.0].name,
                child: &self.nodes[child.0].name,
            }
            .log();
        }
    }
}

impl<T: Send + 'static> Default for TaskGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> std::fmt::Debug for TaskGraph<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskGraph")
            .field("task_count", &self.nodes.len())
            .field("options", &self.options)
            .field("nodes", &self.nodes)
            .finish()
    }
}
