// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Whole-graph structural validation.
//!
//! Linking keeps the merge-function invariant on its own, but it deliberately performs no
//! cycle detection. Callers that assemble graphs from untrusted input (for example a YAML
//! file) can run [`TaskGraph::validate`] before the first execution.
//!
//! Cycle detection uses DFS with a recursion stack ("three colors"): reaching a task that
//! is still on the stack means a back edge, and the stack segment from that task to the
//! current one is the cycle.

use crate::errors::ValidationError;
use crate::graph::{TaskGraph, TaskId};

impl<T: Send + 'static> TaskGraph<T> {
    /// Check every task for a missing merge function and the whole graph for cycles.
    ///
    /// Returns all merge problems found; cycle detection stops at the first cycle and
    /// reports its path by task name, closed by repeating the first task.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for node in &self.nodes {
            if node.children.len() > 1 && node.merge.is_none() {
                errors.push(ValidationError::MissingMergeFunction {
                    task: node.name.clone(),
                    children: node.children.len(),
                });
            }
        }

        if let Some(cycle) = self.find_cycle() {
            errors.push(ValidationError::CyclicDependency { cycle });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn find_cycle(&self) -> Option<Vec<String>> {
        let mut visited = vec![false; self.nodes.len()];
        let mut on_stack = vec![false; self.nodes.len()];
        let mut path = Vec::new();

        for node in &self.nodes {
            if !visited[node.id.0] {
                if let Some(cycle) =
                    self.dfs_cycle_detection(node.id, &mut visited, &mut on_stack, &mut path)
                {
                    return Some(cycle);
                }
            }
        }
        None
    }

    fn dfs_cycle_detection(
        &self,
        id: TaskId,
        visited: &mut [bool],
        on_stack: &mut [bool],
        path: &mut Vec<TaskId>,
    ) -> Option<Vec<String>> {
        visited[id.0] = true;
        on_stack[id.0] = true;
        path.push(id);

        for &child in &self.nodes[id.0].children {
            if !visited[child.0] {
                if let Some(cycle) = self.dfs_cycle_detection(child, visited, on_stack, path) {
                    return Some(cycle);
                }
            } else if on_stack[child.0] {
                let start = path.iter().position(|&p| p == child).unwrap_or(0);
                let mut cycle: Vec<String> = path[start..]
                    .iter()
                    .map(|p| self.nodes[p.0].name.clone())
                    .collect();
                cycle.push(self.nodes[child.0].name.clone());
                return Some(cycle);
            }
        }

        on_stack[id.0] = false;
        path.pop();
        None
    }
}
