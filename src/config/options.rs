// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;

/// Execution policies for a [`TaskGraph`](crate::graph::TaskGraph).
///
/// Every field has a default, so an empty YAML document (or no file at all) yields the
/// strict, pass-through behaviour.
///
/// # Example
/// ```yaml
/// root_policy: strict
/// single_child: pass_through
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    pub root_policy: RootPolicy,
    pub single_child: SingleChildPolicy,
}

impl GraphOptions {
    pub fn with_root_policy(mut self, root_policy: RootPolicy) -> Self {
        self.root_policy = root_policy;
        self
    }

    pub fn with_single_child(mut self, single_child: SingleChildPolicy) -> Self {
        self.single_child = single_child;
        self
    }
}

/// Whether `execute` may start from a task that has parents.
///
/// # Variants
/// * `Strict` - only root tasks can be executed; a task's parents define the unit of work
/// * `Permissive` - any task can be executed, running just the subtree below it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootPolicy {
    #[default]
    Strict,
    Permissive,
}

/// What a task with exactly one child returns.
///
/// # Variants
/// * `PassThrough` - the child's result as is; the merge function is never called
/// * `Merge` - the merge function, when the task has one, applied to the one-element output list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingleChildPolicy {
    #[default]
    PassThrough,
    Merge,
}
