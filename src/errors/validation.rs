// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

/// Errors that can occur during whole-graph structural validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A circular dependency was detected in the task graph
    CyclicDependency {
        /// The cycle path, by task name, closed by repeating the first task
        cycle: Vec<String>,
    },
    /// A task references a child that doesn't exist
    UnresolvedTask {
        /// The task that lists the missing child
        task: String,
        /// The child id that couldn't be resolved
        missing_child: String,
    },
    /// Two tasks were declared with the same id
    DuplicateTaskId {
        /// The duplicate task id
        task: String,
    },
    /// A task with several children has no merge function
    MissingMergeFunction {
        /// The task lacking a merge function
        task: String,
        /// How many children it has
        children: usize,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::CyclicDependency { cycle } => {
                write!(f, "Cyclic dependency detected: {}", cycle.join(" -> "))
            }
            ValidationError::UnresolvedTask {
                task,
                missing_child,
            } => {
                write!(
                    f,
                    "Task '{}' lists child '{}' which does not exist",
                    task, missing_child
                )
            }
            ValidationError::DuplicateTaskId { task } => {
                write!(f, "Duplicate task ID: '{}'", task)
            }
            ValidationError::MissingMergeFunction { task, children } => {
                write!(
                    f,
                    "Task '{}' has {} children but no merge function",
                    task, children
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}
