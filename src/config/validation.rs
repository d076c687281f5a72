// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Validation of declarative graph descriptions.
//!
//! Runs before any task is created:
//!
//! 1. **Uniqueness**: every task id is declared once
//! 2. **References**: every child id names a declared task
//!
//! Cycles are checked afterwards on the built graph, by
//! [`TaskGraph::validate`](crate::graph::TaskGraph::validate).

use std::collections::HashSet;

use crate::config::GraphConfig;
use crate::errors::ValidationError;

/// Validates a graph description for unique ids and resolvable children.
///
/// Accumulates every problem found rather than stopping at the first one.
pub fn validate_graph_config(cfg: &GraphConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut seen_ids = HashSet::new();
    for task in &cfg.tasks {
        if !seen_ids.insert(task.id.as_str()) {
            errors.push(ValidationError::DuplicateTaskId {
                task: task.id.clone(),
            });
        }
    }

    for task in &cfg.tasks {
        for child in &task.children {
            if !seen_ids.contains(child.as_str()) {
                errors.push(ValidationError::UnresolvedTask {
                    task: task.id.clone(),
                    missing_child: child.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TaskConfig;

    fn task(id: &str, children: &[&str]) -> TaskConfig {
        TaskConfig {
            id: id.to_string(),
            processor: None,
            merge: None,
            children: children.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_validate_graph_config_table_driven() {
        struct TestCase {
            name: &'static str,
            tasks: Vec<TaskConfig>,
            expected: Result<(), Vec<ValidationError>>,
        }

        let test_cases = vec![
            TestCase {
                name: "empty graph",
                tasks: vec![],
                expected: Ok(()),
            },
            TestCase {
                name: "linear chain",
                tasks: vec![task("a", &["b"]), task("b", &["c"]), task("c", &[])],
                expected: Ok(()),
            },
            TestCase {
                name: "duplicate id",
                tasks: vec![task("a", &[]), task("a", &[])],
                expected: Err(vec![ValidationError::DuplicateTaskId { task: "a".into() }]),
            },
            TestCase {
                name: "unresolved children",
                tasks: vec![task("a", &["x", "y"])],
                expected: Err(vec![
                    ValidationError::UnresolvedTask {
                        task: "a".into(),
                        missing_child: "x".into(),
                    },
                    ValidationError::UnresolvedTask {
                        task: "a".into(),
                        missing_child: "y".into(),
                    },
                ]),
            },
        ];

        for case in test_cases {
            let cfg = GraphConfig {
                options: Default::default(),
                tasks: case.tasks,
            };
            assert_eq!(validate_graph_config(&cfg), case.expected, "case: {}", case.name);
        }
    }
}
