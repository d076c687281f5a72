// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-process task orchestration.
//!
//! Build a graph of tasks, each wrapping a processor and an optional merge function,
//! then execute a root task: the root's output fans out to every child concurrently,
//! child results fan back in through the merge function, and either one merged value or
//! the earliest-declared error comes back to the caller.
//!
//! ```rust
//! use std::sync::Arc;
//! use the_tasktree::graph::{Task, TaskGraph};
//! use the_tasktree::traits::{merge_fn, processor_fn};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let mut graph = TaskGraph::new();
//! let root = graph.add_task(Task::with_processor(processor_fn(|x: i64| Ok(x + 1))));
//! let fan = graph.add_task(Task::new().merge(merge_fn(|xs: Vec<i64>| Ok(xs.iter().sum()))));
//! let double = graph.add_task(Task::with_processor(processor_fn(|x: i64| Ok(x * 2))));
//! let triple = graph.add_task(Task::with_processor(processor_fn(|x: i64| Ok(x * 3))));
//!
//! graph.add_child(root, &[fan])?;
//! graph.add_child(fan, &[double, triple])?;
//!
//! let graph = Arc::new(graph);
//! assert_eq!(graph.execute(root, 4).await?, 25);
//! # Ok(())
//! # }
//! ```

pub mod config;         // execution policies + declarative graphs
pub mod engine;         // recursive executor, step primitive, join helpers
pub mod errors;         // error handling
pub mod graph;          // task arena + linking
pub mod observability;
pub mod traits;         // processor / merge / step function abstractions

#[cfg(test)]
pub(crate) mod stub;
