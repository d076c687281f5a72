// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Recursive executor.
//!
//! Every task runs the same routine: self-process on its own tokio task, fan the output
//! out to all children concurrently, wait for the whole subtree, then shape the result.
//! Recursion goes through a boxed `'static` future so each child subtree can be spawned.

use std::sync::Arc;
use std::time::Instant;

use futures::future::{BoxFuture, FutureExt};
use tracing::Instrument;

use crate::config::{RootPolicy, SingleChildPolicy};
use crate::engine::join;
use crate::errors::ExecutionError;
use crate::graph::{TaskGraph, TaskId};
use crate::observability::messages::engine::{
    ExecutionCompleted, ExecutionFailed, ExecutionStarted, FanOutStarted, SelfProcessingCompleted,
};
use crate::observability::messages::StructuredLog;

impl<T: Clone + Send + Sync + 'static> TaskGraph<T> {
    /// Execute the subtree rooted at `root` with `input`.
    ///
    /// Resolves once every task below `root` has finished. Returns the root's own output
    /// when it has no children, the single child's result when it has one, and the merged
    /// child results otherwise. On failure the earliest-declared error is returned
    /// unchanged.
    ///
    /// Under [`RootPolicy::Strict`] a task with parents is rejected with
    /// [`ExecutionError::NotRoot`].
    pub async fn execute(self: &Arc<Self>, root: TaskId, input: T) -> Result<T, ExecutionError> {
        let node = self.node(root).ok_or(ExecutionError::UnknownTask(root))?;

        if self.options.root_policy == RootPolicy::Strict && !node.is_root() {
            return Err(ExecutionError::NotRoot {
                task: node.name.clone(),
                parents: node.parents.len(),
            });
        }

        let started = ExecutionStarted {
            task: &node.name,
            task_count: self.len(),
        };
        started.log();
        let span = started.span("execute");

        let start = Instant::now();
        let result = Self::execute_subtree(Arc::clone(self), root, input)
            .instrument(span)
            .await;

        match &result {
            Ok(_) => ExecutionCompleted {
                task: &node.name,
                duration: start.elapsed(),
            }
            .log(),
            Err(err) => ExecutionFailed {
                task: &node.name,
                error: err,
            }
            .log(),
        }

        result
    }

    fn execute_subtree(
        graph: Arc<Self>,
        id: TaskId,
        input: T,
    ) -> BoxFuture<'static, Result<T, ExecutionError>> {
        let span = match graph.node(id) {
            Some(node) => tracing::debug_span!("task", task = %node.name),
            None => tracing::debug_span!("task", task = %id),
        };

        async move {
            let node = graph.node(id).ok_or(ExecutionError::UnknownTask(id))?;

            let self_result = match &node.processor {
                Some(processor) => {
                    let processor = Arc::clone(processor);
                    let start = Instant::now();
                    let result = tokio::spawn(async move { processor.process(input).await }).await?;
                    SelfProcessingCompleted {
                        task: &node.name,
                        success: result.is_ok(),
                        duration: start.elapsed(),
                    }
                    .log();
                    result
                }
                None => Ok(input),
            };

            if node.children.len() > 1 && node.merge.is_none() {
                return Err(ExecutionError::MissingMergeFunction {
                    task: node.name.clone(),
                    children: node.children.len(),
                });
            }

            let output = self_result?;
            if node.children.is_empty() {
                return Ok(output);
            }

            FanOutStarted {
                task: &node.name,
                child_count: node.children.len(),
            }
            .log();

            let handles = join::spawn_ordered(node.children.iter().map(|&child| {
                Self::execute_subtree(Arc::clone(&graph), child, output.clone())
            }));
            let mut results = join::join_ordered(handles).await;

            match node.merge.as_deref() {
                Some(merge)
                    if results.len() > 1
                        || graph.options.single_child == SingleChildPolicy::Merge =>
                {
                    join::merge_ordered(&node.name, results, merge).await
                }
                _ => results.pop().unwrap_or(Ok(output)),
            }
        }
        .instrument(span)
        .boxed()
    }
}
