// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::config::{validate_graph_config, GraphConfig, ProcessorRegistry};
use crate::errors::ConfigError;
use crate::graph::{Task, TaskGraph, TaskId};
use crate::observability::messages::graph::GraphBuilt;
use crate::observability::messages::StructuredLog;

/// A graph built from configuration, with the ids of its tasks by configured name.
#[derive(Debug)]
pub struct BuiltGraph<T: Send + 'static> {
    pub graph: TaskGraph<T>,
    pub ids: HashMap<String, TaskId>,
}

impl<T: Send + 'static> BuiltGraph<T> {
    /// Id of the task declared as `name`
    pub fn id(&self, name: &str) -> Option<TaskId> {
        self.ids.get(name).copied()
    }
}

/// Turns a [`GraphConfig`] into a linked [`TaskGraph`].
///
/// Building runs the same checks a hand-built graph would hit, in order: config
/// validation (unique ids, resolvable children), name resolution against the registry,
/// linking (merge function required for 2+ children), then cycle detection.
pub struct GraphBuilder;

impl GraphBuilder {
    pub fn build<T: Send + 'static>(
        cfg: &GraphConfig,
        registry: &ProcessorRegistry<T>,
    ) -> Result<BuiltGraph<T>, ConfigError> {
        validate_graph_config(cfg).map_err(ConfigError::Validation)?;

        let mut graph = TaskGraph::with_options(cfg.options.clone());
        let mut ids = HashMap::new();

        for task_cfg in &cfg.tasks {
            let mut task = Task::new().named(task_cfg.id.clone());

            if let Some(name) = &task_cfg.processor {
                let processor =
                    registry
                        .processor(name)
                        .ok_or_else(|| ConfigError::UnknownProcessor {
                            task: task_cfg.id.clone(),
                            processor: name.clone(),
                        })?;
                task = task.processor(processor);
            }

            if let Some(name) = &task_cfg.merge {
                let merge = registry
                    .merge(name)
                    .ok_or_else(|| ConfigError::UnknownMerge {
                        task: task_cfg.id.clone(),
                        merge: name.clone(),
                    })?;
                task = task.merge(merge);
            }

            ids.insert(task_cfg.id.clone(), graph.add_task(task));
        }

        for task_cfg in &cfg.tasks {
            let parent = ids[&task_cfg.id];
            let children: Vec<TaskId> = task_cfg.children.iter().map(|c| ids[c]).collect();
            graph.add_child(parent, &children)?;
        }

        graph.validate().map_err(ConfigError::Validation)?;

        GraphBuilt {
            task_count: graph.len(),
            root_count: graph.roots().len(),
        }
        .log();

        Ok(BuiltGraph { graph, ids })
    }
}
