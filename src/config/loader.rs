// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::options::GraphOptions;
use crate::errors::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Declarative description of a task graph.
///
/// Tasks reference processors and merge functions by the names they were registered
/// under in a [`ProcessorRegistry`](crate::config::ProcessorRegistry), and reference each
/// other by `id`. Child order in `children` is the fan-out and merge order.
///
/// # Fields
/// * `options` - Execution policies (optional, defaults to strict/pass-through)
/// * `tasks` - Task declarations that define the graph nodes and their links
///
/// # Example
/// ```yaml
/// options:
///   root_policy: strict
/// tasks:
///   - id: normalize
///     processor: trim
///     children: [analyze]
///   - id: analyze
///     merge: sum
///     children: [length, words]
///   - id: length
///     processor: char_count
///   - id: words
///     processor: word_count
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    #[serde(default)]
    pub options: GraphOptions,
    pub tasks: Vec<TaskConfig>,
}

/// A single task declaration.
///
/// # Fields
/// * `id` - Unique task id, also used as the task name in logs
/// * `processor` - Registered processor name (optional, pass-through when absent)
/// * `merge` - Registered merge function name (required once there are 2+ children)
/// * `children` - Ids of the child tasks, in fan-out order
#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    pub id: String,
    #[serde(default)]
    pub processor: Option<String>,
    #[serde(default)]
    pub merge: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
}

/// Load execution options from a YAML file
pub fn load_options<P: AsRef<Path>>(path: P) -> Result<GraphOptions, ConfigError> {
    let content = fs::read_to_string(path)?;
    let options: GraphOptions = serde_yaml::from_str(&content)?;
    Ok(options)
}

/// Load a graph description from a YAML file
pub fn load_graph_config<P: AsRef<Path>>(path: P) -> Result<GraphConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let cfg: GraphConfig = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

/// Load a graph description and check that ids are unique and every child resolves
pub fn load_and_validate_graph_config<P: AsRef<Path>>(
    path: P,
) -> Result<GraphConfig, ConfigError> {
    let cfg = load_graph_config(path)?;
    crate::config::validate_graph_config(&cfg).map_err(ConfigError::Validation)?;
    Ok(cfg)
}
