// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for loading configuration files and building graphs from them.

use crate::errors::{GraphError, ValidationError};
use thiserror::Error;

/// Errors that can occur while loading options or building a graph from a [`GraphConfig`](crate::config::GraphConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid YAML for the expected shape
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A task names a processor the registry does not know
    #[error("task '{task}' uses processor '{processor}' which is not registered")]
    UnknownProcessor { task: String, processor: String },

    /// A task names a merge function the registry does not know
    #[error("task '{task}' uses merge function '{merge}' which is not registered")]
    UnknownMerge { task: String, merge: String },

    /// Linking the declared tasks failed
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The configuration or the graph built from it failed structural validation
    #[error("configuration validation failed:\n{}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
