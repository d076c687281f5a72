// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod execution;
mod graph;
mod validation;

pub use config::ConfigError;
pub use execution::{ExecutionError, TaskError};
pub use graph::GraphError;
pub use validation::ValidationError;
