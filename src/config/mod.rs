// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod builder;
mod loader;
mod options;
mod registry;
mod validation;


pub use builder::{BuiltGraph, GraphBuilder};
pub use loader::{
    load_and_validate_graph_config, load_graph_config, load_options, GraphConfig, TaskConfig,
};
pub use options::{GraphOptions, RootPolicy, SingleChildPolicy};
pub use registry::ProcessorRegistry;
pub use validation::validate_graph_config;
