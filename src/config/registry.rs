// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;

use crate::traits::{Merge, Processor};

/// Named processors and merge functions that a [`GraphConfig`](crate::config::GraphConfig) can refer to.
///
/// Entries are `Arc`s, so one registered processor may back any number of tasks, in any
/// number of graphs, without being cloned.
///
/// # Example
/// ```rust
/// use the_tasktree::config::ProcessorRegistry;
/// use the_tasktree::traits::{merge_fn, processor_fn};
///
/// let mut registry = ProcessorRegistry::new();
/// registry
///     .register_processor("double", processor_fn(|x: i64| Ok(x * 2)))
///     .register_merge("sum", merge_fn(|xs: Vec<i64>| Ok(xs.iter().sum())));
///
/// assert!(registry.contains_processor("double"));
/// assert!(registry.contains_merge("sum"));
/// ```
pub struct ProcessorRegistry<T: Send + 'static> {
    processors: HashMap<String, Arc<dyn Processor<T>>>,
    merges: HashMap<String, Arc<dyn Merge<T>>>,
}

impl<T: Send + 'static> ProcessorRegistry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            processors: HashMap::new(),
            merges: HashMap::new(),
        }
    }

    /// Register a processor, replacing any previous one with the same name
    pub fn register_processor(
        &mut self,
        name: impl Into<String>,
        processor: Arc<dyn Processor<T>>,
    ) -> &mut Self {
        self.processors.insert(name.into(), processor);
        self
    }

    /// Register a merge function, replacing any previous one with the same name
    pub fn register_merge(&mut self, name: impl Into<String>, merge: Arc<dyn Merge<T>>) -> &mut Self {
        self.merges.insert(name.into(), merge);
        self
    }

    pub fn processor(&self, name: &str) -> Option<Arc<dyn Processor<T>>> {
        self.processors.get(name).cloned()
    }

    pub fn merge(&self, name: &str) -> Option<Arc<dyn Merge<T>>> {
        self.merges.get(name).cloned()
    }

    pub fn contains_processor(&self, name: &str) -> bool {
        self.processors.contains_key(name)
    }

    pub fn contains_merge(&self, name: &str) -> bool {
        self.merges.contains_key(name)
    }
}

impl<T: Send + 'static> Default for ProcessorRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> std::fmt::Debug for ProcessorRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut processor_names: Vec<_> = self.processors.keys().collect();
        processor_names.sort();
        let mut merge_names: Vec<_> = self.merges.keys().collect();
        merge_names.sort();

        f.debug_struct("ProcessorRegistry")
            .field("processor_names", &processor_names)
            .field("merge_names", &merge_names)
            .finish()
    }
}
