// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::TaskError;

/// Combines the ordered outputs of several concurrent units into one value.
///
/// `outputs` is always in declaration order, never completion order.
#[async_trait]
pub trait Merge<T: Send + 'static>: Send + Sync {
    async fn merge(&self, outputs: Vec<T>) -> Result<T, TaskError>;
}

#[async_trait]
impl<T, F> Merge<T> for F
where
    T: Send + 'static,
    F: Fn(Vec<T>) -> Result<T, TaskError> + Send + Sync,
{
    async fn merge(&self, outputs: Vec<T>) -> Result<T, TaskError> {
        (self)(outputs)
    }
}

/// Wraps a closure as a shared merge function.
pub fn merge_fn<T, F>(f: F) -> Arc<dyn Merge<T>>
where
    T: Send + 'static,
    F: Fn(Vec<T>) -> Result<T, TaskError> + Send + Sync + 'static,
{
    Arc::new(f)
}
