// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

use crate::errors::TaskError;

/// A unit of work: maps one value to the next, or fails.
///
/// Processors run on their own tokio task, so implementations must be safe to invoke
/// from any thread. Plain functions and closures of shape `Fn(T) -> Result<T, TaskError>`
/// are processors already; async closures can be adapted with [`processor_fn_async`].
#[async_trait]
pub trait Processor<T: Send + 'static>: Send + Sync {
    async fn process(&self, input: T) -> Result<T, TaskError>;
}

#[async_trait]
impl<T, F> Processor<T> for F
where
    T: Send + 'static,
    F: Fn(T) -> Result<T, TaskError> + Send + Sync,
{
    async fn process(&self, input: T) -> Result<T, TaskError> {
        (self)(input)
    }
}

/// Adapter turning an async closure into a [`Processor`].
pub struct AsyncFnProcessor<F> {
    f: F,
}

#[async_trait]
impl<T, F, Fut> Processor<T> for AsyncFnProcessor<F>
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, TaskError>> + Send + 'static,
{
    async fn process(&self, input: T) -> Result<T, TaskError> {
        (self.f)(input).await
    }
}

/// Wraps a synchronous closure as a shared processor.
///
/// ```rust
/// use the_tasktree::traits::processor_fn;
///
/// let increment = processor_fn(|x: u32| Ok(x + 1));
/// # let _ = increment;
/// ```
pub fn processor_fn<T, F>(f: F) -> Arc<dyn Processor<T>>
where
    T: Send + 'static,
    F: Fn(T) -> Result<T, TaskError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wraps an async closure as a shared processor.
pub fn processor_fn_async<T, F, Fut>(f: F) -> Arc<dyn Processor<T>>
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, TaskError>> + Send + 'static,
{
    Arc::new(AsyncFnProcessor { f })
}
