// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Order-preserving spawn and join helpers shared by the graph executor and the step primitive.
//!
//! Units are spawned in declaration order and their handles kept in a `Vec`, so slot `i`
//! always holds unit `i`'s result no matter which unit finishes first. Error selection is
//! "first by declaration order among failures", never "first to complete".

use std::fmt::Display;
use std::future::Future;

use tokio::task::{JoinError, JoinHandle};

use crate::errors::ExecutionError;
use crate::observability::messages::engine::SiblingErrorsDropped;
use crate::observability::messages::StructuredLog;
use crate::traits::Merge;

/// Spawn every future on its own tokio task, in iteration order.
pub fn spawn_ordered<I, F>(units: I) -> Vec<JoinHandle<F::Output>>
where
    I: IntoIterator<Item = F>,
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    units.into_iter().map(tokio::spawn).collect()
}

/// Await every handle in declaration order, keeping join failures per slot.
pub async fn join_each<O>(handles: Vec<JoinHandle<O>>) -> Vec<Result<O, JoinError>> {
    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await);
    }
    results
}

/// Await every fallible unit in declaration order.
///
/// A unit that panicked or was aborted becomes [`ExecutionError::Join`] in its own slot,
/// so it competes with ordinary errors by declaration order only.
pub async fn join_ordered<O>(
    handles: Vec<JoinHandle<Result<O, ExecutionError>>>,
) -> Vec<Result<O, ExecutionError>> {
    join_each(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap_or_else(|err| Err(ExecutionError::Join(err))))
        .collect()
}

/// Unwrap ordered results, or return the earliest-declared error.
///
/// Later errors are dropped from the result and logged at `debug` level under `scope`.
pub fn first_error<T, E: Display>(scope: &str, results: Vec<Result<T, E>>) -> Result<Vec<T>, E> {
    let mut outputs = Vec::with_capacity(results.len());
    let mut first: Option<(usize, E)> = None;

    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(output) => outputs.push(output),
            Err(err) => match first.as_ref().map(|(returned, _)| *returned) {
                None => first = Some((index, err)),
                Some(returned_index) => SiblingErrorsDropped {
                    scope,
                    returned_index,
                    dropped_index: index,
                    error: &err,
                }
                .log(),
            },
        }
    }

    match first {
        Some((_, err)) => Err(err),
        None => Ok(outputs),
    }
}

/// Fan-in: merge ordered results unless any of them failed.
///
/// The merge function is never invoked when a unit failed; the earliest-declared error
/// is returned instead.
pub async fn merge_ordered<T: Send + 'static>(
    scope: &str,
    results: Vec<Result<T, ExecutionError>>,
    merge: &dyn Merge<T>,
) -> Result<T, ExecutionError> {
    let outputs = first_error(scope, results)?;
    merge.merge(outputs).await.map_err(ExecutionError::Processor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::TestError;
    use crate::traits::merge_fn;
    use std::time::Duration;

    #[tokio::test]
    async fn test_join_preserves_declaration_order() {
        let delays = [30u64, 1, 15, 5];
        let handles = spawn_ordered(delays.iter().map(|&ms| async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            Ok::<u64, ExecutionError>(ms)
        }));

        let outputs = first_error("test", join_ordered(handles).await).unwrap();
        assert_eq!(outputs, vec![30, 1, 15, 5]);
    }

    #[tokio::test]
    async fn test_join_keeps_panicked_unit_in_its_slot() {
        let handles = spawn_ordered((0..3).map(|i| async move {
            if i == 1 {
                panic!("unit exploded");
            }
            Ok::<i32, ExecutionError>(i)
        }));

        let results = join_ordered(handles).await;
        assert_eq!(results.len(), 3);
        assert!(matches!(results[0], Ok(0)));
        assert!(matches!(results[1], Err(ExecutionError::Join(_))));
        assert!(matches!(results[2], Ok(2)));
    }

    #[tokio::test]
    async fn test_earlier_error_beats_later_panic() {
        let handles = spawn_ordered((0..2).map(|i| async move {
            if i == 0 {
                tokio::time::sleep(Duration::from_millis(30)).await;
                return Err(ExecutionError::Processor(TestError("first declared").into()));
            }
            panic!("later unit panics");
        }));

        let err = first_error("test", join_ordered::<i32>(handles).await).unwrap_err();
        assert_eq!(err.to_string(), "first declared");
    }

    #[test]
    fn test_first_error_is_by_declaration_order() {
        let results: Vec<Result<i32, TestError>> = vec![
            Ok(1),
            Err(TestError("second")),
            Err(TestError("third")),
            Ok(4),
        ];

        assert_eq!(first_error("test", results), Err(TestError("second")));
    }

    #[test]
    fn test_first_error_passes_outputs_through() {
        let results: Vec<Result<i32, TestError>> = vec![Ok(3), Ok(1), Ok(2)];
        assert_eq!(first_error("test", results), Ok(vec![3, 1, 2]));
    }

    #[tokio::test]
    async fn test_merge_ordered_skips_merge_on_error() {
        let merge = merge_fn(|_: Vec<i32>| -> Result<i32, crate::errors::TaskError> {
            panic!("merge must not run")
        });
        let results = vec![
            Ok(1),
            Err(ExecutionError::Processor(TestError("boom").into())),
        ];

        let err = merge_ordered("test", results, merge.as_ref()).await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
