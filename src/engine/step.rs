// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Graph-free serial/parallel runner over a flat list of functions.
//!
//! Two flavours exist:
//!
//! * [`Step`] threads a value: serially each output feeds the next function, in parallel
//!   every function gets a clone of the same input and a merge function combines the
//!   ordered outputs. A `Step` is itself a [`Processor`], so it can sit inside a graph node.
//! * [`ContextStep`] runs [`StepFunction`]s against a shared request and a response
//!   container, tracking health in a [`StepStatus`] and stopping serial scheduling through
//!   a [`CancellationToken`].

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::engine::join;
use crate::errors::{ExecutionError, TaskError};
use crate::observability::messages::engine::SiblingErrorsDropped;
use crate::observability::messages::step::{StepFunctionFailed, StepHalted, StepStarted};
use crate::observability::messages::StructuredLog;
use crate::traits::{Merge, Processor, StepFunction, StepResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    Serial,
    Parallel,
}

impl ExecutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Serial => "serial",
            ExecutionMode::Parallel => "parallel",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enum Discipline<T: Send + 'static> {
    Serial,
    Parallel(Arc<dyn Merge<T>>),
}

/// Value-threading step.
///
/// ```rust
/// use the_tasktree::engine::Step;
/// use the_tasktree::traits::processor_fn;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), the_tasktree::errors::ExecutionError> {
/// let increment = processor_fn(|x: i32| Ok(x + 1));
/// let step = Step::serial(vec![increment.clone(), increment.clone(), increment]);
/// assert_eq!(step.execute(0).await?, 3);
/// # Ok(())
/// # }
/// ```
pub struct Step<T: Send + 'static> {
    executions: Vec<Arc<dyn Processor<T>>>,
    discipline: Discipline<T>,
}

impl<T: Clone + Send + Sync + 'static> Step<T> {
    /// Each function's output becomes the next function's input.
    pub fn serial(executions: Vec<Arc<dyn Processor<T>>>) -> Self {
        Self {
            executions,
            discipline: Discipline::Serial,
        }
    }

    /// All functions run concurrently on the same input; `merge` combines their outputs.
    pub fn parallel(executions: Vec<Arc<dyn Processor<T>>>, merge: Arc<dyn Merge<T>>) -> Self {
        Self {
            executions,
            discipline: Discipline::Parallel(merge),
        }
    }

    pub fn mode(&self) -> ExecutionMode {
        match self.discipline {
            Discipline::Serial => ExecutionMode::Serial,
            Discipline::Parallel(_) => ExecutionMode::Parallel,
        }
    }

    pub fn len(&self) -> usize {
        self.executions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.executions.is_empty()
    }

    /// Run the step.
    ///
    /// Serial mode returns the first error and runs nothing after it. Parallel mode waits
    /// for every function, then returns the earliest-declared error without calling the
    /// merge function, or the merged output.
    pub async fn execute(&self, input: T) -> Result<T, ExecutionError> {
        let started = StepStarted {
            mode: self.mode().as_str(),
            function_count: self.executions.len(),
        };
        started.log();

        match &self.discipline {
            Discipline::Serial => self.execute_serial(input).await,
            Discipline::Parallel(merge) => self.execute_parallel(input, merge.as_ref()).await,
        }
    }

    async fn execute_serial(&self, input: T) -> Result<T, ExecutionError> {
        let total = self.executions.len();
        let mut value = input;

        for (index, execution) in self.executions.iter().enumerate() {
            value = match execution.process(value).await {
                Ok(output) => output,
                Err(err) => {
                    StepFunctionFailed {
                        index,
                        error: &*err,
                    }
                    .log();
                    StepHalted {
                        executed: index + 1,
                        remaining: total - index - 1,
                    }
                    .log();
                    return Err(ExecutionError::Processor(err));
                }
            };
        }
        Ok(value)
    }

    async fn execute_parallel(&self, input: T, merge: &dyn Merge<T>) -> Result<T, ExecutionError> {
        let handles = join::spawn_ordered(self.executions.iter().map(|execution| {
            let execution = Arc::clone(execution);
            let input = input.clone();
            async move {
                execution
                    .process(input)
                    .await
                    .map_err(ExecutionError::Processor)
            }
        }));

        let results = join::join_ordered(handles).await;
        join::merge_ordered("parallel step", results, merge).await
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> Processor<T> for Step<T> {
    async fn process(&self, input: T) -> Result<T, TaskError> {
        self.execute(input)
            .await
            .map_err(ExecutionError::into_task_error)
    }
}

impl<T: Send + 'static> fmt::Debug for Step<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.discipline {
            Discipline::Serial => ExecutionMode::Serial,
            Discipline::Parallel(_) => ExecutionMode::Parallel,
        };
        f.debug_struct("Step")
            .field("mode", &mode)
            .field("function_count", &self.executions.len())
            .finish()
    }
}

/// What every [`StepFunction`] of a [`ContextStep`] sees: the shared request and the
/// step's cancellation token.
pub struct StepContext<Req> {
    request: Arc<Req>,
    token: CancellationToken,
}

impl<Req> StepContext<Req> {
    pub fn new(request: Arc<Req>, token: CancellationToken) -> Self {
        Self { request, token }
    }

    pub fn request(&self) -> &Req {
        &self.request
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Stop the step from scheduling further serial functions.
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

impl<Req> Clone for StepContext<Req> {
    fn clone(&self) -> Self {
        Self {
            request: Arc::clone(&self.request),
            token: self.token.clone(),
        }
    }
}

/// Health of the last [`ContextStep::execute`] run. Holds at most one error.
#[derive(Debug, Default)]
pub struct StepStatus {
    error: Option<TaskError>,
    failed_index: Option<usize>,
    executed: usize,
    cancelled: bool,
}

impl StepStatus {
    pub fn error(&self) -> Option<&TaskError> {
        self.error.as_ref()
    }

    /// Declaration index of the function whose error is held.
    pub fn failed_index(&self) -> Option<usize> {
        self.failed_index
    }

    pub fn is_healthy(&self) -> bool {
        self.error.is_none()
    }

    /// Number of functions that ran to completion, successfully or not.
    pub fn executed(&self) -> usize {
        self.executed
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn record(&mut self, index: usize, err: TaskError) {
        match self.failed_index {
            None => {
                self.error = Some(err);
                self.failed_index = Some(index);
            }
            Some(returned_index) => SiblingErrorsDropped {
                scope: "context step",
                returned_index,
                dropped_index: index,
                error: &err,
            }
            .log(),
        }
    }
}

/// Step over [`StepFunction`]s sharing a request and a response.
///
/// The step's token is a child of the parent token given at construction: cancelling the
/// parent stops the step, a failure inside the step never cancels the parent. Once
/// cancelled, a step stays cancelled, so executing it again schedules nothing.
pub struct ContextStep<Req, Resp>
where
    Req: Send + Sync + 'static,
    Resp: StepResponse,
{
    executions: Vec<Arc<dyn StepFunction<Req, Resp>>>,
    mode: ExecutionMode,
    context: StepContext<Req>,
    response: Resp,
    status: StepStatus,
}

impl<Req, Resp> ContextStep<Req, Resp>
where
    Req: Send + Sync + 'static,
    Resp: StepResponse,
{
    /// Functions run one at a time, in order, all writing into `response`.
    pub fn serial(
        parent: &CancellationToken,
        executions: Vec<Arc<dyn StepFunction<Req, Resp>>>,
        request: Req,
        response: Resp,
    ) -> Self {
        Self::new(ExecutionMode::Serial, parent, executions, request, response)
    }

    /// Functions run concurrently, each into a private slot absorbed into `response`
    /// in declaration order after all of them finish.
    pub fn parallel(
        parent: &CancellationToken,
        executions: Vec<Arc<dyn StepFunction<Req, Resp>>>,
        request: Req,
        response: Resp,
    ) -> Self {
        Self::new(ExecutionMode::Parallel, parent, executions, request, response)
    }

    fn new(
        mode: ExecutionMode,
        parent: &CancellationToken,
        executions: Vec<Arc<dyn StepFunction<Req, Resp>>>,
        request: Req,
        response: Resp,
    ) -> Self {
        Self {
            executions,
            mode,
            context: StepContext::new(Arc::new(request), parent.child_token()),
            response,
            status: StepStatus::default(),
        }
    }

    /// Run every function and return the resulting status.
    ///
    /// The status is reset on each run. The response is not: a re-run absorbs into
    /// whatever earlier runs left there, so take it with [`into_response`](Self::into_response)
    /// or rebuild the step to start from an empty response.
    pub async fn execute(&mut self) -> &StepStatus {
        self.status = StepStatus::default();
        StepStarted {
            mode: self.mode.as_str(),
            function_count: self.executions.len(),
        }
        .log();

        match self.mode {
            ExecutionMode::Serial => self.execute_serial().await,
            ExecutionMode::Parallel => self.execute_parallel().await,
        }

        self.status.cancelled = self.context.is_cancelled();
        &self.status
    }

    async fn execute_serial(&mut self) {
        let total = self.executions.len();

        for (index, execution) in self.executions.iter().enumerate() {
            if self.context.is_cancelled() {
                StepHalted {
                    executed: index,
                    remaining: total - index,
                }
                .log();
                return;
            }

            let result = execution.run(&self.context, &mut self.response).await;
            self.status.executed += 1;

            if let Err(err) = result {
                StepFunctionFailed {
                    index,
                    error: &*err,
                }
                .log();
                self.status.record(index, err);
                self.context.cancel();
            }
        }
    }

    async fn execute_parallel(&mut self) {
        if self.context.is_cancelled() {
            StepHalted {
                executed: 0,
                remaining: self.executions.len(),
            }
            .log();
            return;
        }

        let handles = join::spawn_ordered(self.executions.iter().map(|execution| {
            let execution = Arc::clone(execution);
            let context = self.context.clone();
            async move {
                let mut slot = Resp::default();
                let result = execution.run(&context, &mut slot).await;
                if result.is_err() {
                    context.cancel();
                }
                (slot, result)
            }
        }));

        for (index, joined) in join::join_each(handles).await.into_iter().enumerate() {
            match joined {
                Ok((slot, result)) => {
                    self.status.executed += 1;
                    self.response.absorb(slot);
                    if let Err(err) = result {
                        StepFunctionFailed {
                            index,
                            error: &*err,
                        }
                        .log();
                        self.status.record(index, err);
                    }
                }
                Err(join_error) => {
                    StepFunctionFailed {
                        index,
                        error: &join_error,
                    }
                    .log();
                    self.status.record(index, TaskError::new(join_error));
                    self.context.cancel();
                }
            }
        }
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn status(&self) -> &StepStatus {
        &self.status
    }

    pub fn is_healthy(&self) -> bool {
        self.status.is_healthy()
    }

    pub fn request(&self) -> &Req {
        self.context.request()
    }

    pub fn response(&self) -> &Resp {
        &self.response
    }

    pub fn into_response(self) -> Resp {
        self.response
    }

    pub fn token(&self) -> &CancellationToken {
        self.context.token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::{
        test_error, AppendNumber, CallLog, FailingProcessor, FailingStepFunction,
        PanickingProcessor, RecordingProcessor, TestError,
    };
    use crate::traits::{merge_fn, processor_fn};

    fn appenders(values: &[u32]) -> Vec<Arc<dyn StepFunction<(), Vec<u32>>>> {
        values
            .iter()
            .map(|&v| Arc::new(AppendNumber::new(v, 20)) as Arc<dyn StepFunction<(), Vec<u32>>>)
            .collect()
    }

    #[tokio::test]
    async fn test_serial_threads_value() {
        let increment = processor_fn(|x: i32| Ok(x + 1));
        let step = Step::serial(vec![increment.clone(), increment.clone(), increment]);

        assert_eq!(step.mode(), ExecutionMode::Serial);
        assert_eq!(step.execute(0).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_parallel_merges_outputs() {
        let step = Step::parallel(
            vec![
                processor_fn(|x: i32| Ok(x * 2)),
                processor_fn(|x: i32| Ok(x * 3)),
            ],
            merge_fn(|xs: Vec<i32>| Ok(xs.into_iter().sum())),
        );

        assert_eq!(step.mode(), ExecutionMode::Parallel);
        assert_eq!(step.execute(5).await.unwrap(), 25);
    }

    #[tokio::test]
    async fn test_serial_halts_on_failing_function() {
        let log = CallLog::new();
        let executions: Vec<Arc<dyn Processor<i32>>> = vec![
            Arc::new(RecordingProcessor::new("first", &log, |x: i32| Ok(x + 1))),
            Arc::new(FailingProcessor::new("middle failed")),
            Arc::new(RecordingProcessor::new("last", &log, |x: i32| Ok(x + 1))),
        ];
        let step = Step::serial(executions);

        let err = step.execute(0).await.unwrap_err();

        assert_eq!(test_error(err.as_task_error().unwrap()), Some(TestError("middle failed")));
        assert_eq!(log.calls(), vec!["first".to_string()]);
    }

    #[tokio::test]
    async fn test_parallel_returns_earliest_declared_error() {
        let merged = CallLog::new();
        let merge_log = merged.clone();
        let executions: Vec<Arc<dyn Processor<i32>>> = vec![
            processor_fn(|x: i32| Ok(x)),
            Arc::new(FailingProcessor::new("slow").delayed(40)),
            Arc::new(FailingProcessor::new("fast")),
        ];
        let step = Step::parallel(
            executions,
            merge_fn(move |xs: Vec<i32>| {
                merge_log.record("merge");
                Ok(xs.into_iter().sum())
            }),
        );

        let err = step.execute(1).await.unwrap_err();

        assert_eq!(test_error(err.as_task_error().unwrap()), Some(TestError("slow")));
        assert!(!merged.contains("merge"));
    }

    #[tokio::test]
    async fn test_parallel_error_beats_later_panicking_function() {
        let executions: Vec<Arc<dyn Processor<i32>>> = vec![
            Arc::new(FailingProcessor::new("first declared").delayed(30)),
            Arc::new(PanickingProcessor),
        ];
        let step = Step::parallel(executions, merge_fn(|xs: Vec<i32>| Ok(xs.into_iter().sum())));

        let err = step.execute(1).await.unwrap_err();
        assert_eq!(
            err.as_task_error().and_then(test_error),
            Some(TestError("first declared"))
        );
    }

    #[tokio::test]
    async fn test_step_as_processor_keeps_error_unchanged() {
        let step = Step::serial(vec![Arc::new(FailingProcessor::new("inner")) as Arc<dyn Processor<i32>>]);

        let err = step.process(3).await.unwrap_err();
        assert_eq!(test_error(&err), Some(TestError("inner")));
    }

    #[tokio::test]
    async fn test_context_serial_runs_in_order() {
        let parent = CancellationToken::new();
        let mut step = ContextStep::serial(&parent, appenders(&[1, 2, 3, 4]), (), Vec::new());

        let status = step.execute().await;
        assert!(status.is_healthy());
        assert_eq!(status.executed(), 4);
        assert!(!status.is_cancelled());

        assert_eq!(step.response(), &vec![1, 2, 3, 4]);
        assert!(!parent.is_cancelled());
    }

    #[tokio::test]
    async fn test_context_serial_with_error_stops_scheduling() {
        let parent = CancellationToken::new();
        let executions: Vec<Arc<dyn StepFunction<(), Vec<u32>>>> = vec![
            Arc::new(AppendNumber::new(1, 10)),
            Arc::new(FailingStepFunction::new("err", 10)),
            Arc::new(AppendNumber::new(3, 10)),
            Arc::new(AppendNumber::new(4, 10)),
        ];
        let mut step = ContextStep::serial(&parent, executions, (), Vec::new());

        let status = step.execute().await;
        assert!(!status.is_healthy());
        assert_eq!(status.failed_index(), Some(1));
        assert_eq!(status.executed(), 2);
        assert!(status.is_cancelled());
        assert_eq!(test_error(status.error().unwrap()), Some(TestError("err")));

        assert_eq!(step.response(), &vec![1]);
        assert!(step.token().is_cancelled());
        assert!(!parent.is_cancelled());
    }

    #[tokio::test]
    async fn test_context_serial_honours_parent_cancellation() {
        let parent = CancellationToken::new();
        let mut step = ContextStep::serial(&parent, appenders(&[1, 2]), (), Vec::new());
        parent.cancel();

        let status = step.execute().await;
        assert!(status.is_healthy());
        assert!(status.is_cancelled());
        assert_eq!(status.executed(), 0);
        assert!(step.response().is_empty());
    }

    #[tokio::test]
    async fn test_context_parallel_collects_every_slot() {
        let parent = CancellationToken::new();
        let executions: Vec<Arc<dyn StepFunction<(), Vec<u32>>>> = vec![
            Arc::new(AppendNumber::new(1, 40)),
            Arc::new(AppendNumber::new(2, 10)),
            Arc::new(AppendNumber::new(3, 30)),
            Arc::new(AppendNumber::new(4, 0)),
        ];
        let mut step = ContextStep::parallel(&parent, executions, (), Vec::new());

        let status = step.execute().await;
        assert!(status.is_healthy());
        assert_eq!(status.executed(), 4);

        assert_eq!(step.into_response(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_context_parallel_with_errors_records_earliest() {
        let parent = CancellationToken::new();
        let executions: Vec<Arc<dyn StepFunction<(), Vec<u32>>>> = vec![
            Arc::new(AppendNumber::new(1, 20)),
            Arc::new(FailingStepFunction::new("second", 30)),
            Arc::new(FailingStepFunction::new("third", 0)),
            Arc::new(AppendNumber::new(4, 20)),
        ];
        let mut step = ContextStep::parallel(&parent, executions, (), Vec::new());

        let status = step.execute().await;
        assert!(!status.is_healthy());
        assert_eq!(status.failed_index(), Some(1));
        assert_eq!(status.executed(), 4);
        assert_eq!(test_error(status.error().unwrap()), Some(TestError("second")));

        assert_eq!(step.response(), &vec![1, 4]);
        assert!(!parent.is_cancelled());
    }

    #[tokio::test]
    async fn test_context_rerun_accumulates_into_response() {
        let parent = CancellationToken::new();
        let mut step = ContextStep::parallel(&parent, appenders(&[1, 2]), (), Vec::new());

        assert!(step.execute().await.is_healthy());
        let status = step.execute().await;
        assert!(status.is_healthy());
        assert_eq!(status.executed(), 2);

        assert_eq!(step.response(), &vec![1, 2, 1, 2]);
    }

    struct Greeting;

    #[async_trait]
    impl StepFunction<String, String> for Greeting {
        async fn run(&self, ctx: &StepContext<String>, response: &mut String) -> Result<(), TaskError> {
            response.push_str(&format!("hello {}", ctx.request()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_context_step_shares_request() {
        let parent = CancellationToken::new();
        let executions: Vec<Arc<dyn StepFunction<String, String>>> =
            vec![Arc::new(Greeting), Arc::new(Greeting)];
        let mut step = ContextStep::parallel(&parent, executions, "world".to_string(), String::new());

        assert!(step.execute().await.is_healthy());
        assert_eq!(step.request(), "world");
        assert_eq!(step.response(), "hello worldhello world");
    }
}
