// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Test-only processors and step functions.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::engine::StepContext;
use crate::errors::TaskError;
use crate::traits::{Processor, StepFunction};

/// Error with a fixed message, so tests can downcast and compare identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestError(pub &'static str);

impl fmt::Display for TestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for TestError {}

/// Extract the [`TestError`] carried by a task error, if any.
pub fn test_error(err: &TaskError) -> Option<TestError> {
    err.downcast_ref::<TestError>().copied()
}

/// Shared record of which stubs ran, in call order.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, name: &str) {
        self.calls.lock().unwrap().push(name.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|call| call == name)
    }
}

/// A processor that records its call, optionally sleeps, then applies `f`.
pub struct RecordingProcessor<F> {
    pub name: &'static str,
    pub log: CallLog,
    pub delay: Duration,
    pub f: F,
}

impl<F> RecordingProcessor<F> {
    pub fn new<T>(name: &'static str, log: &CallLog, f: F) -> Self
    where
        F: Fn(T) -> Result<T, TaskError>,
    {
        Self {
            name,
            log: log.clone(),
            delay: Duration::ZERO,
            f,
        }
    }

    pub fn delayed(mut self, millis: u64) -> Self {
        self.delay = Duration::from_millis(millis);
        self
    }
}

#[async_trait]
impl<T, F> Processor<T> for RecordingProcessor<F>
where
    T: Send + 'static,
    F: Fn(T) -> Result<T, TaskError> + Send + Sync,
{
    async fn process(&self, input: T) -> Result<T, TaskError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.log.record(self.name);
        (self.f)(input)
    }
}

/// A processor that always fails with `TestError(message)` after an optional delay.
pub struct FailingProcessor {
    pub message: &'static str,
    pub delay: Duration,
}

impl FailingProcessor {
    pub fn new(message: &'static str) -> Self {
        Self {
            message,
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, millis: u64) -> Self {
        self.delay = Duration::from_millis(millis);
        self
    }
}

#[async_trait]
impl<T: Send + 'static> Processor<T> for FailingProcessor {
    async fn process(&self, _input: T) -> Result<T, TaskError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Err(TestError(self.message).into())
    }
}

/// A processor that panics, to exercise join failures.
pub struct PanickingProcessor;

#[async_trait]
impl<T: Send + 'static> Processor<T> for PanickingProcessor {
    async fn process(&self, _input: T) -> Result<T, TaskError> {
        panic!("processor exploded")
    }
}

/// Step function that sleeps, then appends its value to the response.
pub struct AppendNumber {
    pub value: u32,
    pub delay: Duration,
}

impl AppendNumber {
    pub fn new(value: u32, millis: u64) -> Self {
        Self {
            value,
            delay: Duration::from_millis(millis),
        }
    }
}

#[async_trait]
impl<Req: Send + Sync + 'static> StepFunction<Req, Vec<u32>> for AppendNumber {
    async fn run(&self, _ctx: &StepContext<Req>, response: &mut Vec<u32>) -> Result<(), TaskError> {
        tokio::time::sleep(self.delay).await;
        response.push(self.value);
        Ok(())
    }
}

/// Step function that sleeps, then fails without touching the response.
pub struct FailingStepFunction {
    pub message: &'static str,
    pub delay: Duration,
}

impl FailingStepFunction {
    pub fn new(message: &'static str, millis: u64) -> Self {
        Self {
            message,
            delay: Duration::from_millis(millis),
        }
    }
}

#[async_trait]
impl<Req, Resp> StepFunction<Req, Resp> for FailingStepFunction
where
    Req: Send + Sync + 'static,
    Resp: Send + 'static,
{
    async fn run(&self, _ctx: &StepContext<Req>, _response: &mut Resp) -> Result<(), TaskError> {
        tokio::time::sleep(self.delay).await;
        Err(TestError(self.message).into())
    }
}
