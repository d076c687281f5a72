// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the step primitive.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// A step started running its functions.
///
/// # Log Level
/// `debug!` - Per-step detail
pub struct StepStarted<'a> {
    pub mode: &'a str,
    pub function_count: usize,
}

impl Display for StepStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting {} step with {} functions",
            self.mode, self.function_count
        )
    }
}

impl StructuredLog for StepStarted<'_> {
    fn log(&self) {
        tracing::debug!(mode = self.mode, function_count = self.function_count, "{}", self);
    }
}

/// A step function returned an error.
///
/// # Log Level
/// `warn!` - The step is now unhealthy
///
/// # Example
/// ```
/// use the_tasktree::observability::messages::step::StepFunctionFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "test error");
/// let msg = StepFunctionFailed {
///     index: 1,
///     error: &error,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct StepFunctionFailed<'a> {
    pub index: usize,
    pub error: &'a dyn std::error::Error,
}

impl Display for StepFunctionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Step function {} failed: {}", self.index, self.error)
    }
}

impl StructuredLog for StepFunctionFailed<'_> {
    fn log(&self) {
        tracing::warn!(index = self.index, error = %self.error, "{}", self);
    }
}

/// A serial step stopped scheduling because its token was cancelled.
///
/// # Log Level
/// `debug!` - Expected after a failure or an external cancel
pub struct StepHalted {
    pub executed: usize,
    pub remaining: usize,
}

impl Display for StepHalted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Step halted after {} functions, {} not scheduled",
            self.executed, self.remaining
        )
    }
}

impl StructuredLog for StepHalted {
    fn log(&self) {
        tracing::debug!(executed = self.executed, remaining = self.remaining, "{}", self);
    }
}
