// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod executor;
pub mod join;
pub mod step;

pub use step::{ContextStep, ExecutionMode, Step, StepContext, StepStatus};
