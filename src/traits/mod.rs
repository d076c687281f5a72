// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod merge;
pub mod processor;
pub mod step;

pub use merge::{merge_fn, Merge};
pub use processor::{processor_fn, processor_fn_async, AsyncFnProcessor, Processor};
pub use step::{StepFunction, StepResponse};
