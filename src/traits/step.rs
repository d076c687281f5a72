// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::engine::step::StepContext;
use crate::errors::TaskError;

/// A function run by a [`ContextStep`](crate::engine::step::ContextStep).
///
/// Each call receives the step's shared context (request plus cancellation token) and a
/// response it may write into. Returning `Err` records the error in the step status and
/// cancels the step's token.
#[async_trait]
pub trait StepFunction<Req, Resp>: Send + Sync
where
    Req: Send + Sync + 'static,
    Resp: Send + 'static,
{
    async fn run(&self, ctx: &StepContext<Req>, response: &mut Resp) -> Result<(), TaskError>;
}

/// A response container that parallel units can fill independently.
///
/// Parallel context steps hand every unit its own `Default` slot and fold the slots back
/// into the step's response, in declaration order, once every unit has finished.
pub trait StepResponse: Default + Send + 'static {
    fn absorb(&mut self, slot: Self);
}

impl<T: Send + 'static> StepResponse for Vec<T> {
    fn absorb(&mut self, slot: Self) {
        self.extend(slot);
    }
}

impl StepResponse for String {
    fn absorb(&mut self, slot: Self) {
        self.push_str(&slot);
    }
}

impl StepResponse for () {
    fn absorb(&mut self, _slot: Self) {}
}
