// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit that line at its documented level, with the struct's fields
//! attached as `tracing` fields.
//!
//! # Organization
//!
//! * `graph` - linking and graph construction events
//! * `engine` - recursive executor lifecycle and fan-out/fan-in events
//! * `step` - step primitive scheduling, failures and cancellation
//!
//! # Usage Pattern
//!
//! ```rust
//! use the_tasktree::observability::messages::StructuredLog;
//! use the_tasktree::observability::messages::engine::FanOutStarted;
//!
//! let msg = FanOutStarted {
//!     task: "splitter",
//!     child_count: 3,
//! };
//!
//! msg.log();
//! ```

pub mod engine;
pub mod graph;
pub mod step;

/// Emit a message as a structured `tracing` event.
pub trait StructuredLog {
    /// Log the message at its level with its fields attached
    fn log(&self);
}
