// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Every log line the crate emits goes through a message type in [`messages`]. Message
//! types are plain structs implementing `Display`, so wording lives in one place and
//! call sites stay free of format strings.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::graph` - linking and graph construction events
//! * `messages::engine` - recursive executor lifecycle and fan-out/fan-in events
//! * `messages::step` - step primitive scheduling, failures and cancellation
//!
//! The crate only emits `tracing` events; installing a subscriber is left to the
//! application (the `tasktree` binary uses `tracing-subscriber` with `RUST_LOG`).
//!
//! # Usage
//!
//! ```rust
//! use the_tasktree::observability::messages::engine::ExecutionFailed;
//!
//! let error = std::io::Error::new(std::io::ErrorKind::Other, "test error");
//! let msg = ExecutionFailed {
//!     task: "root",
//!     error: &error,
//! };
//!
//! tracing::error!("{}", msg);
//! ```

pub mod messages;
