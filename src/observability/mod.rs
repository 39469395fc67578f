// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Every diagnostic emitted by the crate is a message struct implementing
//! `Display` and [`StructuredLog`](messages::StructuredLog), so log text lives in
//! one place and each event carries structured fields.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::mirror` - classification, walk lifecycle and publication
//! * `messages::call` - call dispatch and settlement
//!
//! Diagnostics never influence outcomes: failures still reach the consumer
//! only through the deferred result. Call-level events are logged at `debug!`
//! and below.
//!
//! # Usage
//!
//! ```rust
//! use chromise::observability::messages::{mirror::MirrorStarted, StructuredLog};
//!
//! MirrorStarted { root_members: 4 }.log();
//! ```

pub mod messages;

#[cfg(test)]
pub(crate) mod capture;
