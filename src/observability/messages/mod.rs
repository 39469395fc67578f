// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! # Organization
//!
//! * `mirror` - Classifier and walker events, mirror publication
//! * `call` - Call adapter dispatch and response normalization

use tracing::Span;

pub mod call;
pub mod mirror;

/// A log message that knows its level and its structured fields.
pub trait StructuredLog {
    /// Emit the message at its documented level.
    fn log(&self);

    /// Build a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
