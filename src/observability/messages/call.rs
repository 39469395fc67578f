// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for call dispatch and response normalization.

use std::fmt::{Display, Formatter};
use tracing::Span;

use crate::observability::messages::StructuredLog;

/// A mirrored method was invoked.
///
/// # Log Level
/// `debug!`
pub struct CallDispatched<'a> {
    pub path: &'a str,
    pub arg_count: usize,
    pub deferred: bool,
}

impl Display for CallDispatched<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let mode = if self.deferred { "deferred" } else { "immediate" };
        write!(f, "Calling '{}' ({}) with {} arguments", self.path, mode, self.arg_count)
    }
}

impl StructuredLog for CallDispatched<'_> {
    fn log(&self) {
        tracing::debug!(
            path = self.path,
            arg_count = self.arg_count,
            deferred = self.deferred,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "call",
            span_name = name,
            path = self.path,
            deferred = self.deferred,
        )
    }
}

/// A deferred call settled.
///
/// # Log Level
/// `debug!` - Rejections belong to the consumer, so they are not warnings here
pub struct CallSettled<'a> {
    pub path: &'a str,
    pub error: Option<&'a dyn std::error::Error>,
}

impl Display for CallSettled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.error {
            Some(error) => write!(f, "Call '{}' rejected: {}", self.path, error),
            None => write!(f, "Call '{}' fulfilled", self.path),
        }
    }
}

impl StructuredLog for CallSettled<'_> {
    fn log(&self) {
        tracing::debug!(path = self.path, rejected = self.error.is_some(), "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("call_settled", span_name = name, path = self.path)
    }
}

/// An outcome arrived for a call that had already settled.
///
/// The host is expected to complete each call once; extra outcomes (a second
/// callback invocation, or a throw after the callback ran) are dropped.
///
/// # Log Level
/// `debug!`
pub struct LateOutcomeIgnored<'a> {
    pub path: &'a str,
    pub source: &'a str,
}

impl Display for LateOutcomeIgnored<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Ignoring {} for '{}': call already settled",
            self.source, self.path
        )
    }
}

impl StructuredLog for LateOutcomeIgnored<'_> {
    fn log(&self) {
        tracing::debug!(path = self.path, source = self.source, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("late_outcome", span_name = name, path = self.path)
    }
}
