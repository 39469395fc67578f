// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for classification, mirroring and publication events.

use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

use crate::mirror::Kind;
use crate::observability::messages::StructuredLog;

/// Mirroring of a host graph started.
///
/// # Log Level
/// `debug!` - Lifecycle detail
pub struct MirrorStarted {
    pub root_members: usize,
}

impl Display for MirrorStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Mirroring host graph with {} root members", self.root_members)
    }
}

impl StructuredLog for MirrorStarted {
    fn log(&self) {
        tracing::debug!(root_members = self.root_members, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "mirror",
            span_name = name,
            root_members = self.root_members,
        )
    }
}

/// A host member was classified.
///
/// # Log Level
/// `trace!` - One event per member
pub struct MemberClassified<'a> {
    pub path: &'a str,
    pub kind: Kind,
    pub overridden: bool,
}

impl Display for MemberClassified<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.overridden {
            write!(f, "Member '{}' classified as {} (override)", self.path, self.kind)
        } else {
            write!(f, "Member '{}' classified as {}", self.path, self.kind)
        }
    }
}

impl StructuredLog for MemberClassified<'_> {
    fn log(&self) {
        tracing::trace!(
            path = self.path,
            kind = %self.kind,
            overridden = self.overridden,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "member_classified",
            span_name = name,
            path = self.path,
            kind = %self.kind,
        )
    }
}

/// Mirroring finished.
///
/// # Log Level
/// `info!` - One event per mirrored host
pub struct MirrorCompleted {
    pub namespaces: usize,
    pub methods: usize,
    pub passthrough: usize,
    pub duration: Duration,
}

impl Display for MirrorCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Mirror built: {} namespaces, {} async methods, {} passthrough members in {:?}",
            self.namespaces, self.methods, self.passthrough, self.duration
        )
    }
}

impl StructuredLog for MirrorCompleted {
    fn log(&self) {
        tracing::info!(
            namespaces = self.namespaces,
            methods = self.methods,
            passthrough = self.passthrough,
            duration_us = self.duration.as_micros() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "mirror_completed",
            span_name = name,
            namespaces = self.namespaces,
            methods = self.methods,
        )
    }
}

/// Mirroring was aborted.
///
/// # Log Level
/// `warn!` - The consumer receives the error; this is for operators
pub struct MirrorFailed<'a> {
    pub error: &'a dyn std::error::Error,
}

impl Display for MirrorFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Mirroring failed: {}", self.error)
    }
}

impl StructuredLog for MirrorFailed<'_> {
    fn log(&self) {
        tracing::warn!(error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("mirror_failed", span_name = name, error = %self.error)
    }
}

/// A mirror was attached to a global scope.
///
/// # Log Level
/// `debug!` - Lifecycle detail
pub struct MirrorAttached<'a> {
    pub name: &'a str,
    pub replaced: bool,
}

impl Display for MirrorAttached<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.replaced {
            write!(f, "Mirror attached as global '{}' (replacing previous binding)", self.name)
        } else {
            write!(f, "Mirror attached as global '{}'", self.name)
        }
    }
}

impl StructuredLog for MirrorAttached<'_> {
    fn log(&self) {
        tracing::debug!(name = self.name, replaced = self.replaced, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("mirror_attached", span_name = name, global = self.name)
    }
}

/// The configured event constructor path did not resolve to a function.
///
/// # Log Level
/// `warn!` - Events fall back to matching by constructor name
pub struct EventConstructorUnresolved<'a> {
    pub path: &'a str,
    pub event_type: &'a str,
}

impl Display for EventConstructorUnresolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Event constructor '{}' not found in host; matching events by type name '{}'",
            self.path, self.event_type
        )
    }
}

impl StructuredLog for EventConstructorUnresolved<'_> {
    fn log(&self) {
        tracing::warn!(path = self.path, event_type = self.event_type, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "event_constructor_unresolved",
            span_name = name,
            path = self.path,
            event_type = self.event_type,
        )
    }
}

/// An override path matched no member of the host graph.
///
/// # Log Level
/// `warn!` - Usually a typo in configuration
pub struct UnusedOverride<'a> {
    pub path: &'a str,
    pub kind: Kind,
}

impl Display for UnusedOverride<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Override '{}' ({}) matched no host member", self.path, self.kind)
    }
}

impl StructuredLog for UnusedOverride<'_> {
    fn log(&self) {
        tracing::warn!(path = self.path, kind = %self.kind, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("unused_override", span_name = name, path = self.path)
    }
}
