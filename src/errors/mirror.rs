// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::mirror::Kind;

/// Errors raised while building or addressing a mirror.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MirrorError {
    /// Namespace nesting went deeper than the configured limit.
    #[error("namespace '{path}' exceeds the maximum mirror depth of {max_depth}")]
    DepthExceeded { path: String, max_depth: usize },

    /// A classification override names a kind the member's value cannot have.
    #[error("override for '{path}' requires a {kind} but the host holds a {found}")]
    OverrideMismatch {
        path: String,
        kind: Kind,
        found: &'static str,
    },

    /// No mirrored method exists at the given path.
    #[error("no mirrored method at '{path}'")]
    UnknownMethod { path: String },
}
