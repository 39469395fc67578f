// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Rejection reasons for deferred calls.

use thiserror::Error;

/// Why a deferred call was rejected.
///
/// `Host` and `Thrown` display as the bare message so consumers see the same
/// text whether the failure was signalled through the error slot or thrown.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// The host populated its error slot when completing the call.
    #[error("{message}")]
    Host { message: String },

    /// The host method threw before returning.
    #[error("{message}")]
    Thrown { message: String },

    /// The mirrored member is no longer callable on its receiver.
    #[error("{path} is not a function")]
    NotCallable { path: String },

    /// The host released the response callback without ever invoking it.
    #[error("response callback for {path} was dropped without being invoked")]
    Abandoned { path: String },
}

impl CallError {
    /// The error message, as carried by the host.
    pub fn message(&self) -> String {
        self.to_string()
    }
}
