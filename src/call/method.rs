// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::call::CallAdapter;
use crate::host::{ErrorSlot, HostFunction, HostObject, HostValue};

/// The method installed in a mirror in place of a host verb.
///
/// Bound to the original receiver, not to the mirror. The target function is
/// looked up on the receiver by name each time the method is called, so a host
/// that swaps the member after mirroring is honoured.
#[derive(Clone)]
pub struct MirroredMethod {
    path: String,
    name: String,
    receiver: HostObject,
    original: HostFunction,
    error_slot: Arc<dyn ErrorSlot>,
}

impl MirroredMethod {
    pub fn new(
        path: impl Into<String>,
        name: impl Into<String>,
        receiver: HostObject,
        original: HostFunction,
        error_slot: Arc<dyn ErrorSlot>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            receiver,
            original,
            error_slot,
        }
    }

    /// Dotted path from the mirror root.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn receiver(&self) -> &HostObject {
        &self.receiver
    }

    /// The host function seen when the mirror was built.
    pub fn original(&self) -> &HostFunction {
        &self.original
    }

    /// Starts a call; pick `immediate()` or `deferred()` on the result.
    pub fn call(&self, args: &[HostValue]) -> CallAdapter {
        let current = self
            .receiver
            .get(&self.name)
            .and_then(|value| value.as_function().cloned());

        CallAdapter::new(
            self.path.clone(),
            self.receiver.clone(),
            current,
            args,
            self.error_slot.clone(),
        )
    }
}

impl std::fmt::Debug for MirroredMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MirroredMethod")
            .field("path", &self.path)
            .field("original", &self.original)
            .finish()
    }
}
