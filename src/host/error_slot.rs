// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The host's out-of-band error channel.
//!
//! Hosts report the failure of an asynchronous call by populating a single
//! process-wide slot right before invoking the completion callback. The slot is
//! owned and written by the host; this crate only ever reads it.

use std::sync::{PoisonError, RwLock};

use crate::host::{HostObject, HostValue};

/// Read access to the host's error slot.
///
/// `read` is called exactly once per completed call, synchronously inside the
/// host's callback invocation. Anything other than an object means "no error".
pub trait ErrorSlot: Send + Sync {
    fn read(&self) -> HostValue;
}

/// Error slot stored as a property inside the host graph, e.g. `runtime.lastError`.
///
/// The path is resolved on every read so the host may replace intermediate
/// objects freely.
pub struct PropertySlot {
    root: HostObject,
    path: String,
}

impl PropertySlot {
    pub fn new(root: HostObject, path: impl Into<String>) -> Self {
        Self {
            root,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl ErrorSlot for PropertySlot {
    fn read(&self) -> HostValue {
        self.root.lookup_path(&self.path).unwrap_or_default()
    }
}

/// Free-standing error slot for hosts that keep the error outside their API graph.
#[derive(Default)]
pub struct SharedSlot {
    value: RwLock<HostValue>,
}

impl SharedSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, value: impl Into<HostValue>) {
        *self.value.write().unwrap_or_else(PoisonError::into_inner) = value.into();
    }

    pub fn clear(&self) {
        self.set(HostValue::Undefined);
    }
}

impl ErrorSlot for SharedSlot {
    fn read(&self) -> HostValue {
        self.value.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

/// Slot for hosts with no error channel; always empty.
pub struct NoErrorSlot;

impl ErrorSlot for NoErrorSlot {
    fn read(&self) -> HostValue {
        HostValue::Undefined
    }
}
