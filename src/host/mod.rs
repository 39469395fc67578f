// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Host value model: the uncontrolled API graph a mirror is built from.
//!
//! A platform binding (or a test double) assembles its API out of
//! [`HostObject`]s and [`HostFunction`]s and hands the root over as a [`Host`],
//! together with the [`ErrorSlot`] through which it reports asynchronous failures.
//!
//! # Assumed host contract
//! * The graph is acyclic.
//! * A callable's last parameter, when present, is a completion callback taking
//!   a variable-length result list, and the host invokes it at most once.
//! * The error slot is populated before the callback runs and is readable for
//!   the duration of that callback.

pub mod demo;
mod error_slot;
mod value;

use std::sync::Arc;

use crate::config::consts::DEFAULT_ERROR_SLOT;
use crate::config::MirrorConfig;

pub use error_slot::{ErrorSlot, NoErrorSlot, PropertySlot, SharedSlot};
pub use value::{HostFunction, HostObject, HostValue, NativeFn};

/// A host API root together with its error slot.
#[derive(Clone)]
pub struct Host {
    root: HostObject,
    error_slot: Arc<dyn ErrorSlot>,
}

impl Host {
    /// Wraps `root`, reading errors from `runtime.lastError` inside it.
    pub fn new(root: HostObject) -> Self {
        let error_slot = Arc::new(PropertySlot::new(root.clone(), DEFAULT_ERROR_SLOT));
        Self { root, error_slot }
    }

    /// Wraps `root`, reading errors from the slot path named in `config`.
    pub fn from_config(root: HostObject, config: &MirrorConfig) -> Self {
        let error_slot = Arc::new(PropertySlot::new(root.clone(), config.error_slot.clone()));
        Self { root, error_slot }
    }

    pub fn with_error_slot(mut self, error_slot: Arc<dyn ErrorSlot>) -> Self {
        self.error_slot = error_slot;
        self
    }

    pub fn root(&self) -> &HostObject {
        &self.root
    }

    pub fn error_slot(&self) -> &Arc<dyn ErrorSlot> {
        &self.error_slot
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host").field("root", &self.root).finish()
    }
}
