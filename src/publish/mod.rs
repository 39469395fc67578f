// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Publishing a mirror to its consumers.
//!
//! A mirror can be attached under a well-known name in a [`GlobalScope`] or
//! handed out directly as a [`ModuleExport`]. Both share the same
//! `Arc<Mirror>`; calls behave identically either way.

use std::collections::HashMap;
use std::ops::Deref;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::mirror::Mirror;
use crate::observability::messages::mirror::MirrorAttached;
use crate::observability::messages::StructuredLog;

/// Name under which the CLI attaches its mirror.
pub const DEFAULT_GLOBAL_NAME: &str = "chromise";

/// Named registry of published mirrors.
#[derive(Debug, Default)]
pub struct GlobalScope {
    bindings: RwLock<HashMap<String, Arc<Mirror>>>,
}

impl GlobalScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide scope.
    pub fn process() -> &'static GlobalScope {
        static PROCESS_SCOPE: OnceLock<GlobalScope> = OnceLock::new();
        PROCESS_SCOPE.get_or_init(GlobalScope::new)
    }

    /// Attaches `mirror` under `name`, replacing any previous binding.
    pub fn attach(&self, name: impl Into<String>, mirror: Mirror) -> Arc<Mirror> {
        let name = name.into();
        let mirror = Arc::new(mirror);
        let previous = self
            .bindings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.clone(), mirror.clone());

        MirrorAttached {
            name: &name,
            replaced: previous.is_some(),
        }
        .log();
        mirror
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<Mirror>> {
        self.bindings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn detach(&self, name: &str) -> Option<Arc<Mirror>> {
        self.bindings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }
}

/// A mirror handed to a consumer as a module value.
#[derive(Debug, Clone)]
pub struct ModuleExport(Arc<Mirror>);

impl ModuleExport {
    pub fn into_inner(self) -> Arc<Mirror> {
        self.0
    }
}

impl Deref for ModuleExport {
    type Target = Mirror;

    fn deref(&self) -> &Mirror {
        &self.0
    }
}

/// Exports `mirror` as a module value.
pub fn export(mirror: Mirror) -> ModuleExport {
    ModuleExport(Arc::new(mirror))
}
