// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::call::response::{response_callback, settle};
use crate::call::Deferred;
use crate::errors::{CallError, HostError};
use crate::host::{ErrorSlot, HostFunction, HostObject, HostValue};
use crate::observability::messages::call::CallDispatched;
use crate::observability::messages::StructuredLog;

/// One invocation of a mirrored method.
///
/// Captures the receiver, the target function and a copy of the arguments when
/// created. Exactly one of [`immediate`](Self::immediate) or
/// [`deferred`](Self::deferred) runs it; both consume the adapter.
pub struct CallAdapter {
    path: String,
    receiver: HostObject,
    method: Option<HostFunction>,
    args: Vec<HostValue>,
    error_slot: Arc<dyn ErrorSlot>,
}

impl CallAdapter {
    /// `method` is `None` when the receiver no longer holds a function under the
    /// mirrored name; running the adapter then fails as not callable.
    pub fn new(
        path: impl Into<String>,
        receiver: HostObject,
        method: Option<HostFunction>,
        args: &[HostValue],
        error_slot: Arc<dyn ErrorSlot>,
    ) -> Self {
        Self {
            path: path.into(),
            receiver,
            method,
            args: args.to_vec(),
            error_slot,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn receiver(&self) -> &HostObject {
        &self.receiver
    }

    pub fn method(&self) -> Option<&HostFunction> {
        self.method.as_ref()
    }

    pub fn args(&self) -> &[HostValue] {
        &self.args
    }

    /// Runs the host method synchronously with exactly the captured arguments.
    ///
    /// No callback is injected and a host throw is returned unchanged.
    pub fn immediate(self) -> Result<HostValue, HostError> {
        CallDispatched {
            path: &self.path,
            arg_count: self.args.len(),
            deferred: false,
        }
        .log();

        let method = self.method.ok_or_else(|| {
            HostError::new(
                CallError::NotCallable {
                    path: self.path.clone(),
                }
                .to_string(),
            )
        })?;
        method.call(&HostValue::Object(self.receiver), self.args)
    }

    /// Runs the host method with a response callback appended and returns the
    /// pending result.
    ///
    /// A synchronous throw rejects the returned future rather than escaping.
    pub fn deferred(self) -> Deferred {
        let (deferred, settler) = Deferred::channel(self.path.clone());

        CallDispatched {
            path: &self.path,
            arg_count: self.args.len(),
            deferred: true,
        }
        .log();

        let Some(method) = self.method else {
            let outcome = Err(CallError::NotCallable {
                path: self.path.clone(),
            });
            settle(&self.path, &settler, outcome, "not-callable failure");
            return deferred;
        };

        let callback = response_callback(self.path.clone(), self.error_slot, settler.clone());
        let mut args = self.args;
        args.push(HostValue::Function(callback));

        if let Err(error) = method.call(&HostValue::Object(self.receiver), args) {
            let outcome = Err(CallError::Thrown {
                message: error.message,
            });
            settle(&self.path, &settler, outcome, "throw after callback");
        }

        deferred
    }
}

impl std::fmt::Debug for CallAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallAdapter")
            .field("path", &self.path)
            .field("method", &self.method)
            .field("args", &self.args)
            .finish()
    }
}
