// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Response normalization: turns the host's callback-plus-error-slot protocol
//! into a single outcome.

use std::sync::Arc;

use crate::call::deferred::{Outcome, Settler};
use crate::errors::CallError;
use crate::host::{ErrorSlot, HostFunction, HostObject, HostValue};
use crate::observability::messages::call::{CallSettled, LateOutcomeIgnored};
use crate::observability::messages::StructuredLog;

/// Name given to the injected callback.
const RESPONSE_CALLBACK: &str = "respond";

/// Collapsed result list of a completed call.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// The host passed no results.
    NoValue,
    /// The host passed exactly one result, delivered unwrapped.
    Single(HostValue),
    /// The host passed two or more results, delivered in order.
    Many(Vec<HostValue>),
}

impl Response {
    /// Collapses a raw result list.
    ///
    /// ```
    /// use chromise::call::Response;
    /// use chromise::host::HostValue;
    ///
    /// assert_eq!(Response::collapse(vec![]), Response::NoValue);
    /// assert_eq!(Response::collapse(vec![HostValue::from(42)]), Response::Single(HostValue::from(42)));
    /// ```
    pub fn collapse(mut results: Vec<HostValue>) -> Self {
        match results.len() {
            0 => Response::NoValue,
            1 => Response::Single(results.remove(0)),
            _ => Response::Many(results),
        }
    }

    pub fn is_no_value(&self) -> bool {
        matches!(self, Response::NoValue)
    }

    /// Flattens into a single host value: `undefined`, the value, or a list.
    pub fn into_value(self) -> HostValue {
        match self {
            Response::NoValue => HostValue::Undefined,
            Response::Single(value) => value,
            Response::Many(values) => HostValue::List(values),
        }
    }
}

/// Reads the error slot once and decides the outcome.
///
/// Any object in the slot is a failure, whatever its shape; the results are
/// ignored in that case. Lists count as objects and carry no message.
pub fn normalize(error_slot: &dyn ErrorSlot, results: Vec<HostValue>) -> Outcome {
    match error_slot.read() {
        HostValue::Object(error) => Err(CallError::Host {
            message: error_message(&error),
        }),
        HostValue::List(_) => Err(CallError::Host {
            message: String::new(),
        }),
        _ => Ok(Response::collapse(results)),
    }
}

fn error_message(error: &HostObject) -> String {
    match error.get("message") {
        Some(HostValue::String(message)) => message,
        None | Some(HostValue::Undefined) => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Builds the callback appended to a deferred call.
///
/// The error slot is read synchronously inside the invocation, before control
/// returns to the host.
pub(crate) fn response_callback(
    path: String,
    error_slot: Arc<dyn ErrorSlot>,
    settler: Settler,
) -> HostFunction {
    HostFunction::new(RESPONSE_CALLBACK, move |_, results| {
        let outcome = normalize(error_slot.as_ref(), results);
        settle(&path, &settler, outcome, "repeated callback");
        Ok(HostValue::Undefined)
    })
}

/// Settles and logs; `source` names the outcome if it arrives too late.
pub(crate) fn settle(path: &str, settler: &Settler, outcome: Outcome, source: &str) {
    let error = outcome.as_ref().err().cloned();
    if settler.settle(outcome) {
        CallSettled {
            path,
            error: error.as_ref().map(|e| e as &dyn std::error::Error),
        }
        .log();
    } else {
        LateOutcomeIgnored { path, source }.log();
    }
}
