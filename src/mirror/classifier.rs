// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Member classification.
//!
//! Host graphs come without a schema, so every member is classified from its
//! name and runtime shape alone:
//!
//! | value                          | name starts upper-case | kind            |
//! |--------------------------------|------------------------|-----------------|
//! | function                       | yes                    | `Constructor`   |
//! | function                       | no                     | `AsyncMethod`   |
//! | object of the event type       | either                 | `EventInstance` |
//! | plain object                   | yes                    | `Enumeration`\* |
//! | plain object                   | no                     | `Namespace`     |
//! | anything else                  | either                 | `PlainValue`    |
//!
//! \* or `Namespace`, under [`UpperCaseObjects::Namespace`].
//!
//! Objects produced by some other constructor are treated as opaque host data
//! (`PlainValue`): they are not namespaces and must not be recursed into.
//!
//! A verb whose host name starts upper-case is classified as a constructor.
//! That is a limitation of the heuristic; use overrides where it matters.

use serde::Deserialize;
use std::fmt::{Display, Formatter};

use crate::config::consts::DEFAULT_EVENT_TYPE;
use crate::config::MirrorConfig;
use crate::host::{HostFunction, HostObject, HostValue};
use crate::observability::messages::mirror::EventConstructorUnresolved;
use crate::observability::messages::StructuredLog;

/// What a host member is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// Plain object to recurse into.
    Namespace,
    /// Callback-taking verb, replaced by a deferred-returning method.
    AsyncMethod,
    /// Type constructor, copied by reference.
    Constructor,
    /// Upper-case constant set, copied by reference.
    Enumeration,
    /// Event-source instance, copied by reference so listener identity survives.
    EventInstance,
    /// Primitives and opaque data, copied by reference.
    PlainValue,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Namespace => "namespace",
            Kind::AsyncMethod => "async_method",
            Kind::Constructor => "constructor",
            Kind::Enumeration => "enumeration",
            Kind::EventInstance => "event_instance",
            Kind::PlainValue => "plain_value",
        }
    }

    /// Kinds that are copied into the mirror unchanged.
    pub fn is_passthrough(self) -> bool {
        !matches!(self, Kind::Namespace | Kind::AsyncMethod)
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How plain objects with an upper-case name are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpperCaseObjects {
    /// Treat as an enumeration and copy by reference.
    #[default]
    Enumeration,
    /// Treat as an ordinary namespace and recurse.
    Namespace,
}

/// How event-source instances are recognised.
#[derive(Debug, Clone)]
pub enum EventSource {
    /// The object's prototype constructor carries this name.
    Named(String),
    /// The object was created by exactly this constructor.
    Constructor(HostFunction),
}

/// Pure, stateless classification policy.
#[derive(Debug, Clone)]
pub struct Classifier {
    event_source: EventSource,
    upper_case_objects: UpperCaseObjects,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            event_source: EventSource::Named(DEFAULT_EVENT_TYPE.to_string()),
            upper_case_objects: UpperCaseObjects::default(),
        }
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a classifier for `root` from configuration.
    ///
    /// When `event_constructor` resolves to a function inside `root`, events are
    /// recognised by direct instance check; otherwise by constructor name.
    pub fn from_config(config: &MirrorConfig, root: &HostObject) -> Self {
        let event_source = match config.event_constructor.as_deref() {
            Some(path) => match root.lookup_path(path).and_then(|value| value.as_function().cloned()) {
                Some(constructor) => EventSource::Constructor(constructor),
                None => {
                    EventConstructorUnresolved {
                        path,
                        event_type: &config.event_type,
                    }
                    .log();
                    EventSource::Named(config.event_type.clone())
                }
            },
            None => EventSource::Named(config.event_type.clone()),
        };

        Self {
            event_source,
            upper_case_objects: config.upper_case_objects,
        }
    }

    pub fn with_event_type_name(mut self, name: impl Into<String>) -> Self {
        self.event_source = EventSource::Named(name.into());
        self
    }

    pub fn with_event_constructor(mut self, constructor: HostFunction) -> Self {
        self.event_source = EventSource::Constructor(constructor);
        self
    }

    pub fn with_upper_case_objects(mut self, policy: UpperCaseObjects) -> Self {
        self.upper_case_objects = policy;
        self
    }

    pub fn event_source(&self) -> &EventSource {
        &self.event_source
    }

    /// Classifies one member. Never invokes `value`.
    pub fn classify(&self, name: &str, value: &HostValue) -> Kind {
        match value {
            HostValue::Function(_) if starts_upper_case(name) => Kind::Constructor,
            HostValue::Function(_) => Kind::AsyncMethod,
            HostValue::Object(object) if self.is_event_source(object) => Kind::EventInstance,
            HostValue::Object(object) if object.is_plain() => {
                if starts_upper_case(name) && self.upper_case_objects == UpperCaseObjects::Enumeration {
                    Kind::Enumeration
                } else {
                    Kind::Namespace
                }
            }
            _ => Kind::PlainValue,
        }
    }

    fn is_event_source(&self, object: &HostObject) -> bool {
        match &self.event_source {
            EventSource::Constructor(constructor) => object.is_instance_of(constructor),
            EventSource::Named(name) => object
                .prototype()
                .map(|prototype| prototype.name() == name)
                .unwrap_or(false),
        }
    }
}

/// Classifies with the default policy.
pub fn classify(name: &str, value: &HostValue) -> Kind {
    Classifier::default().classify(name, value)
}

fn starts_upper_case(name: &str) -> bool {
    name.chars().next().map(char::is_uppercase).unwrap_or(false)
}
