// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Dynamically typed values making up a host API graph.
//!
//! Objects and functions are reference types: cloning a [`HostValue`] that holds
//! one of them clones the handle, not the underlying data, and
//! [`HostValue::same_ref`] compares identity the way the host would.

use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::consts::PATH_SEPARATOR;
use crate::errors::HostError;

/// Native body of a host function: `(this, arguments) -> return value`.
pub type NativeFn =
    dyn Fn(&HostValue, Vec<HostValue>) -> Result<HostValue, HostError> + Send + Sync;

/// A value living in the host graph.
#[derive(Clone, Default)]
pub enum HostValue {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<HostValue>),
    Object(HostObject),
    Function(HostFunction),
}

impl HostValue {
    /// Host-style type tag, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            HostValue::Undefined => "undefined",
            HostValue::Null => "null",
            HostValue::Bool(_) => "boolean",
            HostValue::Number(_) => "number",
            HostValue::String(_) => "string",
            HostValue::List(_) => "list",
            HostValue::Object(_) => "object",
            HostValue::Function(_) => "function",
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, HostValue::Undefined)
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, HostValue::Function(_))
    }

    pub fn as_object(&self) -> Option<&HostObject> {
        match self {
            HostValue::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&HostFunction> {
        match self {
            HostValue::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            HostValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Identity comparison for reference types, value comparison otherwise.
    pub fn same_ref(&self, other: &HostValue) -> bool {
        match (self, other) {
            (HostValue::Object(a), HostValue::Object(b)) => a.same_ref(b),
            (HostValue::Function(a), HostValue::Function(b)) => a.same_ref(b),
            (HostValue::Object(_), _) | (HostValue::Function(_), _) => false,
            (a, b) => a == b,
        }
    }

    /// Renders the value as JSON. Functions become `"[function name]"` and
    /// `undefined` becomes `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            HostValue::Undefined | HostValue::Null => serde_json::Value::Null,
            HostValue::Bool(b) => serde_json::Value::Bool(*b),
            HostValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            HostValue::String(s) => serde_json::Value::String(s.clone()),
            HostValue::List(items) => {
                serde_json::Value::Array(items.iter().map(HostValue::to_json).collect())
            }
            HostValue::Object(object) => serde_json::Value::Object(
                object
                    .entries()
                    .into_iter()
                    .map(|(key, value)| (key, value.to_json()))
                    .collect(),
            ),
            HostValue::Function(function) => {
                serde_json::Value::String(format!("[function {}]", function.name()))
            }
        }
    }
}

/// Lists compare element-wise; objects and functions compare by identity.
impl PartialEq for HostValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (HostValue::Undefined, HostValue::Undefined) => true,
            (HostValue::Null, HostValue::Null) => true,
            (HostValue::Bool(a), HostValue::Bool(b)) => a == b,
            (HostValue::Number(a), HostValue::Number(b)) => a == b,
            (HostValue::String(a), HostValue::String(b)) => a == b,
            (HostValue::List(a), HostValue::List(b)) => a == b,
            (HostValue::Object(a), HostValue::Object(b)) => a.same_ref(b),
            (HostValue::Function(a), HostValue::Function(b)) => a.same_ref(b),
            _ => false,
        }
    }
}

impl Debug for HostValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Undefined => write!(f, "undefined"),
            HostValue::Null => write!(f, "null"),
            HostValue::Bool(b) => write!(f, "{}", b),
            HostValue::Number(n) => write!(f, "{}", n),
            HostValue::String(s) => write!(f, "{:?}", s),
            HostValue::List(items) => f.debug_list().entries(items).finish(),
            HostValue::Object(object) => Debug::fmt(object, f),
            HostValue::Function(function) => Debug::fmt(function, f),
        }
    }
}

/// String conversion in the host's manner (`undefined`, `[object Object]`, ...).
impl Display for HostValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Undefined => write!(f, "undefined"),
            HostValue::Null => write!(f, "null"),
            HostValue::Bool(b) => write!(f, "{}", b),
            HostValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            HostValue::Number(n) => write!(f, "{}", n),
            HostValue::String(s) => write!(f, "{}", s),
            HostValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            HostValue::Object(_) => write!(f, "[object Object]"),
            HostValue::Function(function) => write!(f, "[function {}]", function.name()),
        }
    }
}

impl From<bool> for HostValue {
    fn from(value: bool) -> Self {
        HostValue::Bool(value)
    }
}

impl From<i32> for HostValue {
    fn from(value: i32) -> Self {
        HostValue::Number(f64::from(value))
    }
}

impl From<f64> for HostValue {
    fn from(value: f64) -> Self {
        HostValue::Number(value)
    }
}

impl From<&str> for HostValue {
    fn from(value: &str) -> Self {
        HostValue::String(value.to_string())
    }
}

impl From<String> for HostValue {
    fn from(value: String) -> Self {
        HostValue::String(value)
    }
}

impl From<Vec<HostValue>> for HostValue {
    fn from(value: Vec<HostValue>) -> Self {
        HostValue::List(value)
    }
}

impl From<HostObject> for HostValue {
    fn from(value: HostObject) -> Self {
        HostValue::Object(value)
    }
}

impl From<HostFunction> for HostValue {
    fn from(value: HostFunction) -> Self {
        HostValue::Function(value)
    }
}

struct ObjectData {
    prototype: Option<HostFunction>,
    properties: RwLock<Vec<(String, HostValue)>>,
}

/// Shared handle to a host object: an insertion-ordered property list plus an
/// optional prototype constructor.
///
/// Properties are interior-mutable so the host can update its own graph
/// (error slot, replaced methods) while mirrors hold references into it.
#[derive(Clone)]
pub struct HostObject(Arc<ObjectData>);

impl HostObject {
    /// A plain object with no prototype.
    pub fn new() -> Self {
        Self(Arc::new(ObjectData {
            prototype: None,
            properties: RwLock::new(Vec::new()),
        }))
    }

    /// An instance created by `constructor`.
    pub fn with_prototype(constructor: &HostFunction) -> Self {
        Self(Arc::new(ObjectData {
            prototype: Some(constructor.clone()),
            properties: RwLock::new(Vec::new()),
        }))
    }

    /// Builder-style `set`.
    pub fn with(self, key: impl Into<String>, value: impl Into<HostValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn prototype(&self) -> Option<&HostFunction> {
        self.0.prototype.as_ref()
    }

    /// True for objects that were not produced by a constructor.
    pub fn is_plain(&self) -> bool {
        self.0.prototype.is_none()
    }

    /// Direct instance check against a constructor, by reference identity.
    pub fn is_instance_of(&self, constructor: &HostFunction) -> bool {
        self.prototype()
            .map(|prototype| prototype.same_ref(constructor))
            .unwrap_or(false)
    }

    pub fn get(&self, key: &str) -> Option<HostValue> {
        let properties = self.0.properties.read().unwrap_or_else(PoisonError::into_inner);
        properties
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.clone())
    }

    /// Sets a property, keeping its original position when it already exists.
    pub fn set(&self, key: impl Into<String>, value: impl Into<HostValue>) {
        let key = key.into();
        let value = value.into();
        let mut properties = self.0.properties.write().unwrap_or_else(PoisonError::into_inner);
        match properties.iter_mut().find(|(name, _)| *name == key) {
            Some(slot) => slot.1 = value,
            None => properties.push((key, value)),
        }
    }

    pub fn remove(&self, key: &str) -> Option<HostValue> {
        let mut properties = self.0.properties.write().unwrap_or_else(PoisonError::into_inner);
        let index = properties.iter().position(|(name, _)| name == key)?;
        Some(properties.remove(index).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Own property names in insertion order.
    pub fn keys(&self) -> Vec<String> {
        let properties = self.0.properties.read().unwrap_or_else(PoisonError::into_inner);
        properties.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Snapshot of own properties in insertion order.
    pub fn entries(&self) -> Vec<(String, HostValue)> {
        let properties = self.0.properties.read().unwrap_or_else(PoisonError::into_inner);
        properties.clone()
    }

    pub fn len(&self) -> usize {
        let properties = self.0.properties.read().unwrap_or_else(PoisonError::into_inner);
        properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolves a dotted path such as `runtime.lastError`.
    pub fn lookup_path(&self, path: &str) -> Option<HostValue> {
        let mut segments = path.split(PATH_SEPARATOR);
        let mut current = self.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    pub fn same_ref(&self, other: &HostObject) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for HostObject {
    fn default() -> Self {
        Self::new()
    }
}

/// Shallow on purpose: host graphs can be large, and only the keys are useful
/// when debugging classification.
impl Debug for HostObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("HostObject");
        if let Some(prototype) = self.prototype() {
            s.field("prototype", &prototype.name());
        }
        s.field("keys", &self.keys()).finish()
    }
}

struct FunctionData {
    name: String,
    body: Box<NativeFn>,
}

/// Shared handle to a callable host function.
#[derive(Clone)]
pub struct HostFunction(Arc<FunctionData>);

impl HostFunction {
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&HostValue, Vec<HostValue>) -> Result<HostValue, HostError> + Send + Sync + 'static,
    {
        Self(Arc::new(FunctionData {
            name: name.into(),
            body: Box::new(body),
        }))
    }

    /// A function that ignores its arguments and returns `undefined`.
    pub fn noop(name: impl Into<String>) -> Self {
        Self::new(name, |_, _| Ok(HostValue::Undefined))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Invokes the function with `this` bound to `receiver`.
    pub fn call(&self, receiver: &HostValue, args: Vec<HostValue>) -> Result<HostValue, HostError> {
        (self.0.body)(receiver, args)
    }

    pub fn same_ref(&self, other: &HostFunction) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Debug for HostFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[function {}]", self.name())
    }
}
