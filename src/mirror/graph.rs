// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The consumer-facing mirror graph.

use std::sync::Arc;

use crate::call::{CallAdapter, MirroredMethod};
use crate::config::consts::PATH_SEPARATOR;
use crate::errors::MirrorError;
use crate::host::{ErrorSlot, HostValue};
use crate::mirror::plan::{MirrorPlan, PlanNamespace, PlanNode};
use crate::mirror::Kind;

/// A member of a mirrored namespace.
#[derive(Debug, Clone)]
pub enum MirrorMember {
    Namespace(MirrorNamespace),
    Method(MirroredMethod),
    /// A host value copied by reference, with the kind it was classified as.
    Value { kind: Kind, value: HostValue },
}

impl MirrorMember {
    pub fn kind(&self) -> Kind {
        match self {
            MirrorMember::Namespace(_) => Kind::Namespace,
            MirrorMember::Method(_) => Kind::AsyncMethod,
            MirrorMember::Value { kind, .. } => *kind,
        }
    }

    pub fn as_namespace(&self) -> Option<&MirrorNamespace> {
        match self {
            MirrorMember::Namespace(namespace) => Some(namespace),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&MirroredMethod> {
        match self {
            MirrorMember::Method(method) => Some(method),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&HostValue> {
        match self {
            MirrorMember::Value { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// A mirrored namespace: an owned, ordered name → member map.
///
/// Each mirror owns its namespaces, so changing one mirror never affects
/// another mirror of the same host.
#[derive(Debug, Clone, Default)]
pub struct MirrorNamespace {
    members: Vec<(String, MirrorMember)>,
}

impl MirrorNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&MirrorMember> {
        self.members
            .iter()
            .find(|(member, _)| member == name)
            .map(|(_, member)| member)
    }

    pub fn namespace(&self, name: &str) -> Option<&MirrorNamespace> {
        self.get(name).and_then(MirrorMember::as_namespace)
    }

    pub fn method(&self, name: &str) -> Option<&MirroredMethod> {
        self.get(name).and_then(MirrorMember::as_method)
    }

    pub fn value(&self, name: &str) -> Option<&HostValue> {
        self.get(name).and_then(MirrorMember::as_value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Member names in host order.
    pub fn names(&self) -> Vec<&str> {
        self.members.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MirrorMember)> {
        self.members.iter().map(|(name, member)| (name.as_str(), member))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Inserts or replaces a member, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, member: MirrorMember) -> Option<MirrorMember> {
        let name = name.into();
        match self.members.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => Some(std::mem::replace(&mut slot.1, member)),
            None => {
                self.members.push((name, member));
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<MirrorMember> {
        let index = self.members.iter().position(|(member, _)| member == name)?;
        Some(self.members.remove(index).1)
    }

    fn render(plan: PlanNamespace, error_slot: &Arc<dyn ErrorSlot>) -> Self {
        let receiver = plan.object;
        let members = plan
            .members
            .into_iter()
            .map(|member| {
                let rendered = match member.node {
                    PlanNode::Namespace(child) => {
                        MirrorMember::Namespace(MirrorNamespace::render(child, error_slot))
                    }
                    PlanNode::Method(function) => MirrorMember::Method(MirroredMethod::new(
                        member.path,
                        member.name.clone(),
                        receiver.clone(),
                        function,
                        error_slot.clone(),
                    )),
                    PlanNode::Passthrough(value) => MirrorMember::Value {
                        kind: member.kind,
                        value,
                    },
                };
                (member.name, rendered)
            })
            .collect();

        Self { members }
    }
}

/// Mirror of a host API graph.
///
/// ```
/// use chromise::host::demo;
/// use chromise::mirror::{mirror, Kind};
///
/// let mirror = mirror(&demo::extension_host()).unwrap();
/// assert_eq!(mirror.get("tabs.update").map(|m| m.kind()), Some(Kind::AsyncMethod));
/// assert_eq!(mirror.get("events.Event").map(|m| m.kind()), Some(Kind::Constructor));
/// ```
#[derive(Debug, Clone)]
pub struct Mirror {
    root: MirrorNamespace,
}

impl Mirror {
    /// Renders a plan; methods report failures through `error_slot`.
    pub fn render(plan: MirrorPlan, error_slot: Arc<dyn ErrorSlot>) -> Self {
        Self {
            root: MirrorNamespace::render(plan.into_root(), &error_slot),
        }
    }

    pub fn root(&self) -> &MirrorNamespace {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut MirrorNamespace {
        &mut self.root
    }

    /// Looks up a member by dotted path.
    pub fn get(&self, path: &str) -> Option<&MirrorMember> {
        let mut segments = path.split(PATH_SEPARATOR);
        let mut current = self.root.get(segments.next()?)?;
        for segment in segments {
            current = current.as_namespace()?.get(segment)?;
        }
        Some(current)
    }

    pub fn namespace(&self, path: &str) -> Option<&MirrorNamespace> {
        self.get(path).and_then(MirrorMember::as_namespace)
    }

    pub fn method(&self, path: &str) -> Option<&MirroredMethod> {
        self.get(path).and_then(MirrorMember::as_method)
    }

    pub fn value(&self, path: &str) -> Option<&HostValue> {
        self.get(path).and_then(MirrorMember::as_value)
    }

    /// Starts a call to the mirrored method at `path`.
    pub fn call(&self, path: &str, args: &[HostValue]) -> Result<CallAdapter, MirrorError> {
        self.method(path)
            .map(|method| method.call(args))
            .ok_or_else(|| MirrorError::UnknownMethod {
                path: path.to_string(),
            })
    }

    /// Every member path with its kind, depth-first in host order.
    pub fn paths(&self) -> Vec<(String, Kind)> {
        let mut out = Vec::new();
        collect_paths(&self.root, "", &mut out);
        out
    }
}

fn collect_paths(namespace: &MirrorNamespace, prefix: &str, out: &mut Vec<(String, Kind)>) {
    for (name, member) in namespace.iter() {
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}{}{}", prefix, PATH_SEPARATOR, name)
        };
        out.push((path.clone(), member.kind()));
        if let MirrorMember::Namespace(child) = member {
            collect_paths(child, &path, out);
        }
    }
}
