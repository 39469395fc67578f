// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Intermediate representation of a classified host graph.
//!
//! The walker produces a [`MirrorPlan`] in one pass; rendering it into a
//! [`Mirror`](crate::mirror::Mirror) is a separate step, so classification can be
//! inspected and tested without touching the call surface.

use crate::host::{HostFunction, HostObject, HostValue};
use crate::mirror::Kind;

/// Classified host graph.
#[derive(Debug, Clone)]
pub struct MirrorPlan {
    root: PlanNamespace,
}

/// A namespace and its classified members, in host order.
#[derive(Debug, Clone)]
pub struct PlanNamespace {
    /// Dotted path; empty for the root.
    pub path: String,
    /// The host object; receiver for the namespace's methods.
    pub object: HostObject,
    pub members: Vec<PlanMember>,
}

#[derive(Debug, Clone)]
pub struct PlanMember {
    pub name: String,
    pub path: String,
    pub kind: Kind,
    pub node: PlanNode,
}

#[derive(Debug, Clone)]
pub enum PlanNode {
    Namespace(PlanNamespace),
    Method(HostFunction),
    Passthrough(HostValue),
}

impl MirrorPlan {
    pub fn new(root: PlanNamespace) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &PlanNamespace {
        &self.root
    }

    /// Every member path with its kind, depth-first in host order.
    pub fn kinds(&self) -> Vec<(String, Kind)> {
        let mut out = Vec::new();
        collect_kinds(&self.root, &mut out);
        out
    }

    pub fn kind_of(&self, path: &str) -> Option<Kind> {
        self.kinds()
            .into_iter()
            .find(|(member_path, _)| member_path == path)
            .map(|(_, kind)| kind)
    }

    pub fn count(&self, kind: Kind) -> usize {
        self.kinds().iter().filter(|(_, k)| *k == kind).count()
    }

    pub fn into_root(self) -> PlanNamespace {
        self.root
    }
}

fn collect_kinds(namespace: &PlanNamespace, out: &mut Vec<(String, Kind)>) {
    for member in &namespace.members {
        out.push((member.path.clone(), member.kind));
        if let PlanNode::Namespace(child) = &member.node {
            collect_kinds(child, out);
        }
    }
}
