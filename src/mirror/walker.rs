// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Recursive walk over a host graph.
//!
//! Namespaces are recursed into and verbs become mirrored methods. Everything
//! else is copied by reference and never traversed, so constructors stay
//! constructible and event sources keep their listener identity.
//!
//! Host graphs are assumed to be acyclic trees; there is no cycle detection.
//! The depth limit only turns a broken host into an error instead of a stack
//! overflow.

use std::collections::HashMap;
use std::time::Instant;

use crate::config::consts::{DEFAULT_MAX_DEPTH, PATH_SEPARATOR};
use crate::config::MirrorConfig;
use crate::errors::MirrorError;
use crate::host::{Host, HostObject, HostValue};
use crate::mirror::plan::{MirrorPlan, PlanMember, PlanNamespace, PlanNode};
use crate::mirror::{Classifier, Kind, Mirror};
use crate::observability::messages::mirror::{
    MemberClassified, MirrorCompleted, MirrorFailed, MirrorStarted, UnusedOverride,
};
use crate::observability::messages::StructuredLog;

/// Builds mirrors from host graphs.
#[derive(Debug, Clone)]
pub struct Walker {
    classifier: Classifier,
    overrides: HashMap<String, Kind>,
    max_depth: usize,
}

impl Default for Walker {
    fn default() -> Self {
        Self::new(Classifier::default())
    }
}

impl Walker {
    pub fn new(classifier: Classifier) -> Self {
        Self {
            classifier,
            overrides: HashMap::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Builds a walker for `host` from configuration.
    pub fn from_config(config: &MirrorConfig, host: &Host) -> Self {
        Self {
            classifier: Classifier::from_config(config, host.root()),
            overrides: config
                .overrides
                .iter()
                .map(|(path, kind)| (path.clone(), *kind))
                .collect(),
            max_depth: config.max_depth,
        }
    }

    /// Forces the classification of the member at `path`.
    pub fn with_override(mut self, path: impl Into<String>, kind: Kind) -> Self {
        self.overrides.insert(path.into(), kind);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Classifies the whole graph under `root` without building a mirror.
    ///
    /// Overrides that match no member are reported at `warn!`.
    pub fn plan(&self, root: &HostObject) -> Result<MirrorPlan, MirrorError> {
        let plan = MirrorPlan::new(self.plan_namespace(root, String::new(), 0)?);
        for path in self.unused_overrides(&plan) {
            UnusedOverride {
                path,
                kind: self.overrides[path],
            }
            .log();
        }
        Ok(plan)
    }

    /// Override paths that name no member of `plan`, sorted.
    pub fn unused_overrides(&self, plan: &MirrorPlan) -> Vec<&str> {
        let mut unused: Vec<&str> = self
            .overrides
            .keys()
            .map(String::as_str)
            .filter(|path| plan.kind_of(path).is_none())
            .collect();
        unused.sort_unstable();
        unused
    }

    /// Classifies the host graph and renders the mirror.
    pub fn mirror(&self, host: &Host) -> Result<Mirror, MirrorError> {
        let start_msg = MirrorStarted {
            root_members: host.root().len(),
        };
        let span = start_msg.span("mirror");
        let _guard = span.enter();
        start_msg.log();

        let start_time = Instant::now();
        let plan = match self.plan(host.root()) {
            Ok(plan) => plan,
            Err(error) => {
                MirrorFailed { error: &error }.log();
                return Err(error);
            }
        };

        let methods = plan.count(Kind::AsyncMethod);
        let namespaces = plan.count(Kind::Namespace);
        let passthrough = plan.kinds().len() - methods - namespaces;
        let mirror = Mirror::render(plan, host.error_slot().clone());

        MirrorCompleted {
            namespaces,
            methods,
            passthrough,
            duration: start_time.elapsed(),
        }
        .log();

        Ok(mirror)
    }

    fn plan_namespace(
        &self,
        object: &HostObject,
        path: String,
        depth: usize,
    ) -> Result<PlanNamespace, MirrorError> {
        if depth > self.max_depth {
            return Err(MirrorError::DepthExceeded {
                path,
                max_depth: self.max_depth,
            });
        }

        let mut members = Vec::new();
        for (name, value) in object.entries() {
            let member_path = join_path(&path, &name);
            let kind = self.classify_member(&member_path, &name, &value)?;

            let node = match (kind, value) {
                (Kind::Namespace, HostValue::Object(child)) => {
                    PlanNode::Namespace(self.plan_namespace(&child, member_path.clone(), depth + 1)?)
                }
                (Kind::AsyncMethod, HostValue::Function(function)) => PlanNode::Method(function),
                (_, value) => PlanNode::Passthrough(value),
            };

            members.push(PlanMember {
                name,
                path: member_path,
                kind,
                node,
            });
        }

        Ok(PlanNamespace {
            path,
            object: object.clone(),
            members,
        })
    }

    fn classify_member(&self, path: &str, name: &str, value: &HostValue) -> Result<Kind, MirrorError> {
        let Some(kind) = self.overrides.get(path).copied() else {
            let kind = self.classifier.classify(name, value);
            MemberClassified {
                path,
                kind,
                overridden: false,
            }
            .log();
            return Ok(kind);
        };

        let compatible = match kind {
            Kind::Namespace => value.as_object().is_some(),
            Kind::AsyncMethod => value.is_callable(),
            _ => true,
        };
        if !compatible {
            return Err(MirrorError::OverrideMismatch {
                path: path.to_string(),
                kind,
                found: value.type_name(),
            });
        }

        MemberClassified {
            path,
            kind,
            overridden: true,
        }
        .log();
        Ok(kind)
    }
}

/// Mirrors `host` with the default policy.
pub fn mirror(host: &Host) -> Result<Mirror, MirrorError> {
    Walker::default().mirror(host)
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}{}{}", parent, PATH_SEPARATOR, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostFunction;
    use crate::observability::capture::capture_warnings;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use crate::mirror::UpperCaseObjects;

    fn sample_root() -> HostObject {
        let event = HostFunction::noop("Event");
        HostObject::new()
            .with(
                "runtime",
                HostObject::new()
                    .with("PlatformOS", HostObject::new().with("MAC", "mac"))
                    .with("getPlatformInfo", HostFunction::noop("getPlatformInfo")),
            )
            .with("events", HostObject::new().with("Event", event.clone()))
            .with(
                "tabs",
                HostObject::new()
                    .with("update", HostFunction::noop("update"))
                    .with("onUpdated", HostObject::with_prototype(&event))
                    .with("TAB_ID_NONE", -1),
            )
    }

    #[test]
    fn plan_records_kinds_depth_first() {
        let plan = Walker::default().plan(&sample_root()).unwrap();

        assert_eq!(
            plan.kinds(),
            vec![
                ("runtime".to_string(), Kind::Namespace),
                ("runtime.PlatformOS".to_string(), Kind::Enumeration),
                ("runtime.getPlatformInfo".to_string(), Kind::AsyncMethod),
                ("events".to_string(), Kind::Namespace),
                ("events.Event".to_string(), Kind::Constructor),
                ("tabs".to_string(), Kind::Namespace),
                ("tabs.update".to_string(), Kind::AsyncMethod),
                ("tabs.onUpdated".to_string(), Kind::EventInstance),
                ("tabs.TAB_ID_NONE".to_string(), Kind::PlainValue),
            ]
        );
    }

    #[test]
    fn enumerations_are_not_traversed() {
        let plan = Walker::default().plan(&sample_root()).unwrap();
        assert_eq!(plan.kind_of("runtime.PlatformOS.MAC"), None);
    }

    #[test]
    fn namespace_policy_traverses_upper_case_objects() {
        let walker = Walker::new(Classifier::new().with_upper_case_objects(UpperCaseObjects::Namespace));
        let plan = walker.plan(&sample_root()).unwrap();

        assert_eq!(plan.kind_of("runtime.PlatformOS"), Some(Kind::Namespace));
        assert_eq!(plan.kind_of("runtime.PlatformOS.MAC"), Some(Kind::PlainValue));
    }

    #[test]
    fn override_turns_upper_case_verb_into_method() {
        let root = HostObject::new().with(
            "tabs",
            HostObject::new().with("Capture", HostFunction::noop("Capture")),
        );

        let plan = Walker::default().plan(&root).unwrap();
        assert_eq!(plan.kind_of("tabs.Capture"), Some(Kind::Constructor));

        let plan = Walker::default()
            .with_override("tabs.Capture", Kind::AsyncMethod)
            .plan(&root)
            .unwrap();
        assert_eq!(plan.kind_of("tabs.Capture"), Some(Kind::AsyncMethod));
    }

    #[test]
    fn override_can_exclude_a_namespace_from_traversal() {
        let plan = Walker::default()
            .with_override("tabs", Kind::PlainValue)
            .plan(&sample_root())
            .unwrap();

        assert_eq!(plan.kind_of("tabs"), Some(Kind::PlainValue));
        assert_eq!(plan.kind_of("tabs.update"), None);
    }

    #[test]
    fn incompatible_override_is_an_error() {
        let result = Walker::default()
            .with_override("tabs.TAB_ID_NONE", Kind::AsyncMethod)
            .plan(&sample_root());

        assert_eq!(
            result.unwrap_err(),
            MirrorError::OverrideMismatch {
                path: "tabs.TAB_ID_NONE".to_string(),
                kind: Kind::AsyncMethod,
                found: "number",
            }
        );
    }

    #[test]
    fn depth_limit_is_enforced() {
        let root = HostObject::new().with("a", HostObject::new().with("b", HostObject::new().with("c", 1)));

        assert!(Walker::default().with_max_depth(2).plan(&root).is_ok());
        assert_eq!(
            Walker::default().with_max_depth(1).plan(&root).unwrap_err(),
            MirrorError::DepthExceeded {
                path: "a.b".to_string(),
                max_depth: 1,
            }
        );
    }

    #[test]
    fn walking_does_not_mutate_the_host() {
        let root = sample_root();
        let before = root.keys();
        let tabs_before = root.get("tabs").unwrap().as_object().unwrap().keys();

        Walker::default().plan(&root).unwrap();

        assert_eq!(root.keys(), before);
        assert_eq!(root.get("tabs").unwrap().as_object().unwrap().keys(), tabs_before);
    }

    #[test]
    fn unused_overrides_are_reported() {
        let walker = Walker::default()
            .with_override("tabs.update", Kind::AsyncMethod)
            .with_override("tabs.Updaet", Kind::AsyncMethod)
            .with_override("storage.local", Kind::PlainValue);

        let (plan, logs) = capture_warnings(|| walker.plan(&sample_root()));
        let plan = plan.unwrap();

        assert_eq!(walker.unused_overrides(&plan), vec!["storage.local", "tabs.Updaet"]);
        assert!(logs.contains("Override 'tabs.Updaet'"), "logs: {logs}");
        assert!(logs.contains("Override 'storage.local'"), "logs: {logs}");
        assert!(!logs.contains("Override 'tabs.update'"), "logs: {logs}");
    }

    #[test]
    fn override_below_a_passthrough_is_unused() {
        let walker = Walker::default()
            .with_override("tabs", Kind::PlainValue)
            .with_override("tabs.update", Kind::AsyncMethod);

        let plan = walker.plan(&sample_root()).unwrap();
        assert_eq!(walker.unused_overrides(&plan), vec!["tabs.update"]);
    }

    #[test]
    fn mirroring_never_invokes_host_functions() {
        let invocations = Arc::new(AtomicUsize::new(0));
        let counting = |name: &str| {
            let invocations = invocations.clone();
            HostFunction::new(name, move |_, _| {
                invocations.fetch_add(1, Ordering::SeqCst);
                Ok(HostValue::Undefined)
            })
        };

        let event = counting("Event");
        let root = HostObject::new()
            .with("events", HostObject::new().with("Event", event.clone()))
            .with(
                "tabs",
                HostObject::new()
                    .with("update", counting("update"))
                    .with("Tab", counting("Tab"))
                    .with("Status", HostObject::new().with("refresh", counting("refresh")))
                    .with("onUpdated", HostObject::with_prototype(&event)),
            );
        let host = Host::new(root);

        let mirror = Walker::default()
            .with_override("tabs.Tab", Kind::AsyncMethod)
            .mirror(&host)
            .unwrap();

        assert_eq!(mirror.get("tabs.update").map(|m| m.kind()), Some(Kind::AsyncMethod));
        assert_eq!(mirror.get("tabs.Status").map(|m| m.kind()), Some(Kind::Enumeration));
        assert_eq!(mirror.get("events.Event").map(|m| m.kind()), Some(Kind::Constructor));
        assert_eq!(invocations.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn join_path_handles_root() {
        assert_eq!(join_path("", "tabs"), "tabs");
        assert_eq!(join_path("storage.local", "get"), "storage.local.get");
    }
}
