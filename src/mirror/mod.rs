// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Classification and mirroring of host API graphs.
//!
//! ```text
//! HostObject ──classify──▶ MirrorPlan ──render──▶ Mirror
//!             (Walker::plan)            (Mirror::render)
//! ```
//!
//! The mirror is isomorphic to the host graph restricted to namespaces and
//! async methods; every other member is the host's own value, by reference.

mod classifier;
mod graph;
pub mod plan;
mod walker;

#[cfg(test)]
mod integration_tests;

pub use classifier::{classify, Classifier, EventSource, Kind, UpperCaseObjects};
pub use graph::{Mirror, MirrorMember, MirrorNamespace};
pub use plan::MirrorPlan;
pub use walker::{mirror, Walker};
