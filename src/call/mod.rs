// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Call adaptation: from a callback-taking host method to a deferred result.
//!
//! ```text
//! MirroredMethod::call(args) → CallAdapter ─┬─ immediate() → host return value
//!                                           └─ deferred()  → Deferred ← response callback ← host
//! ```
//!
//! The host is trusted to invoke the injected callback at most once; a repeated
//! invocation is ignored.

mod adapter;
mod deferred;
mod method;
mod response;

pub use adapter::CallAdapter;
pub use deferred::{Deferred, DeferredState, Outcome, Settler};
pub use method::MirroredMethod;
pub use response::{normalize, Response};
