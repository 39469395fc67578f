// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod call;           // call adapters + deferred results
pub mod config;         // classification policy
pub mod errors;         // error handling
pub mod host;           // host value model
pub mod mirror;         // classifier + walker
pub mod observability;
pub mod publish;        // global attach / module export
