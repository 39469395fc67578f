// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod call;
mod config;
mod host;
mod mirror;

pub use call::CallError;
pub use config::{ConfigError, ValidationError};
pub use host::HostError;
pub use mirror::MirrorError;
