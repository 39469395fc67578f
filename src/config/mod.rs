// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod consts;
mod loader;
mod validation;

pub use loader::{load_and_validate_config, load_config, MirrorConfig};
pub use validation::validate_config;
