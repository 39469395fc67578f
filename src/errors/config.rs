// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use thiserror::Error;

/// Problems found while validating a loaded [`MirrorConfig`](crate::config::MirrorConfig).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required name or path is empty
    #[error("'{field}' must not be empty")]
    EmptyValue {
        /// The offending configuration field
        field: &'static str,
    },
    /// A dotted path contains an empty segment (`tabs..update`, `.tabs`)
    #[error("path '{path}' in '{field}' contains an empty segment")]
    EmptyPathSegment {
        field: &'static str,
        path: String,
    },
    /// Recursion limit of zero would refuse every host
    #[error("'max_depth' must be greater than zero")]
    ZeroMaxDepth,
}

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The file extension is neither YAML nor TOML.
    #[error("unsupported config format for '{}': expected .yaml, .yml or .toml", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("configuration validation failed:\n{}", join_lines(.errors))]
    Validation { errors: Vec<ValidationError> },
}

fn join_lines(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
