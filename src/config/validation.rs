// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Validation of loaded mirror configuration.
//!
//! All problems are collected rather than stopping at the first one, so a
//! broken file can be fixed in a single pass.

use crate::config::consts::PATH_SEPARATOR;
use crate::config::MirrorConfig;
use crate::errors::ValidationError;

/// Validates a configuration, returning every problem found.
///
/// # Example
/// ```
/// use chromise::config::{validate_config, MirrorConfig};
///
/// let mut config = MirrorConfig::default();
/// assert!(validate_config(&config).is_ok());
///
/// config.max_depth = 0;
/// assert_eq!(validate_config(&config).unwrap_err().len(), 1);
/// ```
pub fn validate_config(config: &MirrorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.event_type.is_empty() {
        errors.push(ValidationError::EmptyValue { field: "event_type" });
    }
    if let Some(path) = &config.event_constructor {
        check_path("event_constructor", path, &mut errors);
    }
    check_path("error_slot", &config.error_slot, &mut errors);
    if config.max_depth == 0 {
        errors.push(ValidationError::ZeroMaxDepth);
    }
    for path in config.overrides.keys() {
        check_path("overrides", path, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_path(field: &'static str, path: &str, errors: &mut Vec<ValidationError>) {
    if path.is_empty() {
        errors.push(ValidationError::EmptyValue { field });
    } else if path.split(PATH_SEPARATOR).any(str::is_empty) {
        errors.push(ValidationError::EmptyPathSegment {
            field,
            path: path.to_string(),
        });
    }
}
