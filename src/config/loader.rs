// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::config::consts::{DEFAULT_ERROR_SLOT, DEFAULT_EVENT_TYPE, DEFAULT_MAX_DEPTH};
use crate::config::validate_config;
use crate::errors::ConfigError;
use crate::mirror::{Kind, UpperCaseObjects};

/// Classification and mirroring policy.
///
/// Every field is optional in the file; missing fields take the defaults shown
/// below.
///
/// # Fields
/// * `event_type` - Constructor name identifying event-source instances
/// * `event_constructor` - Dotted path of the event constructor inside the host
///   graph; when it resolves, events are detected by direct instance check
/// * `upper_case_objects` - Whether upper-case plain objects are enumerations
///   (copied) or namespaces (recursed into)
/// * `error_slot` - Dotted path of the host's error slot
/// * `max_depth` - Namespace nesting limit
/// * `overrides` - Per-path classification that bypasses the name heuristics
///
/// # Example
/// ```yaml
/// event_type: Event
/// event_constructor: events.Event
/// upper_case_objects: enumeration
/// error_slot: runtime.lastError
/// max_depth: 64
/// overrides:
///   tabs.Update: async_method
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    pub event_type: String,
    pub event_constructor: Option<String>,
    pub upper_case_objects: UpperCaseObjects,
    pub error_slot: String,
    pub max_depth: usize,
    pub overrides: BTreeMap<String, Kind>,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            event_type: DEFAULT_EVENT_TYPE.to_string(),
            event_constructor: None,
            upper_case_objects: UpperCaseObjects::default(),
            error_slot: DEFAULT_ERROR_SLOT.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            overrides: BTreeMap::new(),
        }
    }
}

/// Load a config from a YAML (`.yaml`/`.yml`) or TOML (`.toml`) file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<MirrorConfig, ConfigError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let content = match extension.as_deref() {
        Some("yaml") | Some("yml") | Some("toml") => fs::read_to_string(path)?,
        _ => {
            return Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    let cfg = if extension.as_deref() == Some("toml") {
        toml::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    Ok(cfg)
}

/// Load and validate a config file
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<MirrorConfig, ConfigError> {
    let cfg = load_config(path)?;
    validate_config(&cfg).map_err(|errors| ConfigError::Validation { errors })?;
    Ok(cfg)
}
