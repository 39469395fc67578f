// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Constructor name identifying event-source instances
pub const DEFAULT_EVENT_TYPE: &str = "Event";
/// Dotted path of the host's error slot inside the API graph
pub const DEFAULT_ERROR_SLOT: &str = "runtime.lastError";
/// Maximum namespace nesting accepted before the walk is aborted
pub const DEFAULT_MAX_DEPTH: usize = 64;
/// Separator between segments of a member path (`tabs.update`)
pub const PATH_SEPARATOR: char = '.';
