// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! A small extension-style host used by the CLI and the integration tests.
//!
//! The layout follows the usual shape of a browser extension API: namespaces of
//! callback-taking verbs, upper-case enumerations and constructors, event-source
//! instances, and plain constants. Failures are reported through
//! `runtime.lastError`, which is populated only while the callback runs.

use crate::errors::HostError;
use crate::host::{Host, HostFunction, HostObject, HostValue};

/// Id of the only tab the demo host knows about.
pub const DEMO_TAB_ID: i32 = 1;

/// Builds the demo host with its error slot at `runtime.lastError`.
pub fn extension_host() -> Host {
    Host::new(extension_api())
}

/// Builds the demo API root.
pub fn extension_api() -> HostObject {
    let event = HostFunction::noop("Event");

    let runtime = HostObject::new()
        .with("lastError", HostValue::Undefined)
        .with("id", "chromise-demo")
        .with(
            "PlatformOS",
            HostObject::new()
                .with("MAC", "mac")
                .with("WIN", "win")
                .with("LINUX", "linux"),
        )
        .with(
            "getPlatformInfo",
            HostFunction::new("getPlatformInfo", |_, args| {
                let info = HostObject::new().with("os", "linux").with("arch", "x86-64");
                invoke_callback(&args, vec![info.into()])
            }),
        )
        .with(
            "getManifest",
            HostFunction::new("getManifest", |_, _| {
                Ok(HostObject::new()
                    .with("name", "chromise demo")
                    .with("manifest_version", 3)
                    .into())
            }),
        )
        .with("onInstalled", event_instance(&event));

    let tabs = HostObject::new()
        .with("TAB_ID_NONE", -1)
        .with("onUpdated", event_instance(&event))
        .with("onRemoved", event_instance(&event))
        .with("get", {
            let runtime = runtime.clone();
            HostFunction::new("get", move |_, args| {
                let tab_id = args.first().and_then(HostValue::as_number);
                match tab_id {
                    Some(id) if id == f64::from(DEMO_TAB_ID) => {
                        invoke_callback(&args, vec![demo_tab("https://example.com").into()])
                    }
                    _ => fail_with(&runtime, &args, format!("No tab with id: {}.", display_arg(&args, 0))),
                }
            })
        })
        .with(
            "query",
            HostFunction::new("query", |_, args| {
                invoke_callback(&args, vec![vec![HostValue::from(demo_tab("https://example.com"))].into()])
            }),
        )
        .with("update", {
            let runtime = runtime.clone();
            HostFunction::new("update", move |_, args| {
                let tab_id = args.first().and_then(HostValue::as_number);
                if tab_id != Some(f64::from(DEMO_TAB_ID)) {
                    return fail_with(&runtime, &args, format!("No tab with id: {}.", display_arg(&args, 0)));
                }
                let url = args
                    .get(1)
                    .and_then(HostValue::as_object)
                    .and_then(|props| props.get("url"))
                    .and_then(|url| url.as_str().map(str::to_string))
                    .unwrap_or_else(|| "https://example.com".to_string());
                invoke_callback(&args, vec![demo_tab(&url).into()])
            })
        });

    let storage = HostObject::new()
        .with(
            "local",
            HostObject::new()
                .with(
                    "get",
                    HostFunction::new("get", |_, args| {
                        invoke_callback(&args, vec![HostObject::new().into()])
                    }),
                )
                .with(
                    "set",
                    HostFunction::new("set", |_, args| invoke_callback(&args, vec![])),
                )
                .with("QUOTA_BYTES", 10_485_760),
        )
        .with("onChanged", event_instance(&event));

    HostObject::new()
        .with("runtime", runtime)
        .with("events", HostObject::new().with("Event", event))
        .with("tabs", tabs)
        .with("storage", storage)
}

fn event_instance(event: &HostFunction) -> HostObject {
    HostObject::with_prototype(event)
        .with("addListener", HostFunction::noop("addListener"))
        .with("removeListener", HostFunction::noop("removeListener"))
        .with("hasListeners", HostFunction::new("hasListeners", |_, _| Ok(false.into())))
}

fn demo_tab(url: &str) -> HostObject {
    HostObject::new()
        .with("id", DEMO_TAB_ID)
        .with("url", url)
        .with("active", true)
}

fn display_arg(args: &[HostValue], index: usize) -> String {
    args.get(index).map(HostValue::to_string).unwrap_or_default()
}

fn invoke_callback(args: &[HostValue], results: Vec<HostValue>) -> Result<HostValue, HostError> {
    if let Some(callback) = args.last().and_then(HostValue::as_function) {
        callback.call(&HostValue::Null, results)?;
    }
    Ok(HostValue::Undefined)
}

/// Sets `runtime.lastError` for the duration of the callback only.
fn fail_with(runtime: &HostObject, args: &[HostValue], message: String) -> Result<HostValue, HostError> {
    runtime.set("lastError", HostObject::new().with("message", message));
    let outcome = invoke_callback(args, vec![]);
    runtime.set("lastError", HostValue::Undefined);
    outcome
}
