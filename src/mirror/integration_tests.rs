// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! End-to-end tests: demo host → mirror → calls.

use std::sync::{Arc, Mutex};

use crate::call::{DeferredState, Response};
use crate::config::MirrorConfig;
use crate::errors::{CallError, HostError};
use crate::host::{demo, Host, HostFunction, HostObject, HostValue, SharedSlot};
use crate::mirror::{mirror, Kind, Mirror, MirrorNamespace, Walker};

type CallLog = Arc<Mutex<Vec<Vec<HostValue>>>>;

fn host_namespace(host: &Host, path: &str) -> HostObject {
    host.root()
        .lookup_path(path)
        .and_then(|value| value.as_object().cloned())
        .unwrap()
}

/// Replaces `tabs.update` on the host with `body`, recording every call.
fn stub_tabs_update<F>(host: &Host, body: F) -> CallLog
where
    F: Fn(&[HostValue]) -> Result<HostValue, HostError> + Send + Sync + 'static,
{
    let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
    let recorded = calls.clone();
    host_namespace(host, "tabs").set(
        "update",
        HostFunction::new("update", move |_, args| {
            recorded.lock().unwrap().push(args.clone());
            body(args.as_slice())
        }),
    );
    calls
}

/// Host behaviour: complete through the trailing callback with `results`.
fn respond_with(results: Vec<HostValue>) -> impl Fn(&[HostValue]) -> Result<HostValue, HostError> {
    move |args: &[HostValue]| {
        if let Some(callback) = args.last().and_then(HostValue::as_function) {
            callback.call(&HostValue::Null, results.clone())?;
        }
        Ok(HostValue::Undefined)
    }
}

fn assert_same_names(host: &HostObject, mirrored: &MirrorNamespace, walker: &Walker) {
    assert_eq!(mirrored.names(), host.keys());
    let plan = walker.plan(host).unwrap();
    for member in &plan.root().members {
        if member.kind == Kind::Namespace {
            let child = host.get(&member.name).unwrap();
            assert_same_names(
                child.as_object().unwrap(),
                mirrored.namespace(&member.name).unwrap(),
                walker,
            );
        }
    }
}

mod wrapping {
    use super::*;

    #[test]
    fn wraps_api_functions() {
        let mirror = mirror(&demo::extension_host()).unwrap();
        assert!(mirror.method("tabs.update").is_some());
        assert!(mirror.method("storage.local.get").is_some());
    }

    #[test]
    fn namespaces_keep_every_member_name() {
        let host = demo::extension_host();
        let mirror = mirror(&host).unwrap();
        assert_same_names(host.root(), mirror.root(), &Walker::default());
    }

    #[test]
    fn passthrough_members_are_the_host_references() {
        let host = demo::extension_host();
        let mirror = mirror(&host).unwrap();

        for (path, kind) in [
            ("events.Event", Kind::Constructor),
            ("tabs.onUpdated", Kind::EventInstance),
            ("storage.onChanged", Kind::EventInstance),
            ("runtime.PlatformOS", Kind::Enumeration),
            ("tabs.TAB_ID_NONE", Kind::PlainValue),
        ] {
            let member = mirror.get(path).unwrap();
            assert_eq!(member.kind(), kind, "kind of {path}");

            let original = host.root().lookup_path(path).unwrap();
            assert!(member.as_value().unwrap().same_ref(&original), "identity of {path}");
        }
    }

    #[test]
    fn event_instances_are_not_recursed_into() {
        let mirror = mirror(&demo::extension_host()).unwrap();
        assert!(mirror.get("tabs.onUpdated.addListener").is_none());
        assert!(mirror.namespace("tabs.onUpdated").is_none());
    }

    #[test]
    fn methods_are_bound_to_the_host_receiver() {
        let host = demo::extension_host();
        let mirror = mirror(&host).unwrap();

        let method = mirror.method("storage.local.set").unwrap();
        assert!(method.receiver().same_ref(&host_namespace(&host, "storage.local")));
    }

    #[test]
    fn mirroring_twice_gives_independent_mirrors() {
        let host = demo::extension_host();
        let mut first = mirror(&host).unwrap();
        let second = mirror(&host).unwrap();

        assert_eq!(first.paths(), second.paths());

        first.root_mut().remove("tabs");
        assert!(first.get("tabs.update").is_none());
        assert!(second.get("tabs.update").is_some());
        assert!(host.root().contains_key("tabs"));
    }

    #[test]
    fn configured_walker_recurses_into_enumerations_when_asked() {
        let host = demo::extension_host();
        let config: MirrorConfig = serde_yaml::from_str(
            "upper_case_objects: namespace\nevent_constructor: events.Event\n",
        )
        .unwrap();

        let mirror = Walker::from_config(&config, &host).mirror(&host).unwrap();
        assert_eq!(mirror.get("runtime.PlatformOS").unwrap().kind(), Kind::Namespace);
        assert_eq!(
            mirror.value("runtime.PlatformOS.MAC"),
            Some(&HostValue::from("mac"))
        );
        assert_eq!(mirror.get("tabs.onUpdated").unwrap().kind(), Kind::EventInstance);
    }

    #[test]
    fn unknown_method_path_is_an_error() {
        let mirror = mirror(&demo::extension_host()).unwrap();
        assert!(mirror.call("tabs.TAB_ID_NONE", &[]).is_err());
        assert!(mirror.call("tabs.missing", &[]).is_err());
    }
}

mod wrapped_function_call {
    use super::*;

    fn mirrored(host: &Host) -> Mirror {
        mirror(host).unwrap()
    }

    #[tokio::test]
    async fn executes_original_api_function_once() {
        let host = demo::extension_host();
        let mirror = mirrored(&host);
        let calls = stub_tabs_update(&host, respond_with(vec![]));

        mirror.call("tabs.update", &[]).unwrap().deferred().await.unwrap();
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn passes_arguments_and_appends_one_callback() {
        let host = demo::extension_host();
        let mirror = mirrored(&host);
        let calls = stub_tabs_update(&host, respond_with(vec![]));
        let props = HostObject::new().with("url", "http://example.com");

        let args = [HostValue::from(42), HostValue::from(props.clone())];
        mirror.call("tabs.update", &args).unwrap().deferred().await.unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls[0].len(), 3);
        assert_eq!(calls[0][0], HostValue::from(42));
        assert!(calls[0][1].same_ref(&HostValue::from(props)));
        assert!(calls[0][2].is_callable());
    }

    #[test]
    fn immediate_form_passes_arguments_exactly() {
        let host = demo::extension_host();
        let mirror = mirrored(&host);
        let calls = stub_tabs_update(&host, |_| Ok(HostValue::from("done")));

        let result = mirror
            .call("tabs.update", &[HostValue::from(42)])
            .unwrap()
            .immediate()
            .unwrap();

        assert_eq!(result, HostValue::from("done"));
        assert_eq!(*calls.lock().unwrap(), vec![vec![HostValue::from(42)]]);
    }

    #[test]
    fn immediate_form_of_a_sync_host_method() {
        let mirror = mirrored(&demo::extension_host());
        let manifest = mirror
            .call("runtime.getManifest", &[])
            .unwrap()
            .immediate()
            .unwrap();

        assert_eq!(
            manifest.as_object().and_then(|m| m.get("manifest_version")),
            Some(HostValue::from(3))
        );
    }
}

mod returned_future {
    use super::*;

    #[tokio::test]
    async fn empty_response_fulfills_with_no_value() {
        let host = demo::extension_host();
        let mirror = mirror(&host).unwrap();
        stub_tabs_update(&host, respond_with(vec![]));

        let response = mirror.call("tabs.update", &[]).unwrap().deferred().await.unwrap();
        assert!(response.is_no_value());
    }

    #[tokio::test]
    async fn single_value_is_unwrapped() {
        let host = demo::extension_host();
        let mirror = mirror(&host).unwrap();
        stub_tabs_update(&host, respond_with(vec![HostValue::from(42)]));

        let response = mirror.call("tabs.update", &[]).unwrap().deferred().await.unwrap();
        assert_eq!(response, Response::Single(HostValue::from(42)));
    }

    #[tokio::test]
    async fn several_values_become_an_ordered_list() {
        let host = demo::extension_host();
        let mirror = mirror(&host).unwrap();
        let results = vec![HostValue::from(42), HostValue::from("http://example.com")];
        stub_tabs_update(&host, respond_with(results.clone()));

        let response = mirror.call("tabs.update", &[]).unwrap().deferred().await.unwrap();
        assert_eq!(response, Response::Many(results));
    }

    #[tokio::test]
    async fn api_error_rejects_with_its_message() {
        let host = demo::extension_host();
        let mirror = mirror(&host).unwrap();
        let runtime = host_namespace(&host, "runtime");
        stub_tabs_update(&host, move |args| {
            runtime.set("lastError", HostObject::new().with("message", "Unknown error"));
            respond_with(vec![HostValue::from(42)])(args)
        });

        let error = mirror.call("tabs.update", &[]).unwrap().deferred().await.unwrap_err();
        assert_eq!(
            error,
            CallError::Host {
                message: "Unknown error".to_string()
            }
        );
    }

    #[tokio::test]
    async fn sync_throw_rejects_with_exception_message() {
        let host = demo::extension_host();
        let mirror = mirror(&host).unwrap();
        stub_tabs_update(&host, |_| Err(HostError::new("boom")));

        let error = mirror.call("tabs.update", &[]).unwrap().deferred().await.unwrap_err();
        assert_eq!(error.message(), "boom");
        assert!(matches!(error, CallError::Thrown { .. }));
    }

    #[test]
    fn sync_throw_surfaces_directly_in_immediate_form() {
        let host = demo::extension_host();
        let mirror = mirror(&host).unwrap();
        stub_tabs_update(&host, |_| Err(HostError::new("boom")));

        let error = mirror.call("tabs.update", &[]).unwrap().immediate().unwrap_err();
        assert_eq!(error, HostError::new("boom"));
    }

    #[tokio::test]
    async fn demo_host_error_is_cleared_after_callback() {
        let host = demo::extension_host();
        let mirror = mirror(&host).unwrap();

        let error = mirror
            .call("tabs.get", &[HostValue::from(99)])
            .unwrap()
            .deferred()
            .await
            .unwrap_err();
        assert_eq!(error.message(), "No tab with id: 99.");

        let tab = mirror
            .call("tabs.get", &[HostValue::from(demo::DEMO_TAB_ID)])
            .unwrap()
            .deferred()
            .await
            .unwrap()
            .into_value();
        assert_eq!(
            tab.as_object().and_then(|t| t.get("url")),
            Some(HostValue::from("https://example.com"))
        );
    }

    #[tokio::test]
    async fn callback_invoked_later_from_another_task() {
        let host = demo::extension_host();
        let mirror = mirror(&host).unwrap();
        stub_tabs_update(&host, |args| {
            let callback = args.last().and_then(HostValue::as_function).cloned();
            tokio::spawn(async move {
                tokio::task::yield_now().await;
                if let Some(callback) = callback {
                    let _ = callback.call(&HostValue::Null, vec![HostValue::from("later")]);
                }
            });
            Ok(HostValue::Undefined)
        });

        let response = mirror.call("tabs.update", &[]).unwrap().deferred().await.unwrap();
        assert_eq!(response, Response::Single(HostValue::from("later")));
    }

    #[tokio::test]
    async fn independent_calls_settle_in_host_order() {
        let host = demo::extension_host();
        let mirror = mirror(&host).unwrap();
        let pending: Arc<Mutex<Vec<HostFunction>>> = Arc::new(Mutex::new(Vec::new()));
        let parked = pending.clone();
        stub_tabs_update(&host, move |args| {
            if let Some(callback) = args.last().and_then(HostValue::as_function) {
                parked.lock().unwrap().push(callback.clone());
            }
            Ok(HostValue::Undefined)
        });

        let mut first = mirror.call("tabs.update", &[HostValue::from(1)]).unwrap().deferred();
        let mut second = mirror.call("tabs.update", &[HostValue::from(2)]).unwrap().deferred();

        let callbacks = pending.lock().unwrap().clone();
        callbacks[1].call(&HostValue::Null, vec![HostValue::from("second")]).unwrap();
        assert_eq!(first.state(), DeferredState::Pending);
        assert_eq!(second.state(), DeferredState::Fulfilled);

        callbacks[0].call(&HostValue::Null, vec![HostValue::from("first")]).unwrap();
        assert_eq!(first.await, Ok(Response::Single(HostValue::from("first"))));
        assert_eq!(second.await, Ok(Response::Single(HostValue::from("second"))));
    }

    #[tokio::test]
    async fn shared_error_slot_outside_the_graph() {
        let slot = Arc::new(SharedSlot::new());
        let host_slot = slot.clone();
        let root = HostObject::new().with(
            "downloads",
            HostObject::new().with(
                "download",
                HostFunction::new("download", move |_, args| {
                    host_slot.set(HostObject::new().with("message", "Invalid URL"));
                    if let Some(callback) = args.last().and_then(HostValue::as_function) {
                        callback.call(&HostValue::Null, vec![])?;
                    }
                    host_slot.clear();
                    Ok(HostValue::Undefined)
                }),
            ),
        );
        let host = Host::new(root).with_error_slot(slot);

        let error = mirror(&host)
            .unwrap()
            .call("downloads.download", &[HostValue::from("not a url")])
            .unwrap()
            .deferred()
            .await
            .unwrap_err();
        assert_eq!(error.message(), "Invalid URL");
    }
}
