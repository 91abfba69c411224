use std::sync::{Arc, Mutex};

use serde_json::json;

use super::*;
use crate::core::config;

fn release_payload() -> Value {
    json!({
        "tag_name": "v17.12.0-0",
        "assets": [
            { "name": "balena-engine-v17.12.0-0-amd64.tar.gz", "id": 1 },
            { "name": "balena-engine-v17.12.0-0-386.tar.gz", "id": 2 },
            { "name": "balena-engine-v17.12.0-0-arm64.tar.gz", "id": 3 },
            { "name": "SHA256SUMS", "id": 4 }
        ]
    })
}

fn dispatch(pipeline: &Pipeline, action: Action) -> Result<Action, DispatchError> {
    let site = config::bundled().unwrap();
    let ctx = Context { config: &site };
    pipeline.dispatch(&ctx, action)
}

#[test]
fn add_release_enriches_every_asset() {
    let out = dispatch(&Pipeline::landr(), Action::add_release(release_payload())).unwrap();
    assert_eq!(out.kind, ADD_RELEASE);

    let assets = out.payload["assets"].as_array().unwrap();
    assert_eq!(assets.len(), 4);
    for (i, asset) in assets.iter().enumerate() {
        assert_eq!(asset["id"], i + 1);
        assert_eq!(asset["os"], "Linux");
        assert!(asset["prettyName"].is_string());
    }
    assert_eq!(assets[0]["arch"], "x86");
    assert_eq!(assets[0]["prettyName"], "Balena for x86");
    assert_eq!(assets[1]["arch"], "i386");
    assert_eq!(assets[2]["arch"], json!(["arm64"]));
    assert!(assets[3]["arch"].is_null());
    assert_eq!(assets[3]["prettyName"], "Balena for undefined");
    assert_eq!(out.payload["tag_name"], "v17.12.0-0");
}

#[test]
fn other_actions_pass_through_unchanged() {
    let action = Action::new("ADD_CONTRIBUTOR", json!({ "assets": "not a list", "login": "x" }));
    let out = dispatch(&Pipeline::landr(), action.clone()).unwrap();
    assert_eq!(out, action);
}

#[test]
fn action_type_match_is_exact() {
    let action = Action::new("add_release", release_payload());
    let out = dispatch(&Pipeline::landr(), action.clone()).unwrap();
    assert_eq!(out, action);
}

#[test]
fn next_sees_enriched_payload() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);
    let pipeline = Pipeline::landr().with(from_fn(
        move |_ctx: &Context<'_>, action: Action, next: Next<'_>| {
            recorder
                .lock()
                .unwrap()
                .push(action.payload["assets"][0]["prettyName"].clone());
            next.run(action)
        },
    ));
    dispatch(&pipeline, Action::add_release(release_payload())).unwrap();
    assert_eq!(*seen.lock().unwrap(), vec![json!("Balena for x86")]);
}

#[test]
fn middleware_runs_in_order_with_context() {
    let pipeline = Pipeline::new()
        .with(from_fn(|ctx: &Context<'_>, mut action: Action, next: Next<'_>| {
            action.payload = json!({ "theme": ctx.config.theme });
            next.run(action)
        }))
        .with(from_fn(|_ctx: &Context<'_>, mut action: Action, next: Next<'_>| {
            action.kind.push_str("_SEEN");
            next.run(action)
        }));
    assert_eq!(pipeline.len(), 2);
    let out = dispatch(&pipeline, Action::new("PING", Value::Null)).unwrap();
    assert_eq!(out.kind, "PING_SEEN");
    assert_eq!(out.payload["theme"], "landr-theme-basic");
}

#[test]
fn middleware_can_stop_the_chain() {
    let pipeline = Pipeline::new()
        .with(from_fn(|_ctx: &Context<'_>, action: Action, _next: Next<'_>| Ok(action)))
        .with(from_fn(|_ctx: &Context<'_>, _action: Action, _next: Next<'_>| {
            panic!("chain should have stopped")
        }));
    let action = Action::new("PING", Value::Null);
    assert_eq!(dispatch(&pipeline, action.clone()).unwrap(), action);
}

#[test]
fn empty_pipeline_returns_action() {
    let action = Action::add_release(release_payload());
    assert_eq!(dispatch(&Pipeline::new(), action.clone()).unwrap(), action);
}

#[test]
fn release_without_assets_is_malformed() {
    let err = dispatch(&Pipeline::landr(), Action::add_release(json!({ "tag_name": "v1" })))
        .unwrap_err();
    match &err {
        DispatchError::MalformedRelease { kind, .. } => assert_eq!(kind, ADD_RELEASE),
        _ => panic!("expected MalformedRelease, got {:?}", err),
    }
    assert!(err.to_string().contains("assets"));
}

#[test]
fn non_string_asset_name_is_malformed() {
    let payload = json!({ "assets": [{ "name": 42 }] });
    let err = dispatch(&Pipeline::landr(), Action::add_release(payload)).unwrap_err();
    assert!(matches!(err, DispatchError::MalformedRelease { .. }));
}

#[test]
fn dispatching_twice_is_stable() {
    let pipeline = Pipeline::landr();
    let once = dispatch(&pipeline, Action::add_release(release_payload())).unwrap();
    let twice = dispatch(&pipeline, once.clone()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn action_wire_format_uses_type_key() {
    let action: Action = serde_json::from_value(json!({ "type": "ADD_RELEASE" })).unwrap();
    assert_eq!(action.kind, ADD_RELEASE);
    assert!(action.payload.is_null());
    let value = serde_json::to_value(Action::new("X", json!(1))).unwrap();
    assert_eq!(value, json!({ "type": "X", "payload": 1 }));
}
