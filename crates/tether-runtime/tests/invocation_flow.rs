//! End-to-end invocation flow over a loopback link.
//!
//! Each test wires the full stack (gateway, link, dispatcher,
//! registry) inside one process and drives it through the gateway's
//! public API, the way an orchestrator would.

use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tether_capability::{CapabilityError, Completion};
use tether_runtime::dispatch::{CommandDispatcher, RegistryHandle};
use tether_runtime::gateway::{GatewayError, InvocationGateway};
use tether_runtime::link;
use tokio::sync::Notify;

/// Wires a connected gateway/registry pair with a running dispatcher.
fn wire(buffer: usize) -> (InvocationGateway, RegistryHandle) {
    let (orchestrator, executor) = link::loopback(buffer);
    let dispatcher = CommandDispatcher::new(executor);
    let registry = dispatcher.registry();
    tokio::spawn(dispatcher.run());
    (InvocationGateway::new(orchestrator), registry)
}

#[tokio::test]
async fn sum_capability_round_trip() {
    let (gateway, registry) = wire(8);
    registry.register("sum", |args: Vec<Value>| {
        match (
            args.first().and_then(Value::as_i64),
            args.get(1).and_then(Value::as_i64),
        ) {
            (Some(a), Some(b)) => Completion::ok(json!(a + b)),
            _ => Completion::fail(CapabilityError::InvalidArgs("expected two integers".into())),
        }
    });

    let result = gateway.invoke("sum", vec![json!(2), json!(3)]).await;
    assert_eq!(result, Ok(json!(5)));
}

#[tokio::test]
async fn failing_capability_carries_its_message() {
    let (gateway, registry) = wire(8);
    registry.register("fail", |_args: Vec<Value>| {
        Completion::fail(CapabilityError::Failed("boom".into()))
    });

    let err = gateway.invoke("fail", vec![]).await.unwrap_err();
    assert_eq!(err, GatewayError::Capability("boom".into()));
}

#[tokio::test]
async fn missing_capability_is_unroutable() {
    let (gateway, _registry) = wire(8);

    let err = gateway.invoke("missing", vec![]).await.unwrap_err();
    assert_eq!(
        err,
        GatewayError::Capability("no handler registered for missing".into())
    );
}

#[tokio::test]
async fn deferred_capability_resolves_only_after_suspension() {
    let (gateway, registry) = wire(8);

    let release = Arc::new(Notify::new());
    let gate = Arc::clone(&release);
    registry.register("delayed", move |_args: Vec<Value>| {
        let gate = Arc::clone(&gate);
        Completion::deferred(async move {
            gate.notified().await;
            Ok(json!(42))
        })
    });

    let call = tokio::spawn({
        let gateway = gateway.clone();
        async move { gateway.invoke("delayed", vec![]).await }
    });

    // The call must still be suspended while the handler is.
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!call.is_finished());
    assert_eq!(gateway.pending_count(), 1);

    release.notify_one();
    assert_eq!(call.await.unwrap(), Ok(json!(42)));
    assert_eq!(gateway.pending_count(), 0);
}

#[tokio::test]
async fn out_of_order_completions_reach_their_own_callers() {
    let (gateway, registry) = wire(8);

    let slow_release = Arc::new(Notify::new());
    let fast_release = Arc::new(Notify::new());

    let gate = Arc::clone(&slow_release);
    registry.register("slow", move |_args: Vec<Value>| {
        let gate = Arc::clone(&gate);
        Completion::deferred(async move {
            gate.notified().await;
            Ok(json!("slow result"))
        })
    });

    let gate = Arc::clone(&fast_release);
    registry.register("fast", move |_args: Vec<Value>| {
        let gate = Arc::clone(&gate);
        Completion::deferred(async move {
            gate.notified().await;
            Ok(json!("fast result"))
        })
    });

    // Issue slow first, fast second.
    let slow_call = tokio::spawn({
        let gateway = gateway.clone();
        async move { gateway.invoke("slow", vec![]).await }
    });
    let fast_call = tokio::spawn({
        let gateway = gateway.clone();
        async move { gateway.invoke("fast", vec![]).await }
    });

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(gateway.pending_count(), 2);

    // Complete them in reverse order: fast resolves first.
    fast_release.notify_one();
    assert_eq!(fast_call.await.unwrap(), Ok(json!("fast result")));
    assert!(!slow_call.is_finished());

    slow_release.notify_one();
    assert_eq!(slow_call.await.unwrap(), Ok(json!("slow result")));
    assert_eq!(gateway.pending_count(), 0);
}

#[tokio::test]
async fn re_registration_replaces_the_handler() {
    let (gateway, registry) = wire(8);

    registry.register("version", |_args: Vec<Value>| Completion::ok(json!("v1")));
    assert_eq!(gateway.invoke("version", vec![]).await, Ok(json!("v1")));

    registry.register("version", |_args: Vec<Value>| Completion::ok(json!("v2")));
    assert_eq!(gateway.invoke("version", vec![]).await, Ok(json!("v2")));
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn unregistration_makes_the_name_unroutable_again() {
    let (gateway, registry) = wire(8);

    registry.register("transient", |_args: Vec<Value>| Completion::ok(json!(1)));
    assert_eq!(gateway.invoke("transient", vec![]).await, Ok(json!(1)));

    registry.unregister("transient");
    let err = gateway.invoke("transient", vec![]).await.unwrap_err();
    assert_eq!(
        err,
        GatewayError::Capability("no handler registered for transient".into())
    );
}

#[tokio::test]
async fn concurrent_invocations_of_the_same_capability() {
    let (gateway, registry) = wire(16);
    registry.register("double", |args: Vec<Value>| {
        let n = args.first().and_then(Value::as_i64).unwrap_or(0);
        Completion::deferred(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            Ok(json!(n * 2))
        })
    });

    let calls: Vec<_> = (0..8)
        .map(|n| {
            let gateway = gateway.clone();
            tokio::spawn(async move { gateway.invoke("double", vec![json!(n)]).await })
        })
        .collect();

    for (n, call) in calls.into_iter().enumerate() {
        assert_eq!(call.await.unwrap(), Ok(json!(n as i64 * 2)));
    }
    assert_eq!(gateway.pending_count(), 0);
}

#[tokio::test]
async fn sync_handler_error_and_success_flags_agree() {
    let (gateway, registry) = wire(8);
    registry.register("parity", |args: Vec<Value>| {
        let n = args.first().and_then(Value::as_i64).unwrap_or(0);
        if n % 2 == 0 {
            Completion::ok(json!("even"))
        } else {
            Completion::fail(CapabilityError::Failed(format!("{n} is odd")))
        }
    });

    assert_eq!(gateway.invoke("parity", vec![json!(2)]).await, Ok(json!("even")));
    assert_eq!(
        gateway.invoke("parity", vec![json!(3)]).await,
        Err(GatewayError::Capability("3 is odd".into()))
    );
}

#[tokio::test]
async fn timeout_is_caller_imposed_and_late_response_is_harmless() {
    let (gateway, registry) = wire(8);

    let release = Arc::new(Notify::new());
    let gate = Arc::clone(&release);
    registry.register("stuck", move |_args: Vec<Value>| {
        let gate = Arc::clone(&gate);
        Completion::deferred(async move {
            gate.notified().await;
            Ok(json!("finally"))
        })
    });

    let err = gateway
        .invoke_with_timeout("stuck", vec![], Duration::from_millis(10))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Timeout(_)));
    assert_eq!(gateway.pending_count(), 0);

    // The handler finishes after the caller gave up; the response finds
    // no pending entry and the gateway keeps working.
    release.notify_one();
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(gateway.pending_count(), 0);

    registry.register("ping", |_args: Vec<Value>| Completion::ok(json!("pong")));
    assert_eq!(gateway.invoke("ping", vec![]).await, Ok(json!("pong")));
}
