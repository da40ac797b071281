//! Built-in demo capabilities.
//!
//! Small handlers exercising every dispatch path: synchronous success,
//! synchronous failure, and deferred completion. Registered by the demo
//! shell the way any capability provider would: through a cloned
//! [`RegistryHandle`], during its own initialization.

use serde_json::{json, Value};
use std::time::Duration;
use tether_capability::{CapabilityError, Completion};
use tether_runtime::dispatch::RegistryHandle;

/// Registers the demo capability set.
///
/// | Capability | Path | Behavior |
/// |------------|------|----------|
/// | `echo` | sync | returns its argument list |
/// | `sum` | sync | integer sum of all arguments |
/// | `delay` | deferred | sleeps `args[0]` ms, then reports it |
/// | `fail` | sync | fails with `args[0]` (default `"boom"`) |
pub fn register_demo_capabilities(registry: &RegistryHandle) {
    registry.register("echo", |args: Vec<Value>| {
        Completion::ok(Value::Array(args))
    });

    registry.register("sum", |args: Vec<Value>| {
        let mut total = 0i64;
        for arg in &args {
            match arg.as_i64() {
                Some(n) => total += n,
                None => {
                    return Completion::fail(CapabilityError::InvalidArgs(format!(
                        "expected integers, got {arg}"
                    )))
                }
            }
        }
        Completion::ok(json!(total))
    });

    registry.register("delay", |args: Vec<Value>| {
        let ms = args.first().and_then(Value::as_u64).unwrap_or(50);
        Completion::deferred(async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            Ok(json!({ "delayed_ms": ms }))
        })
    });

    registry.register("fail", |args: Vec<Value>| {
        let message = args
            .first()
            .and_then(Value::as_str)
            .unwrap_or("boom")
            .to_string();
        Completion::fail(CapabilityError::Failed(message))
    });
}
