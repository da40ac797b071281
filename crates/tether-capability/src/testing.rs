//! Testing harness for capability implementations.
//!
//! Drives a [`Capability`] directly, without a registry, dispatcher, or
//! link: the capability-level analogue of testing a server handler
//! function without the server.
//!
//! # Example
//!
//! ```
//! use serde_json::{json, Value};
//! use tether_capability::testing::CapabilityTestHarness;
//! use tether_capability::Completion;
//!
//! let echo = |args: Vec<Value>| Completion::ok(Value::Array(args));
//! let harness = CapabilityTestHarness::new(echo);
//!
//! let result = harness.invoke_ready(vec![json!("hi")]);
//! assert_eq!(result, Ok(json!(["hi"])));
//! ```

use serde_json::Value;

use crate::{Capability, CapabilityError, Completion};

/// Test harness wrapping a single capability.
pub struct CapabilityTestHarness<C> {
    capability: C,
}

impl<C: Capability> CapabilityTestHarness<C> {
    /// Wraps `capability` for direct invocation.
    #[must_use]
    pub fn new(capability: C) -> Self {
        Self { capability }
    }

    /// Invokes the capability and resolves either completion arm.
    ///
    /// Deferred completions are awaited, so this covers capabilities
    /// regardless of which path they take.
    pub async fn invoke(&self, args: Vec<Value>) -> Result<Value, CapabilityError> {
        match self.capability.invoke(args) {
            Completion::Ready(result) => result,
            Completion::Deferred(future) => future.await,
        }
    }

    /// Invokes the capability, asserting it completes synchronously.
    ///
    /// # Panics
    ///
    /// Panics if the capability returns a deferred completion. Use
    /// [`invoke`](Self::invoke) for capabilities that may suspend.
    pub fn invoke_ready(&self, args: Vec<Value>) -> Result<Value, CapabilityError> {
        match self.capability.invoke(args) {
            Completion::Ready(result) => result,
            Completion::Deferred(_) => panic!("capability deferred; use invoke() instead"),
        }
    }
}
