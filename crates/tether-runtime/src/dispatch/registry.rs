//! Capability registry - the name → handler map on the executor side.
//!
//! Registration overwrites: installing a handler under a name that is
//! already taken replaces the previous handler and emits a warning-level
//! diagnostic, but never fails. Unregistering an absent name is a no-op.
//! A handler lives from registration until explicit unregistration or
//! process teardown.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tether_capability::Capability;
use tracing::warn;

/// Mutable mapping from capability name to handler.
///
/// Owns the handler lifecycle. Not shared directly; the dispatcher and
/// providers go through [`RegistryHandle`].
///
/// # Example
///
/// ```
/// use serde_json::Value;
/// use std::sync::Arc;
/// use tether_capability::Completion;
/// use tether_runtime::dispatch::CapabilityRegistry;
///
/// let mut registry = CapabilityRegistry::new();
/// registry.register("echo", Arc::new(|args: Vec<Value>| Completion::ok(Value::Array(args))));
/// assert!(registry.lookup("echo").is_some());
///
/// registry.unregister("echo");
/// assert!(registry.lookup("echo").is_none());
/// ```
#[derive(Default)]
pub struct CapabilityRegistry {
    handlers: HashMap<String, Arc<dyn Capability>>,
}

impl CapabilityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Installs `handler` under `name`.
    ///
    /// If a handler already exists for `name` it is replaced; a warning
    /// is logged but the operation never fails. Re-registering the
    /// identical handler is indistinguishable from replacement.
    pub fn register(&mut self, name: impl Into<String>, handler: Arc<dyn Capability>) {
        let name = name.into();
        if self.handlers.insert(name.clone(), handler).is_some() {
            warn!(capability = %name, "replacing existing capability handler");
        }
    }

    /// Removes any handler under `name`.
    ///
    /// No-op, not an error, if absent.
    pub fn unregister(&mut self, name: &str) {
        self.handlers.remove(name);
    }

    /// Returns the current handler for `name`, if any.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn Capability>> {
        self.handlers.get(name)
    }

    /// Returns `true` if a handler is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Returns the number of registered capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no capability is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Cheaply cloneable shared view of a [`CapabilityRegistry`].
///
/// This is what capability providers hold: each provider registers its
/// handlers during its own initialization and unregisters them during
/// teardown. Providers never talk to the link directly.
///
/// # Example
///
/// ```
/// use serde_json::{json, Value};
/// use tether_capability::Completion;
/// use tether_runtime::dispatch::RegistryHandle;
///
/// let registry = RegistryHandle::new();
/// registry.register("sum", |args: Vec<Value>| {
///     let total: i64 = args.iter().filter_map(Value::as_i64).sum();
///     Completion::ok(json!(total))
/// });
/// assert!(registry.contains("sum"));
/// ```
#[derive(Clone, Default)]
pub struct RegistryHandle {
    inner: Arc<RwLock<CapabilityRegistry>>,
}

impl RegistryHandle {
    /// Creates a handle over a fresh empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(CapabilityRegistry::new())),
        }
    }

    /// Installs `handler` under `name`, replacing any previous handler.
    pub fn register(&self, name: impl Into<String>, handler: impl Capability + 'static) {
        self.inner.write().register(name, Arc::new(handler));
    }

    /// Removes any handler under `name`; no-op if absent.
    pub fn unregister(&self, name: &str) {
        self.inner.write().unregister(name);
    }

    /// Returns `true` if a handler is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.read().contains(name)
    }

    /// Returns the number of registered capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if no capability is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Resolves `name` to its current handler (dispatcher-internal).
    pub(crate) fn lookup(&self, name: &str) -> Option<Arc<dyn Capability>> {
        self.inner.read().lookup(name).cloned()
    }
}
