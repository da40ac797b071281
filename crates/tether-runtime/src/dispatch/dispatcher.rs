//! Command dispatcher - the executor's request loop.
//!
//! The dispatcher is the sole consumer of inbound invocation requests.
//! Its guarantee: **exactly one response per request**, on every path:
//! handler found or not, synchronous or deferred, success or failure.
//!
//! # Dispatch Paths
//!
//! ```text
//! request ──► lookup(name)
//!               │
//!               ├─ none ──────────► fail("no handler registered for <name>")
//!               │
//!               └─ handler.invoke(args)
//!                    │
//!                    ├─ Ready(result) ───► respond inline
//!                    │
//!                    └─ Deferred(future) ─► tokio::spawn
//!                                             └─► respond on resolution
//! ```
//!
//! Deferred completions never block the loop: the dispatcher attaches
//! the response emission to the spawned future and moves to the next
//! message immediately, so responses may complete out of order relative
//! to requests. The correlation id carried in each response is the only
//! contract the orchestrator may rely on.

use tether_protocol::{InvocationRequest, InvocationResponse};
use tracing::{debug, warn};

use super::{DispatchError, RegistryHandle};
use crate::link::{ExecutorLink, ResponseSender};
use tether_capability::Completion;

/// Executor-side request loop over a [`CapabilityRegistry`](super::CapabilityRegistry).
///
/// Constructed explicitly from the executor's link endpoint: one
/// dispatcher per process, built at startup; there is no lazily
/// initialized global. Hand [`registry()`](Self::registry) clones to
/// every capability provider before calling [`run()`](Self::run).
///
/// # Example
///
/// ```
/// use serde_json::Value;
/// use tether_capability::Completion;
/// use tether_runtime::dispatch::CommandDispatcher;
/// use tether_runtime::link;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (_orchestrator, executor) = link::loopback(8);
/// let dispatcher = CommandDispatcher::new(executor);
///
/// let registry = dispatcher.registry();
/// registry.register("echo", |args: Vec<Value>| Completion::ok(Value::Array(args)));
///
/// tokio::spawn(dispatcher.run());
/// # }
/// ```
pub struct CommandDispatcher {
    registry: RegistryHandle,
    link: ExecutorLink,
    responses: ResponseSender,
}

impl CommandDispatcher {
    /// Creates a dispatcher owning the executor side of `link`.
    #[must_use]
    pub fn new(link: ExecutorLink) -> Self {
        let responses = link.responder();
        Self {
            registry: RegistryHandle::new(),
            link,
            responses,
        }
    }

    /// Creates a dispatcher over an existing registry.
    ///
    /// Useful when providers register before the link is available.
    #[must_use]
    pub fn with_registry(link: ExecutorLink, registry: RegistryHandle) -> Self {
        let responses = link.responder();
        Self {
            registry,
            link,
            responses,
        }
    }

    /// Returns a shared handle to the registry for capability providers.
    #[must_use]
    pub fn registry(&self) -> RegistryHandle {
        self.registry.clone()
    }

    /// Consumes inbound requests until the link closes.
    ///
    /// Handler faults never destabilize this loop: every failure is
    /// converted into a failure response at the dispatch boundary.
    pub async fn run(mut self) {
        while let Some(request) = self.link.recv().await {
            self.dispatch(request).await;
        }
        debug!("request link closed, dispatcher stopping");
    }

    /// Routes one request and emits (or schedules) its single response.
    async fn dispatch(&self, request: InvocationRequest) {
        let InvocationRequest { id, name, args } = request;

        let Some(handler) = self.registry.lookup(&name) else {
            // Normal outcome, not a fault: the orchestrator may probe
            // for optional capabilities.
            debug!(invocation = %id, capability = %name, "unroutable request");
            let error = DispatchError::NotRegistered(name);
            self.respond(InvocationResponse::fail(id, error.to_string()))
                .await;
            return;
        };

        match handler.invoke(args) {
            Completion::Ready(result) => {
                let result = result.map_err(|e| e.to_string());
                self.respond(InvocationResponse::from_result(id, result))
                    .await;
            }
            Completion::Deferred(future) => {
                let responses = self.responses.clone();
                tokio::spawn(async move {
                    let result = future.await.map_err(|e| e.to_string());
                    let response = InvocationResponse::from_result(id, result);
                    if responses.send(response).await.is_err() {
                        warn!(invocation = %id, "link closed before deferred completion");
                    }
                });
            }
        }
    }

    async fn respond(&self, response: InvocationResponse) {
        let id = response.id;
        if self.responses.send(response).await.is_err() {
            warn!(invocation = %id, "link closed, response dropped");
        }
    }
}
