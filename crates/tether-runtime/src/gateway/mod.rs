//! Orchestrator-side invocation gateway.
//!
//! The gateway turns the correlation protocol into an ordinary async
//! call: `invoke(name, args)` sends a request carrying a fresh
//! [`InvocationId`] and suspends until the response with that id comes
//! back. The pending call table is the heart of it:
//!
//! ```text
//! invoke("sum", [2,3])
//!   │ mint id, insert pending[id]
//!   ▼
//! requests ──────────────────────────────► executor
//!                                             │
//! responses ◄───────────────────────────── (id, success, …)
//!   │
//!   ├─ pending[id] found  → remove, wake the caller
//!   └─ no entry           → discard (stale/abandoned), log at debug
//! ```
//!
//! Matching is by id only; responses may arrive in any order relative
//! to the requests that caused them. The protocol has no timeout and no
//! cancellation message: a caller needing bounded latency uses
//! [`invoke_with_timeout`](InvocationGateway::invoke_with_timeout),
//! which removes the pending entry before failing so a late response
//! becomes a harmless no-match.

mod error;

pub use error::GatewayError;

use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tether_protocol::InvocationRequest;
use tether_types::InvocationId;
use tokio::sync::oneshot;
use tracing::debug;

use crate::link::OrchestratorLink;

/// Pending invocations: correlation id → the awaiting caller's waker.
///
/// An entry is removed the instant its matching response arrives (or
/// the caller's timeout fires, whichever comes first).
type PendingCalls = Arc<Mutex<HashMap<InvocationId, oneshot::Sender<Result<Value, String>>>>>;

/// Orchestrator-side bridge from async calls to the wire protocol.
///
/// Constructed explicitly from the orchestrator's link endpoint at
/// startup and cloned into every caller; there is no lazily
/// initialized global. Construction spawns the response-router task,
/// the sole consumer of inbound responses for this link.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tether_runtime::gateway::InvocationGateway;
/// use tether_runtime::link;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (orchestrator, _executor) = link::loopback(8);
/// let gateway = InvocationGateway::new(orchestrator);
/// assert_eq!(gateway.pending_count(), 0);
/// # }
/// ```
#[derive(Clone)]
pub struct InvocationGateway {
    requests: tokio::sync::mpsc::Sender<InvocationRequest>,
    pending: PendingCalls,
}

impl InvocationGateway {
    /// Creates a gateway over the orchestrator side of `link` and
    /// spawns its response router.
    #[must_use]
    pub fn new(link: OrchestratorLink) -> Self {
        let (requests, mut responses) = link.into_parts();
        let pending: PendingCalls = Arc::new(Mutex::new(HashMap::new()));

        let router_pending = Arc::clone(&pending);
        tokio::spawn(async move {
            while let Some(response) = responses.recv().await {
                let id = response.id;
                let entry = router_pending.lock().remove(&id);
                match entry {
                    Some(waker) => {
                        if waker.send(response.into_result()).is_err() {
                            // Caller abandoned the invocation; its entry
                            // is gone now, so this response dies here.
                            debug!(invocation = %id, "caller gone, response dropped");
                        }
                    }
                    // Stale or duplicate delivery from a lower layer:
                    // not an error condition.
                    None => debug!(invocation = %id, "discarding response with no pending invocation"),
                }
            }
            debug!("response link closed, gateway router stopping");
        });

        Self { requests, pending }
    }

    /// Invokes `name` on the executor and awaits the matching response.
    ///
    /// Resolves to the carried result on success. No timeout is imposed
    /// here, because the protocol has none; see
    /// [`invoke_with_timeout`](Self::invoke_with_timeout).
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Capability`] - the executor answered with a
    ///   failure response; carries the original error string.
    /// - [`GatewayError::LinkClosed`] - the link went down before the
    ///   response arrived.
    pub async fn invoke(
        &self,
        name: impl Into<String>,
        args: Vec<Value>,
    ) -> Result<Value, GatewayError> {
        self.call(InvocationRequest::new(name, args)).await
    }

    /// Invokes `name` with a caller-imposed latency bound.
    ///
    /// On expiry the pending entry is removed **before** the error is
    /// returned, so a response arriving later finds no entry and is
    /// discarded by the router; late delivery is harmless.
    ///
    /// # Errors
    ///
    /// [`GatewayError::Timeout`] on expiry, otherwise as
    /// [`invoke`](Self::invoke).
    pub async fn invoke_with_timeout(
        &self,
        name: impl Into<String>,
        args: Vec<Value>,
        timeout: Duration,
    ) -> Result<Value, GatewayError> {
        let request = InvocationRequest::new(name, args);
        let id = request.id;

        match tokio::time::timeout(timeout, self.call(request)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                self.pending.lock().remove(&id);
                debug!(invocation = %id, "invocation timed out, pending entry dropped");
                Err(GatewayError::Timeout(id))
            }
        }
    }

    /// Returns the number of invocations currently awaiting a response.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    async fn call(&self, request: InvocationRequest) -> Result<Value, GatewayError> {
        let id = request.id;
        let (waker, woken) = oneshot::channel();
        self.pending.lock().insert(id, waker);

        if self.requests.send(request).await.is_err() {
            self.pending.lock().remove(&id);
            return Err(GatewayError::LinkClosed);
        }

        match woken.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(message)) => Err(GatewayError::Capability(message)),
            // Router gone: the link closed underneath the pending call.
            Err(_) => Err(GatewayError::LinkClosed),
        }
    }
}
