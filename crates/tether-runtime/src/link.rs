//! Transport boundary between orchestrator and executor.
//!
//! The transport channel itself is an external collaborator: Tether only
//! assumes an ordered, reliable, bidirectional message pipe with no
//! duplication and no built-in request/response correlation. This module
//! defines the endpoint types both halves of the runtime consume, plus
//! [`loopback`], the in-memory reference pair used by tests and by
//! single-process wiring such as the demo binary.
//!
//! ```text
//! OrchestratorLink                         ExecutorLink
//!   requests  ──────────── mpsc ──────────►  requests
//!   responses ◄─────────── mpsc ───────────  responses (ResponseSender)
//! ```
//!
//! A real transport binding (socket, pipe, webview bridge) builds the
//! same endpoints with [`OrchestratorLink::from_parts`] and
//! [`ExecutorLink::from_parts`], feeding each side from its own I/O
//! loop. Everything above the link is transport-agnostic.

use tether_protocol::{InvocationRequest, InvocationResponse};
use tether_types::ErrorCode;
use thiserror::Error;
use tokio::sync::mpsc;

/// Orchestrator-side endpoint: sends requests, receives responses.
#[derive(Debug)]
pub struct OrchestratorLink {
    pub(crate) requests: mpsc::Sender<InvocationRequest>,
    pub(crate) responses: mpsc::Receiver<InvocationResponse>,
}

impl OrchestratorLink {
    /// Builds the endpoint from transport-binding channel halves.
    #[must_use]
    pub fn from_parts(
        requests: mpsc::Sender<InvocationRequest>,
        responses: mpsc::Receiver<InvocationResponse>,
    ) -> Self {
        Self {
            requests,
            responses,
        }
    }

    /// Decomposes the endpoint back into its channel halves.
    #[must_use]
    pub fn into_parts(
        self,
    ) -> (
        mpsc::Sender<InvocationRequest>,
        mpsc::Receiver<InvocationResponse>,
    ) {
        (self.requests, self.responses)
    }
}

/// Executor-side endpoint: receives requests, sends responses.
#[derive(Debug)]
pub struct ExecutorLink {
    pub(crate) requests: mpsc::Receiver<InvocationRequest>,
    pub(crate) responses: ResponseSender,
}

impl ExecutorLink {
    /// Builds the endpoint from transport-binding channel halves.
    #[must_use]
    pub fn from_parts(
        requests: mpsc::Receiver<InvocationRequest>,
        responses: mpsc::Sender<InvocationResponse>,
    ) -> Self {
        Self {
            requests,
            responses: ResponseSender { inner: responses },
        }
    }

    /// Returns a clone of the outgoing response emitter.
    ///
    /// Cloneable so that deferred completions can answer from spawned
    /// tasks while the dispatch loop keeps the original.
    #[must_use]
    pub fn responder(&self) -> ResponseSender {
        self.responses.clone()
    }

    /// Receives the next inbound request.
    ///
    /// Returns `None` once the orchestrator side has closed the link.
    pub async fn recv(&mut self) -> Option<InvocationRequest> {
        self.requests.recv().await
    }
}

/// Cloneable emitter for outbound responses.
///
/// Wraps the underlying channel half so executor code cannot receive on
/// it or observe transport internals.
#[derive(Debug, Clone)]
pub struct ResponseSender {
    inner: mpsc::Sender<InvocationResponse>,
}

impl ResponseSender {
    /// Sends a response, waiting for link capacity.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Closed`] if the orchestrator side is gone.
    pub async fn send(&self, response: InvocationResponse) -> Result<(), LinkError> {
        self.inner
            .send(response)
            .await
            .map_err(|_| LinkError::Closed)
    }
}

/// Creates a connected in-memory link pair.
///
/// The pair preserves send order in both directions and never
/// duplicates a message: the delivery guarantees the protocol assumes
/// of any transport.
///
/// # Example
///
/// ```
/// use tether_runtime::link;
///
/// let (orchestrator, executor) = link::loopback(16);
/// # let _ = (orchestrator, executor);
/// ```
#[must_use]
pub fn loopback(buffer: usize) -> (OrchestratorLink, ExecutorLink) {
    let (request_tx, request_rx) = mpsc::channel(buffer);
    let (response_tx, response_rx) = mpsc::channel(buffer);

    (
        OrchestratorLink::from_parts(request_tx, response_rx),
        ExecutorLink::from_parts(request_rx, response_tx),
    )
}

/// Link layer error.
///
/// # Example
///
/// ```
/// use tether_runtime::link::LinkError;
/// use tether_types::ErrorCode;
///
/// assert_eq!(LinkError::Closed.code(), "LINK_CLOSED");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// The peer endpoint is gone; no further messages can cross.
    #[error("link closed")]
    Closed,
}

impl ErrorCode for LinkError {
    fn code(&self) -> &'static str {
        match self {
            Self::Closed => "LINK_CLOSED",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tether_types::assert_error_codes;

    #[test]
    fn all_error_codes_valid() {
        assert_error_codes(&[LinkError::Closed], "LINK_");
    }

    #[tokio::test]
    async fn loopback_preserves_request_order() {
        let (orchestrator, mut executor) = loopback(8);
        let (request_tx, _responses) = orchestrator.into_parts();

        for n in 0..3 {
            request_tx
                .send(InvocationRequest::new("op", vec![json!(n)]))
                .await
                .unwrap();
        }

        for n in 0..3 {
            let req = executor.recv().await.unwrap();
            assert_eq!(req.args, vec![json!(n)]);
        }
    }

    #[tokio::test]
    async fn responder_reports_closed_link() {
        let (orchestrator, executor) = loopback(8);
        let responder = executor.responder();
        drop(orchestrator);

        let resp = InvocationResponse::ok(tether_types::InvocationId::new(), json!(1));
        assert_eq!(responder.send(resp).await, Err(LinkError::Closed));
    }

    #[tokio::test]
    async fn recv_ends_when_orchestrator_drops() {
        let (orchestrator, mut executor) = loopback(8);
        drop(orchestrator);

        assert!(executor.recv().await.is_none());
    }
}
