//! Gateway layer errors.
//!
//! # Error Code Convention
//!
//! All gateway errors use the `GATEWAY_` prefix:
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`GatewayError::Capability`] | `GATEWAY_CAPABILITY_FAILED` | No |
//! | [`GatewayError::Timeout`] | `GATEWAY_TIMEOUT` | Yes |
//! | [`GatewayError::LinkClosed`] | `GATEWAY_LINK_CLOSED` | No |
//!
//! # Recoverability
//!
//! - **Timeout**: the executor may answer a fresh invocation in time;
//!   a retry issues a new correlation id, never reuses the old one.
//! - **Capability**: the handler reported failure; the same call fails
//!   the same way until the executor side changes.
//! - **LinkClosed**: the transport is gone; reconnecting is a transport
//!   binding concern, not a retry at this layer.

use tether_types::{ErrorCode, InvocationId};
use thiserror::Error;

/// Gateway layer error.
///
/// The failure outcome of an [`invoke`](super::InvocationGateway::invoke)
/// call. A capability failure re-raises the executor's error string to
/// the caller; everything else is local to the orchestrator side.
///
/// # Example
///
/// ```
/// use tether_runtime::gateway::GatewayError;
/// use tether_types::ErrorCode;
///
/// let err = GatewayError::Capability("boom".into());
/// assert_eq!(err.code(), "GATEWAY_CAPABILITY_FAILED");
/// assert!(!err.is_recoverable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The executor answered with a failure response.
    ///
    /// Carries the original error string from the wire, unmodified.
    #[error("capability failed: {0}")]
    Capability(String),

    /// The caller-imposed latency bound expired first.
    ///
    /// The pending entry for this id is already removed; a late
    /// response will be discarded as unmatched.
    #[error("invocation timed out: {0}")]
    Timeout(InvocationId),

    /// The link closed before the response arrived.
    #[error("link closed")]
    LinkClosed,
}

impl ErrorCode for GatewayError {
    fn code(&self) -> &'static str {
        match self {
            Self::Capability(_) => "GATEWAY_CAPABILITY_FAILED",
            Self::Timeout(_) => "GATEWAY_TIMEOUT",
            Self::LinkClosed => "GATEWAY_LINK_CLOSED",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}
