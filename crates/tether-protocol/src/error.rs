//! Protocol layer errors.
//!
//! # Error Code Convention
//!
//! All protocol errors use the `PROTOCOL_` prefix:
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`ProtocolError::InvalidRequest`] | `PROTOCOL_INVALID_REQUEST` | No |

use serde::{Deserialize, Serialize};
use tether_types::ErrorCode;
use thiserror::Error;

/// Protocol layer error.
///
/// Raised when a message cannot be constructed within the protocol's
/// rules. Transport-level trouble is not a protocol error; the channel
/// is an external collaborator with its own failure surface.
///
/// # Example
///
/// ```
/// use tether_protocol::{InvocationRequest, ProtocolError};
/// use tether_types::ErrorCode;
///
/// let err = InvocationRequest::try_new("", vec![]).unwrap_err();
/// assert_eq!(err.code(), "PROTOCOL_INVALID_REQUEST");
/// assert!(!err.is_recoverable());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Error)]
pub enum ProtocolError {
    /// A request was constructed with invalid content.
    ///
    /// **Not recoverable** - the same construction will fail again;
    /// fix the caller.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ErrorCode for ProtocolError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "PROTOCOL_INVALID_REQUEST",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}
