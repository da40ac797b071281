//! Capability layer errors.
//!
//! Errors a handler reports while executing an invocation. Whatever the
//! variant, the dispatcher normalizes it into the failure response's
//! `error` string via `Display`: the wire carries a message, not a
//! structured code.
//!
//! # Error Code Convention
//!
//! All capability errors use the `CAPABILITY_` prefix:
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`Failed`](CapabilityError::Failed) | `CAPABILITY_FAILED` | Yes |
//! | [`InvalidArgs`](CapabilityError::InvalidArgs) | `CAPABILITY_INVALID_ARGS` | No |

use serde::{Deserialize, Serialize};
use tether_types::ErrorCode;
use thiserror::Error;

/// Capability layer error.
///
/// # Example
///
/// ```
/// use tether_capability::CapabilityError;
/// use tether_types::ErrorCode;
///
/// let err = CapabilityError::Failed("boom".into());
/// assert_eq!(err.code(), "CAPABILITY_FAILED");
/// // Display is the bare message: this exact string reaches the wire.
/// assert_eq!(err.to_string(), "boom");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum CapabilityError {
    /// The handler ran and failed.
    ///
    /// Displays as the bare message: the orchestrator sees exactly the
    /// text the handler failed with.
    ///
    /// **Recoverable** - the failure may be transient; a fresh
    /// invocation may succeed.
    #[error("{0}")]
    Failed(String),

    /// The argument list does not match what the handler expects.
    ///
    /// **Not recoverable** - the same arguments fail the same way; fix
    /// the caller.
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

impl ErrorCode for CapabilityError {
    fn code(&self) -> &'static str {
        match self {
            Self::Failed(_) => "CAPABILITY_FAILED",
            Self::InvalidArgs(_) => "CAPABILITY_INVALID_ARGS",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}
