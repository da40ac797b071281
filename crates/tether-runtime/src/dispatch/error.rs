//! Dispatch layer errors.
//!
//! # Error Code Convention
//!
//! All dispatch errors use the `DISPATCH_` prefix:
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`DispatchError::NotRegistered`] | `DISPATCH_NOT_REGISTERED` | No |
//!
//! An unroutable request never surfaces as an error on the executor:
//! the dispatcher turns it into an ordinary failure response so the
//! orchestrator can probe for optional capabilities. The enum exists so
//! the failure message has a single authoritative spelling.

use tether_types::ErrorCode;
use thiserror::Error;

/// Dispatch layer error.
///
/// # Example
///
/// ```
/// use tether_runtime::dispatch::DispatchError;
/// use tether_types::ErrorCode;
///
/// let err = DispatchError::NotRegistered("missing".into());
/// assert_eq!(err.to_string(), "no handler registered for missing");
/// assert_eq!(err.code(), "DISPATCH_NOT_REGISTERED");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// No handler is registered under the requested name.
    ///
    /// The `Display` text is the exact `error` string of the failure
    /// response the dispatcher emits.
    ///
    /// **Not recoverable** - retrying without a registration changes
    /// nothing.
    #[error("no handler registered for {0}")]
    NotRegistered(String),
}

impl ErrorCode for DispatchError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotRegistered(_) => "DISPATCH_NOT_REGISTERED",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}
