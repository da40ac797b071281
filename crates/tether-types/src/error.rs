//! Unified error interface for Tether.
//!
//! Every error enum in the workspace implements [`ErrorCode`] so that
//! callers can branch on a stable machine-readable code and decide on
//! retries without matching concrete enum variants across crates.
//!
//! # Design
//!
//! - **Machine-readable codes**: stable `UPPER_SNAKE_CASE` strings,
//!   prefixed per layer (`PROTOCOL_`, `CAPABILITY_`, `DISPATCH_`,
//!   `GATEWAY_`, `LINK_`, `CONFIG_`).
//! - **Recoverability**: whether retrying the failed operation may
//!   succeed. A timeout is recoverable; a malformed request is not.
//!
//! # Example
//!
//! ```
//! use tether_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum DemoError {
//!     Unreachable,
//!     BadName,
//! }
//!
//! impl ErrorCode for DemoError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Unreachable => "DEMO_UNREACHABLE",
//!             Self::BadName => "DEMO_BAD_NAME",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Unreachable)
//!     }
//! }
//!
//! let err = DemoError::Unreachable;
//! assert_eq!(err.code(), "DEMO_UNREACHABLE");
//! assert!(err.is_recoverable());
//! ```

/// Unified error code interface for Tether errors.
///
/// # Code Format
///
/// - `UPPER_SNAKE_CASE`, prefixed with the owning layer
///   (e.g. `"GATEWAY_TIMEOUT"`, `"DISPATCH_NOT_REGISTERED"`)
/// - Stable once defined; changing a code is a breaking change.
///
/// # Recoverability
///
/// An error is recoverable when retrying the operation may succeed
/// (transient link trouble, a timeout racing a slow handler). It is not
/// recoverable when the retry would hit the same wall (invalid input,
/// a name with no handler behind it).
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether retrying the failed operation may succeed.
    fn is_recoverable(&self) -> bool;
}

/// Validates that an error code follows Tether conventions.
///
/// # Checks
///
/// 1. Code is non-empty
/// 2. Code starts with the expected layer prefix
/// 3. Code is `UPPER_SNAKE_CASE`
///
/// # Panics
///
/// Panics with a descriptive message if validation fails. Intended for
/// use inside tests.
///
/// # Example
///
/// ```
/// use tether_types::{assert_error_code, ErrorCode};
///
/// #[derive(Debug)]
/// enum DemoError { Lost }
///
/// impl ErrorCode for DemoError {
///     fn code(&self) -> &'static str { "DEMO_LOST" }
///     fn is_recoverable(&self) -> bool { true }
/// }
///
/// assert_error_code(&DemoError::Lost, "DEMO_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");

    assert!(
        code.starts_with(expected_prefix),
        "Error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );

    assert!(
        is_upper_snake_case(code),
        "Error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

/// Validates every variant of an error enum at once.
///
/// # Example
///
/// ```
/// use tether_types::{assert_error_codes, ErrorCode};
///
/// #[derive(Debug)]
/// enum DemoError { A, B }
///
/// impl ErrorCode for DemoError {
///     fn code(&self) -> &'static str {
///         match self {
///             Self::A => "DEMO_A",
///             Self::B => "DEMO_B",
///         }
///     }
///     fn is_recoverable(&self) -> bool { false }
/// }
///
/// assert_error_codes(&[DemoError::A, DemoError::B], "DEMO_");
/// ```
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

/// Checks if a string is UPPER_SNAKE_CASE.
fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }

    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
