//! The [`Capability`] trait and its [`Completion`] result type.

use futures::future::BoxFuture;
use serde_json::Value;
use std::future::Future;

use crate::CapabilityError;

/// Outcome of invoking a capability handler.
///
/// A handler either completes **immediately** (synchronous capability)
/// or **later** (it suspends, e.g. it performs a further asynchronous
/// step before producing a value). The dispatcher answers `Ready`
/// completions inline and spawns `Deferred` ones, so its loop never
/// waits on a suspended handler.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tether_capability::Completion;
///
/// let now = Completion::ok(json!("done"));
/// assert!(now.is_ready());
///
/// let later = Completion::deferred(async { Ok(json!(42)) });
/// assert!(!later.is_ready());
/// ```
pub enum Completion {
    /// The handler produced its outcome synchronously.
    Ready(Result<Value, CapabilityError>),
    /// The handler suspended; the future resolves to the outcome.
    Deferred(BoxFuture<'static, Result<Value, CapabilityError>>),
}

impl Completion {
    /// Immediate success carrying `value`.
    #[must_use]
    pub fn ok(value: Value) -> Self {
        Self::Ready(Ok(value))
    }

    /// Immediate failure carrying `error`.
    #[must_use]
    pub fn fail(error: CapabilityError) -> Self {
        Self::Ready(Err(error))
    }

    /// Deferred outcome resolved by `future`.
    ///
    /// The future must be `Send + 'static` because it outlives the
    /// dispatch call that created it.
    #[must_use]
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = Result<Value, CapabilityError>> + Send + 'static,
    {
        Self::Deferred(Box::pin(future))
    }

    /// Returns `true` for an immediate completion.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl std::fmt::Debug for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            Self::Deferred(_) => f.debug_tuple("Deferred").field(&"..").finish(),
        }
    }
}

/// A named operation the executor performs on the orchestrator's behalf.
///
/// Implementors take a variable-length, untyped argument list and return
/// a [`Completion`]. Handlers that complete synchronously run inline on
/// the dispatch loop and must not perform long blocking work; anything
/// slow belongs behind [`Completion::deferred`].
///
/// Concurrent invocations of the same capability are permitted; the
/// registry imposes no per-capability serialization, so a handler that
/// is not reentrant-safe must serialize internally.
///
/// # Blanket Impl
///
/// Any `Fn(Vec<Value>) -> Completion + Send + Sync` is a capability, so
/// plain functions and closures register directly:
///
/// ```
/// use serde_json::{json, Value};
/// use tether_capability::{Capability, Completion};
///
/// let echo = |args: Vec<Value>| Completion::ok(Value::Array(args));
/// let completion = echo.invoke(vec![json!(1)]);
/// assert!(completion.is_ready());
/// ```
pub trait Capability: Send + Sync {
    /// Invokes the capability with the request's argument list.
    fn invoke(&self, args: Vec<Value>) -> Completion;
}

impl<F> Capability for F
where
    F: Fn(Vec<Value>) -> Completion + Send + Sync,
{
    fn invoke(&self, args: Vec<Value>) -> Completion {
        self(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ready_constructors() {
        assert!(Completion::ok(json!(1)).is_ready());
        assert!(Completion::fail(CapabilityError::Failed("x".into())).is_ready());
    }

    #[test]
    fn deferred_is_not_ready() {
        let completion = Completion::deferred(async { Ok(json!(42)) });
        assert!(!completion.is_ready());
    }

    #[test]
    fn closures_are_capabilities() {
        let double = |args: Vec<Value>| {
            let n = args.first().and_then(Value::as_i64).unwrap_or(0);
            Completion::ok(json!(n * 2))
        };

        match double.invoke(vec![json!(21)]) {
            Completion::Ready(Ok(value)) => assert_eq!(value, json!(42)),
            other => panic!("expected ready success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn deferred_resolves_to_its_value() {
        let completion = Completion::deferred(async { Ok(json!("later")) });
        match completion {
            Completion::Deferred(fut) => assert_eq!(fut.await, Ok(json!("later"))),
            Completion::Ready(_) => panic!("expected deferred"),
        }
    }

    #[test]
    fn debug_does_not_require_future_debug() {
        let completion = Completion::deferred(async { Ok(Value::Null) });
        assert!(format!("{:?}", completion).contains("Deferred"));
    }
}
