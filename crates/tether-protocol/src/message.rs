//! Invocation request and response messages.
//!
//! The `invocationId` field is the correlation token: the executor must
//! copy it from the request into the one response it emits, and the
//! orchestrator matches on it alone, never on arrival order.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tether_types::InvocationId;

use crate::ProtocolError;

/// Fallback error text for a failure response that carries no message.
///
/// A well-behaved executor always populates `error` on failure; this
/// only surfaces when folding a response from a non-conforming peer.
const UNSPECIFIED_FAILURE: &str = "unspecified failure";

/// A request to invoke a named capability on the executor.
///
/// Created by the orchestrator, one per logical call. The id is minted
/// at construction and never reused.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tether_protocol::InvocationRequest;
///
/// let req = InvocationRequest::new("echo", vec![json!("hello")]);
/// assert_eq!(req.name, "echo");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationRequest {
    /// Correlation token pairing this request with its response.
    #[serde(rename = "invocationId")]
    pub id: InvocationId,
    /// Name of the capability to invoke (the routing key).
    pub name: String,
    /// Ordered, untyped argument list.
    pub args: Vec<Value>,
}

impl InvocationRequest {
    /// Creates a request with a fresh [`InvocationId`].
    #[must_use]
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            id: InvocationId::new(),
            name: name.into(),
            args,
        }
    }

    /// Creates a request, rejecting an empty capability name.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidRequest`] if `name` is empty.
    pub fn try_new(name: impl Into<String>, args: Vec<Value>) -> Result<Self, ProtocolError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ProtocolError::InvalidRequest(
                "capability name cannot be empty".into(),
            ));
        }
        Ok(Self::new(name, args))
    }
}

/// The single response the executor emits for an invocation request.
///
/// `result` and `error` are mutually exclusive; the constructors are the
/// only way to build a response, so a well-formed one always populates
/// exactly the field matching its `success` flag.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tether_protocol::InvocationResponse;
/// use tether_types::InvocationId;
///
/// let id = InvocationId::new();
/// let ok = InvocationResponse::ok(id, json!(42));
/// assert!(ok.success);
///
/// let err = InvocationResponse::fail(id, "boom");
/// assert_eq!(err.into_result(), Err("boom".to_string()));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationResponse {
    /// Correlation token copied from the request.
    #[serde(rename = "invocationId")]
    pub id: InvocationId,
    /// Whether the handler produced a value.
    pub success: bool,
    /// The produced value; present exactly when `success` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Human-readable failure message; present exactly when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InvocationResponse {
    /// Creates a success response carrying `result`.
    #[must_use]
    pub fn ok(id: InvocationId, result: Value) -> Self {
        Self {
            id,
            success: true,
            result: Some(result),
            error: None,
        }
    }

    /// Creates a failure response carrying `error`.
    #[must_use]
    pub fn fail(id: InvocationId, error: impl Into<String>) -> Self {
        Self {
            id,
            success: false,
            result: None,
            error: Some(error.into()),
        }
    }

    /// Builds the response matching a handler outcome.
    #[must_use]
    pub fn from_result(id: InvocationId, result: Result<Value, String>) -> Self {
        match result {
            Ok(value) => Self::ok(id, value),
            Err(message) => Self::fail(id, message),
        }
    }

    /// Folds the response back into the handler outcome it carries.
    ///
    /// Lenient towards non-conforming peers: a success with no `result`
    /// folds to [`Value::Null`], a failure with no `error` folds to a
    /// fixed placeholder message. Neither is a protocol fault.
    #[must_use]
    pub fn into_result(self) -> Result<Value, String> {
        if self.success {
            Ok(self.result.unwrap_or(Value::Null))
        } else {
            Err(self.error.unwrap_or_else(|| UNSPECIFIED_FAILURE.into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_mints_fresh_ids() {
        let a = InvocationRequest::new("echo", vec![]);
        let b = InvocationRequest::new("echo", vec![]);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn try_new_rejects_empty_name() {
        let err = InvocationRequest::try_new("", vec![]).unwrap_err();
        assert!(err.to_string().contains("empty"));

        assert!(InvocationRequest::try_new("sum", vec![]).is_ok());
    }

    #[test]
    fn request_wire_shape() {
        let req = InvocationRequest::new("sum", vec![json!(2), json!(3)]);
        let wire = serde_json::to_value(&req).unwrap();

        assert_eq!(
            wire,
            json!({
                "invocationId": req.id.uuid().to_string(),
                "name": "sum",
                "args": [2, 3],
            })
        );
    }

    #[test]
    fn success_response_wire_shape_omits_error() {
        let id = InvocationId::new();
        let wire = serde_json::to_value(InvocationResponse::ok(id, json!(5))).unwrap();

        assert_eq!(
            wire,
            json!({
                "invocationId": id.uuid().to_string(),
                "success": true,
                "result": 5,
            })
        );
    }

    #[test]
    fn failure_response_wire_shape_omits_result() {
        let id = InvocationId::new();
        let wire = serde_json::to_value(InvocationResponse::fail(id, "boom")).unwrap();

        assert_eq!(
            wire,
            json!({
                "invocationId": id.uuid().to_string(),
                "success": false,
                "error": "boom",
            })
        );
    }

    #[test]
    fn response_round_trips_through_json() {
        let id = InvocationId::new();
        let resp = InvocationResponse::ok(id, json!({"answer": 42}));

        let text = serde_json::to_string(&resp).unwrap();
        let back: InvocationResponse = serde_json::from_str(&text).unwrap();

        assert_eq!(back.id, id);
        assert_eq!(back.into_result(), Ok(json!({"answer": 42})));
    }

    #[test]
    fn into_result_folds_both_arms() {
        let id = InvocationId::new();

        let ok = InvocationResponse::ok(id, json!(1));
        assert_eq!(ok.into_result(), Ok(json!(1)));

        let err = InvocationResponse::fail(id, "nope");
        assert_eq!(err.into_result(), Err("nope".to_string()));
    }

    #[test]
    fn into_result_is_lenient_on_malformed_responses() {
        let id = InvocationId::new();

        // Success with no result: folds to Null, not a fault.
        let bare_ok = InvocationResponse {
            id,
            success: true,
            result: None,
            error: None,
        };
        assert_eq!(bare_ok.into_result(), Ok(Value::Null));

        // Failure with no error: folds to the placeholder message.
        let bare_err = InvocationResponse {
            id,
            success: false,
            result: None,
            error: None,
        };
        assert_eq!(bare_err.into_result(), Err(UNSPECIFIED_FAILURE.to_string()));
    }

    #[test]
    fn from_result_matches_constructors() {
        let id = InvocationId::new();

        let ok = InvocationResponse::from_result(id, Ok(json!("value")));
        assert!(ok.success);
        assert_eq!(ok.result, Some(json!("value")));
        assert_eq!(ok.error, None);

        let err = InvocationResponse::from_result(id, Err("down".into()));
        assert!(!err.success);
        assert_eq!(err.result, None);
        assert_eq!(err.error, Some("down".into()));
    }
}
