//! Wire messages for the Tether invocation protocol.
//!
//! This crate defines the two message shapes that cross the transport
//! channel between the orchestrator and the executor. It knows nothing
//! about transports or runtimes; it is the stable vocabulary both peers
//! share.
//!
//! # Protocol Overview
//!
//! ```text
//! ┌──────────────┐  InvocationRequest   ┌──────────────┐
//! │ Orchestrator │ ───────────────────► │   Executor   │
//! │  (gateway)   │                      │ (dispatcher) │
//! │              │ ◄─────────────────── │              │
//! └──────────────┘  InvocationResponse  └──────────────┘
//! ```
//!
//! The channel itself carries no correlation: the `invocationId` inside
//! each message is the only contract pairing a response with its request.
//! Exactly one response is emitted per request; `result` and `error` are
//! mutually exclusive on the response.
//!
//! # Wire Shape
//!
//! | Message | JSON |
//! |---------|------|
//! | Request | `{ "invocationId": "…", "name": "sum", "args": [2, 3] }` |
//! | Response (ok) | `{ "invocationId": "…", "success": true, "result": 5 }` |
//! | Response (err) | `{ "invocationId": "…", "success": false, "error": "boom" }` |
//!
//! # Usage
//!
//! ```
//! use serde_json::json;
//! use tether_protocol::{InvocationRequest, InvocationResponse};
//!
//! let req = InvocationRequest::new("sum", vec![json!(2), json!(3)]);
//! let resp = InvocationResponse::ok(req.id, json!(5));
//!
//! assert_eq!(resp.into_result(), Ok(json!(5)));
//! ```

mod error;
mod message;

pub use error::ProtocolError;
pub use message::{InvocationRequest, InvocationResponse};
