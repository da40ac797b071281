//! Capability handler types for Tether.
//!
//! A *capability* is a named operation the executor can perform on the
//! orchestrator's behalf. This crate defines the handler contract that
//! capability providers implement and the executor runtime dispatches
//! against. It is transport- and runtime-agnostic: a provider depending
//! on this crate never sees the link or the dispatcher internals.
//!
//! # Handler Contract
//!
//! ```text
//! ┌──────────────┐   invoke(args)    ┌───────────────────────┐
//! │  Dispatcher  │ ────────────────► │  Capability handler   │
//! │              │ ◄──────────────── │                       │
//! └──────────────┘    Completion     └───────────────────────┘
//!                        │
//!          ┌─────────────┴─────────────┐
//!          ▼                           ▼
//!   Ready(Result)              Deferred(future)
//!   answered inline            resolved later, off the
//!   on the dispatch loop       dispatch loop
//! ```
//!
//! A handler accepts an ordered, untyped argument list and returns a
//! [`Completion`]: either an immediate result, or a deferred computation
//! that eventually yields a value or fails. The dispatcher never blocks
//! on a deferred completion.
//!
//! # Usage
//!
//! ```
//! use serde_json::{json, Value};
//! use tether_capability::{Capability, CapabilityError, Completion};
//!
//! // Plain functions are capabilities via the blanket impl.
//! fn sum(args: Vec<Value>) -> Completion {
//!     match (args.first().and_then(Value::as_i64), args.get(1).and_then(Value::as_i64)) {
//!         (Some(a), Some(b)) => Completion::ok(json!(a + b)),
//!         _ => Completion::fail(CapabilityError::InvalidArgs(
//!             "expected two integers".into(),
//!         )),
//!     }
//! }
//!
//! let completion = sum.invoke(vec![json!(2), json!(3)]);
//! assert!(completion.is_ready());
//! ```
//!
//! # Related Crates
//!
//! - `tether-types` - [`ErrorCode`](tether_types::ErrorCode) implemented
//!   by [`CapabilityError`]
//! - `tether-runtime` - registry and dispatcher consuming this contract

mod capability;
mod error;
pub mod testing;

pub use capability::{Capability, Completion};
pub use error::CapabilityError;
