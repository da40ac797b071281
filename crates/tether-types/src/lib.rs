//! Core types for Tether.
//!
//! This crate provides the identifier types and the unified error
//! interface shared by every layer of the Tether protocol stack.
//!
//! # Crate Architecture
//!
//! This crate is the bottom of the dependency tree:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Protocol SDK Layer                     │
//! │  (stable, safe for capability providers to depend on)       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  tether-types      : InvocationId, ErrorCode  ◄── HERE      │
//! │  tether-protocol   : InvocationRequest/Response             │
//! │  tether-capability : Capability trait, Completion           │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Runtime Layer                          │
//! │  tether-runtime : registry, dispatcher, gateway, link       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use tether_types::InvocationId;
//!
//! let a = InvocationId::new();
//! let b = InvocationId::new();
//! assert_ne!(a, b); // every id is fresh
//! ```

mod error;
mod id;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::InvocationId;
