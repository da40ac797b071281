//! Executor-side dispatch: registry and command dispatcher.
//!
//! ```text
//!              lookup(name)
//! ExecutorLink ───► CommandDispatcher ───► CapabilityRegistry
//!                        │                       ▲
//!                        │ invoke(args)          │ register / unregister
//!                        ▼                       │
//!                   Capability             RegistryHandle (providers)
//! ```
//!
//! The dispatcher is the sole consumer of inbound requests and the only
//! reader of the registry; providers mutate the registry through cloned
//! [`RegistryHandle`]s during their own initialization and teardown.

mod dispatcher;
mod error;
mod registry;

pub use dispatcher::CommandDispatcher;
pub use error::DispatchError;
pub use registry::{CapabilityRegistry, RegistryHandle};
