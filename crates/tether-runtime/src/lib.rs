//! Tether runtime - dispatcher, registry, gateway, and link.
//!
//! This crate implements both halves of the Tether invocation protocol
//! on top of the message vocabulary from `tether-protocol`:
//!
//! ```text
//! ┌─────────────────────────┐          ┌──────────────────────────────┐
//! │  Orchestrator process   │          │  Executor process            │
//! │                         │          │                              │
//! │  InvocationGateway      │ requests │  CommandDispatcher           │
//! │   ├─ pending call table │ ───────► │   ├─ CapabilityRegistry      │
//! │   └─ response router    │ ◄─────── │   │    (name → handler)      │
//! │                         │ responses│   └─ ready: answer inline    │
//! │                         │          │      deferred: spawn         │
//! └─────────────────────────┘          └──────────────────────────────┘
//!              ▲                                      ▲
//!              └────────── link (ordered, reliable) ──┘
//! ```
//!
//! # Modules
//!
//! ## [`dispatch`] - Executor Side
//!
//! - [`CapabilityRegistry`](dispatch::CapabilityRegistry): name → handler map
//! - [`RegistryHandle`](dispatch::RegistryHandle): shared view for providers
//! - [`CommandDispatcher`](dispatch::CommandDispatcher): the sole consumer
//!   of inbound requests; exactly one response per request
//!
//! ## [`gateway`] - Orchestrator Side
//!
//! - [`InvocationGateway`](gateway::InvocationGateway): turns the protocol
//!   into `invoke(name, args) -> Result<Value, _>` with correlation-id
//!   matching; unmatched responses are discarded
//!
//! ## [`link`] - Transport Boundary
//!
//! - [`OrchestratorLink`](link::OrchestratorLink) /
//!   [`ExecutorLink`](link::ExecutorLink): endpoint types a transport
//!   binding produces
//! - [`loopback`](link::loopback): in-memory reference pair for tests and
//!   single-process wiring
//!
//! ## [`config`] - Configuration
//!
//! - [`TetherConfig`](config::TetherConfig): defaults → TOML → `TETHER_*`
//!   env layering
//!
//! # Construction Discipline
//!
//! There are no process-wide singletons here. A dispatcher and a gateway
//! are plain values constructed once at startup from their link endpoint;
//! capability providers receive a cloned
//! [`RegistryHandle`](dispatch::RegistryHandle) and never touch the link.
//!
//! # Usage
//!
//! ```
//! use serde_json::{json, Value};
//! use tether_capability::Completion;
//! use tether_runtime::dispatch::CommandDispatcher;
//! use tether_runtime::gateway::InvocationGateway;
//! use tether_runtime::link;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (orchestrator, executor) = link::loopback(8);
//!
//! let dispatcher = CommandDispatcher::new(executor);
//! let registry = dispatcher.registry();
//! registry.register("echo", |args: Vec<Value>| Completion::ok(Value::Array(args)));
//! tokio::spawn(dispatcher.run());
//!
//! let gateway = InvocationGateway::new(orchestrator);
//! let result = gateway.invoke("echo", vec![json!("hi")]).await.unwrap();
//! assert_eq!(result, json!(["hi"]));
//! # }
//! ```

pub mod config;
pub mod dispatch;
pub mod gateway;
pub mod link;

// Re-exports for convenience
pub use config::{ConfigError, TetherConfig, DEFAULT_LINK_BUFFER, DEFAULT_TIMEOUT_MS};
pub use dispatch::{CapabilityRegistry, CommandDispatcher, DispatchError, RegistryHandle};
pub use gateway::{GatewayError, InvocationGateway};
pub use link::{loopback, ExecutorLink, LinkError, OrchestratorLink, ResponseSender};
