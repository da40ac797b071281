//! Tether CLI - loopback demo shell for the invocation protocol.
//!
//! Wires an orchestrator/executor pair over an in-memory link inside
//! one process, registers the built-in demo capabilities, and invokes
//! them through the gateway: the full protocol path, end to end.
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`TETHER_*`)
//! 3. Config file (`--config <PATH>`)
//! 4. Default values (lowest priority)
//!
//! # Environment Variables
//!
//! - `TETHER_DEBUG`: enable debug mode (`true`/`false`)
//! - `TETHER_LINK_BUFFER`: loopback link channel capacity
//! - `TETHER_INVOKE_TIMEOUT_MS`: invocation timeout in milliseconds
//! - `TETHER_LOG`: tracing filter directive (overrides `--log-level`)

mod demo;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tether_runtime::dispatch::CommandDispatcher;
use tether_runtime::gateway::{GatewayError, InvocationGateway};
use tether_runtime::{link, TetherConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Tether - loopback demo shell for the invocation protocol
#[derive(Parser, Debug)]
#[command(name = "tether")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Tracing filter directive (also: TETHER_LOG)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Config file path
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Capability to invoke (runs the scripted demo when omitted)
    name: Option<String>,

    /// Invocation arguments, parsed as JSON (bare words become strings)
    #[arg(trailing_var_arg = true)]
    args: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config =
        TetherConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    let debug = args.debug || config.debug;

    init_tracing(debug, args.log_level.as_deref());

    // One dispatcher and one gateway per process, wired over a loopback
    // link and handed to everything that needs them.
    let (orchestrator, executor) = link::loopback(config.link.buffer);
    let dispatcher = CommandDispatcher::new(executor);
    let registry = dispatcher.registry();
    demo::register_demo_capabilities(&registry);
    tokio::spawn(dispatcher.run());

    let gateway = InvocationGateway::new(orchestrator);
    let timeout = Duration::from_millis(config.invoke.default_timeout_ms);

    match args.name {
        Some(name) => {
            let values = args.args.iter().map(|raw| parse_arg(raw)).collect();
            let result = gateway
                .invoke_with_timeout(name.as_str(), values, timeout)
                .await
                .with_context(|| format!("invocation of '{name}' failed"))?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        None => run_demo(&gateway, timeout).await,
    }

    Ok(())
}

/// Initializes the fmt subscriber with an env-filter.
///
/// `TETHER_LOG` wins over `--log-level`, which wins over the default
/// directive (`debug` in debug mode, `info` otherwise).
fn init_tracing(debug: bool, log_level: Option<&str>) {
    let default_directive = log_level.unwrap_or(if debug { "debug" } else { "info" });
    let filter = EnvFilter::try_from_env("TETHER_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Parses one CLI argument as JSON, falling back to a plain string.
fn parse_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Runs the scripted demo: one call per built-in capability, plus an
/// unroutable probe. Failures are part of the show, not process errors.
async fn run_demo(gateway: &InvocationGateway, timeout: Duration) {
    info!("running scripted demo");

    let script: Vec<(&str, Vec<Value>)> = vec![
        ("echo", vec![Value::String("hello tether".into())]),
        ("sum", vec![Value::from(2), Value::from(3)]),
        ("delay", vec![Value::from(25)]),
        ("fail", vec![Value::String("boom".into())]),
        ("missing", vec![]),
    ];

    for (name, call_args) in script {
        let rendered = serde_json::to_string(&call_args).unwrap_or_default();
        match gateway
            .invoke_with_timeout(name, call_args, timeout)
            .await
        {
            Ok(value) => println!("{name} {rendered} -> {value}"),
            Err(GatewayError::Capability(message)) => {
                println!("{name} {rendered} -> error: {message}");
            }
            Err(other) => println!("{name} {rendered} -> error: {other}"),
        }
    }
}
