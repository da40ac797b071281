//! Runtime configuration with layered loading.
//!
//! # Load Order
//!
//! 1. Default values (compile-time)
//! 2. TOML file, when a path is given
//! 3. Environment variables (`TETHER_*`)
//!
//! Each layer overrides the previous.
//!
//! # Environment Variables
//!
//! - `TETHER_DEBUG`: enable debug mode (`true`/`false`/`1`/`0`)
//! - `TETHER_LINK_BUFFER`: loopback link channel capacity
//! - `TETHER_INVOKE_TIMEOUT_MS`: default invocation timeout in ms
//!
//! # Example
//!
//! ```
//! use tether_runtime::config::TetherConfig;
//!
//! let config = TetherConfig::default();
//! assert!(!config.debug);
//! assert_eq!(config.link.buffer, 64);
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tether_types::ErrorCode;
use thiserror::Error;
use tracing::debug;

/// Default bound a caller applies to an invocation, in milliseconds.
///
/// The protocol itself has no timeout; this is the out-of-the-box value
/// for callers (the CLI among them) that want one.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default loopback link channel capacity.
pub const DEFAULT_LINK_BUFFER: usize = 64;

/// Main configuration structure.
///
/// Serializes to TOML for file storage; every field has a compile-time
/// default so an empty file (or no file) is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TetherConfig {
    /// Enable debug mode (verbose logging).
    pub debug: bool,

    /// Link configuration.
    pub link: LinkConfig,

    /// Invocation configuration.
    pub invoke: InvokeConfig,
}

/// Link layer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Channel capacity of the loopback link.
    pub buffer: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            buffer: DEFAULT_LINK_BUFFER,
        }
    }
}

/// Invocation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvokeConfig {
    /// Default timeout applied by callers that want a latency bound.
    pub default_timeout_ms: u64,
}

impl Default for InvokeConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl TetherConfig {
    /// Creates a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration: defaults, then `path` (if given), then
    /// `TETHER_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or
    /// an environment variable carries an unparseable value.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = path {
            let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            config = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
            debug!(path = %path.display(), "loaded config file");
        }

        config.apply_env()?;
        Ok(config)
    }

    /// Serializes to a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserializes from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Applies `TETHER_*` environment variable overrides in place.
    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("TETHER_DEBUG") {
            self.debug = parse_bool(&val)
                .ok_or_else(|| ConfigError::invalid_env_var("TETHER_DEBUG", "expected bool"))?;
        }

        if let Ok(val) = std::env::var("TETHER_LINK_BUFFER") {
            self.link.buffer = val.parse().map_err(|_| {
                ConfigError::invalid_env_var("TETHER_LINK_BUFFER", "expected positive integer")
            })?;
        }

        if let Ok(val) = std::env::var("TETHER_INVOKE_TIMEOUT_MS") {
            self.invoke.default_timeout_ms = val.parse().map_err(|_| {
                ConfigError::invalid_env_var("TETHER_INVOKE_TIMEOUT_MS", "expected milliseconds")
            })?;
        }

        Ok(())
    }
}

/// Parses common boolean spellings.
fn parse_bool(val: &str) -> Option<bool> {
    match val.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Configuration layer errors.
///
/// # Error Code Convention
///
/// All config errors use the `CONFIG_` prefix:
///
/// | Error | Code | Recoverable |
/// |-------|------|-------------|
/// | [`ConfigError::Read`] | `CONFIG_READ` | Yes |
/// | [`ConfigError::Parse`] | `CONFIG_PARSE` | No |
/// | [`ConfigError::InvalidEnvVar`] | `CONFIG_INVALID_ENV_VAR` | No |
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path of the file that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`TetherConfig`].
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// Path of the file that failed to parse.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// An environment variable carries an unparseable value.
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar {
        /// Name of the offending variable.
        var: &'static str,
        /// What was expected.
        reason: String,
    },
}

impl ConfigError {
    /// Builds an [`InvalidEnvVar`](Self::InvalidEnvVar) error.
    #[must_use]
    pub fn invalid_env_var(var: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidEnvVar {
            var,
            reason: reason.into(),
        }
    }
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "CONFIG_READ",
            Self::Parse { .. } => "CONFIG_PARSE",
            Self::InvalidEnvVar { .. } => "CONFIG_INVALID_ENV_VAR",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::Read { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tether_types::assert_error_codes;

    fn all_variants() -> Vec<ConfigError> {
        vec![
            ConfigError::Read {
                path: "x.toml".into(),
                source: std::io::Error::other("x"),
            },
            ConfigError::Parse {
                path: "x.toml".into(),
                source: TetherConfig::from_toml("debug = 3").unwrap_err(),
            },
            ConfigError::invalid_env_var("TETHER_DEBUG", "expected bool"),
        ]
    }

    #[test]
    fn all_error_codes_valid() {
        assert_error_codes(&all_variants(), "CONFIG_");
    }

    #[test]
    fn defaults() {
        let config = TetherConfig::default();
        assert!(!config.debug);
        assert_eq!(config.link.buffer, DEFAULT_LINK_BUFFER);
        assert_eq!(config.invoke.default_timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn toml_round_trip() {
        let mut config = TetherConfig::default();
        config.debug = true;
        config.link.buffer = 8;

        let text = config.to_toml().unwrap();
        let back = TetherConfig::from_toml(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let config = TetherConfig::from_toml("").unwrap();
        assert_eq!(config, TetherConfig::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = TetherConfig::from_toml("[invoke]\ndefault_timeout_ms = 500\n").unwrap();
        assert_eq!(config.invoke.default_timeout_ms, 500);
        assert_eq!(config.link.buffer, DEFAULT_LINK_BUFFER);
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "debug = true\n\n[link]\nbuffer = 4").unwrap();

        let config = TetherConfig::load(Some(file.path())).unwrap();
        assert!(config.debug);
        assert_eq!(config.link.buffer, 4);
    }

    #[test]
    fn load_missing_file_errors() {
        let err = TetherConfig::load(Some(Path::new("/nonexistent/tether.toml"))).unwrap_err();
        assert_eq!(err.code(), "CONFIG_READ");
    }

    #[test]
    fn parse_bool_spellings() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("FALSE"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
