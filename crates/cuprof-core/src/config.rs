//! Profiler configuration.
//!
//! Built programmatically or read from the environment:
//!
//! | Variable             | Values                                   | Default     |
//! |----------------------|------------------------------------------|-------------|
//! | `CUPROF_ENABLED`     | `1`/`true`/`yes`/`on`, `0`/`false`/`no`/`off` | enabled |
//! | `CUPROF_LOCK_POLICY` | `serialize`, `unserialized`              | `serialize` |

use std::fmt;
use std::str::FromStr;

use crate::error::{ProfilerError, Result};

/// Environment variable toggling annotations.
pub const ENV_ENABLED: &str = "CUPROF_ENABLED";
/// Environment variable selecting the lock policy.
pub const ENV_LOCK_POLICY: &str = "CUPROF_LOCK_POLICY";

/// How calls into the native library are serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockPolicy {
    /// Hold the profiler lock for the whole native call. At most one thread
    /// is inside the native library at a time.
    #[default]
    Serialize,
    /// No lock. For native libraries that are thread-safe on their own.
    Unserialized,
}

impl FromStr for LockPolicy {
    type Err = ProfilerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "serialize" | "serialized" => Ok(LockPolicy::Serialize),
            "unserialized" | "none" => Ok(LockPolicy::Unserialized),
            other => Err(ProfilerError::Config(format!(
                "{ENV_LOCK_POLICY}: unknown lock policy '{other}'"
            ))),
        }
    }
}

impl fmt::Display for LockPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockPolicy::Serialize => f.write_str("serialize"),
            LockPolicy::Unserialized => f.write_str("unserialized"),
        }
    }
}

/// Profiler configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilerConfig {
    /// Whether annotations are emitted.
    pub enabled: bool,
    /// Serialization of native calls.
    pub lock_policy: LockPolicy,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            lock_policy: LockPolicy::Serialize,
        }
    }
}

impl ProfilerConfig {
    /// Start a builder from the defaults.
    pub fn builder() -> ProfilerConfigBuilder {
        ProfilerConfigBuilder::new()
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(ENV_ENABLED) {
            config.enabled = parse_flag(ENV_ENABLED, &value)?;
        }
        if let Some(value) = lookup(ENV_LOCK_POLICY) {
            config.lock_policy = value.parse()?;
        }
        tracing::debug!(
            enabled = config.enabled,
            lock_policy = %config.lock_policy,
            "Loaded profiler configuration"
        );
        Ok(config)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ProfilerError::Config(format!(
            "{key}: expected a boolean, got '{other}'"
        ))),
    }
}

/// Builder for [`ProfilerConfig`].
#[derive(Debug, Clone, Default)]
pub struct ProfilerConfigBuilder {
    config: ProfilerConfig,
}

impl ProfilerConfigBuilder {
    /// Create a builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable annotations.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    /// Set the lock policy.
    pub fn lock_policy(mut self, policy: LockPolicy) -> Self {
        self.config.lock_policy = policy;
        self
    }

    /// Finish building.
    pub fn build(self) -> ProfilerConfig {
        self.config
    }
}
