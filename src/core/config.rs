/*!
 * Syscall Layer Configuration
 *
 * Runtime configuration for one emulated process
 */

use super::errors::{KernelError, KernelResult};
use super::limits::{DEFAULT_MAX_FDS, DEFAULT_PIPE_CAPACITY};
use super::types::Pid;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// Environment variable enabling verbose syscall traces
pub const ENV_VERBOSE: &str = "KERNEL_SYSCALL_VERBOSE";
/// Environment variable overriding the pipe buffer capacity
pub const ENV_PIPE_CAPACITY: &str = "KERNEL_PIPE_CAPACITY";
/// Environment variable overriding the descriptor limit
pub const ENV_MAX_FDS: &str = "KERNEL_MAX_FDS";
/// Environment variable overriding the guest pid
pub const ENV_GUEST_PID: &str = "KERNEL_GUEST_PID";

/// Default pid reported for the emulated process
pub const DEFAULT_GUEST_PID: Pid = 4242;

/// Syscall layer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyscallConfig {
    /// Emit per-call trace lines for descriptor-creating calls
    pub verbose: bool,
    /// Capacity of each pipe created by pipe2
    pub pipe_capacity: usize,
    /// Maximum number of open descriptors
    pub max_fds: usize,
    /// Pid the guest observes for itself
    pub pid: Pid,
}

impl Default for SyscallConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            pipe_capacity: DEFAULT_PIPE_CAPACITY,
            max_fds: DEFAULT_MAX_FDS,
            pid: DEFAULT_GUEST_PID,
        }
    }
}

impl SyscallConfig {
    /// Default configuration with verbose traces enabled
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            ..Self::default()
        }
    }

    /// Builder-style pid override
    pub fn with_pid(mut self, pid: Pid) -> Self {
        self.pid = pid;
        self
    }

    /// Builder-style descriptor limit override
    pub fn with_max_fds(mut self, max_fds: usize) -> Self {
        self.max_fds = max_fds;
        self
    }

    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json(raw: &str) -> KernelResult<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| KernelError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject sizes that would leave pipes or the descriptor table unusable
    pub fn validate(&self) -> KernelResult<()> {
        if self.max_fds == 0 {
            return Err(KernelError::Config("max_fds must be at least 1".into()));
        }
        if self.pipe_capacity == 0 {
            return Err(KernelError::Config("pipe_capacity must be at least 1".into()));
        }
        Ok(())
    }

    /// Load configuration from `KERNEL_*` environment variables
    ///
    /// Unset variables keep their defaults; malformed or zero sizes are
    /// logged and ignored.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            verbose: std::env::var(ENV_VERBOSE)
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.verbose),
            pipe_capacity: nonzero_env_or(ENV_PIPE_CAPACITY, defaults.pipe_capacity),
            max_fds: nonzero_env_or(ENV_MAX_FDS, defaults.max_fds),
            pid: env_or(ENV_GUEST_PID, defaults.pid),
        }
    }
}

fn env_or<T: FromStr + Copy>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(key, value = %raw, "Ignoring malformed configuration value");
                default
            }
        },
        Err(_) => default,
    }
}

fn nonzero_env_or(key: &str, default: usize) -> usize {
    match env_or(key, default) {
        0 => {
            warn!(key, "Ignoring zero size in configuration");
            default
        }
        value => value,
    }
}
