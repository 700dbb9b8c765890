//! Configuration types for the test-support helpers
//!
//! These types describe how to reach the cluster under test, how to open
//! remote shells on its agents, and the default retry behaviour.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Error, Result};

/// Default glob of Mesos framework sandboxes removed by disk reclamation
pub const DEFAULT_FRAMEWORKS_GLOB: &str = "/var/lib/mesos/slave/slaves/*/frameworks/*";

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TestingConfig {
    /// Cluster endpoint settings
    #[serde(default)]
    pub cluster: ClusterSettings,

    /// Remote shell settings
    #[serde(default)]
    pub ssh: SshSettings,

    /// Default retry policy
    #[serde(default)]
    pub retry: RetryPolicy,

    /// Disk reclamation settings
    #[serde(default)]
    pub reclaim: ReclaimSettings,
}

impl TestingConfig {
    /// Validate every section that has constraints
    pub fn validate(&self) -> Result<()> {
        self.retry.validate()?;
        if self.ssh.port == 0 {
            return Err(Error::invalid_config("ssh.port must be non-zero"));
        }
        if self.reclaim.frameworks_glob.trim().is_empty() {
            return Err(Error::invalid_config(
                "reclaim.frameworks-glob must not be empty",
            ));
        }
        Ok(())
    }
}

/// Cluster endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClusterSettings {
    /// Base URL of the cluster (e.g. `https://leader.mesos`)
    #[serde(default)]
    pub url: Option<String>,

    /// ACS token sent as `Authorization: token=...`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    /// Verify the cluster's TLS certificate
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ClusterSettings {
    fn default() -> Self {
        Self {
            url: None,
            auth_token: None,
            verify_tls: default_verify_tls(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_verify_tls() -> bool {
    true
}
fn default_request_timeout() -> u64 {
    30
}

/// Remote shell settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SshSettings {
    /// Login user on the agents
    #[serde(default = "default_ssh_user")]
    pub user: String,

    /// SSH port
    #[serde(default = "default_ssh_port")]
    pub port: u16,

    /// Private key passed with `-i`
    #[serde(default)]
    pub key_path: Option<String>,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for SshSettings {
    fn default() -> Self {
        Self {
            user: default_ssh_user(),
            port: default_ssh_port(),
            key_path: None,
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

fn default_ssh_user() -> String {
    "core".to_string()
}
fn default_ssh_port() -> u16 {
    22
}
fn default_connect_timeout() -> u64 {
    10
}

/// Fixed-delay retry policy
///
/// `attempts` counts every invocation, including the first one. The delay is
/// applied between attempts only, never after the last one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RetryPolicy {
    /// Total number of attempts
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    /// Delay between attempts in seconds
    #[serde(default)]
    pub sleep_seconds: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: default_attempts(),
            sleep_seconds: 0.0,
        }
    }
}

fn default_attempts() -> u32 {
    1
}

impl RetryPolicy {
    /// Create a policy from an attempt count and a delay in seconds
    pub fn new(attempts: u32, sleep_seconds: f64) -> Self {
        Self {
            attempts,
            sleep_seconds,
        }
    }

    /// Attempt count actually used by the invoker (never below one)
    pub fn effective_attempts(&self) -> u32 {
        self.attempts.max(1)
    }

    /// Delay between attempts
    ///
    /// Negative, NaN and overflowing values collapse to zero.
    pub fn sleep_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.sleep_seconds).unwrap_or(Duration::ZERO)
    }

    /// Reject policies that cannot be honoured as written
    pub fn validate(&self) -> Result<()> {
        if self.attempts == 0 {
            return Err(Error::invalid_config("retry.attempts must be at least 1"));
        }
        if !self.sleep_seconds.is_finite() || self.sleep_seconds < 0.0 {
            return Err(Error::invalid_config(format!(
                "retry.sleep-seconds must be a non-negative number, got {}",
                self.sleep_seconds
            )));
        }
        Ok(())
    }
}

/// Disk reclamation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReclaimSettings {
    /// Path glob removed on every private agent
    #[serde(default = "default_frameworks_glob")]
    pub frameworks_glob: String,
}

impl Default for ReclaimSettings {
    fn default() -> Self {
        Self {
            frameworks_glob: default_frameworks_glob(),
        }
    }
}

fn default_frameworks_glob() -> String {
    DEFAULT_FRAMEWORKS_GLOB.to_string()
}
