//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. Global config (~/.sdk-testing/config.yaml) or an explicit file
//! 3. Environment variables (SDK_TESTING_* prefix, DCOS_* fallbacks)
//! 4. CLI flags (handled by caller)

use crate::error::{Error, Result};
use crate::types::{ClusterSettings, SshSettings, TestingConfig};
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use std::str::FromStr;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

const DEFAULTS_FILE: &str = "testing-defaults.yaml";
const GLOBAL_CONFIG_FILE: &str = "config.yaml";

/// Configuration hierarchy loader
pub struct HierarchicalConfigLoader {
    /// Base directory for configuration files
    config_dir: Utf8PathBuf,
}

impl HierarchicalConfigLoader {
    /// Create a loader rooted at the standard config directory
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        Ok(Self { config_dir })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    /// Get the standard config directory (~/.sdk-testing)
    fn get_config_dir() -> Result<Utf8PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::invalid_config("Could not determine home directory"))?;
        let home = Utf8PathBuf::from_path_buf(home)
            .map_err(|p| Error::invalid_config(format!("Non UTF-8 home directory: {}", p.display())))?;
        Ok(home.join(".sdk-testing"))
    }

    /// Load configuration using the global config file, if present
    pub fn load(&self) -> Result<TestingConfig> {
        let global = self.config_dir.join(GLOBAL_CONFIG_FILE);
        let overlay = if global.exists() {
            Some(self.load_yaml_file::<TestingConfig>(&global)?)
        } else {
            None
        };
        self.finish(overlay)
    }

    /// Load configuration using an explicit file instead of the global one
    pub fn load_with_file(&self, path: &Utf8Path) -> Result<TestingConfig> {
        if !path.exists() {
            return Err(Error::config_not_found(path.as_str()));
        }
        let overlay = self.load_yaml_file::<TestingConfig>(path)?;
        self.finish(Some(overlay))
    }

    fn finish(&self, overlay: Option<TestingConfig>) -> Result<TestingConfig> {
        let mut config = Self::load_embedded_config::<TestingConfig>(DEFAULTS_FILE)?;

        if let Some(overlay) = overlay {
            config = Self::merge_config(config, overlay);
        }

        config = self.apply_env_overrides(config)?;
        config.validate()?;

        tracing::debug!(
            config_dir = %self.config_dir,
            cluster_url = ?config.cluster.url,
            "configuration loaded"
        );

        Ok(config)
    }

    /// Load an embedded configuration file
    fn load_embedded_config<T: DeserializeOwned>(filename: &str) -> Result<T> {
        let embedded_file = EmbeddedConfigs::get(filename).ok_or_else(|| {
            Error::config_not_found(format!("Embedded config not found: {}", filename))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", filename))
        })?;

        let config: T = serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                filename, e
            ))
        })?;

        Ok(config)
    }

    /// Load a YAML file and parse it
    fn load_yaml_file<T: DeserializeOwned>(&self, path: &Utf8Path) -> Result<T> {
        let content = fs::read_to_string(path)?;
        let config: T = serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))?;
        Ok(config)
    }

    /// Merge two configs (base is overridden by overlay)
    ///
    /// Optional values unset in the overlay keep the base value.
    fn merge_config(base: TestingConfig, overlay: TestingConfig) -> TestingConfig {
        TestingConfig {
            cluster: ClusterSettings {
                url: overlay.cluster.url.or(base.cluster.url),
                auth_token: overlay.cluster.auth_token.or(base.cluster.auth_token),
                ..overlay.cluster
            },
            ssh: SshSettings {
                key_path: overlay.ssh.key_path.or(base.ssh.key_path),
                ..overlay.ssh
            },
            retry: overlay.retry,
            reclaim: overlay.reclaim,
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&self, mut config: TestingConfig) -> Result<TestingConfig> {
        if let Some(val) = env_with_fallback("SDK_TESTING_CLUSTER_URL", "DCOS_URL") {
            config.cluster.url = Some(val);
        }

        if let Some(val) = env_with_fallback("SDK_TESTING_AUTH_TOKEN", "DCOS_ACS_TOKEN") {
            config.cluster.auth_token = Some(val);
        }

        if let Ok(val) = env::var("SDK_TESTING_SSH_USER") {
            config.ssh.user = val;
        }

        if let Ok(val) = env::var("SDK_TESTING_SSH_KEY") {
            config.ssh.key_path = Some(val);
        }

        if let Ok(val) = env::var("SDK_TESTING_SSH_PORT") {
            config.ssh.port = parse_env("SDK_TESTING_SSH_PORT", &val)?;
        }

        if let Ok(val) = env::var("SDK_TESTING_RETRY_ATTEMPTS") {
            config.retry.attempts = parse_env("SDK_TESTING_RETRY_ATTEMPTS", &val)?;
        }

        if let Ok(val) = env::var("SDK_TESTING_RETRY_SLEEP_SECS") {
            config.retry.sleep_seconds = parse_env("SDK_TESTING_RETRY_SLEEP_SECS", &val)?;
        }

        Ok(config)
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}

fn env_with_fallback(primary: &str, fallback: &str) -> Option<String> {
    env::var(primary)
        .or_else(|_| env::var(fallback))
        .ok()
        .filter(|v| !v.trim().is_empty())
}

fn parse_env<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::invalid_config(format!("{} must be a valid number", name)))
}
