//! Configuration commands

use anyhow::Result;
use camino::Utf8Path;
use sdk_testing_core::TestingConfig;

use super::load_config;
use crate::cli::{ConfigCommands, ConfigShowArgs};

const REDACTED: &str = "<redacted>";

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, config_path: Option<&Utf8Path>) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => show(args, config_path),
    }
}

/// Print the effective configuration
fn show(args: ConfigShowArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = redacted(load_config(config_path)?);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", serde_yaml_ng::to_string(&config)?);
    }
    Ok(())
}

fn redacted(mut config: TestingConfig) -> TestingConfig {
    if config.cluster.auth_token.is_some() {
        config.cluster.auth_token = Some(REDACTED.to_string());
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_redacted() {
        let mut config = TestingConfig::default();
        config.cluster.auth_token = Some("eyJhbGciOi".to_string());

        let shown = redacted(config);
        assert_eq!(shown.cluster.auth_token.as_deref(), Some(REDACTED));
    }

    #[test]
    fn test_absent_token_stays_absent() {
        assert!(redacted(TestingConfig::default()).cluster.auth_token.is_none());
    }
}
