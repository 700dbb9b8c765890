//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// sdk-testing - helpers for cluster integration test runs
#[derive(Parser, Debug)]
#[command(name = "sdk-testing")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a config file (default: ~/.sdk-testing/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the cluster's private agents
    Agents(AgentsArgs),

    /// Reclaim agent disk space held by framework sandboxes
    GcFrameworks(GcFrameworksArgs),

    /// Run a local command, retrying on failure
    Retry(RetryArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

// Agents command
#[derive(Args, Debug)]
pub struct AgentsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Gc-frameworks command
#[derive(Args, Debug)]
pub struct GcFrameworksArgs {
    /// Agent host to clean (repeatable; default: every private agent)
    #[arg(short, long = "agent", value_name = "HOST")]
    pub agents: Vec<String>,

    /// Path glob to remove on each agent
    #[arg(long)]
    pub frameworks_glob: Option<String>,

    /// Show what would be run without running it
    #[arg(long)]
    pub dry_run: bool,
}

// Retry command
#[derive(Args, Debug)]
pub struct RetryArgs {
    /// Total number of attempts
    #[arg(short, long)]
    pub attempts: Option<u32>,

    /// Seconds to sleep between attempts
    #[arg(short, long)]
    pub sleep_seconds: Option<f64>,

    /// Program and arguments to run
    #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

// Config commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show resolved configuration
    Show(ConfigShowArgs),
}

#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_gc_frameworks_agents() {
        let cli = Cli::try_parse_from([
            "sdk-testing",
            "gc-frameworks",
            "--agent",
            "10.0.0.21",
            "-a",
            "10.0.0.22",
        ])
        .unwrap();

        match cli.command {
            Commands::GcFrameworks(args) => {
                assert_eq!(args.agents, vec!["10.0.0.21", "10.0.0.22"]);
                assert!(!args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_retry_with_separator() {
        let cli = Cli::try_parse_from([
            "sdk-testing",
            "retry",
            "--attempts",
            "3",
            "--sleep-seconds",
            "0.5",
            "--",
            "curl",
            "-f",
            "http://leader.mesos",
        ])
        .unwrap();

        match cli.command {
            Commands::Retry(args) => {
                assert_eq!(args.attempts, Some(3));
                assert_eq!(args.sleep_seconds, Some(0.5));
                assert_eq!(args.command, vec!["curl", "-f", "http://leader.mesos"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_retry_requires_command() {
        assert!(Cli::try_parse_from(["sdk-testing", "retry", "--attempts", "2"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "sdk-testing",
            "agents",
            "-vv",
            "--config",
            "/tmp/cluster.yaml",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config.as_deref().map(|p| p.as_str()), Some("/tmp/cluster.yaml"));
        assert!(matches!(cli.command, Commands::Agents(AgentsArgs { json: true })));
    }
}
