//! Run a local command through the retry wrapper

use anyhow::{anyhow, bail, Context, Result};
use camino::Utf8Path;
use sdk_testing_core::retry::{RetryInvoker, SinkObserver, TracingObserver};
use sdk_testing_core::RetryPolicy;

use super::load_config;
use crate::cli::RetryArgs;

/// Run the command until it exits successfully or attempts run out
pub fn run(args: RetryArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let policy = resolve_policy(config.retry, &args);
    policy.validate()?;

    RetryInvoker::new(policy)
        .with_observer((SinkObserver::stderr(), TracingObserver::new("retry command")))
        .invoke(|| run_once(&args.command))
}

/// Command-line flags override the configured policy
fn resolve_policy(configured: RetryPolicy, args: &RetryArgs) -> RetryPolicy {
    RetryPolicy {
        attempts: args.attempts.unwrap_or(configured.attempts),
        sleep_seconds: args.sleep_seconds.unwrap_or(configured.sleep_seconds),
    }
}

fn run_once(command: &[String]) -> Result<()> {
    let (program, rest) = command
        .split_first()
        .ok_or_else(|| anyhow!("no command given"))?;

    let output = duct::cmd(program.as_str(), rest)
        .unchecked()
        .run()
        .with_context(|| format!("failed to start {}", program))?;

    if !output.status.success() {
        bail!("`{}` exited with {}", command.join(" "), output.status);
    }
    Ok(())
}
