//! Remote command execution on cluster hosts

use std::sync::Arc;

use sdk_testing_core::types::SshSettings;

use crate::error::{ClusterError, Result};

/// Captured output of a remote command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

/// Runs a shell command on a cluster host
///
/// Implementations return an error when the command cannot be executed or
/// exits unsuccessfully.
pub trait RemoteExecutor: Send + Sync {
    /// Run `command` on `host` and wait for it to finish
    fn run_command(&self, host: &str, command: &str) -> Result<CommandOutput>;
}

impl<T: RemoteExecutor + ?Sized> RemoteExecutor for &T {
    fn run_command(&self, host: &str, command: &str) -> Result<CommandOutput> {
        (**self).run_command(host, command)
    }
}

impl<T: RemoteExecutor + ?Sized> RemoteExecutor for Box<T> {
    fn run_command(&self, host: &str, command: &str) -> Result<CommandOutput> {
        (**self).run_command(host, command)
    }
}

impl<T: RemoteExecutor + ?Sized> RemoteExecutor for Arc<T> {
    fn run_command(&self, host: &str, command: &str) -> Result<CommandOutput> {
        (**self).run_command(host, command)
    }
}

/// Executes commands through the local `ssh` client
///
/// Host keys are neither checked nor recorded: agents in test clusters are
/// recreated constantly and reuse addresses.
#[derive(Debug, Clone)]
pub struct SshExecutor {
    program: String,
    settings: SshSettings,
}

impl SshExecutor {
    /// Create an executor using `ssh` from PATH
    pub fn new(settings: SshSettings) -> Self {
        Self {
            program: "ssh".to_string(),
            settings,
        }
    }

    /// Use a different ssh-compatible program
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Check if the ssh program is installed
    pub fn check_installed(&self) -> bool {
        which::which(&self.program).is_ok()
    }

    /// Arguments passed to the ssh program for one command
    pub fn ssh_args(&self, host: &str, command: &str) -> Vec<String> {
        let mut args = vec![
            "-o".to_string(),
            "StrictHostKeyChecking=no".to_string(),
            "-o".to_string(),
            "UserKnownHostsFile=/dev/null".to_string(),
            "-o".to_string(),
            "BatchMode=yes".to_string(),
            "-o".to_string(),
            format!("ConnectTimeout={}", self.settings.connect_timeout_secs),
            "-p".to_string(),
            self.settings.port.to_string(),
        ];

        if let Some(key) = &self.settings.key_path {
            args.push("-i".to_string());
            args.push(key.clone());
        }

        args.push(format!("{}@{}", self.settings.user, host));
        args.push(command.to_string());
        args
    }
}

impl RemoteExecutor for SshExecutor {
    fn run_command(&self, host: &str, command: &str) -> Result<CommandOutput> {
        if !self.check_installed() {
            return Err(ClusterError::ToolNotInstalled {
                tool: self.program.clone(),
            });
        }

        tracing::debug!(host = %host, command = %command, "running remote command");

        let output = duct::cmd(self.program.as_str(), self.ssh_args(host, command))
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()
            .map_err(|source| ClusterError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            tracing::warn!(
                host = %host,
                command = %command,
                code = ?output.status.code(),
                "remote command failed"
            );
            return Err(ClusterError::remote_command_failed(
                host,
                command,
                output.status.code(),
                stderr.trim(),
            ));
        }

        Ok(CommandOutput { stdout, stderr })
    }
}
