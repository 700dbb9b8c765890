//! Error types for cluster collaborators

use thiserror::Error;

/// Result type alias using the cluster error type
pub type Result<T> = std::result::Result<T, ClusterError>;

/// Errors raised while talking to the cluster or its agents
#[derive(Error, Debug)]
pub enum ClusterError {
    /// No cluster URL in configuration or environment
    #[error("Cluster URL is not configured (set cluster.url or SDK_TESTING_CLUSTER_URL)")]
    MissingClusterUrl,

    /// HTTP transport failure
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status
    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    /// Response body could not be decoded
    #[error("Malformed cluster state from {url}: {source}")]
    MalformedState {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Required program not on PATH
    #[error("{tool} is not installed or not on PATH")]
    ToolNotInstalled { tool: String },

    /// Local process could not be started
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Remote command exited unsuccessfully
    #[error("Command `{command}` failed on {host} (exit code {code:?}): {stderr}")]
    RemoteCommandFailed {
        host: String,
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl ClusterError {
    /// Create a remote command failure
    pub fn remote_command_failed(
        host: impl Into<String>,
        command: impl Into<String>,
        code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::RemoteCommandFailed {
            host: host.into(),
            command: command.into(),
            code,
            stderr: stderr.into(),
        }
    }
}
