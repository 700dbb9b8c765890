//! Common test helpers for sdk-testing-cluster integration tests
//!
//! Provides mockall doubles for the cluster collaborators and a few
//! fixtures shared across test files.

use mockall::mock;
use sdk_testing_cluster::{ClusterError, ClusterTopology, CommandOutput, RemoteExecutor, Result};

mock! {
    pub Topology {}

    impl ClusterTopology for Topology {
        fn private_agents(&self) -> Result<Vec<String>>;
    }
}

mock! {
    pub Executor {}

    impl RemoteExecutor for Executor {
        fn run_command(&self, host: &str, command: &str) -> Result<CommandOutput>;
    }
}

/// Command issued by the default reclaimer
#[allow(dead_code)]
pub const RECLAIM_COMMAND: &str = "sudo rm -rf /var/lib/mesos/slave/slaves/*/frameworks/*";

/// Topology mock returning the given hosts exactly once
#[allow(dead_code)]
pub fn topology_with(hosts: &[&str]) -> MockTopology {
    let hosts: Vec<String> = hosts.iter().map(|h| h.to_string()).collect();
    let mut topology = MockTopology::new();
    topology
        .expect_private_agents()
        .times(1)
        .returning(move || Ok(hosts.clone()));
    topology
}

/// Failure as reported by a remote executor
#[allow(dead_code)]
pub fn permission_denied(host: &str) -> ClusterError {
    ClusterError::remote_command_failed(
        host,
        RECLAIM_COMMAND,
        Some(255),
        "Permission denied (publickey)",
    )
}

/// State-summary document with two private and one public agent
#[allow(dead_code)]
pub fn state_summary() -> serde_json::Value {
    serde_json::json!({
        "hostname": "master.mesos",
        "cluster": "sdk-integration",
        "slaves": [
            {
                "id": "a1-S0",
                "hostname": "10.0.0.21",
                "reserved_resources": {}
            },
            {
                "id": "a1-S1",
                "hostname": "10.0.6.5",
                "reserved_resources": {"slave_public": {"cpus": 4.0, "mem": 14016.0}}
            },
            {
                "id": "a1-S2",
                "hostname": "10.0.0.22",
                "reserved_resources": {}
            }
        ]
    })
}
