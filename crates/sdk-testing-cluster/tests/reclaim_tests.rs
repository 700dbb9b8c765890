//! Disk reclamation against mocked cluster collaborators

mod common;

use std::sync::{Arc, Mutex};

use common::{permission_denied, topology_with, MockExecutor, MockTopology, RECLAIM_COMMAND};
use mockall::Sequence;
use sdk_testing_cluster::{gc_frameworks, ClusterError, CommandOutput, DiskReclaimer};

#[test]
fn test_reclaims_every_private_agent_in_order() {
    let topology = topology_with(&["10.0.0.21", "10.0.0.22", "10.0.0.23"]);
    let mut executor = MockExecutor::new();
    let mut seq = Sequence::new();

    for expected in ["10.0.0.21", "10.0.0.22", "10.0.0.23"] {
        executor
            .expect_run_command()
            .withf(move |host, command| host == expected && command == RECLAIM_COMMAND)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(CommandOutput::default()));
    }

    gc_frameworks(&topology, &executor).expect("reclaim should succeed");
}

#[test]
fn test_remote_failure_propagates_and_stops() {
    let topology = topology_with(&["10.0.0.21", "10.0.0.22", "10.0.0.23"]);
    let visited = Arc::new(Mutex::new(Vec::new()));
    let seen = visited.clone();

    let mut executor = MockExecutor::new();
    executor
        .expect_run_command()
        .times(2)
        .returning(move |host, _| {
            seen.lock().unwrap().push(host.to_string());
            if host == "10.0.0.22" {
                Err(permission_denied(host))
            } else {
                Ok(CommandOutput::default())
            }
        });

    let err = gc_frameworks(&topology, &executor).unwrap_err();

    match err {
        ClusterError::RemoteCommandFailed {
            host,
            command,
            code,
            stderr,
        } => {
            assert_eq!(host, "10.0.0.22");
            assert_eq!(command, RECLAIM_COMMAND);
            assert_eq!(code, Some(255));
            assert!(stderr.contains("Permission denied"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(*visited.lock().unwrap(), vec!["10.0.0.21", "10.0.0.22"]);
}

#[test]
fn test_topology_failure_skips_execution() {
    let mut topology = MockTopology::new();
    topology
        .expect_private_agents()
        .times(1)
        .returning(|| Err(ClusterError::MissingClusterUrl));

    let mut executor = MockExecutor::new();
    executor.expect_run_command().never();

    let err = gc_frameworks(&topology, &executor).unwrap_err();
    assert!(matches!(err, ClusterError::MissingClusterUrl));
}

#[test]
fn test_custom_glob_reaches_executor() {
    let topology = topology_with(&["10.0.0.21"]);
    let mut executor = MockExecutor::new();
    executor
        .expect_run_command()
        .withf(|_, command| command == "sudo rm -rf /tmp/sandboxes/*")
        .times(1)
        .returning(|_, _| Ok(CommandOutput::default()));

    DiskReclaimer::new(&topology, &executor)
        .with_frameworks_glob("/tmp/sandboxes/*")
        .run()
        .unwrap();
}
