//! Cluster collaborators for integration tests
//!
//! This crate provides the pieces of an integration suite that reach into
//! the cluster itself:
//!
//! - **Topology** - which hosts are private agents (`ClusterTopology`)
//! - **Remote execution** - running shell commands on those hosts (`RemoteExecutor`)
//! - **Disk reclamation** - removing leftover framework sandboxes (`gc_frameworks`)
//!
//! # Example
//!
//! ```no_run
//! use sdk_testing_cluster::{gc_frameworks, MesosStateTopology, SshExecutor};
//! use sdk_testing_core::HierarchicalConfigLoader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HierarchicalConfigLoader::new()?.load()?;
//!
//! let topology = MesosStateTopology::from_settings(&config.cluster)?;
//! let executor = SshExecutor::new(config.ssh.clone());
//!
//! gc_frameworks(&topology, &executor)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ClusterTopology (trait)          RemoteExecutor (trait)
//! ├── StaticTopology               └── SshExecutor
//! └── MesosStateTopology
//!
//! DiskReclaimer = ClusterTopology + RemoteExecutor
//! ```

pub mod error;
pub mod reclaim;
pub mod remote;
pub mod topology;

pub use error::{ClusterError, Result};
pub use reclaim::{gc_frameworks, reclaim_command, DiskReclaimer};
pub use remote::{CommandOutput, RemoteExecutor, SshExecutor};
pub use topology::{ClusterTopology, MesosStateTopology, StaticTopology, PUBLIC_AGENT_ROLE};
