//! Disk reclamation on private agents
//!
//! Mesos keeps framework sandboxes on agent disks until its own garbage
//! collection gets around to them. Suites that install and uninstall many
//! services fill agent disks long before that happens, so between tests the
//! sandboxes are removed by hand.

use sdk_testing_core::types::DEFAULT_FRAMEWORKS_GLOB;

use crate::error::Result;
use crate::remote::RemoteExecutor;
use crate::topology::ClusterTopology;

/// Shell command removing everything matched by `glob`
pub fn reclaim_command(glob: &str) -> String {
    format!("sudo rm -rf {}", glob)
}

/// Reclaim private agent disk space consumed by Mesos but not yet garbage collected
///
/// Runs `sudo rm -rf /var/lib/mesos/slave/slaves/*/frameworks/*` on every
/// private agent, one host at a time, in the order the topology returns them.
/// The first error from either collaborator is returned unchanged and the
/// remaining hosts are left alone.
pub fn gc_frameworks<T, R>(topology: &T, executor: &R) -> Result<()>
where
    T: ClusterTopology + ?Sized,
    R: RemoteExecutor + ?Sized,
{
    DiskReclaimer::new(topology, executor).run()
}

/// Configurable form of [`gc_frameworks`]
pub struct DiskReclaimer<'a, T: ?Sized, R: ?Sized> {
    topology: &'a T,
    executor: &'a R,
    frameworks_glob: String,
}

impl<'a, T, R> DiskReclaimer<'a, T, R>
where
    T: ClusterTopology + ?Sized,
    R: RemoteExecutor + ?Sized,
{
    /// Reclaimer for the default framework sandbox glob
    pub fn new(topology: &'a T, executor: &'a R) -> Self {
        Self {
            topology,
            executor,
            frameworks_glob: DEFAULT_FRAMEWORKS_GLOB.to_string(),
        }
    }

    /// Override the path glob removed on each agent
    pub fn with_frameworks_glob(mut self, glob: impl Into<String>) -> Self {
        self.frameworks_glob = glob.into();
        self
    }

    /// The command issued on each agent
    pub fn command(&self) -> String {
        reclaim_command(&self.frameworks_glob)
    }

    /// Run the command on every private agent, sequentially
    pub fn run(&self) -> Result<()> {
        let hosts = self.topology.private_agents()?;
        let command = self.command();

        tracing::info!(agents = hosts.len(), "reclaiming framework disk space");

        for host in &hosts {
            tracing::info!(host = %host, "removing framework sandboxes");
            self.executor.run_command(host, &command)?;
        }

        Ok(())
    }
}
