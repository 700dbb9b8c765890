//! Reclaim framework sandbox disk space on private agents

use anyhow::Result;
use camino::Utf8Path;
use sdk_testing_cluster::{
    ClusterTopology, DiskReclaimer, RemoteExecutor, SshExecutor, StaticTopology,
};
use sdk_testing_core::out;
use tracing::info;

use super::{cluster_topology, load_config};
use crate::cli::GcFrameworksArgs;

/// Run the reclaim command on the selected agents
pub fn run(args: GcFrameworksArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = load_config(config_path)?;

    let topology: Box<dyn ClusterTopology> = if args.agents.is_empty() {
        cluster_topology(&config)?
    } else {
        Box::new(StaticTopology::new(args.agents))
    };

    let glob = args
        .frameworks_glob
        .unwrap_or_else(|| config.reclaim.frameworks_glob.clone());

    if args.dry_run {
        let reclaimer = DiskReclaimer::new(topology.as_ref(), &DryRunExecutor)
            .with_frameworks_glob(glob);
        return Ok(reclaimer.run()?);
    }

    let executor = SshExecutor::new(config.ssh.clone());
    info!(user = %config.ssh.user, "reclaiming over ssh");

    DiskReclaimer::new(topology.as_ref(), &executor)
        .with_frameworks_glob(glob)
        .run()?;

    out("Framework disk space reclaimed")?;
    Ok(())
}

/// Reports the command instead of running it
struct DryRunExecutor;

impl RemoteExecutor for DryRunExecutor {
    fn run_command(
        &self,
        host: &str,
        command: &str,
    ) -> sdk_testing_cluster::Result<sdk_testing_cluster::CommandOutput> {
        println!("{}: {}", host, command);
        Ok(Default::default())
    }
}
