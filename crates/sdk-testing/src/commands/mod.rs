//! CLI command implementations

pub mod agents;
pub mod config;
pub mod gc_frameworks;
pub mod retry;

use anyhow::Result;
use camino::Utf8Path;
use sdk_testing_cluster::{ClusterTopology, MesosStateTopology};
use sdk_testing_core::{HierarchicalConfigLoader, TestingConfig};

/// Load configuration, honouring an explicit `--config` path
pub fn load_config(path: Option<&Utf8Path>) -> Result<TestingConfig> {
    let loader = HierarchicalConfigLoader::new()?;
    let config = match path {
        Some(path) => loader.load_with_file(path)?,
        None => loader.load()?,
    };
    Ok(config)
}

/// Topology backed by the cluster named in configuration
pub fn cluster_topology(config: &TestingConfig) -> Result<Box<dyn ClusterTopology>> {
    Ok(Box::new(MesosStateTopology::from_settings(&config.cluster)?))
}
