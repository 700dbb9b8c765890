//! List private agents

use anyhow::Result;
use camino::Utf8Path;

use super::{cluster_topology, load_config};
use crate::cli::AgentsArgs;

/// Print every private agent, one per line or as a JSON array
pub fn run(args: AgentsArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let agents = cluster_topology(&config)?.private_agents()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&agents)?);
    } else {
        for agent in &agents {
            println!("{}", agent);
        }
    }

    Ok(())
}
