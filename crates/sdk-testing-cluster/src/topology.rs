//! Private agent discovery
//!
//! A private agent is a worker that is neither the master nor a public agent.
//! Public agents carry a `slave_public` role reservation; everything else
//! reported by the master counts as private.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use sdk_testing_core::types::ClusterSettings;
use serde::Deserialize;

use crate::error::{ClusterError, Result};

/// Role reserved on public agents
pub const PUBLIC_AGENT_ROLE: &str = "slave_public";

const STATE_SUMMARY_PATH: &str = "/mesos/master/state-summary";

/// Source of the cluster's private agent hosts
pub trait ClusterTopology: Send + Sync {
    /// Hostnames of the private agents, in the order the cluster reports them
    fn private_agents(&self) -> Result<Vec<String>>;
}

impl<T: ClusterTopology + ?Sized> ClusterTopology for &T {
    fn private_agents(&self) -> Result<Vec<String>> {
        (**self).private_agents()
    }
}

impl<T: ClusterTopology + ?Sized> ClusterTopology for Box<T> {
    fn private_agents(&self) -> Result<Vec<String>> {
        (**self).private_agents()
    }
}

impl<T: ClusterTopology + ?Sized> ClusterTopology for Arc<T> {
    fn private_agents(&self) -> Result<Vec<String>> {
        (**self).private_agents()
    }
}

/// A fixed list of hosts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticTopology {
    agents: Vec<String>,
}

impl StaticTopology {
    /// Create a topology from a host list
    pub fn new<I, S>(agents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            agents: agents.into_iter().map(Into::into).collect(),
        }
    }
}

impl ClusterTopology for StaticTopology {
    fn private_agents(&self) -> Result<Vec<String>> {
        Ok(self.agents.clone())
    }
}

/// Reads agents from the Mesos master's state summary
pub struct MesosStateTopology {
    state_url: String,
    auth_token: Option<String>,
    client: reqwest::blocking::Client,
}

impl MesosStateTopology {
    /// Build a topology client from cluster settings
    pub fn from_settings(settings: &ClusterSettings) -> Result<Self> {
        let base = settings
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(ClusterError::MissingClusterUrl)?;
        let state_url = format!("{}{}", base.trim_end_matches('/'), STATE_SUMMARY_PATH);

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .danger_accept_invalid_certs(!settings.verify_tls)
            .build()
            .map_err(|source| ClusterError::Http {
                url: state_url.clone(),
                source,
            })?;

        Ok(Self {
            state_url,
            auth_token: settings.auth_token.clone(),
            client,
        })
    }

    /// The endpoint queried for agents
    pub fn state_url(&self) -> &str {
        &self.state_url
    }

    fn fetch_state(&self) -> Result<String> {
        let mut request = self.client.get(&self.state_url);
        if let Some(token) = &self.auth_token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("token={}", token));
        }

        let http_err = |source| ClusterError::Http {
            url: self.state_url.clone(),
            source,
        };

        let response = request.send().map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClusterError::HttpStatus {
                url: self.state_url.clone(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(http_err)
    }
}

impl ClusterTopology for MesosStateTopology {
    fn private_agents(&self) -> Result<Vec<String>> {
        let body = self.fetch_state()?;
        let agents = parse_private_agents(&body).map_err(|source| ClusterError::MalformedState {
            url: self.state_url.clone(),
            source,
        })?;

        tracing::debug!(
            url = %self.state_url,
            count = agents.len(),
            "discovered private agents"
        );

        Ok(agents)
    }
}

#[derive(Debug, Deserialize)]
struct StateSummary {
    #[serde(default)]
    slaves: Vec<AgentSummary>,
}

#[derive(Debug, Deserialize)]
struct AgentSummary {
    hostname: String,
    #[serde(default)]
    reserved_resources: HashMap<String, serde_json::Value>,
}

impl AgentSummary {
    fn is_private(&self) -> bool {
        !self
            .reserved_resources
            .keys()
            .any(|role| role.contains(PUBLIC_AGENT_ROLE))
    }
}

/// Extract private agent hostnames from a state-summary document
fn parse_private_agents(body: &str) -> std::result::Result<Vec<String>, serde_json::Error> {
    let summary: StateSummary = serde_json::from_str(body)?;
    Ok(summary
        .slaves
        .into_iter()
        .filter(AgentSummary::is_private)
        .map(|agent| agent.hostname)
        .collect())
}
