//! Configuration for Ledgerprint.
//!
//! Configuration is an explicit value built once at startup and passed in.
//! There is no process-wide default network; two gateways with different
//! configurations can live in one process.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use tracing::warn;

use ledgerprint_core::VerificationPolicy;

use crate::error::LedgerprintError;

/// Address of the deployed ledger program.
pub const DEFAULT_PROGRAM_ID: &str = "CaFmnYF44xfY9Ed95m5ydzc2VS8uNGwmFwDmC6YYnmdS";

/// Where the ledger node service listens by default.
pub const DEFAULT_NODE_URL: &str = "http://localhost:3000";

/// Ledger network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Local test validator.
    #[default]
    Localnet,
    /// Public development network.
    Devnet,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Localnet, Network::Devnet];

    pub fn as_str(self) -> &'static str {
        match self {
            Network::Localnet => "localnet",
            Network::Devnet => "devnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Network {
    type Err = LedgerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::ALL
            .into_iter()
            .find(|n| n.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LedgerprintError::UnknownNetwork(s.to_string()))
    }
}

/// Connection details for one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Ledger node service base URL.
    pub node_url: String,
    /// Ledger RPC endpoint, reported to clients.
    pub rpc_url: String,
    /// Deployed program address.
    pub program_id: String,
    /// Human-readable description.
    pub description: String,
}

impl NetworkConfig {
    pub fn localnet() -> Self {
        Self {
            node_url: DEFAULT_NODE_URL.to_string(),
            rpc_url: "http://127.0.0.1:8899".to_string(),
            program_id: DEFAULT_PROGRAM_ID.to_string(),
            description: "Local test validator".to_string(),
        }
    }

    pub fn devnet() -> Self {
        Self {
            node_url: DEFAULT_NODE_URL.to_string(),
            rpc_url: "https://api.devnet.solana.com".to_string(),
            program_id: DEFAULT_PROGRAM_ID.to_string(),
            description: "Public development network".to_string(),
        }
    }

    pub fn for_network(network: Network) -> Self {
        match network {
            Network::Localnet => Self::localnet(),
            Network::Devnet => Self::devnet(),
        }
    }
}

/// Gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    /// Network used when a request names none, or names an unknown one.
    #[serde(default)]
    pub default_network: Network,

    /// Per-network connection details.
    #[serde(default = "default_networks")]
    pub networks: BTreeMap<Network, NetworkConfig>,

    /// Verification policy for addressed checks.
    #[serde(default)]
    pub verification: VerificationPolicy,
}

fn default_networks() -> BTreeMap<Network, NetworkConfig> {
    Network::ALL
        .into_iter()
        .map(|n| (n, NetworkConfig::for_network(n)))
        .collect()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            default_network: Network::default(),
            networks: default_networks(),
            verification: VerificationPolicy::default(),
        }
    }
}

impl GatewayConfig {
    /// Connection details for `network`, if configured.
    pub fn network(&self, network: Network) -> Option<&NetworkConfig> {
        self.networks.get(&network)
    }

    /// Pick the network for a request.
    ///
    /// Absent or unrecognised names fall back to the default network.
    pub fn resolve(&self, requested: Option<&str>) -> Network {
        match requested.filter(|s| !s.trim().is_empty()) {
            None => self.default_network,
            Some(name) => name.parse().unwrap_or_else(|_| {
                warn!(
                    requested = name,
                    fallback = %self.default_network,
                    "unknown network requested, using default"
                );
                self.default_network
            }),
        }
    }

    /// Point `network` at a different node service.
    pub fn with_node_url(mut self, network: Network, node_url: impl Into<String>) -> Self {
        self.networks
            .entry(network)
            .or_insert_with(|| NetworkConfig::for_network(network))
            .node_url = node_url.into();
        self
    }

    pub fn with_default_network(mut self, network: Network) -> Self {
        self.default_network = network;
        self
    }

    pub fn with_verification(mut self, policy: VerificationPolicy) -> Self {
        self.verification = policy;
        self
    }
}
