//! Command-line interface definition.

use clap::{Parser, Subcommand, ValueEnum};
use ledgerprint::{GatewayConfig, Network, VerificationPolicy};

/// Fingerprint text and verify it against ledger records.
#[derive(Parser, Debug)]
#[command(name = "ledgerprint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Ledger network to talk to.
    #[arg(long, value_enum, default_value = "localnet", env = "LEDGERPRINT_NETWORK", global = true)]
    pub network: CliNetwork,

    /// Override the ledger node service URL for the selected network.
    #[arg(long, env = "LEDGERPRINT_NODE_URL", global = true)]
    pub node_url: Option<String>,

    /// Accept fingerprint equality alone for addressed checks.
    #[arg(long, global = true)]
    pub fingerprint_only: bool,

    /// Log level.
    #[arg(long, default_value = "warn", env = "RUST_LOG", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the fingerprint of TEXT.
    Hash {
        text: String,
    },
    /// Check TEXT against a fingerprint you already hold.
    Verify {
        text: String,
        fingerprint: String,
    },
    /// Check TEXT against the ledger record at ADDRESS.
    Check {
        text: String,
        #[arg(long, short)]
        address: Option<String>,
    },
    /// Look up the record anchoring exactly TEXT.
    Query {
        text: String,
    },
    /// List configured networks.
    Networks,
}

/// Network CLI enum.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliNetwork {
    /// Local test validator.
    Localnet,
    /// Public development network.
    Devnet,
}

impl From<CliNetwork> for Network {
    fn from(n: CliNetwork) -> Self {
        match n {
            CliNetwork::Localnet => Network::Localnet,
            CliNetwork::Devnet => Network::Devnet,
        }
    }
}

impl Cli {
    /// Build the gateway configuration from the arguments.
    pub fn config(&self) -> GatewayConfig {
        let network = Network::from(self.network);
        let mut config = GatewayConfig::default().with_default_network(network);

        if let Some(ref url) = self.node_url {
            config = config.with_node_url(network, url.clone());
        }
        if self.fingerprint_only {
            config = config.with_verification(VerificationPolicy::FINGERPRINT_ONLY);
        }

        config
    }
}
