//! ledgerprint CLI entry point.

mod cli;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command};
use ledgerprint::store::{HttpLedger, RecordStore};
use ledgerprint::{
    fingerprint, verify, ClaimOutcome, Fingerprint, GatewayConfig, RecordAddress, Verifier,
};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = cli.config();
    debug!(?config, "configuration");

    match cli.command {
        Command::Hash { text } => {
            println!("{}", fingerprint(&text));
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify { text, fingerprint } => {
            let stored = Fingerprint::from_hex(&fingerprint)
                .context("FINGERPRINT must be 32 lowercase hex characters")?;
            if verify(&text, &stored) {
                println!("verified");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("mismatch");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Check { text, address } => {
            let ledger = connect(&config)?;
            let verifier = Verifier::new(ledger, config.verification);

            let address = address.map(RecordAddress::from);
            match verifier.verify_claim(&text, address.as_ref()).await? {
                ClaimOutcome::Addressed(outcome) => {
                    println!("{}", serde_json::to_string_pretty(&outcome)?);
                    Ok(if outcome.verified {
                        ExitCode::SUCCESS
                    } else {
                        ExitCode::FAILURE
                    })
                }
                ClaimOutcome::Unaddressed { fingerprint } => {
                    println!("{fingerprint}");
                    eprintln!("no --address given; existence was not checked");
                    Ok(ExitCode::SUCCESS)
                }
            }
        }
        Command::Query { text } => {
            let ledger = connect(&config)?;
            match ledger.find_by_text(&text).await? {
                Some(record) => {
                    println!("{}", serde_json::to_string_pretty(&record)?);
                    Ok(if verify(&text, &record.fingerprint) {
                        ExitCode::SUCCESS
                    } else {
                        ExitCode::FAILURE
                    })
                }
                None => {
                    eprintln!("no record anchors this text");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Networks => {
            for (network, net) in &config.networks {
                let marker = if *network == config.default_network { "*" } else { " " };
                println!("{marker} {network:<9} {:<32} {}", net.rpc_url, net.description);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Client for the node of the selected network.
fn connect(config: &GatewayConfig) -> anyhow::Result<HttpLedger> {
    let network = config.default_network;
    let net = config
        .network(network)
        .with_context(|| format!("network {network} is not configured"))?;
    Ok(HttpLedger::new(net.node_url.clone())?)
}
