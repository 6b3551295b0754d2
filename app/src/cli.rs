//! Command line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lane_limits::constants::DEFAULT_POLL_INTERVAL_SECS;
use lanegate_core::EvmAddress;

#[derive(Debug, Parser)]
#[command(name = "lanegate", version, about = "Bridge lane rate-limit service")]
pub struct Cli {
    /// JSON config file; built-in testnet defaults when omitted
    #[arg(long, env = "LANEGATE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API
    Serve {
        /// Overrides `apiPort` from the config
        #[arg(long, env = "LANEGATE_PORT")]
        port: Option<u16>,
    },
    /// Poll one lane and log whenever the verdict changes.
    /// New amounts can be typed on stdin, one per line.
    Watch {
        #[arg(long)]
        source: String,
        #[arg(long)]
        destination: String,
        #[arg(long)]
        token: EvmAddress,
        /// Human-readable amount, e.g. 1.5
        #[arg(long)]
        amount: String,
        /// Wallet whose balance is checked
        #[arg(long)]
        owner: Option<EvmAddress>,
        /// Seconds between polls
        #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_SECS)]
        interval: u64,
    },
}
