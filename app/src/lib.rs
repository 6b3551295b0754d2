//! Lanegate application library

pub mod cli;
pub mod lane_watcher;

use std::time::Duration;

use anyhow::Context;
use lanegate_api::AppState;
use lanegate_core::{AppConfig, Lane};

use cli::{Cli, Command};
use lane_watcher::WatchTarget;

/// Workspace crates logged at debug level by default
const DEBUG_TARGETS: [&str; 4] = ["lanegate", "lane_limits", "evm_rpc_client", "widget"];

/// Default filter plus whatever `RUST_LOG` adds
fn env_filter() -> anyhow::Result<tracing_subscriber::EnvFilter> {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for target in DEBUG_TARGETS {
        filter = filter.add_directive(format!("{}=debug", target).parse()?);
    }
    Ok(filter.add_directive("info".parse()?))
}

/// Install the tracing subscriber
pub fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(env_filter()?).init();
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

/// Run the selected command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    tracing::info!(chains = config.chains.len(), "Starting Lanegate");

    match cli.command {
        Command::Serve { port } => {
            let port = port.unwrap_or(config.api_port);
            let state = AppState::with_config(config);
            lanegate_api::start_server(state, port)
                .await
                .context("API server failed")?;
        }
        Command::Watch {
            source,
            destination,
            token,
            amount,
            owner,
            interval,
        } => {
            let state = AppState::with_config(config);
            let target = WatchTarget {
                lane: Lane::new(source, destination, token),
                amount,
                owner,
                interval: Duration::from_secs(interval.max(1)),
            };
            lane_watcher::watch(&state, target).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_covers_workspace_crates() {
        let filter = env_filter().unwrap().to_string();
        for target in ["lanegate=debug", "lane_limits=debug", "evm_rpc_client=debug", "widget=debug"] {
            assert!(filter.contains(target), "{} missing from {}", target, filter);
        }
    }
}
