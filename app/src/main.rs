use clap::Parser;

use lanegate_lib::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    lanegate_lib::init_tracing()?;
    lanegate_lib::run(cli).await
}
