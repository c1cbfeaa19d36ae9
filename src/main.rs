//! collab-extract CLI
//!
//! Fetches every cataloged endpoint and writes one JSON file per collection.

use clap::Parser;
use collab_extract::cli::{Cli, Runner};
use tracing::Level;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let runner = Runner::new(cli);
    runner.run().await?;
    Ok(())
}
