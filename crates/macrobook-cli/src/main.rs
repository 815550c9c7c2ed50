mod app;
mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("macrobook=info".parse()?)
                .add_directive("macrobook_core=info".parse()?),
        )
        .init();

    let args = Args::parse();
    app::run(&args.into_config())
}
