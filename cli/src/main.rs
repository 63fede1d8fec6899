mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{fetch, render};

pub async fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    quakemap::init_logging(cli.verbose);

    match &cli.command {
        Commands::Render(args) => render::run(&cli, args).await,
        Commands::Fetch(args) => fetch::run(&cli, args).await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> { run().await }
