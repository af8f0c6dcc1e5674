//! mediaref CLI binary.
//!
//! Resolves media references against fixtures, a metadata directory or a
//! media server and prints the resulting assets or samples.

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, build_resolver, print_assets, print_samples};

    let cli = Cli::parse();
    mediaref::init_tracing(cli.verbose)?;

    let resolver = build_resolver(&cli.source, cli.config.as_deref()).await?;

    match &cli.command {
        Commands::Resolve { ids, format } => {
            print_assets(&resolver, ids, *format).await?;
        }
        Commands::Sample { ids } => {
            print_samples(&resolver, ids).await?;
        }
    }

    Ok(())
}
