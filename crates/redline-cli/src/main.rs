mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Commands::Redact {
            ref file,
            dry_run,
            plain,
        } => commands::redact::handle(&cli, file, dry_run, plain).await,
        cli::Commands::Settings => commands::settings::handle(&cli),
        cli::Commands::Config(ref config_cmd) => commands::config::handle(&cli, config_cmd),
        cli::Commands::Check => commands::check::handle(&cli),
        cli::Commands::Completions { shell } => commands::completions::handle(shell),
    }
}
