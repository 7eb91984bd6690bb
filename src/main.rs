//! flankci CLI entry point.

use clap::Parser;

use flankci::cli::{handle_error, load_config, Cli, Commands};
use flankci::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => handle_error(err, cli.json),
    };

    let _logger = match LogConfig::try_from(&config.logging).and_then(|c| LoggerImpl::init(&c)) {
        Ok(logger) => logger,
        Err(err) => handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Serve(args) => flankci::cli::commands::serve::execute(args, &config, cli.json).await,
        Commands::Builds => flankci::cli::commands::builds::execute(&config, cli.json).await,
        Commands::Tests(args) => flankci::cli::commands::hierarchy::execute(args, &config, cli.json).await,
        Commands::Rerun(args) => flankci::cli::commands::rerun::execute(args, &config, cli.json).await,
        Commands::Results => flankci::cli::commands::results::execute(&config, cli.json).await,
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}
