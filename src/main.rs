//! Issue Overseer CLI entry point.

use clap::Parser;

use issue_overseer::cli::{self, Cli};
use issue_overseer::infrastructure::config::ConfigLoader;
use issue_overseer::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => cli::handle_error(err, cli.json),
    };

    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => cli::handle_error(err, cli.json),
    };

    let result = match cli::token_from_env() {
        Ok(token) => cli::execute(&cli, &config, token).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(run) => cli::output(&run, cli.json),
        Err(err) => cli::handle_error(err, cli.json),
    }
}
