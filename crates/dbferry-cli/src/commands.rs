use super::args::{Cli, Commands};
use super::handlers;
use anyhow::Result;
use dbferry_core::{Config, expand_tilde};

pub fn run(cli: Cli) -> Result<()> {
    let config_path = match &cli.config {
        Some(path) => expand_tilde(path),
        None => Config::default_path(),
    };

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => handlers::run::handle(&config_path, cli.format),
        Commands::Status => handlers::status::handle(&config_path, cli.format),
        Commands::Init { force } => handlers::init::handle(&config_path, force),
    }
}
