use anyhow::{Context, Result};
use clap::Parser;
use swarm_logging::{init_logging_from_config, init_simple_tracing};
use tracing::debug;

mod cli;
mod commands;

use cli::{Cli, Commands, ConfigCommands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Validation reports its own failures, so it must not fail during startup
    if let Commands::Config {
        config_cmd: ConfigCommands::Validate,
    } = &cli.command
    {
        let level = cli.log_level.unwrap_or_default();
        init_simple_tracing(level.as_str())?;
        return commands::config::handle_validate(cli.config.as_deref());
    }

    let mut config = commands::config::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Commands::Run(args) = &cli.command {
        args.apply(&mut config);
        config
            .validate_all()
            .context("Invalid configuration after applying command line flags")?;
    }

    init_logging_from_config(&config.logging)?;
    debug!(?config, "Configuration loaded");

    match &cli.command {
        Commands::Run(_) => commands::run::handle(&config).await,
        Commands::Tasks => commands::tasks::handle(&config),
        Commands::Config { config_cmd } => match config_cmd {
            ConfigCommands::Generate { output, force } => {
                commands::config::handle_generate(&config, output.as_deref(), *force)
            }
            ConfigCommands::Validate => commands::config::handle_validate(cli.config.as_deref()),
        },
    }
}
