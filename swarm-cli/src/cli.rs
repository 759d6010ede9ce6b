//! CLI argument parsing definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use swarm_config::{LogLevel, SwarmConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Load generator for the language-tracker API", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the swarm until the run time elapses or Ctrl-C
    Run(RunArgs),

    /// List the tasks simulated users can perform
    Tasks,

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        config_cmd: ConfigCommands,
    },
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Base URL of the API under test
    #[arg(long, value_name = "URL")]
    pub host: Option<String>,

    /// Number of concurrent users
    #[arg(short = 'u', long, value_name = "USERS")]
    pub users: Option<usize>,

    /// Users started per second
    #[arg(short = 'r', long, value_name = "RATE")]
    pub spawn_rate: Option<f64>,

    /// Stop after this many seconds
    #[arg(short = 't', long, value_name = "SECS")]
    pub run_time: Option<u64>,

    /// Minimum pause between two tasks of one user
    #[arg(long, value_name = "MS")]
    pub min_wait_ms: Option<u64>,

    /// Maximum pause between two tasks of one user
    #[arg(long, value_name = "MS")]
    pub max_wait_ms: Option<u64>,

    /// Seed for reproducible runs
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Task weight, repeatable (example: --weight get_talks=5)
    #[arg(short = 'w', long = "weight", value_name = "TASK=WEIGHT", value_parser = parse_weight)]
    pub weights: Vec<(String, u32)>,
}

impl RunArgs {
    /// Layer the flags that were given over `config`
    pub fn apply(&self, config: &mut SwarmConfig) {
        if let Some(host) = &self.host {
            config.target.host = host.clone();
        }
        if let Some(users) = self.users {
            config.load.users = users;
        }
        if let Some(spawn_rate) = self.spawn_rate {
            config.load.spawn_rate = spawn_rate;
        }
        if let Some(secs) = self.run_time {
            config.load.run_time = Some(Duration::from_secs(secs));
        }
        if let Some(ms) = self.min_wait_ms {
            config.load.min_wait = Duration::from_millis(ms);
        }
        if let Some(ms) = self.max_wait_ms {
            config.load.max_wait = Duration::from_millis(ms);
        }
        if let Some(seed) = self.seed {
            config.load.seed = Some(seed);
        }
        for (task, weight) in &self.weights {
            config.load.tasks.insert(task.clone(), *weight);
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Validate the file given by `--config`, or the defaults plus environment
    Validate,

    /// Print the effective configuration as YAML
    Generate {
        /// Write to this file instead of stdout
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,
    },
}

fn parse_weight(raw: &str) -> Result<(String, u32), String> {
    let (task, weight) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected TASK=WEIGHT, got '{}'", raw))?;
    let weight = weight
        .trim()
        .parse()
        .map_err(|e| format!("invalid weight '{}': {}", weight, e))?;
    Ok((task.trim().to_string(), weight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_flags() {
        let cli = Cli::try_parse_from([
            "swarm",
            "--log-level",
            "debug",
            "run",
            "--host",
            "http://api.test:8080",
            "-u",
            "20",
            "-r",
            "2.5",
            "-t",
            "60",
            "--seed",
            "9",
            "-w",
            "get_talks=5",
            "--weight",
            "register=0",
        ])
        .unwrap();

        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };

        let mut config = SwarmConfig::default();
        args.apply(&mut config);

        assert_eq!(config.target.host, "http://api.test:8080");
        assert_eq!(config.load.users, 20);
        assert_eq!(config.load.spawn_rate, 2.5);
        assert_eq!(config.load.run_time, Some(Duration::from_secs(60)));
        assert_eq!(config.load.seed, Some(9));
        assert_eq!(config.load.tasks["get_talks"], 5);
        assert_eq!(config.load.tasks["register"], 0);
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let mut config = SwarmConfig::default();
        config.load.users = 7;
        config.target.host = "http://kept.test".to_string();

        RunArgs::default().apply(&mut config);

        assert_eq!(config.load.users, 7);
        assert_eq!(config.target.host, "http://kept.test");
    }

    #[test]
    fn test_bad_weight_is_rejected() {
        assert!(Cli::try_parse_from(["swarm", "run", "-w", "get_talks"]).is_err());
        assert!(Cli::try_parse_from(["swarm", "run", "-w", "get_talks=many"]).is_err());
        assert!(Cli::try_parse_from(["swarm", "--log-level", "loud", "tasks"]).is_err());
    }

    #[test]
    fn test_config_subcommands() {
        let cli =
            Cli::try_parse_from(["swarm", "config", "validate", "--config", "swarm.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("swarm.yaml")));
        assert!(matches!(
            cli.command,
            Commands::Config {
                config_cmd: ConfigCommands::Validate
            }
        ));

        let cli = Cli::try_parse_from(["swarm", "config", "generate"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                config_cmd: ConfigCommands::Generate { output: None, force: false }
            }
        ));
    }
}
