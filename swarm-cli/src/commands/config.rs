use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;
use swarm_config::{ConfigLoader, SwarmConfig};
use tracing::{error, info};

/// Load from `path` when given, otherwise from defaults; `SWARM_*` variables apply on top
pub fn load(path: Option<&Path>) -> Result<SwarmConfig> {
    let loader = ConfigLoader::new();
    match path {
        Some(path) => loader
            .from_file(path)
            .with_context(|| format!("Failed to load configuration from {:?}", path)),
        None => loader
            .from_env()
            .context("Failed to load configuration from environment"),
    }
}

pub fn handle_validate(path: Option<&Path>) -> Result<()> {
    match load(path) {
        Ok(_) => {
            println!("✅ Configuration is valid");
            info!("Configuration validation passed");
            Ok(())
        }
        Err(e) => {
            println!("❌ Configuration validation failed: {:#}", e);
            error!("Configuration validation failed: {:#}", e);
            Err(e)
        }
    }
}

pub fn handle_generate(config: &SwarmConfig, output: Option<&Path>, force: bool) -> Result<()> {
    let yaml = config.to_yaml().context("Failed to render configuration")?;

    let Some(output) = output else {
        print!("{}", yaml);
        return Ok(());
    };

    if output.exists() && !force {
        return Err(anyhow!(
            "Output file already exists: {:?}. Use --force to overwrite.",
            output
        ));
    }
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).context("Failed to create output directory")?;
    }
    fs::write(output, yaml).context("Failed to write configuration file")?;

    println!("✅ Configuration written to {:?}", output);
    println!("🔧 Validate with: swarm config validate --config {:?}", output);
    Ok(())
}
