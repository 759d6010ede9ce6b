use anyhow::{Context, Result};
use swarm_config::SwarmConfig;
use swarm_core::{RunSummary, Swarm};
use tokio::signal;
use tracing::{info, warn};

pub async fn handle(config: &SwarmConfig) -> Result<()> {
    let swarm = Swarm::from_config(config).context("Failed to prepare the swarm")?;
    info!(host = %config.target.host, "Load testing target");

    let summary = swarm.run(shutdown_signal()).await;
    print_summary(&summary);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "Failed to install Ctrl+C handler, relying on run time");
        std::future::pending::<()>().await;
    }
}

fn print_summary(summary: &RunSummary) {
    println!("Users spawned:    {}", summary.users_spawned);
    println!("Tasks executed:   {}", summary.tasks_executed);
    println!("Tasks skipped:    {}", summary.tasks_skipped);
    println!("Transport errors: {}", summary.transport_errors);
}
