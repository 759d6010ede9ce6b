//! Worker pool that drives many simulated users concurrently

use crate::error::Result;
use crate::fake::FakeData;
use crate::task::TaskSet;
use crate::user::{SimulatedUser, TaskOutcome};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use swarm_config::validation::Validatable;
use swarm_config::{ConfigError, LoadConfig, SwarmConfig};
use swarm_http::{ApiClient, HttpManager};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Totals of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub users_spawned: usize,
    pub tasks_executed: u64,
    pub tasks_skipped: u64,
    pub transport_errors: u64,
}

#[derive(Default)]
struct RunCounters {
    executed: AtomicU64,
    skipped: AtomicU64,
    transport_errors: AtomicU64,
}

/// A configured load test
///
/// Users are started one by one at `spawn_rate` per second. Each runs its
/// own loop: pick a weighted-random task, run it, pause for a random time
/// between `min_wait` and `max_wait`. The run ends when `run_time` elapses
/// or the shutdown future passed to [`run`](Self::run) resolves; users
/// finish their in-flight request before exiting.
pub struct Swarm {
    client: Arc<dyn ApiClient>,
    load: LoadConfig,
    tasks: Arc<TaskSet>,
    spawn_interval: Duration,
}

impl Swarm {
    pub fn new(client: Arc<dyn ApiClient>, load: LoadConfig) -> Result<Self> {
        load.validate()?;
        let tasks = TaskSet::from_weights(&load.tasks)?;
        let spawn_interval = Duration::try_from_secs_f64(1.0 / load.spawn_rate).map_err(|e| {
            ConfigError::DomainError {
                domain: load.domain_name().to_string(),
                message: format!("spawn_rate {} gives no usable interval: {}", load.spawn_rate, e),
            }
        })?;

        Ok(Self {
            client,
            load,
            tasks: Arc::new(tasks),
            spawn_interval,
        })
    }

    /// Build the shared HTTP client from configuration
    pub fn from_config(config: &SwarmConfig) -> Result<Self> {
        let client = HttpManager::new(&config.target.host, config.http.clone().into())?;
        Self::new(Arc::new(client), config.load.clone())
    }

    pub fn tasks(&self) -> &TaskSet {
        &self.tasks
    }

    pub fn load(&self) -> &LoadConfig {
        &self.load
    }

    /// Run until `run_time` elapses or `shutdown` resolves
    pub async fn run<F>(&self, shutdown: F) -> RunSummary
    where
        F: Future<Output = ()>,
    {
        let (stop_tx, stop_rx) = watch::channel(false);
        let counters = Arc::new(RunCounters::default());
        let mut handles: Vec<JoinHandle<()>> = Vec::with_capacity(self.load.users);
        let spawn_interval = self.spawn_interval;

        info!(
            users = self.load.users,
            spawn_rate = self.load.spawn_rate,
            run_time_secs = self.load.run_time.map(|d| d.as_secs()),
            "Starting swarm"
        );

        let spawner = async {
            for id in 0..self.load.users {
                if id > 0 {
                    sleep(spawn_interval).await;
                }
                handles.push(tokio::spawn(drive_user(
                    self.spawn_user(id),
                    Arc::clone(&self.tasks),
                    (self.load.min_wait, self.load.max_wait),
                    stop_rx.clone(),
                    Arc::clone(&counters),
                )));
                debug!(user = id, "User spawned");
            }
            info!(users = self.load.users, "All users spawned");
            std::future::pending::<()>().await
        };

        let run_time = self.load.run_time;
        let timer = async move {
            match run_time {
                Some(run_time) => sleep(run_time).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            _ = spawner => {}
            _ = timer => info!("Run time elapsed, stopping users"),
            _ = shutdown => info!("Shutdown requested, stopping users"),
        }

        // `stop_rx` is still alive here, so the send cannot fail
        let _ = stop_tx.send(true);

        let users_spawned = handles.len();
        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "User task ended abnormally");
            }
        }

        let summary = RunSummary {
            users_spawned,
            tasks_executed: counters.executed.load(Ordering::Relaxed),
            tasks_skipped: counters.skipped.load(Ordering::Relaxed),
            transport_errors: counters.transport_errors.load(Ordering::Relaxed),
        };
        info!(
            users = summary.users_spawned,
            executed = summary.tasks_executed,
            skipped = summary.tasks_skipped,
            transport_errors = summary.transport_errors,
            "Swarm stopped"
        );
        summary
    }

    fn spawn_user(&self, id: usize) -> (SimulatedUser, StdRng) {
        let mut fake = match self.load.seed {
            Some(seed) => FakeData::from_seed(seed.wrapping_add(id as u64)),
            None => FakeData::from_entropy(),
        };
        let scheduler_rng = StdRng::from_rng(fake.rng());
        (
            SimulatedUser::new(id, Arc::clone(&self.client), fake),
            scheduler_rng,
        )
    }
}

async fn drive_user(
    (mut user, mut rng): (SimulatedUser, StdRng),
    tasks: Arc<TaskSet>,
    (min_wait, max_wait): (Duration, Duration),
    mut stop: watch::Receiver<bool>,
    counters: Arc<RunCounters>,
) {
    loop {
        let stopped = *stop.borrow();
        if stopped {
            break;
        }

        let task = tasks.choose(&mut rng);

        match user.perform(task).await {
            Ok(TaskOutcome::Skipped) => {
                counters.skipped.fetch_add(1, Ordering::Relaxed);
            }
            Ok(_) => {
                counters.executed.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                counters.executed.fetch_add(1, Ordering::Relaxed);
                counters.transport_errors.fetch_add(1, Ordering::Relaxed);
                warn!(
                    user = user.id(),
                    task = %task,
                    timeout = e.is_timeout(),
                    error = %e,
                    "Request failed"
                );
            }
        }

        let pause = pause_between(&mut rng, min_wait, max_wait);
        if pause.is_zero() {
            // Skipped tasks never await anything, so give the runtime a turn
            tokio::task::yield_now().await;
            continue;
        }

        tokio::select! {
            _ = sleep(pause) => {}
            changed = stop.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    debug!(user = user.id(), "User stopped");
}

fn pause_between<R: Rng + ?Sized>(rng: &mut R, min_wait: Duration, max_wait: Duration) -> Duration {
    let min = min_wait.as_millis() as u64;
    let max = max_wait.as_millis() as u64;
    if max <= min {
        return min_wait;
    }
    Duration::from_millis(rng.random_range(min..=max))
}
