//! The Herald server: scheduler tick loops and the metrics API.

use crate::api::{ApiState, create_router};
use crate::config::HeraldConfig;
use crate::generation::GenerationScheduler;
use crate::ops::Orchestrator;
use crate::posting::PostingScheduler;
use chrono::Utc;
use herald_core::SystemMode;
use herald_error::{HeraldResult, HttpError};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::time::interval;
use tracing::{debug, error, info, instrument};

/// Run/stop switch for the two scheduler loops.
///
/// Mode changes flip it: paused and crisis stop both loops, active starts
/// both, manual-only leaves them untouched (the posting tick's own gate
/// check suppresses publishing there). Schedulers also re-check the gate at
/// tick start, so the switch is a fast path, not the only guard.
#[derive(Debug, Clone)]
pub struct SchedulerSwitch {
    generation: Arc<AtomicBool>,
    posting: Arc<AtomicBool>,
}

impl Default for SchedulerSwitch {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulerSwitch {
    /// Create a switch with both loops running.
    pub fn new() -> Self {
        Self {
            generation: Arc::new(AtomicBool::new(true)),
            posting: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Start or stop the loops for a new mode.
    pub fn apply_mode(&self, mode: SystemMode) {
        match mode {
            SystemMode::Paused | SystemMode::Crisis => {
                self.generation.store(false, Ordering::SeqCst);
                self.posting.store(false, Ordering::SeqCst);
                info!(mode = %mode, "Scheduler loops stopped");
            }
            SystemMode::Active => {
                self.generation.store(true, Ordering::SeqCst);
                self.posting.store(true, Ordering::SeqCst);
                info!("Scheduler loops started");
            }
            SystemMode::ManualOnly => {}
        }
    }

    /// Whether the generation loop should tick.
    pub fn generation_enabled(&self) -> bool {
        self.generation.load(Ordering::SeqCst)
    }

    /// Whether the posting loop should tick.
    pub fn posting_enabled(&self) -> bool {
        self.posting.load(Ordering::SeqCst)
    }
}

/// Runs the two scheduler tick loops and serves the health/metrics API.
pub struct HeraldServer {
    config: HeraldConfig,
    orchestrator: Orchestrator,
}

impl HeraldServer {
    /// Create a server over the facade.
    pub fn new(config: HeraldConfig, orchestrator: Orchestrator) -> Self {
        Self {
            config,
            orchestrator,
        }
    }

    /// Start the tick loops and serve the API. Blocks until the API server
    /// exits.
    #[instrument(skip(self))]
    pub async fn start(self) -> HeraldResult<()> {
        info!("Starting Herald server");

        let generation = Arc::new(GenerationScheduler::new(self.orchestrator.clone()));
        let posting = Arc::new(PostingScheduler::new(self.orchestrator.clone()));
        let switch = self.orchestrator.switch().clone();
        let period = self.config.scheduler.tick_period();

        Self::spawn_generation_loop(Arc::clone(&generation), switch.clone(), period);
        Self::spawn_posting_loop(Arc::clone(&posting), switch, period);

        let state = ApiState::new(Arc::new(self.orchestrator.metrics().clone()));
        let router = create_router(state);
        let listener = tokio::net::TcpListener::bind(&self.config.api.bind)
            .await
            .map_err(|e| {
                HttpError::new(format!("Failed to bind {}: {}", self.config.api.bind, e))
            })?;
        info!(bind = %self.config.api.bind, "Metrics API listening");

        axum::serve(listener, router)
            .await
            .map_err(|e| HttpError::new(format!("API server error: {}", e)))?;

        info!("Herald server stopped");
        Ok(())
    }

    fn spawn_generation_loop(
        scheduler: Arc<GenerationScheduler>,
        switch: SchedulerSwitch,
        period: std::time::Duration,
    ) {
        tokio::spawn(async move {
            let mut interval = interval(period);
            loop {
                interval.tick().await;
                if !switch.generation_enabled() {
                    debug!("Generation scheduler stopped");
                    continue;
                }
                if let Err(e) = scheduler.tick(Utc::now()).await {
                    error!(error = %e, "Generation tick failed");
                }
            }
        });
    }

    fn spawn_posting_loop(
        scheduler: Arc<PostingScheduler>,
        switch: SchedulerSwitch,
        period: std::time::Duration,
    ) {
        tokio::spawn(async move {
            let mut interval = interval(period);
            loop {
                interval.tick().await;
                if !switch.posting_enabled() {
                    debug!("Posting scheduler stopped");
                    continue;
                }
                if let Err(e) = scheduler.tick(Utc::now()).await {
                    error!(error = %e, "Posting tick failed");
                }
            }
        });
    }
}
