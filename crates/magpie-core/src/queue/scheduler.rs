//! Periodic ticker for the spontaneous message queue.
//!
//! Wraps tokio-cron-scheduler to drain the queue at a fixed interval.
//! `process_queue` stays directly callable (see [`QueueScheduler::run_now`]),
//! so tests and shutdown paths drive drains without waiting on the timer.
//! Stopping the ticker cancels the schedule but not a drain already in
//! flight.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, error, info};

use crate::config::TickerConfig;
use crate::error::{MotivationError, MotivationResult};
use crate::queue::hooks::{MessageDeliverer, MessageFormatter, SessionProvider};
use crate::queue::queue::{ProcessParams, ProcessReport, SpontaneousQueue};

/// The injected collaborators the ticker hands to every drain.
#[derive(Clone)]
pub struct TickerHooks {
    pub formatter: Option<Arc<dyn MessageFormatter>>,
    pub deliverer: Option<Arc<dyn MessageDeliverer>>,
    pub sessions: Arc<dyn SessionProvider>,
}

/// Cancellable periodic driver for [`SpontaneousQueue::process_queue`].
pub struct QueueScheduler {
    scheduler: JobScheduler,
    queue: Arc<Mutex<SpontaneousQueue>>,
    hooks: TickerHooks,
    config: TickerConfig,
}

impl QueueScheduler {
    /// Create a new scheduler. Call [`start`] to begin ticking.
    ///
    /// [`start`]: QueueScheduler::start
    pub async fn new(
        queue: Arc<Mutex<SpontaneousQueue>>,
        hooks: TickerHooks,
        config: TickerConfig,
    ) -> MotivationResult<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| MotivationError::scheduler(format!("failed to create scheduler: {e}")))?;
        Ok(Self {
            scheduler,
            queue,
            hooks,
            config,
        })
    }

    /// Scheduler with the default 30-minute interval.
    pub async fn with_defaults(
        queue: Arc<Mutex<SpontaneousQueue>>,
        hooks: TickerHooks,
    ) -> MotivationResult<Self> {
        Self::new(queue, hooks, TickerConfig::default()).await
    }

    pub fn config(&self) -> &TickerConfig {
        &self.config
    }

    /// Start periodic queue drains at the configured interval.
    pub async fn start(&self) -> MotivationResult<()> {
        let queue = self.queue.clone();
        let hooks = self.hooks.clone();
        let interval_secs = self.config.interval_minutes * 60;

        let job = Job::new_repeated_async(
            std::time::Duration::from_secs(interval_secs),
            move |_uuid, _lock| {
                let queue = queue.clone();
                let hooks = hooks.clone();
                Box::pin(async move {
                    debug!("queue ticker fired");
                    let report = drain(&queue, &hooks).await;
                    if report.failed > 0 {
                        error!(failed = report.failed, "queue drain had hook failures");
                    } else {
                        info!(
                            delivered = report.delivered,
                            deferred = report.deferred,
                            archived = report.archived,
                            skipped = report.skipped,
                            "queue drain complete"
                        );
                    }
                })
            },
        )
        .map_err(|e| MotivationError::scheduler(format!("failed to create ticker job: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| MotivationError::scheduler(format!("failed to add ticker job: {e}")))?;

        if self.config.run_on_start {
            debug!("running initial queue drain on start");
            drain(&self.queue, &self.hooks).await;
        }

        self.scheduler
            .start()
            .await
            .map_err(|e| MotivationError::scheduler(format!("failed to start ticker: {e}")))?;

        info!(
            interval_minutes = self.config.interval_minutes,
            "queue ticker started"
        );
        Ok(())
    }

    /// Stop the ticker. Does not cancel a drain already in flight.
    pub async fn shutdown(&mut self) -> MotivationResult<()> {
        info!("shutting down queue ticker");
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| MotivationError::scheduler(format!("failed to shutdown ticker: {e}")))
    }

    /// Drain the queue once, outside the schedule.
    pub async fn run_now(&self) -> ProcessReport {
        drain(&self.queue, &self.hooks).await
    }

    /// The shared queue handle.
    pub fn queue(&self) -> &Arc<Mutex<SpontaneousQueue>> {
        &self.queue
    }
}

async fn drain(queue: &Arc<Mutex<SpontaneousQueue>>, hooks: &TickerHooks) -> ProcessReport {
    let active_sessions = hooks.sessions.active_sessions();
    let mut queue = queue.lock().await;
    queue
        .process_queue(ProcessParams {
            formatter: hooks.formatter.as_deref(),
            deliverer: hooks.deliverer.as_deref(),
            active_sessions: &active_sessions,
        })
        .await
}
