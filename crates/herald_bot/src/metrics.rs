//! Metrics collection for scheduler and publish operations.

use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Metrics collector for orchestrator operations.
#[derive(Debug, Clone)]
pub struct HeraldMetrics {
    inner: Arc<HeraldMetricsInner>,
}

#[derive(Debug)]
struct HeraldMetricsInner {
    // Scheduler tick counts
    generation_ticks: AtomicU64,
    posting_ticks: AtomicU64,

    // Work and failure counts
    drafts_completed: AtomicU64,
    drafts_failed: AtomicU64,
    posts_published: AtomicU64,
    posts_failed: AtomicU64,

    // Last success timestamps
    generation_last_success: parking_lot::Mutex<Option<Instant>>,
    posting_last_success: parking_lot::Mutex<Option<Instant>>,
}

impl Default for HeraldMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl HeraldMetrics {
    /// Creates a new metrics collector.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(HeraldMetricsInner {
                generation_ticks: AtomicU64::new(0),
                posting_ticks: AtomicU64::new(0),
                drafts_completed: AtomicU64::new(0),
                drafts_failed: AtomicU64::new(0),
                posts_published: AtomicU64::new(0),
                posts_failed: AtomicU64::new(0),
                generation_last_success: parking_lot::Mutex::new(None),
                posting_last_success: parking_lot::Mutex::new(None),
            }),
        }
    }

    /// Records a generation scheduler tick.
    pub fn record_generation_tick(&self) {
        self.inner.generation_ticks.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a completed draft.
    pub fn record_draft_completed(&self) {
        self.inner.drafts_completed.fetch_add(1, Ordering::Relaxed);
        *self.inner.generation_last_success.lock() = Some(Instant::now());
    }

    /// Records a failed draft.
    pub fn record_draft_failed(&self) {
        self.inner.drafts_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a posting scheduler tick.
    pub fn record_posting_tick(&self) {
        self.inner.posting_ticks.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a successful publish.
    pub fn record_post_published(&self) {
        self.inner.posts_published.fetch_add(1, Ordering::Relaxed);
        *self.inner.posting_last_success.lock() = Some(Instant::now());
    }

    /// Records a failed publish attempt.
    pub fn record_post_failed(&self) {
        self.inner.posts_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Gets draft completion count.
    pub fn drafts_completed(&self) -> u64 {
        self.inner.drafts_completed.load(Ordering::Relaxed)
    }

    /// Gets draft failure count.
    pub fn drafts_failed(&self) -> u64 {
        self.inner.drafts_failed.load(Ordering::Relaxed)
    }

    /// Gets publish count.
    pub fn posts_published(&self) -> u64 {
        self.inner.posts_published.load(Ordering::Relaxed)
    }

    /// Gets publish failure count.
    pub fn posts_failed(&self) -> u64 {
        self.inner.posts_failed.load(Ordering::Relaxed)
    }

    /// Creates a serializable snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            generation: SchedulerMetricSnapshot {
                ticks: self.inner.generation_ticks.load(Ordering::Relaxed),
                completed: self.drafts_completed(),
                failed: self.drafts_failed(),
                seconds_since_success: self
                    .inner
                    .generation_last_success
                    .lock()
                    .map(|instant| instant.elapsed().as_secs()),
            },
            posting: SchedulerMetricSnapshot {
                ticks: self.inner.posting_ticks.load(Ordering::Relaxed),
                completed: self.posts_published(),
                failed: self.posts_failed(),
                seconds_since_success: self
                    .inner
                    .posting_last_success
                    .lock()
                    .map(|instant| instant.elapsed().as_secs()),
            },
        }
    }
}

/// Serializable snapshot of orchestrator metrics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    /// Generation pipeline metrics
    pub generation: SchedulerMetricSnapshot,
    /// Posting pipeline metrics
    pub posting: SchedulerMetricSnapshot,
}

/// Serializable snapshot of one pipeline's metrics.
#[derive(Debug, Clone, Serialize)]
pub struct SchedulerMetricSnapshot {
    /// Number of scheduler ticks
    pub ticks: u64,
    /// Number of completed units of work
    pub completed: u64,
    /// Number of failures
    pub failed: u64,
    /// Seconds since last success
    pub seconds_since_success: Option<u64>,
}
