//! The posting scheduler: minute-granularity drain of due approved items.

use crate::ops::Orchestrator;
use chrono::{DateTime, Utc};
use herald_core::SystemMode;
use herald_error::HeraldResult;
use herald_store::ContentStore;
use tracing::{debug, error, info, instrument, warn};

/// Minute-tick scheduler that publishes every approved item whose scheduled
/// time has arrived, oldest first, sequentially.
///
/// Runs only when the mode is `active` and auto-posting is enabled; the
/// `approved → posted` transition being one-way is the only overlap
/// protection needed.
pub struct PostingScheduler {
    orchestrator: Orchestrator,
}

impl PostingScheduler {
    /// Create a scheduler over the facade.
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self { orchestrator }
    }

    /// Run one tick. Returns the number of items that went live.
    ///
    /// A failed publish leaves its item approved; the next tick naturally
    /// re-selects it while it stays due.
    #[instrument(skip(self))]
    pub async fn tick(&self, now: DateTime<Utc>) -> HeraldResult<usize> {
        self.orchestrator.metrics().record_posting_tick();

        let control = self.orchestrator.gate().current().await?;
        if control.mode != SystemMode::Active {
            debug!(mode = %control.mode, "Posting paused");
            return Ok(0);
        }
        if !control.settings.auto_posting_enabled {
            debug!("Auto-posting disabled");
            return Ok(0);
        }

        let midnight = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())
            .unwrap_or(now);
        let posted_today = self.orchestrator.content_store().posted_since(midnight).await?;
        let budget = control
            .settings
            .max_daily_posts
            .saturating_sub(posted_today as u32) as usize;
        if budget == 0 {
            info!(
                max_daily_posts = control.settings.max_daily_posts,
                "Daily post cap reached; leaving due items for tomorrow"
            );
            return Ok(0);
        }

        let due = self.orchestrator.content_store().due_for_posting(now).await?;
        if due.is_empty() {
            return Ok(0);
        }
        info!(count = due.len(), "Found posts ready to publish");

        let mut published = 0;
        for item in due.into_iter().take(budget) {
            match self.orchestrator.publish_content(item.id, "system").await {
                Ok(report) if report.success => published += 1,
                Ok(report) => {
                    warn!(
                        item = %item.id,
                        error = report.error.as_deref().unwrap_or("unknown"),
                        "Publish failed; will retry next tick"
                    );
                }
                Err(e) => {
                    error!(item = %item.id, error = %e, "Publish errored");
                }
            }
        }
        Ok(published)
    }
}
