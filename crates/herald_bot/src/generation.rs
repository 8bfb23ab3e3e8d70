//! The generation scheduler: minute-granularity fan-out of scheduled drafts.

use crate::ops::{GenerationRequest, Orchestrator};
use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use herald_core::{AuditEntry, BrandId, ContentOrigin, Platform, SystemMode};
use herald_error::{ContentError, ContentErrorKind, HeraldResult};
use herald_store::{BrandStore, ContentStore};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::json;
use tracing::{error, info, instrument, warn};

/// One generation task fanned out from a schedule slot.
#[derive(Debug, Clone)]
struct ScheduledGeneration {
    brand_id: BrandId,
    brand_name: String,
    platform: Platform,
    time: String,
}

/// A slot the look-ahead query predicts will fire.
#[derive(Debug, Clone, Serialize)]
pub struct UpcomingGeneration {
    /// Brand that will generate
    pub brand_id: BrandId,
    /// Brand display name
    pub brand_name: String,
    /// Platform the task targets
    pub platform: Platform,
    /// Instant the slot fires
    pub scheduled_for: DateTime<Utc>,
    /// The configured "HH:MM" entry that matched
    pub time: String,
}

/// Minute-tick scheduler that creates and drafts content for every brand
/// whose recurring schedule matches "now".
///
/// The tick holds its own last-run minute key — a tick body doing real I/O
/// can outlive the next timer firing, and the key makes the second firing a
/// no-op rather than a double fan-out.
pub struct GenerationScheduler {
    orchestrator: Orchestrator,
    last_run_key: Mutex<Option<String>>,
}

impl GenerationScheduler {
    /// Create a scheduler over the facade.
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator,
            last_run_key: Mutex::new(None),
        }
    }

    /// Run one tick: dedup by minute key, skip when the gate is paused or
    /// in crisis, then fan out one draft per matching brand/time/platform.
    ///
    /// A failure for one brand/platform never blocks the rest of the tick.
    /// Returns the number of fan-outs that completed.
    #[instrument(skip(self))]
    pub async fn tick(&self, now: DateTime<Utc>) -> HeraldResult<usize> {
        let key = minute_key(&now);
        {
            let mut last = self.last_run_key.lock();
            if last.as_deref() == Some(key.as_str()) {
                return Ok(0);
            }
            *last = Some(key);
        }
        self.orchestrator.metrics().record_generation_tick();

        let control = self.orchestrator.gate().current().await?;
        if matches!(control.mode, SystemMode::Paused | SystemMode::Crisis) {
            info!(mode = %control.mode, "Content generation paused");
            return Ok(0);
        }

        let brands = self.orchestrator.brand_store().with_enabled_schedules().await?;
        if brands.is_empty() {
            return Ok(0);
        }

        let today = now.weekday().num_days_from_sunday() as u8;
        let mut tasks: Vec<ScheduledGeneration> = Vec::new();
        for brand in &brands {
            let Some(schedule) = brand.schedule.as_ref() else {
                continue;
            };
            if !schedule.fires_on_day(today) {
                continue;
            }
            for time in &schedule.times_of_day {
                let Some((hour, minute)) = parse_time_of_day(time) else {
                    warn!(brand = %brand.name, time = %time, "Unparseable schedule time");
                    continue;
                };
                if now.hour() == hour && now.minute() == minute {
                    for &platform in &schedule.platforms {
                        tasks.push(ScheduledGeneration {
                            brand_id: brand.id,
                            brand_name: brand.name.clone(),
                            platform,
                            time: time.clone(),
                        });
                    }
                }
            }
        }

        if tasks.is_empty() {
            return Ok(0);
        }
        info!(count = tasks.len(), "Processing scheduled content generations");

        let mut processed = 0;
        for task in &tasks {
            match self.generate_for(task).await {
                Ok(()) => processed += 1,
                Err(e) => {
                    error!(
                        brand = %task.brand_name,
                        platform = %task.platform,
                        error = %e,
                        "Scheduled generation failed"
                    );
                }
            }
        }
        Ok(processed)
    }

    async fn generate_for(&self, task: &ScheduledGeneration) -> HeraldResult<()> {
        info!(brand = %task.brand_name, platform = %task.platform, "Auto-generating content");

        let brand = self
            .orchestrator
            .brand_store()
            .get(task.brand_id)
            .await?
            .ok_or_else(|| {
                ContentError::new(ContentErrorKind::BrandNotFound(task.brand_id.to_string()))
            })?;
        let (prompt, want_image) = brand
            .schedule
            .as_ref()
            .map(|s| (s.prompt_template.clone(), s.auto_generate_image))
            .unwrap_or((None, false));

        let item = self
            .orchestrator
            .create_draft_item(
                GenerationRequest {
                    brand_id: task.brand_id,
                    platform: task.platform,
                    media_refs: Vec::new(),
                    prompt,
                    want_image,
                },
                ContentOrigin::Scheduled,
            )
            .await?;

        self.orchestrator.run_generation(item.id).await;

        let failed = self
            .orchestrator
            .content_store()
            .get(item.id)
            .await?
            .is_some_and(|item| item.generation_error.is_some());
        let action = if failed {
            "scheduled_content_generation_failed"
        } else {
            "scheduled_content_generated"
        };
        self.orchestrator
            .record_audit(AuditEntry::new(
                action,
                "system",
                "content",
                item.id.to_string(),
                json!({
                    "brand": task.brand_name,
                    "platform": task.platform.to_string(),
                    "scheduled_time": task.time,
                }),
            ))
            .await?;
        Ok(())
    }

    /// What will fire in the next `hours` hours: replays the same day/time
    /// matching against future instants without mutating any state.
    pub async fn upcoming(
        &self,
        hours: u32,
        now: DateTime<Utc>,
    ) -> HeraldResult<Vec<UpcomingGeneration>> {
        let brands = self.orchestrator.brand_store().with_enabled_schedules().await?;
        let end = now + Duration::hours(hours as i64);
        let day_span = hours.div_ceil(24);

        let mut upcoming: Vec<UpcomingGeneration> = Vec::new();
        for brand in &brands {
            let Some(schedule) = brand.schedule.as_ref() else {
                continue;
            };
            for time in &schedule.times_of_day {
                let Some((hour, minute)) = parse_time_of_day(time) else {
                    continue;
                };
                for day_offset in 0..=day_span {
                    let date = (now + Duration::days(day_offset as i64)).date_naive();
                    let Some(naive) = date.and_hms_opt(hour, minute, 0) else {
                        continue;
                    };
                    let candidate = naive.and_utc();
                    if candidate <= now || candidate > end {
                        continue;
                    }
                    let day = candidate.weekday().num_days_from_sunday() as u8;
                    if !schedule.fires_on_day(day) {
                        continue;
                    }
                    for &platform in &schedule.platforms {
                        upcoming.push(UpcomingGeneration {
                            brand_id: brand.id,
                            brand_name: brand.name.clone(),
                            platform,
                            scheduled_for: candidate,
                            time: time.clone(),
                        });
                    }
                }
            }
        }
        upcoming.sort_by_key(|u| u.scheduled_for);
        Ok(upcoming)
    }
}

/// Year-month-day-hour-minute key that makes a slow tick handler safe
/// against the next firing.
fn minute_key(now: &DateTime<Utc>) -> String {
    format!(
        "{}-{}-{}-{}-{}",
        now.year(),
        now.month(),
        now.day(),
        now.hour(),
        now.minute()
    )
}

/// Parse an "HH:MM" 24-hour schedule entry.
fn parse_time_of_day(time: &str) -> Option<(u32, u32)> {
    let (hour, minute) = time.split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}
