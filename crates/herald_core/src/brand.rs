//! Brand profiles and recurring generation schedules.

use crate::Platform;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque brand identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct BrandId(pub Uuid);

impl BrandId {
    /// Generate a fresh identifier.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// How often a recurring schedule fires.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Frequency {
    /// Every day
    Daily,
    /// On the configured days of the week (Monday by default)
    Weekly,
    /// Only on the configured days of the week
    Custom,
}

/// Recurring generation schedule attached to a brand profile.
///
/// Read-only input to the generation scheduler. `days_of_week` uses
/// 0 = Sunday .. 6 = Saturday and is ignored when `frequency` is daily.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandSchedule {
    /// Whether the scheduler considers this brand at all
    pub enabled: bool,
    /// Firing cadence
    pub frequency: Frequency,
    /// Days the schedule fires on, 0 = Sunday .. 6 = Saturday
    #[serde(default)]
    pub days_of_week: Vec<u8>,
    /// Times the schedule fires at, "HH:MM" 24-hour
    #[serde(default)]
    pub times_of_day: Vec<String>,
    /// One generation task fans out per platform listed here
    #[serde(default)]
    pub platforms: Vec<Platform>,
    /// Whether drafts should also request an AI image
    #[serde(default)]
    pub auto_generate_image: bool,
    /// Optional prompt template carried into each draft
    #[serde(default)]
    pub prompt_template: Option<String>,
}

impl BrandSchedule {
    /// Whether the schedule fires on the given day (0 = Sunday .. 6 =
    /// Saturday).
    ///
    /// # Examples
    ///
    /// ```
    /// use herald_core::{BrandSchedule, Frequency};
    ///
    /// let schedule = BrandSchedule {
    ///     enabled: true,
    ///     frequency: Frequency::Weekly,
    ///     days_of_week: vec![],
    ///     times_of_day: vec!["09:00".into()],
    ///     platforms: vec![],
    ///     auto_generate_image: false,
    ///     prompt_template: None,
    /// };
    /// // Weekly with no days configured defaults to Monday (1).
    /// assert!(schedule.fires_on_day(1));
    /// assert!(!schedule.fires_on_day(3));
    /// ```
    pub fn fires_on_day(&self, day: u8) -> bool {
        match self.frequency {
            Frequency::Daily => true,
            Frequency::Weekly => {
                if self.days_of_week.is_empty() {
                    day == 1
                } else {
                    self.days_of_week.contains(&day)
                }
            }
            Frequency::Custom => self.days_of_week.contains(&day),
        }
    }
}

/// Brand voice and review configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandProfile {
    /// Immutable identifier
    pub id: BrandId,
    /// Display name
    pub name: String,
    /// Industry the brand operates in
    pub industry: String,
    /// Voice and tone descriptors
    pub voice_tone: Vec<String>,
    /// Audience description
    pub target_audience: String,
    /// Messages content should reinforce
    pub key_messages: Vec<String>,
    /// Topics content must avoid
    pub do_not_mention: Vec<String>,
    /// Recipients of "approval needed" notifications
    pub approver_emails: Vec<String>,
    /// Recurring generation schedule, when configured
    pub schedule: Option<BrandSchedule>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(frequency: Frequency, days: Vec<u8>) -> BrandSchedule {
        BrandSchedule {
            enabled: true,
            frequency,
            days_of_week: days,
            times_of_day: vec!["09:00".into()],
            platforms: vec![Platform::LinkedIn],
            auto_generate_image: false,
            prompt_template: None,
        }
    }

    #[test]
    fn daily_fires_every_day() {
        let s = schedule(Frequency::Daily, vec![]);
        for day in 0..7 {
            assert!(s.fires_on_day(day));
        }
    }

    #[test]
    fn weekly_defaults_to_monday() {
        let s = schedule(Frequency::Weekly, vec![]);
        assert!(s.fires_on_day(1));
        assert!(!s.fires_on_day(0));
        assert!(!s.fires_on_day(6));
    }

    #[test]
    fn custom_requires_configured_days() {
        let s = schedule(Frequency::Custom, vec![2, 4]);
        assert!(s.fires_on_day(2));
        assert!(s.fires_on_day(4));
        assert!(!s.fires_on_day(1));

        let empty = schedule(Frequency::Custom, vec![]);
        for day in 0..7 {
            assert!(!empty.fires_on_day(day));
        }
    }
}
