//! System control state: operational mode and settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Global operational mode gating automation.
///
/// Any mode can follow any mode; operator override is always possible.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SystemMode {
    /// Both schedulers run; auto-posting proceeds if enabled
    Active,
    /// Automation suspended; manual approve/reject/post-now still allowed
    Paused,
    /// Drafts still generate, but every publish needs a manual trigger
    ManualOnly,
    /// Hard stop: generation, regeneration, approval, and all posting blocked
    Crisis,
}

/// Tunable automation settings carried alongside the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSettings {
    /// Whether the posting scheduler publishes at all
    pub auto_posting_enabled: bool,
    /// Whether every item requires review before publishing
    pub require_approval_for_all: bool,
    /// Posting scheduler stops once this many items posted in a day
    pub max_daily_posts: u32,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            auto_posting_enabled: true,
            require_approval_for_all: true,
            max_daily_posts: 5,
        }
    }
}

/// One record of the append-only control history.
///
/// The "current" state is the most recently appended record; the history
/// doubles as an audit trail of mode changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    /// Operational mode
    pub mode: SystemMode,
    /// Automation settings
    pub settings: SystemSettings,
    /// Operator-supplied reason for the change
    pub reason: Option<String>,
    /// Who changed the mode
    pub changed_by: String,
    /// When the record was appended
    pub changed_at: DateTime<Utc>,
}

impl ControlState {
    /// The state assumed before any operator has touched the system.
    pub fn initial(now: DateTime<Utc>) -> Self {
        Self {
            mode: SystemMode::Active,
            settings: SystemSettings::default(),
            reason: None,
            changed_by: "system".to_string(),
            changed_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_active_with_defaults() {
        let state = ControlState::initial(Utc::now());
        assert_eq!(state.mode, SystemMode::Active);
        assert!(state.settings.auto_posting_enabled);
        assert_eq!(state.settings.max_daily_posts, 5);
    }

    #[test]
    fn mode_serializes_kebab_case() {
        let json = serde_json::to_string(&SystemMode::ManualOnly).unwrap();
        assert_eq!(json, "\"manual-only\"");
        assert_eq!(format!("{}", SystemMode::ManualOnly), "manual-only");
    }
}
