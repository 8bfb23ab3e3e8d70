//! The system control gate.

use herald_core::{ControlState, SystemMode};
use herald_error::{GateError, GateErrorKind, HeraldResult};
use herald_store::ControlStore;
use std::sync::Arc;

/// Consults the current operational mode before any generation or posting
/// proceeds.
///
/// Mode semantics:
/// - `active`: everything runs; auto-posting per settings
/// - `paused`: automation suspended; manual actions still allowed
/// - `manual-only`: drafts generate, auto-post-on-approve suppressed
/// - `crisis`: generation, regeneration, approval, and all posting blocked
#[derive(Clone)]
pub struct Gate {
    control: Arc<dyn ControlStore>,
}

impl Gate {
    /// Create a gate over the control store.
    pub fn new(control: Arc<dyn ControlStore>) -> Self {
        Self { control }
    }

    /// The current control state (most recent record wins).
    pub async fn current(&self) -> HeraldResult<ControlState> {
        self.control.current().await
    }

    /// Generation requests are blocked in crisis and paused modes.
    pub async fn check_generation(&self) -> HeraldResult<()> {
        match self.current().await?.mode {
            SystemMode::Crisis => Err(GateError::new(GateErrorKind::Crisis(
                "content generation".into(),
            ))
            .into()),
            SystemMode::Paused => Err(GateError::new(GateErrorKind::Paused(
                "content generation".into(),
            ))
            .into()),
            _ => Ok(()),
        }
    }

    /// Regeneration is a manual action; only crisis blocks it.
    pub async fn check_regeneration(&self) -> HeraldResult<()> {
        match self.current().await?.mode {
            SystemMode::Crisis => {
                Err(GateError::new(GateErrorKind::Crisis("regeneration".into())).into())
            }
            _ => Ok(()),
        }
    }

    /// Approvals are blocked in crisis mode.
    pub async fn check_approval(&self) -> HeraldResult<()> {
        match self.current().await?.mode {
            SystemMode::Crisis => {
                Err(GateError::new(GateErrorKind::Crisis("approvals".into())).into())
            }
            _ => Ok(()),
        }
    }

    /// All posting, manual included, is blocked in crisis mode. Manual
    /// posting stays allowed in paused and manual-only modes.
    pub async fn check_posting(&self) -> HeraldResult<()> {
        match self.current().await?.mode {
            SystemMode::Crisis => {
                Err(GateError::new(GateErrorKind::Crisis("posting".into())).into())
            }
            _ => Ok(()),
        }
    }

    /// Whether an approval with no scheduled time should publish
    /// immediately: mode active and auto-posting enabled.
    pub async fn auto_post_on_approval(&self) -> HeraldResult<bool> {
        let state = self.current().await?;
        Ok(state.mode == SystemMode::Active && state.settings.auto_posting_enabled)
    }
}
