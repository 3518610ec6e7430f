use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::app::error::ScrapeError;

/// The alert text the site raises when a query matches nothing.
pub const NO_DATA_MESSAGE: &str = "ไม่มีข้อมูลตารางสอนตารางสอบ";

/// One guarded page action: something clickable that may raise a blocking
/// modal instead of (or before) taking effect.
#[async_trait]
pub trait ModalSurface {
    async fn perform(&mut self) -> anyhow::Result<()>;
    /// Waits up to `timeout` for a modal; returns its message text if one
    /// appeared.
    async fn wait_for_modal(&mut self, timeout: Duration) -> anyhow::Result<Option<String>>;
    async fn dismiss_modal(&mut self) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No modal within the wait window; the action's effect is assumed
    /// complete.
    Completed,
    /// The site reported no data for this query; the caller skips the scope.
    NoData,
}

/// Performs the action, clearing unexpected modals and retrying, up to
/// `max_attempts` times. An attempt that stays modal-free within
/// `modal_wait` completes the action.
pub async fn click_with_modal_guard<S: ModalSurface + Send>(
    surface: &mut S,
    modal_wait: Duration,
    max_attempts: u32,
) -> Result<SubmitOutcome, ScrapeError> {
    for attempt in 1..=max_attempts {
        surface.perform().await?;
        match surface.wait_for_modal(modal_wait).await? {
            None => {
                debug!(attempt, "action completed without a modal");
                return Ok(SubmitOutcome::Completed);
            }
            Some(message) if message == NO_DATA_MESSAGE => {
                surface.dismiss_modal().await?;
                return Ok(SubmitOutcome::NoData);
            }
            Some(message) => {
                warn!(attempt, %message, "unexpected modal, dismissing and retrying");
                surface.dismiss_modal().await?;
            }
        }
    }
    Err(ScrapeError::RetryExhausted {
        attempts: max_attempts,
    })
}
