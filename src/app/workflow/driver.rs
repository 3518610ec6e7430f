use anyhow::{Context, Result};
use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::cdp::browser_protocol::page::{
    EventJavascriptDialogOpening, HandleJavaScriptDialogParams,
};
use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep, timeout};
use tracing::debug;

use crate::app::error::ScrapeError;
use crate::app::parser::assemble::CourseFragments;
use crate::app::workflow::navigate::{ModalSurface, SubmitOutcome, click_with_modal_guard};
use crate::app::workflow::scripts;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A click evaluation that opened an alert never returns; give up on it
/// after this long and let the modal guard read the dialog event instead.
const CLICK_EVAL_TIMEOUT: Duration = Duration::from_secs(2);

/// One open query page. Dialog events are captured into a channel as they
/// arrive so the retry automaton can poll for them with a timeout.
pub struct RegPage {
    page: Page,
    modal_rx: mpsc::UnboundedReceiver<String>,
}

impl RegPage {
    pub async fn new(page: Page) -> Result<Self> {
        let mut events = page
            .event_listener::<EventJavascriptDialogOpening>()
            .await
            .context("Failed to subscribe to dialog events")?;
        let (tx, modal_rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            while let Some(event) = events.next().await {
                debug!(message = %event.message, "javascript dialog opened");
                if tx.send(event.message.clone()).is_err() {
                    break;
                }
            }
        });
        Ok(Self { page, modal_rx })
    }

    pub async fn open(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .with_context(|| format!("Failed to open {url}"))?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    async fn eval<T: DeserializeOwned>(&self, js: String) -> Result<T> {
        let value = self
            .page
            .evaluate(js)
            .await
            .context("Script evaluation failed")?
            .into_value()
            .context("Failed to read script result")?;
        Ok(value)
    }

    /// Evaluates `js` until it yields a non-null value or `wait` runs out.
    async fn poll_eval<T: DeserializeOwned>(&self, js: &str, wait: Duration) -> Result<Option<T>> {
        let deadline = Instant::now() + wait;
        loop {
            if let Some(value) = self.eval::<Option<T>>(js.to_string()).await? {
                return Ok(Some(value));
            }
            if Instant::now() >= deadline {
                return Ok(None);
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    pub async fn faculty_codes(&self) -> Result<Vec<String>> {
        self.eval(scripts::FACULTY_OPTIONS_JS.to_string())
            .await
            .context("Failed to enumerate faculty codes")
    }

    pub async fn fill_search(
        &self,
        program: &str,
        semester: Option<&str>,
        year: Option<&str>,
        group_mode: bool,
        term: &str,
    ) -> Result<()> {
        let filled: bool = self
            .eval(scripts::fill_search_js(
                program, semester, year, group_mode, term,
            ))
            .await?;
        anyhow::ensure!(filled, "search form not found on the page");
        Ok(())
    }

    /// Submits the query under the modal guard.
    pub async fn submit_query(
        &mut self,
        modal_wait: Duration,
        max_attempts: u32,
    ) -> Result<SubmitOutcome, ScrapeError> {
        let mut surface = GuardedClick {
            page: &self.page,
            modal_rx: &mut self.modal_rx,
            click_js: scripts::CLICK_SUBMIT_JS.to_string(),
        };
        click_with_modal_guard(&mut surface, modal_wait, max_attempts).await
    }

    /// Anchor texts of the result list, or `None` when no results rendered
    /// within `wait`.
    pub async fn result_links(&self, wait: Duration) -> Result<Option<Vec<String>>> {
        self.poll_eval(scripts::RESULT_LINKS_JS, wait).await
    }

    /// Opens the n-th result link under the modal guard.
    pub async fn open_result(
        &mut self,
        index: usize,
        modal_wait: Duration,
        max_attempts: u32,
    ) -> Result<SubmitOutcome, ScrapeError> {
        let mut surface = GuardedClick {
            page: &self.page,
            modal_rx: &mut self.modal_rx,
            click_js: scripts::click_link_js(index),
        };
        click_with_modal_guard(&mut surface, modal_wait, max_attempts).await
    }

    /// The five detail regions of the opened course, or `None` on timeout.
    pub async fn course_fragments(&self, wait: Duration) -> Result<Option<CourseFragments>> {
        self.poll_eval(scripts::COURSE_FRAGMENTS_JS, wait).await
    }

    /// Sub-course rows of the opened group course, or `None` on timeout.
    pub async fn group_rows(&self, wait: Duration) -> Result<Option<Vec<Vec<String>>>> {
        self.poll_eval(scripts::GROUP_ROWS_JS, wait).await
    }
}

struct GuardedClick<'a> {
    page: &'a Page,
    modal_rx: &'a mut mpsc::UnboundedReceiver<String>,
    click_js: String,
}

#[async_trait]
impl ModalSurface for GuardedClick<'_> {
    async fn perform(&mut self) -> Result<()> {
        // Drop dialog messages left over from an earlier action.
        while self.modal_rx.try_recv().is_ok() {}
        match timeout(CLICK_EVAL_TIMEOUT, self.page.evaluate(self.click_js.clone())).await {
            Ok(result) => {
                result.context("Click evaluation failed")?;
            }
            // The click raised a dialog that blocked the evaluation; the
            // guard reads it from the event channel next.
            Err(_) => debug!("click evaluation blocked, checking for a dialog"),
        }
        Ok(())
    }

    async fn wait_for_modal(&mut self, wait: Duration) -> Result<Option<String>> {
        match timeout(wait, self.modal_rx.recv()).await {
            Ok(message) => Ok(message),
            Err(_) => Ok(None),
        }
    }

    async fn dismiss_modal(&mut self) -> Result<()> {
        self.page
            .execute(HandleJavaScriptDialogParams::new(true))
            .await
            .context("Failed to dismiss dialog")?;
        Ok(())
    }
}
