use anyhow::Result;
use chromiumoxide::browser::Browser;

use crate::app::browser::launch_browser;
use crate::app::workflow::driver::RegPage;
use crate::config::AppConfig;

/// Everything the scrape loop needs: the browser, the single query page and
/// the loaded configuration.
pub struct AppState {
    pub browser: Browser,
    pub reg: RegPage,
    pub config: &'static AppConfig,
}

impl AppState {
    pub async fn new(headless: bool) -> Result<Self> {
        let browser = launch_browser(headless).await?;
        let page = browser.new_page("about:blank").await?;
        let reg = RegPage::new(page).await?;
        Ok(Self {
            browser,
            reg,
            config: crate::config::get(),
        })
    }
}
