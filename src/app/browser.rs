use anyhow::{Context, Result, anyhow};
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;

/// Launches a Chrome instance and keeps its CDP handler running in the
/// background for the life of the process.
pub async fn launch_browser(headless: bool) -> Result<Browser> {
    let mut config = BrowserConfig::builder();
    if !headless {
        config = config.with_head();
    }
    let config = config.build().map_err(|e| anyhow!(e))?;

    let (browser, mut handler) = Browser::launch(config)
        .await
        .context("Failed to launch the browser")?;

    tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    });

    Ok(browser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::logger;

    // Needs a local Chrome; logs instead of failing where none is installed.
    #[tokio::test]
    async fn test_launch_browser() {
        logger::init_test();
        match launch_browser(true).await {
            Ok(_) => tracing::info!("browser launched"),
            Err(e) => tracing::error!("browser launch failed: {}", e),
        }
    }
}
