use std::time::Duration;

use anyhow::Result;
use thirtyfour::prelude::*;
use tokio::time::Instant;

use crate::telemetry::ctx::LogCtx;
use crate::telemetry::ops::scrape::Scrape;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub url: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    Rendered(RenderedPage),
    /// Ready marker never showed up within the bound.
    Timeout { url: String },
    /// Session could not be opened or the driver errored.
    Failed { url: String, reason: String },
}

/// Loads one page and waits until `ready` matches. Implementations report
/// every failure through `PageOutcome`; they never return an error.
pub trait PageFetcher {
    async fn fetch(&self, url: &str, ready: &str, timeout: Duration) -> PageOutcome;
}

/// Opens a fresh WebDriver session (one browser process) per call and quits
/// it before returning.
pub struct WebDriverFetcher {
    webdriver_url: String,
    headless: bool,
    log: LogCtx<Scrape>,
}

impl WebDriverFetcher {
    pub fn new(webdriver_url: impl Into<String>, headless: bool, log: LogCtx<Scrape>) -> Self {
        WebDriverFetcher { webdriver_url: webdriver_url.into(), headless, log }
    }

    async fn open_session(&self) -> Result<WebDriver> {
        let mut caps = DesiredCapabilities::chrome();
        if self.headless { caps.set_headless()?; }
        let driver = WebDriver::new(self.webdriver_url.as_str(), caps).await?;
        Ok(driver)
    }
}

impl PageFetcher for WebDriverFetcher {
    async fn fetch(&self, url: &str, ready: &str, timeout: Duration) -> PageOutcome {
        let driver = match self.open_session().await {
            Ok(d) => d,
            Err(e) => return PageOutcome::Failed { url: url.to_string(), reason: format!("session: {e}") },
        };
        let outcome = load(&driver, url, ready, timeout).await;
        if let Err(e) = driver.quit().await {
            self.log.warn_kv("session quit failed", [("url", url.to_string()), ("reason", e.to_string())]);
        }
        outcome
    }
}

async fn load(driver: &WebDriver, url: &str, ready: &str, timeout: Duration) -> PageOutcome {
    // navigation and the ready-marker wait share one budget
    let deadline = Instant::now() + timeout;
    match tokio::time::timeout_at(deadline, driver.goto(url)).await {
        Err(_) => return PageOutcome::Timeout { url: url.to_string() },
        Ok(Err(e)) => return PageOutcome::Failed { url: url.to_string(), reason: format!("navigate: {e}") },
        Ok(Ok(())) => {}
    }
    match driver.query(By::Css(ready)).wait(remaining(deadline), POLL_INTERVAL).exists().await {
        Ok(true) => {}
        Ok(false) => return PageOutcome::Timeout { url: url.to_string() },
        Err(e) => return PageOutcome::Failed { url: url.to_string(), reason: format!("wait: {e}") },
    }
    match driver.source().await {
        Ok(html) => PageOutcome::Rendered(RenderedPage { url: url.to_string(), html }),
        Err(e) => PageOutcome::Failed { url: url.to_string(), reason: format!("source: {e}") },
    }
}

fn remaining(deadline: Instant) -> Duration {
    deadline.saturating_duration_since(Instant::now())
}
