// src/session/mod.rs
use std::io::{BufRead, Write};
use std::time::Duration;

use thirtyfour::prelude::*;

use crate::utils::error::SessionError;

// Landmark element present once the record page has fully rendered.
const READY_LANDMARK_CLASS: &str = "x-panel-bodyWrap";
// Polling interval for the bounded readiness wait.
const READY_POLL_INTERVAL_MS: u64 = 500;

/// Configuration for the browser session boundary.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// URL of a running WebDriver endpoint (e.g. chromedriver).
    pub webdriver_url: String,
    /// Bound on the initial page readiness wait. Exceeding it is fatal.
    pub page_timeout: Duration,
    /// Fixed delay after each tab activation; the application re-renders
    /// asynchronously with no observable completion signal.
    pub settle_delay: Duration,
}

/// A live, driver-backed browser session. All navigation and snapshotting
/// goes through here; the extraction core never touches the driver.
pub struct Session {
    driver: WebDriver,
    page_timeout: Duration,
    settle_delay: Duration,
}

impl Session {
    /// Attaches to the WebDriver endpoint and starts a browser session.
    pub async fn connect(config: &SessionConfig) -> Result<Self, SessionError> {
        tracing::debug!("Connecting to WebDriver at {}", config.webdriver_url);
        let caps = DesiredCapabilities::chrome();
        let driver = WebDriver::new(config.webdriver_url.as_str(), caps).await?;
        Ok(Self {
            driver,
            page_timeout: config.page_timeout,
            settle_delay: config.settle_delay,
        })
    }

    /// Opens the record URL and blocks until the page's landmark element is
    /// present, bounded by the configured page timeout.
    pub async fn open(&self, url: &str) -> Result<(), SessionError> {
        self.driver.goto(url).await?;

        tracing::info!("Waiting for the page to load...");
        self.driver
            .query(By::ClassName(READY_LANDMARK_CLASS))
            .wait(self.page_timeout, Duration::from_millis(READY_POLL_INTERVAL_MS))
            .first()
            .await
            .map_err(|_| SessionError::PageTimeout(url.to_string()))?;

        Ok(())
    }

    /// Suspends until a human signals that manual login is complete.
    /// Deliberately unbounded; control returns only on the external signal.
    pub fn await_manual_login(&self) -> Result<(), SessionError> {
        let mut stdout = std::io::stdout();
        write!(stdout, "Please log in to the website and press Enter here when you're logged in...")?;
        stdout.flush()?;

        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;

        tracing::info!("Login confirmed, continuing...");
        Ok(())
    }

    /// Clicks the tab control located by `xpath`, then waits out the settle
    /// delay. A missing control is fatal to the run.
    pub async fn activate_tab(&self, xpath: &str) -> Result<(), SessionError> {
        let control = self
            .driver
            .find(By::XPath(xpath))
            .await
            .map_err(|_| SessionError::TabNotFound(xpath.to_string()))?;
        control.click().await?;

        tokio::time::sleep(self.settle_delay).await;
        Ok(())
    }

    /// Source of the presently rendered page.
    pub async fn page_source(&self) -> Result<String, SessionError> {
        Ok(self.driver.source().await?)
    }

    /// Releases the browser session.
    pub async fn quit(self) -> Result<(), SessionError> {
        self.driver.quit().await?;
        Ok(())
    }
}
