//! Watchlist read through ChromeDriver.
//!
//! Used when the watchlist table is rendered client-side. The page is
//! loaded once when the source opens; every fetch waits for the table and
//! parses the live DOM. When a driver binary is configured it is spawned
//! as a child process and killed with the source.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use fantoccini::wd::TimeoutConfiguration;
use fantoccini::{Client, ClientBuilder, Locator};
use parking_lot::Mutex;
use serde_json::{json, Map, Value};
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::domain::{parse_watchlist, RetryPolicy, WatchEntry};
use crate::error::{Error, Result};
use crate::port::WatchlistSource;

/// Settings for a ChromeDriver-backed watchlist.
#[derive(Debug, Clone)]
pub struct WebDriverSettings {
    pub page_url: String,
    /// WebDriver endpoint (e.g. `http://localhost:9515`).
    pub driver_url: String,
    /// ChromeDriver binary to launch; `None` expects one already running.
    pub driver_path: Option<PathBuf>,
    pub chrome_binary: Option<PathBuf>,
    pub headless: bool,
    pub page_load_timeout: Duration,
    pub element_wait: Duration,
}

impl WebDriverSettings {
    /// Chrome capabilities for a container without a display.
    #[must_use]
    pub fn capabilities(&self) -> Map<String, Value> {
        let mut args = vec!["--no-sandbox", "--disable-dev-shm-usage"];
        if self.headless {
            args.insert(0, "--headless");
        }

        let mut chrome = json!({ "args": args });
        if let Some(binary) = &self.chrome_binary {
            chrome["binary"] = json!(binary.display().to_string());
        }

        let mut caps = Map::new();
        caps.insert("browserName".into(), json!("chrome"));
        caps.insert("goog:chromeOptions".into(), chrome);
        caps
    }
}

pub struct WebDriverWatchlist {
    settings: WebDriverSettings,
    client: Mutex<Option<Client>>,
    driver: Mutex<Option<Child>>,
}

impl WebDriverWatchlist {
    #[must_use]
    pub fn new(settings: WebDriverSettings) -> Self {
        Self {
            settings,
            client: Mutex::new(None),
            driver: Mutex::new(None),
        }
    }

    fn spawn_driver(&self) -> Result<()> {
        let Some(path) = &self.settings.driver_path else {
            return Ok(());
        };

        let port = url::Url::parse(&self.settings.driver_url)?
            .port_or_known_default()
            .unwrap_or(9515);

        let child = Command::new(path)
            .arg(format!("--port={port}"))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        info!(driver = %path.display(), port, "ChromeDriver launched");
        *self.driver.lock() = Some(child);
        Ok(())
    }

    async fn connect(&self) -> Result<Client> {
        let policy = RetryPolicy::new(5, Duration::from_millis(250));
        let mut attempt = 0;
        loop {
            let mut builder = ClientBuilder::native();
            builder.capabilities(self.settings.capabilities());
            match builder.connect(&self.settings.driver_url).await {
                Ok(client) => return Ok(client),
                Err(e) => match policy.delay_after(attempt) {
                    Some(delay) => {
                        debug!(error = %e, attempt = attempt + 1, "WebDriver not ready, retrying");
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    None => return Err(e.into()),
                },
            }
        }
    }

    fn session(&self) -> Result<Client> {
        self.client
            .lock()
            .clone()
            .ok_or_else(|| Error::Browser("browser session not open".into()))
    }
}

#[async_trait]
impl WatchlistSource for WebDriverWatchlist {
    async fn open(&self) -> Result<()> {
        self.spawn_driver()?;
        let client = self.connect().await?;

        let timeouts =
            TimeoutConfiguration::new(None, Some(self.settings.page_load_timeout), None);
        client.update_timeouts(timeouts).await?;
        client.goto(&self.settings.page_url).await?;

        info!(url = %self.settings.page_url, "Browser session opened");
        *self.client.lock() = Some(client);
        Ok(())
    }

    async fn fetch(&self) -> Result<Vec<WatchEntry>> {
        let client = self.session()?;
        client
            .wait()
            .at_most(self.settings.element_wait)
            .for_element(Locator::Css(".table"))
            .await?;

        let html = client.source().await?;
        parse_watchlist(&html)
    }

    async fn close(&self) -> Result<()> {
        let client = self.client.lock().take();
        if let Some(client) = client {
            if let Err(e) = client.close().await {
                warn!(error = %e, "Failed to end browser session");
            }
        }

        let driver = self.driver.lock().take();
        if let Some(mut child) = driver {
            child.kill().await?;
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("{} (chromedriver)", self.settings.page_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> WebDriverSettings {
        WebDriverSettings {
            page_url: "http://localhost/binance".into(),
            driver_url: "http://localhost:9515".into(),
            driver_path: None,
            chrome_binary: Some(PathBuf::from("/usr/bin/google-chrome")),
            headless: true,
            page_load_timeout: Duration::from_secs(30),
            element_wait: Duration::from_secs(20),
        }
    }

    #[test]
    fn test_capabilities_carry_container_flags() {
        let caps = settings().capabilities();
        let chrome = &caps["goog:chromeOptions"];
        assert_eq!(
            chrome["args"],
            json!(["--headless", "--no-sandbox", "--disable-dev-shm-usage"])
        );
        assert_eq!(chrome["binary"], json!("/usr/bin/google-chrome"));
    }

    #[test]
    fn test_headed_mode_drops_flag() {
        let mut settings = settings();
        settings.headless = false;
        settings.chrome_binary = None;
        let caps = settings.capabilities();
        let chrome = &caps["goog:chromeOptions"];
        assert_eq!(chrome["args"], json!(["--no-sandbox", "--disable-dev-shm-usage"]));
        assert!(chrome.get("binary").is_none());
    }

    #[tokio::test]
    async fn test_fetch_before_open_fails() {
        let source = WebDriverWatchlist::new(settings());
        assert!(matches!(source.fetch().await, Err(Error::Browser(_))));
    }
}
