//! HTTP client for PowerSetter requests using wreq for TLS fingerprint emulation.

use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::RngExt;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;
use wreq_util::Emulation;

/// Fixed origin of the scraped site.
pub const DEFAULT_ORIGIN: &str = "https://www.powersetter.com";

/// Trait for fetching rendered rates pages - enables mocking for tests.
#[async_trait]
pub trait RateFetch: Send + Sync {
    /// Fetches the rendered results page for a ZIP code and returns the HTML.
    async fn rates(&self, zip_code: &str) -> Result<String>;

    /// Returns the site origin used to absolutize relative URLs.
    fn origin(&self) -> String;
}

/// PowerSetter HTTP client with browser impersonation and anti-bot measures.
pub struct PowerSetterClient {
    client: Client,
    delay_ms: u64,
    delay_jitter_ms: u64,
    base_url: Option<String>,
}

impl PowerSetterClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, None)
    }

    /// Creates a new client with an optional custom base URL (for testing).
    pub fn with_base_url(config: &Config, base_url: Option<String>) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10));

        // Configure proxy if specified
        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
            base_url,
        })
    }

    /// Returns the base URL (custom for testing, or the production origin).
    fn base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| DEFAULT_ORIGIN.to_string())
    }

    /// Performs a GET request with all anti-bot measures.
    async fn get(&self, url: &str) -> Result<String> {
        // Add human-like delay with jitter
        self.delay().await;

        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Cache-Control", "no-cache")
            .header("Pragma", "no-cache")
            .header("Sec-Ch-Ua", "\"Chromium\";v=\"131\", \"Not_A Brand\";v=\"24\"")
            .header("Sec-Ch-Ua-Mobile", "?0")
            .header("Sec-Ch-Ua-Platform", "\"macOS\"")
            .header("Sec-Fetch-Dest", "document")
            .header("Sec-Fetch-Mode", "navigate")
            .header("Sec-Fetch-Site", "none")
            .header("Sec-Fetch-User", "?1")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status == 503 {
            warn!("Rate limited (503). Consider using a proxy or increasing delay.");
            anyhow::bail!("Rate limited by PowerSetter. Try increasing --delay or using a proxy.");
        }

        if !status.is_success() {
            anyhow::bail!("Request failed with status: {}", status);
        }

        response.text().await.context("Failed to read response body")
    }

    /// Adds a random delay to mimic human behavior.
    async fn delay(&self) {
        if self.delay_ms == 0 {
            return;
        }

        let jitter = if self.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        } else {
            0
        };

        let total_delay = self.delay_ms + jitter;
        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }

    /// Updates the delay settings.
    pub fn set_delay(&mut self, delay_ms: u64, jitter_ms: u64) {
        self.delay_ms = delay_ms;
        self.delay_jitter_ms = jitter_ms;
    }
}

#[async_trait]
impl RateFetch for PowerSetterClient {
    async fn rates(&self, zip_code: &str) -> Result<String> {
        let url = format!("{}/rates/{}", self.base_url(), zip_code);

        info!("Fetching rates for ZIP {}", zip_code);
        self.get(&url).await
    }

    fn origin(&self) -> String {
        self.base_url()
    }
}
