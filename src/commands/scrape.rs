//! Scrape command implementation.
//!
//! Sequential loop over ZIP codes with bounded retries per ZIP. The
//! inter-request delay lives in the client, which pauses before every fetch.

use crate::config::Config;
use crate::filters::FilterChainBuilder;
use crate::format::Formatter;
use crate::powersetter::models::{RateRecord, RateResults};
use crate::powersetter::{Parser, PowerSetterClient, RateFetch};
use crate::store::RateStore;
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

/// Executes a rate scrape over a list of ZIP codes.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the scrape and returns formatted output.
    pub async fn execute(
        &self,
        store: &mut dyn RateStore,
        zip_codes: &[String],
    ) -> Result<String> {
        let client = PowerSetterClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, store, zip_codes).await
    }

    /// Executes the scrape with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl RateFetch,
        store: &mut dyn RateStore,
        zip_codes: &[String],
    ) -> Result<String> {
        let parser = Parser::new(client.origin()).with_max_cards(self.config.max_cards);

        // Build filter chain
        let filters = FilterChainBuilder::new()
            .price_range(self.config.min_price, self.config.max_price)
            .green_only(self.config.green_only)
            .no_fee_only(self.config.no_fee_only)
            .build();

        if !filters.is_empty() {
            debug!("Active filters: {}", filters.descriptions().join(", "));
        }

        let mut all_records: Vec<RateRecord> = Vec::new();
        let mut failed = 0usize;

        for (i, zip_code) in zip_codes.iter().enumerate() {
            let zip_code = zip_code.trim();
            if zip_code.len() != 5 {
                eprintln!("Skipping invalid ZIP code: {}", zip_code);
                continue;
            }

            info!("Processing ZIP {} ({}/{})", zip_code, i + 1, zip_codes.len());

            match self.scrape_zip(client, &parser, zip_code).await {
                Ok(results) => {
                    let found = results.count();
                    let records = filters.apply(results.records);
                    debug!(
                        "ZIP {} returned {} offers ({} after filtering)",
                        zip_code,
                        found,
                        records.len()
                    );

                    if !records.is_empty() {
                        store.insert(&records)?;
                    }
                    all_records.extend(records);
                }
                Err(e) => {
                    // A failed ZIP never aborts the run
                    warn!("Giving up on ZIP {}: {}", zip_code, e);
                    failed += 1;
                }
            }
        }

        info!(
            "Scraped {} offers from {} ZIP codes ({} failed)",
            all_records.len(),
            zip_codes.len(),
            failed
        );

        // Format output
        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_records(&all_records))
    }

    /// Fetches and parses one ZIP code with bounded retries.
    ///
    /// Only fetch and parse errors are retried; an empty result list is a
    /// valid outcome and returns immediately.
    async fn scrape_zip(
        &self,
        client: &impl RateFetch,
        parser: &Parser,
        zip_code: &str,
    ) -> Result<RateResults> {
        let attempts = self.config.max_retries.max(1);
        let mut last_err = None;

        for attempt in 1..=attempts {
            let outcome = match client.rates(zip_code).await {
                Ok(html) => parser.parse_rates(&html, zip_code),
                Err(e) => Err(e),
            };

            match outcome {
                Ok(results) => return Ok(results),
                Err(e) => {
                    warn!("Attempt {}/{} failed for ZIP {}: {}", attempt, attempts, zip_code, e);
                    last_err = Some(e);
                }
            }
        }

        Err(last_err
            .unwrap_or_else(|| anyhow::anyhow!("Retries exhausted for ZIP {}", zip_code)))
    }
}
