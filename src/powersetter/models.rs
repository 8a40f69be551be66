//! Data models for scraped rate cards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One supplier's electricity offer for one ZIP code at scrape time.
///
/// Flat row shape matching the `powersetter` sink table. A record is never
/// constructed without a parsed price; every other field degrades to a
/// documented default when the card lacks it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateRecord {
    /// 5-character postal code, leading zeros preserved
    pub zip_code: String,
    /// Offer price in cents per kWh
    pub price_per_kwh: f64,
    /// Savings label (e.g. "15%"), empty if absent
    pub savings: String,
    /// Contract-length description, "Not specified" if absent
    pub terms: String,
    /// Opaque encoded plan details from the card's more-info button
    pub info: String,
    /// "N" for non-green offers, otherwise the renewable label text
    pub green: String,
    /// Absolute supplier logo URL, empty if absent
    pub supplier_logo_url: String,
    /// Absolute signup URL, empty if absent
    pub signup_url: String,
    /// Utility display name resolved from the ZIP lookup table
    pub utility: String,
    /// Fee description (e.g. "$50"), empty meaning no fee
    pub fee: String,
    /// Extraction timestamp, assigned at record construction
    pub scraped_at: DateTime<Utc>,
}

impl RateRecord {
    /// Returns true if the offer carries a renewable-energy label.
    pub fn is_green(&self) -> bool {
        self.green != "N"
    }

    /// Returns true if the offer carries a fee.
    pub fn has_fee(&self) -> bool {
        !self.fee.is_empty()
    }
}

/// All records extracted from one ZIP code's results page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateResults {
    /// ZIP code the page was fetched for
    pub zip_code: String,
    /// Utility display name resolved for the ZIP code
    pub utility: String,
    /// Records in document order of the discovered cards
    pub records: Vec<RateRecord>,
}

impl RateResults {
    /// Creates an empty result set for a ZIP code.
    pub fn new(zip_code: impl Into<String>, utility: impl Into<String>) -> Self {
        Self { zip_code: zip_code.into(), utility: utility.into(), records: Vec::new() }
    }

    /// Returns the number of records.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records were extracted.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
