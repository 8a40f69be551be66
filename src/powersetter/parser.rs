//! HTML parser for PowerSetter rate-comparison pages.

use crate::powersetter::models::{RateRecord, RateResults};
use crate::powersetter::selectors::{card, cards, errors, logo};
use crate::powersetter::utilities;
use anyhow::Result;
use chrono::Utc;
use scraper::{ElementRef, Html};
use tracing::{debug, trace};

/// Default cap on cards extracted from one results page.
///
/// Bounds work on malformed pages; later cards are not less valid.
pub const DEFAULT_MAX_CARDS: usize = 5;

/// Parser for PowerSetter results pages.
pub struct Parser {
    origin: String,
    max_cards: usize,
}

impl Parser {
    /// Creates a new parser absolutizing URLs against the given site origin.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into().trim_end_matches('/').to_string(),
            max_cards: DEFAULT_MAX_CARDS,
        }
    }

    /// Overrides the per-page card cap.
    pub fn with_max_cards(mut self, max_cards: usize) -> Self {
        self.max_cards = max_cards;
        self
    }

    /// Parses a results page into rate records for one ZIP code.
    ///
    /// An empty record list is a valid outcome (the page may legitimately
    /// have no offers for the ZIP); a challenge or maintenance interstitial
    /// is an error so the caller can tell the two apart.
    pub fn parse_rates(&self, html: &str, zip_code: &str) -> Result<RateResults> {
        let document = Html::parse_document(html);

        // Check for challenge/error pages first
        self.check_for_errors(&document)?;

        let utility = utilities::utility_for_zip(zip_code);
        let mut results = RateResults::new(zip_code, utility);

        let elements = self.locate_cards(&document);
        if elements.is_empty() {
            debug!("No rate cards found for ZIP {}", zip_code);
            return Ok(results);
        }

        for element in elements.into_iter().take(self.max_cards) {
            match self.parse_rate_card(element, zip_code, utility) {
                Some(record) => {
                    trace!(
                        "Parsed offer at {:.2}¢/kWh for ZIP {}",
                        record.price_per_kwh,
                        zip_code
                    );
                    results.records.push(record);
                }
                None => {
                    // No parseable price, skip (placeholder or "call for rate" card)
                    trace!("Skipping card without a parseable price");
                }
            }
        }

        debug!("Parsed {} offers for ZIP {} ({})", results.count(), zip_code, utility);

        Ok(results)
    }

    /// Locates card elements using the first strategy that yields anything.
    fn locate_cards<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        for selector in cards::strategies() {
            let found: Vec<_> = document.select(selector).collect();
            if !found.is_empty() {
                return found;
            }
        }
        Vec::new()
    }

    /// Checks for bot challenges and maintenance interstitials.
    fn check_for_errors(&self, document: &Html) -> Result<()> {
        if document.select(&errors::CAPTCHA).next().is_some() {
            anyhow::bail!(
                "Bot challenge detected. PowerSetter is blocking requests. \
                Try increasing --delay or using a proxy."
            );
        }

        if document.select(&errors::MAINTENANCE).next().is_some() {
            anyhow::bail!(
                "Maintenance page detected. \
                The site may be temporarily unavailable."
            );
        }

        Ok(())
    }

    /// Parses a single rate card into a record.
    ///
    /// Returns `None` when the card has no parseable price - the sole hard
    /// failure condition. Every other field degrades to its default.
    pub fn parse_rate_card(
        &self,
        element: ElementRef,
        zip_code: &str,
        utility: &str,
    ) -> Option<RateRecord> {
        // Price is required; no price means no record
        let price_text =
            element.select(&card::PRICE).next().map(|e| e.text().collect::<String>())?;
        let price_per_kwh = self.parse_price_value(&price_text)?;

        let terms = element
            .select(&card::TERM)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Not specified".to_string());

        let green = element
            .select(&card::GREEN)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string())
            .filter(|g| !g.is_empty())
            .map(|g| {
                if g.eq_ignore_ascii_case("no") || g.eq_ignore_ascii_case("n") {
                    "N".to_string()
                } else {
                    g
                }
            })
            .unwrap_or_else(|| "N".to_string());

        let fee = self.parse_fee(element);
        let savings = self.parse_savings(element);

        let info = element
            .select(&card::INFO_BUTTON)
            .next()
            .and_then(|e| e.value().attr(card::INFO_ATTR))
            .unwrap_or_default()
            .to_string();

        let signup_url = self.parse_signup_url(element);
        let supplier_logo_url = self.parse_logo_url(element);

        Some(RateRecord {
            zip_code: zip_code.to_string(),
            price_per_kwh,
            savings,
            terms,
            info,
            green,
            supplier_logo_url,
            signup_url,
            utility: utility.to_string(),
            fee,
            scraped_at: Utc::now(),
        })
    }

    /// Parses the first decimal run like "9.85" out of price text such as
    /// "9.85¢ / kWh". A whole number alone does not qualify as a rate.
    fn parse_price_value(&self, text: &str) -> Option<f64> {
        let chars: Vec<char> = text.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            if !chars[i].is_ascii_digit() {
                i += 1;
                continue;
            }

            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }

            // Require a fractional part; keep scanning past bare integers
            if i + 1 < chars.len() && chars[i] == '.' && chars[i + 1].is_ascii_digit() {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
                let run: String = chars[start..i].iter().collect();
                return run.parse().ok();
            }
        }

        None
    }

    /// Extracts the fee description.
    ///
    /// The card-level data attribute wins; "0" and empty mean no fee. The
    /// text fallback treats anything containing a "no fee" phrase as empty.
    fn parse_fee(&self, element: ElementRef) -> String {
        if let Some(fee) = element.value().attr(card::FEE_ATTR) {
            if fee.is_empty() || fee == "0" {
                return String::new();
            }
            return format!("${}", fee);
        }

        element
            .select(&card::FEE)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty() && !t.to_lowercase().contains("no fee"))
            .unwrap_or_default()
    }

    /// Extracts the savings badge, ignoring badges the page inline-hides.
    fn parse_savings(&self, element: ElementRef) -> String {
        element
            .select(&card::SAVINGS)
            .next()
            .filter(|e| !is_inline_hidden(e))
            .map(|e| e.text().collect::<String>().trim().to_string())
            .unwrap_or_default()
    }

    /// Extracts and absolutizes the signup URL.
    fn parse_signup_url(&self, element: ElementRef) -> String {
        let raw = element
            .select(&card::SIGNUP_BUTTON)
            .next()
            .and_then(|e| e.value().attr(card::SIGNUP_ATTR))
            .or_else(|| {
                element.select(&card::SIGNUP_LINK).next().and_then(|e| e.value().attr("href"))
            });

        raw.map(|u| self.normalize_url(u)).unwrap_or_default()
    }

    /// Extracts and absolutizes the supplier logo URL.
    ///
    /// Inside the designated logo container: image source attributes
    /// (including lazy-load variants), then an inline background-image,
    /// then a branded nested image. Without a container: generic logo-like
    /// elements anywhere in the card. Absence of a logo is valid.
    fn parse_logo_url(&self, element: ElementRef) -> String {
        if let Some(container) = element.select(&logo::CONTAINER).next() {
            for img in container.select(&logo::IMG) {
                for attr in logo::IMG_SRC_ATTRS {
                    if let Some(src) = img.value().attr(attr) {
                        if !src.trim().is_empty() {
                            return self.normalize_url(src);
                        }
                    }
                }
            }

            if let Some(url) = container.value().attr("style").and_then(background_image_url) {
                return self.normalize_url(url);
            }

            if let Some(src) =
                container.select(&logo::NESTED_BRANDED).next().and_then(|e| e.value().attr("src"))
            {
                return self.normalize_url(src);
            }

            return String::new();
        }

        element
            .select(&logo::GENERIC)
            .next()
            .and_then(|e| e.value().attr("src"))
            .map(|src| self.normalize_url(src))
            .unwrap_or_default()
    }

    /// Absolutizes a URL against the configured site origin.
    pub fn normalize_url(&self, raw: &str) -> String {
        let raw = raw.trim();

        if raw.is_empty() {
            return String::new();
        }
        if let Some(rest) = raw.strip_prefix("//") {
            return format!("https://{}", rest);
        }
        if raw.starts_with("http://") || raw.starts_with("https://") {
            return raw.to_string();
        }
        if raw.starts_with('/') {
            return format!("{}{}", self.origin, raw);
        }
        format!("{}/{}", self.origin, raw)
    }
}

/// Returns true when an element is hidden via an inline display:none.
fn is_inline_hidden(element: &ElementRef) -> bool {
    element
        .value()
        .attr("style")
        .is_some_and(|style| style.replace(' ', "").contains("display:none"))
}

/// Extracts the target of a CSS `background-image: url(...)` declaration.
fn background_image_url(style: &str) -> Option<&str> {
    let decl = &style[style.find("background-image")?..];
    let rest = &decl[decl.find("url(")? + 4..];
    let url = rest[..rest.find(')')?].trim();
    Some(url.trim_matches(|c| c == '"' || c == '\''))
}
