//! powersetter-crawler - Stateless PowerSetter electricity-rate scraper CLI
//!
//! Drives rate-comparison pages on PowerSetter.com and extracts flat
//! rate-card records, one ZIP code at a time.

pub mod commands;
pub mod config;
pub mod filters;
pub mod format;
pub mod powersetter;
pub mod store;

pub use config::Config;
pub use powersetter::models::{RateRecord, RateResults};
pub use powersetter::utilities;
