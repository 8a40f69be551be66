//! Renewable-energy filter.

use super::Filter;
use crate::powersetter::RateRecord;

/// Filters to only include offers with a renewable-energy label.
pub struct GreenFilter;

impl GreenFilter {
    /// Creates a new green filter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for GreenFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for GreenFilter {
    fn matches(&self, record: &RateRecord) -> bool {
        record.is_green()
    }

    fn description(&self) -> String {
        "Green only".to_string()
    }
}
