//! Record filtering system with composable filters.

pub mod green;
pub mod price;

use crate::powersetter::RateRecord;

pub use green::GreenFilter;
pub use price::PriceFilter;

/// Trait for filtering rate records.
pub trait Filter: Send + Sync {
    /// Returns true if the record passes the filter.
    fn matches(&self, record: &RateRecord) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if a record passes all filters.
    pub fn matches(&self, record: &RateRecord) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }

    /// Filters a collection of records.
    pub fn apply(&self, records: Vec<RateRecord>) -> Vec<RateRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a FilterChain from configuration.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Adds a price range filter (cents per kWh).
    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        if min.is_some() || max.is_some() {
            self.chain.add(PriceFilter::new(min, max));
        }
        self
    }

    /// Adds a renewable-only filter.
    pub fn green_only(mut self, enabled: bool) -> Self {
        if enabled {
            self.chain.add(GreenFilter::new());
        }
        self
    }

    /// Adds a no-fee filter.
    pub fn no_fee_only(mut self, enabled: bool) -> Self {
        if enabled {
            self.chain.add(NoFeeFilter::new());
        }
        self
    }

    /// Builds the filter chain.
    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Filter that excludes offers carrying a fee.
pub struct NoFeeFilter;

impl NoFeeFilter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoFeeFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for NoFeeFilter {
    fn matches(&self, record: &RateRecord) -> bool {
        !record.has_fee()
    }

    fn description(&self) -> String {
        "No fee".to_string()
    }
}
